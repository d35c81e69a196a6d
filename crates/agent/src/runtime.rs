use std::sync::Arc;

use anyhow::{Context, Result};
use campus_core::config::AppConfig;
use campus_core::directory::CampusDirectory;
use campus_core::domain::extraction::ExtractionResult;
use campus_core::errors::ApplicationError;
use campus_core::lexicon::Lexicon;
use serde::Serialize;

use crate::classifier::Classifier;
use crate::dispatcher::ResponseDispatcher;
use crate::formatting::split_message;
use crate::morph::{reducer_from_config, MorphReducer};
use crate::normalizer::Normalizer;
use crate::roster::{RosterIndex, SharedRoster};
use crate::sanitize::sanitize_input;

/// Classification plus the reply split into transport-sized chunks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reply {
    #[serde(flatten)]
    pub result: ExtractionResult,
    pub chunks: Vec<String>,
}

pub struct AgentRuntime {
    classifier: Classifier,
    dispatcher: ResponseDispatcher,
    directory: Arc<dyn CampusDirectory>,
    roster: Arc<SharedRoster>,
    max_query_chars: usize,
    max_message_chars: usize,
}

impl AgentRuntime {
    /// Builds the pipeline from configuration and loads the roster from the directory.
    ///
    /// An unavailable directory leaves the roster empty; surname matching is then skipped.
    pub async fn bootstrap(config: &AppConfig, directory: Arc<dyn CampusDirectory>) -> Result<Self> {
        let reducer = reducer_from_config(&config.nlp).context("loading morphological reducer")?;
        let runtime = Self::with_reducer(config, directory, reducer)?;
        if let Err(error) = runtime.reload_roster().await {
            tracing::warn!(
                event_name = "roster.load.failed",
                correlation_id = "bootstrap",
                error = %error,
                "starting with an empty roster"
            );
        }
        Ok(runtime)
    }

    /// Same pipeline with an explicit reducer and an empty roster.
    pub fn with_reducer(
        config: &AppConfig,
        directory: Arc<dyn CampusDirectory>,
        reducer: Arc<dyn MorphReducer>,
    ) -> Result<Self> {
        let lexicon = Arc::new(Lexicon::russian());
        let normalizer = Normalizer::new(reducer, Arc::clone(&lexicon));
        let roster = Arc::new(SharedRoster::new(RosterIndex::empty()));
        let classifier = Classifier::new(lexicon, normalizer, Arc::clone(&roster))
            .context("building classifier")?;

        Ok(Self {
            classifier,
            dispatcher: ResponseDispatcher::new(Arc::clone(&directory)),
            directory,
            roster,
            max_query_chars: config.nlp.max_query_chars,
            max_message_chars: config.nlp.max_message_chars,
        })
    }

    pub fn classify(&self, text: &str) -> Option<ExtractionResult> {
        let sanitized = sanitize_input(text, self.max_query_chars);
        self.classifier.classify(&sanitized)
    }

    /// `None` for bot commands; otherwise the classification and the rendered reply.
    pub async fn handle_message(&self, text: &str) -> Option<Reply> {
        let result = self.classify(text)?;
        let reply = self.dispatcher.respond(&result).await;
        let chunks = split_message(&reply, self.max_message_chars);
        Some(Reply { result, chunks })
    }

    /// Rebuilds the roster from the directory and swaps it in. Returns the new size.
    pub async fn reload_roster(&self) -> Result<usize, ApplicationError> {
        let teachers = self.directory.teachers().await?;
        let entries = self.roster.replace(RosterIndex::from_profiles(&teachers));
        tracing::info!(
            event_name = "roster.reload.completed",
            entries,
            "roster swapped in"
        );
        Ok(entries)
    }

    pub fn roster_size(&self) -> usize {
        self.roster.snapshot().len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use campus_core::config::AppConfig;
    use campus_core::directory::CampusDirectory;
    use campus_core::domain::category::Category;
    use campus_core::domain::directory::{
        CampusEvent, DocumentInfo, Dormitory, NavigationPoint, SportSection, TeacherId,
        TeacherProfile,
    };
    use campus_core::domain::extraction::ExtractionResult;
    use campus_core::errors::ApplicationError;

    use super::AgentRuntime;

    struct OneTeacher {
        available: bool,
    }

    impl OneTeacher {
        fn profile() -> TeacherProfile {
            TeacherProfile {
                id: TeacherId(7),
                surname: "Орлова".to_string(),
                given_name: "Анна".to_string(),
                patronymic: "Сергеевна".to_string(),
                position: None,
                room: Some("105".to_string()),
                disciplines: vec!["экономика".to_string()],
            }
        }

        fn guard(&self) -> Result<(), ApplicationError> {
            if self.available {
                Ok(())
            } else {
                Err(ApplicationError::Persistence("no such table: teacher".to_string()))
            }
        }
    }

    #[async_trait]
    impl CampusDirectory for OneTeacher {
        async fn teachers(&self) -> Result<Vec<TeacherProfile>, ApplicationError> {
            self.guard()?;
            Ok(vec![Self::profile()])
        }

        async fn find_teachers_by_surname(
            &self,
            surname: &str,
        ) -> Result<Vec<TeacherProfile>, ApplicationError> {
            self.guard()?;
            Ok(if "орлова".contains(surname) { vec![Self::profile()] } else { Vec::new() })
        }

        async fn find_teachers_by_discipline(
            &self,
            _discipline: &str,
        ) -> Result<Vec<TeacherProfile>, ApplicationError> {
            self.guard()?;
            Ok(Vec::new())
        }

        async fn sport_sections(&self) -> Result<Vec<SportSection>, ApplicationError> {
            Ok(Vec::new())
        }

        async fn documents(&self) -> Result<Vec<DocumentInfo>, ApplicationError> {
            Ok(Vec::new())
        }

        async fn events(&self) -> Result<Vec<CampusEvent>, ApplicationError> {
            Ok(Vec::new())
        }

        async fn dormitories(&self) -> Result<Vec<Dormitory>, ApplicationError> {
            Ok(Vec::new())
        }

        async fn navigation_points(&self) -> Result<Vec<NavigationPoint>, ApplicationError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn bootstrap_loads_roster_and_answers() {
        let runtime =
            AgentRuntime::bootstrap(&AppConfig::default(), Arc::new(OneTeacher { available: true }))
                .await
                .expect("runtime");

        assert_eq!(runtime.roster_size(), 1);

        let reply = runtime.handle_message("кто такая Орлова?").await.expect("not a command");
        assert_eq!(
            reply.result,
            ExtractionResult::single(Category::Teacher, "Орлова Анна Сергеевна")
        );
        assert!(reply.chunks[0].contains("Кабинет: 105"));
    }

    #[tokio::test]
    async fn unavailable_directory_starts_with_empty_roster() {
        let runtime = AgentRuntime::bootstrap(
            &AppConfig::default(),
            Arc::new(OneTeacher { available: false }),
        )
        .await
        .expect("runtime still starts");

        assert_eq!(runtime.roster_size(), 0);
        assert!(runtime.reload_roster().await.is_err());
    }

    #[tokio::test]
    async fn commands_and_control_characters() {
        let runtime =
            AgentRuntime::bootstrap(&AppConfig::default(), Arc::new(OneTeacher { available: true }))
                .await
                .expect("runtime");

        assert!(runtime.handle_message("/start").await.is_none());
        assert_eq!(
            runtime.classify("где\u{0} библиотека"),
            Some(ExtractionResult::single(Category::Navigation, "library"))
        );
    }
}
