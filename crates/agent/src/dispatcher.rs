//! Turns a classified question into reply text using the campus directory.

use std::sync::Arc;

use campus_core::directory::CampusDirectory;
use campus_core::domain::category::Category;
use campus_core::domain::directory::{NavigationPoint, TeacherProfile};
use campus_core::domain::extraction::ExtractionResult;
use campus_core::domain::location::Location;
use campus_core::errors::ApplicationError;

use crate::formatting::format_disciplines;

pub const ASK_MORE_SPECIFIC: &str = "Пожалуйста, сформулируйте вопрос подробнее.";
pub const NOT_UNDERSTOOD: &str = "Извините, я не смог понять ваш вопрос. Попробуйте переформулировать или выберите пункт из меню.";
pub const PROCESSING_FAILED: &str =
    "Произошла ошибка при обработке запроса. Пожалуйста, попробуйте позже.";

const SPORT_UNAVAILABLE: &str = "К сожалению, информация о спортивных секциях временно недоступна. Рекомендую обратиться на кафедру физической культуры.";
const DOCUMENTS_UNAVAILABLE: &str = "К сожалению, информация о документах временно недоступна. Рекомендую обратиться в учебную часть.";
const EVENTS_UNAVAILABLE: &str = "На данный момент нет запланированных мероприятий. Информация о будущих событиях появится позже.";
const DORMITORIES_UNAVAILABLE: &str = "К сожалению, информация об общежитиях временно недоступна. Рекомендуем обратиться в учебную часть.";
const NAVIGATION_UNAVAILABLE: &str = "Извините, информация о расположении помещений временно недоступна. Обратитесь на ресепшн при входе в здание.";

pub struct ResponseDispatcher {
    directory: Arc<dyn CampusDirectory>,
}

impl ResponseDispatcher {
    pub fn new(directory: Arc<dyn CampusDirectory>) -> Self {
        Self { directory }
    }

    /// Reply text for a classified question. Store failures are logged and rendered as a
    /// generic apology; they never reach the student as errors.
    pub async fn respond(&self, result: &ExtractionResult) -> String {
        match self.try_respond(result).await {
            Ok(text) => text,
            Err(error) => {
                tracing::error!(
                    event_name = "dispatch.respond.failed",
                    category = %result.category,
                    error = %error,
                    "directory lookup failed"
                );
                PROCESSING_FAILED.to_string()
            }
        }
    }

    pub async fn try_respond(&self, result: &ExtractionResult) -> Result<String, ApplicationError> {
        let Some(primary) = result.primary_entity() else {
            return Ok(ASK_MORE_SPECIFIC.to_string());
        };

        match result.category {
            Category::Teacher => self.teacher(primary).await,
            Category::Discipline => self.discipline(primary).await,
            Category::Navigation => self.navigation(&result.entities).await,
            Category::Sport => self.sport().await,
            Category::Document => self.documents().await,
            Category::Event => self.events().await,
            Category::Dormitory => self.dormitories().await,
            Category::Unknown => Ok(NOT_UNDERSTOOD.to_string()),
        }
    }

    async fn teacher(&self, query: &str) -> Result<String, ApplicationError> {
        let surname = query.split_whitespace().next().unwrap_or_default().to_lowercase();

        let mut profiles = self.directory.find_teachers_by_surname(&surname).await?;
        if profiles.is_empty() && surname.chars().count() > 1 {
            let without_first: String = surname.chars().skip(1).collect();
            tracing::debug!(
                event_name = "dispatch.teacher.retry_without_first_letter",
                surname = %surname,
                retry = %without_first,
                "no teacher found, retrying without the first letter"
            );
            profiles = self.directory.find_teachers_by_surname(&without_first).await?;
        }

        if profiles.is_empty() {
            return Ok(format!(
                "Преподаватель «{query}» не найден. Проверьте написание фамилии или \
                 воспользуйтесь поиском в меню «Преподаватели»."
            ));
        }

        Ok(profiles.iter().map(render_teacher).collect::<Vec<_>>().join("\n\n"))
    }

    async fn discipline(&self, label: &str) -> Result<String, ApplicationError> {
        let teachers = self.directory.find_teachers_by_discipline(label).await?;

        if teachers.is_empty() {
            return Ok(format!(
                "📚 Дисциплина «{label}»\n\nПреподаватели этой дисциплины пока не указаны в \
                 справочнике."
            ));
        }

        let mut reply = format!("📚 Дисциплина «{label}»\n\nВедут:\n");
        for teacher in &teachers {
            reply.push_str(&format!("• {}", teacher.full_name()));
            if let Some(room) = &teacher.room {
                reply.push_str(&format!(" (кабинет {room})"));
            }
            reply.push('\n');
        }
        Ok(reply.trim_end().to_string())
    }

    async fn navigation(&self, entities: &[String]) -> Result<String, ApplicationError> {
        let points = self.directory.navigation_points().await?;
        if points.is_empty() {
            return Ok(format!("🏢 Навигация по колледжу\n\n{NAVIGATION_UNAVAILABLE}"));
        }

        let requested = entities.iter().find_map(|entity| Location::from_tag(entity));
        let card = requested
            .and_then(|location| points.iter().find(|point| point.tag == location.tag()));

        Ok(match card {
            Some(point) => render_navigation_point(point),
            None => render_campus_map(&points),
        })
    }

    async fn sport(&self) -> Result<String, ApplicationError> {
        let sections = self.directory.sport_sections().await?;
        if sections.is_empty() {
            return Ok(SPORT_UNAVAILABLE.to_string());
        }

        let mut reply = String::from("🏆 Спортивные секции колледжа\n\n");
        for section in &sections {
            reply.push_str(&format!("🎯 {}\n", section.name));
            reply.push_str(&format!("Тренер: {}\n", or_unknown(&section.coach, "Не указан")));
            reply.push_str(&format!(
                "Место проведения: {}\n",
                or_unknown(&section.location, "Не указано")
            ));
            reply.push_str(&format!(
                "Расписание: {}\n\n",
                or_unknown(&section.schedule, "Не указано")
            ));
        }
        reply.push_str("Для записи в секцию обратитесь к тренеру или на кафедру физической культуры.");
        Ok(reply)
    }

    async fn documents(&self) -> Result<String, ApplicationError> {
        let documents = self.directory.documents().await?;
        if documents.is_empty() {
            return Ok(DOCUMENTS_UNAVAILABLE.to_string());
        }

        let mut reply = String::from("📄 Документы и справки\n\n");
        for document in &documents {
            reply.push_str(&format!("📑 {}\n", document.name));
            reply.push_str(&format!(
                "{}\n",
                or_unknown(&document.description, "Описание отсутствует")
            ));
            if let Some(url) = &document.template_url {
                reply.push_str(&format!("Бланк: {url}\n"));
            }
            reply.push('\n');
        }
        reply.push_str(
            "Справки выдаются в учебной части в течение 3 рабочих дней. При себе необходимо \
             иметь студенческий билет или паспорт.",
        );
        Ok(reply)
    }

    async fn events(&self) -> Result<String, ApplicationError> {
        let events = self.directory.events().await?;
        if events.is_empty() {
            return Ok(format!("🎉 Мероприятия колледжа\n\n{EVENTS_UNAVAILABLE}"));
        }

        let mut reply = String::from("🎉 Ближайшие мероприятия колледжа\n\n");
        for event in &events {
            reply.push_str(&format!("📌 {}\n", event.title));
            reply.push_str(&format!(
                "Дата и время: {}\n",
                or_unknown(&event.starts_at, "Дата не указана")
            ));
            reply.push_str(&format!(
                "Место проведения: {}\n\n",
                or_unknown(&event.location, "Место не указано")
            ));
        }
        reply.push_str("Записаться можно у организаторов или через студенческий совет.");
        Ok(reply)
    }

    async fn dormitories(&self) -> Result<String, ApplicationError> {
        let dormitories = self.directory.dormitories().await?;
        if dormitories.is_empty() {
            return Ok(format!("🏠 Общежития колледжа\n\n{DORMITORIES_UNAVAILABLE}"));
        }

        let mut reply = String::from("🏠 Общежития колледжа\n\n");
        for dormitory in &dormitories {
            reply.push_str(&format!("🏢 Общежитие №{}\n", dormitory.number));
            reply.push_str(&format!("Адрес: {}\n", or_unknown(&dormitory.address, "Не указан")));
            reply.push_str(&format!("Комендант: {}\n", or_unknown(&dormitory.warden, "Не указан")));
            reply.push_str(&format!(
                "Телефон: {}\n\n",
                or_unknown(&dormitory.phone, "Не указан")
            ));
        }
        reply.push_str("Подробности о заселении и стоимости проживания уточняйте в учебной части.");
        Ok(reply)
    }
}

fn render_teacher(profile: &TeacherProfile) -> String {
    let mut card = format!("👨‍🏫 {}\n", profile.full_name());
    if let Some(position) = &profile.position {
        card.push_str(&format!("Должность: {position}\n"));
    }
    if let Some(room) = &profile.room {
        card.push_str(&format!("Кабинет: {room}\n"));
    }
    card.push_str("\nДисциплины:\n");
    card.push_str(&format_disciplines(&profile.disciplines));
    card
}

fn render_navigation_point(point: &NavigationPoint) -> String {
    let mut card = format!("📍 {}\n\n", point.title);
    match (&point.floor, &point.room) {
        (Some(floor), Some(room)) => card.push_str(&format!("{floor} этаж, кабинет {room}\n")),
        (Some(floor), None) => card.push_str(&format!("{floor} этаж\n")),
        (None, Some(room)) => card.push_str(&format!("Кабинет {room}\n")),
        (None, None) => {}
    }
    if let Some(hours) = &point.hours {
        card.push_str(&format!("Часы работы: {hours}\n"));
    }
    if let Some(notes) = &point.notes {
        card.push_str(&format!("\n{notes}\n"));
    }
    card.trim_end().to_string()
}

fn render_campus_map(points: &[NavigationPoint]) -> String {
    let mut map = String::from("🏢 Навигация по колледжу\n\n");
    for point in points {
        let place = match (&point.floor, &point.room) {
            (Some(floor), Some(room)) => format!("{floor} этаж, кабинет {room}"),
            (Some(floor), None) => format!("{floor} этаж"),
            (None, Some(room)) => format!("кабинет {room}"),
            (None, None) => "уточните на ресепшн".to_string(),
        };
        map.push_str(&format!("• {}: {place}\n", point.title));
    }
    map.push_str(
        "\nСпросите, например: «Где находится библиотека?» или «Как пройти в столовую?»",
    );
    map
}

fn or_unknown<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    value.as_deref().filter(|text| !text.trim().is_empty()).unwrap_or(placeholder)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use campus_core::directory::CampusDirectory;
    use campus_core::domain::category::Category;
    use campus_core::domain::directory::{
        CampusEvent, DocumentInfo, Dormitory, NavigationPoint, SportSection, TeacherId,
        TeacherProfile,
    };
    use campus_core::domain::extraction::ExtractionResult;
    use campus_core::errors::ApplicationError;

    use super::{ResponseDispatcher, ASK_MORE_SPECIFIC, NOT_UNDERSTOOD, PROCESSING_FAILED};

    #[derive(Default)]
    struct StubDirectory {
        teachers: Vec<TeacherProfile>,
        navigation: Vec<NavigationPoint>,
        sport: Vec<SportSection>,
        surname_queries: Mutex<Vec<String>>,
        broken: bool,
    }

    impl StubDirectory {
        fn check(&self) -> Result<(), ApplicationError> {
            if self.broken {
                return Err(ApplicationError::Persistence("database is locked".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CampusDirectory for StubDirectory {
        async fn teachers(&self) -> Result<Vec<TeacherProfile>, ApplicationError> {
            self.check()?;
            Ok(self.teachers.clone())
        }

        async fn find_teachers_by_surname(
            &self,
            surname: &str,
        ) -> Result<Vec<TeacherProfile>, ApplicationError> {
            self.check()?;
            self.surname_queries.lock().expect("lock").push(surname.to_string());
            Ok(self
                .teachers
                .iter()
                .filter(|teacher| teacher.surname.to_lowercase().contains(surname))
                .cloned()
                .collect())
        }

        async fn find_teachers_by_discipline(
            &self,
            discipline: &str,
        ) -> Result<Vec<TeacherProfile>, ApplicationError> {
            self.check()?;
            let needle = discipline.to_lowercase();
            Ok(self
                .teachers
                .iter()
                .filter(|teacher| {
                    teacher.disciplines.iter().any(|name| name.to_lowercase().contains(&needle))
                })
                .cloned()
                .collect())
        }

        async fn sport_sections(&self) -> Result<Vec<SportSection>, ApplicationError> {
            self.check()?;
            Ok(self.sport.clone())
        }

        async fn documents(&self) -> Result<Vec<DocumentInfo>, ApplicationError> {
            self.check()?;
            Ok(Vec::new())
        }

        async fn events(&self) -> Result<Vec<CampusEvent>, ApplicationError> {
            self.check()?;
            Ok(Vec::new())
        }

        async fn dormitories(&self) -> Result<Vec<Dormitory>, ApplicationError> {
            self.check()?;
            Ok(Vec::new())
        }

        async fn navigation_points(&self) -> Result<Vec<NavigationPoint>, ApplicationError> {
            self.check()?;
            Ok(self.navigation.clone())
        }
    }

    fn petrov() -> TeacherProfile {
        TeacherProfile {
            id: TeacherId(1),
            surname: "Петров".to_string(),
            given_name: "Пётр".to_string(),
            patronymic: "Петрович".to_string(),
            position: Some("Преподаватель".to_string()),
            room: Some("214".to_string()),
            disciplines: vec!["математика".to_string(), "МДК 01.01".to_string()],
        }
    }

    fn library() -> NavigationPoint {
        NavigationPoint {
            tag: "library".to_string(),
            title: "Библиотека".to_string(),
            floor: Some("3".to_string()),
            room: Some("312".to_string()),
            hours: Some("Пн-Пт 9:00-17:00".to_string()),
            notes: None,
        }
    }

    fn dispatcher(directory: StubDirectory) -> (ResponseDispatcher, Arc<StubDirectory>) {
        let directory = Arc::new(directory);
        (ResponseDispatcher::new(directory.clone()), directory)
    }

    #[tokio::test]
    async fn teacher_card_lists_disciplines() {
        let (dispatcher, _) =
            dispatcher(StubDirectory { teachers: vec![petrov()], ..StubDirectory::default() });

        let reply = dispatcher
            .respond(&ExtractionResult::single(Category::Teacher, "Петров Пётр Петрович"))
            .await;

        assert!(reply.contains("Петров Пётр Петрович"));
        assert!(reply.contains("Кабинет: 214"));
        assert!(reply.contains("• Математика\n• МДК 01.01"));
    }

    #[tokio::test]
    async fn teacher_search_retries_without_first_letter() {
        let (dispatcher, directory) =
            dispatcher(StubDirectory { teachers: vec![petrov()], ..StubDirectory::default() });

        let reply = dispatcher.respond(&ExtractionResult::single(Category::Teacher, "бетров")).await;

        assert!(reply.contains("Петров Пётр Петрович"));
        assert_eq!(
            *directory.surname_queries.lock().expect("lock"),
            vec!["бетров".to_string(), "етров".to_string()]
        );
    }

    #[tokio::test]
    async fn unknown_teacher_gets_fallback_text() {
        let (dispatcher, _) = dispatcher(StubDirectory::default());

        let reply =
            dispatcher.respond(&ExtractionResult::single(Category::Teacher, "сидорова")).await;

        assert!(reply.contains("«сидорова» не найден"));
    }

    #[tokio::test]
    async fn discipline_lists_its_teachers() {
        let (dispatcher, _) =
            dispatcher(StubDirectory { teachers: vec![petrov()], ..StubDirectory::default() });

        let reply =
            dispatcher.respond(&ExtractionResult::single(Category::Discipline, "Математика")).await;

        assert!(reply.contains("Дисциплина «Математика»"));
        assert!(reply.contains("• Петров Пётр Петрович (кабинет 214)"));
    }

    #[tokio::test]
    async fn navigation_tag_renders_location_card() {
        let (dispatcher, _) =
            dispatcher(StubDirectory { navigation: vec![library()], ..StubDirectory::default() });

        let reply =
            dispatcher.respond(&ExtractionResult::single(Category::Navigation, "library")).await;

        assert!(reply.starts_with("📍 Библиотека"));
        assert!(reply.contains("3 этаж, кабинет 312"));
    }

    #[tokio::test]
    async fn general_navigation_renders_campus_map() {
        let (dispatcher, _) =
            dispatcher(StubDirectory { navigation: vec![library()], ..StubDirectory::default() });

        let reply = dispatcher
            .respond(&ExtractionResult::new(
                Category::Navigation,
                vec!["аудитория".to_string(), "305".to_string()],
            ))
            .await;

        assert!(reply.starts_with("🏢 Навигация по колледжу"));
        assert!(reply.contains("• Библиотека: 3 этаж, кабинет 312"));
    }

    #[tokio::test]
    async fn empty_store_yields_category_specific_fallbacks() {
        let (dispatcher, _) = dispatcher(StubDirectory::default());

        let sport = dispatcher
            .respond(&ExtractionResult::new(Category::Sport, vec!["секция".to_string()]))
            .await;
        let navigation =
            dispatcher.respond(&ExtractionResult::single(Category::Navigation, "library")).await;
        let dormitory = dispatcher
            .respond(&ExtractionResult::new(Category::Dormitory, vec!["общежитие".to_string()]))
            .await;

        assert!(sport.contains("спортивных секциях временно недоступна"));
        assert!(navigation.contains("расположении помещений временно недоступна"));
        assert!(dormitory.contains("общежитиях временно недоступна"));
    }

    #[tokio::test]
    async fn sport_rows_are_listed() {
        let (dispatcher, _) = dispatcher(StubDirectory {
            sport: vec![SportSection {
                name: "Волейбол".to_string(),
                coach: Some("Орлов Д. И.".to_string()),
                location: None,
                schedule: Some("Вт, Чт 16:00".to_string()),
            }],
            ..StubDirectory::default()
        });

        let reply = dispatcher
            .respond(&ExtractionResult::new(Category::Sport, vec!["волейбол".to_string()]))
            .await;

        assert!(reply.contains("🎯 Волейбол"));
        assert!(reply.contains("Место проведения: Не указано"));
    }

    #[tokio::test]
    async fn empty_entities_ask_for_detail_in_every_category() {
        let (dispatcher, _) = dispatcher(StubDirectory::default());

        let vague = dispatcher.respond(&ExtractionResult::new(Category::Event, Vec::new())).await;
        let stop_words_only = dispatcher.respond(&ExtractionResult::unknown()).await;
        let unmatched = dispatcher
            .respond(&ExtractionResult::new(Category::Unknown, vec!["абракадабра".to_string()]))
            .await;

        assert_eq!(vague, ASK_MORE_SPECIFIC);
        assert_eq!(stop_words_only, ASK_MORE_SPECIFIC);
        assert_eq!(unmatched, NOT_UNDERSTOOD);
    }

    #[tokio::test]
    async fn store_failure_is_rendered_as_apology() {
        let (dispatcher, _) =
            dispatcher(StubDirectory { broken: true, ..StubDirectory::default() });

        let reply = dispatcher
            .respond(&ExtractionResult::new(Category::Document, vec!["справка".to_string()]))
            .await;

        assert_eq!(reply, PROCESSING_FAILED);
    }
}
