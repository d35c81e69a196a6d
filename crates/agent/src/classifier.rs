//! Priority-ordered decision chain that turns a question into a category and entities.
//!
//! Every rule is a [`DecisionStep`]; the [`Classifier`] runs them in list order and the first
//! step that returns a result wins. Anything that goes wrong inside the chain, panics
//! included, is absorbed here and reported as an unknown question with no entities.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use campus_core::domain::category::Category;
use campus_core::domain::extraction::ExtractionResult;
use campus_core::domain::location::Location;
use campus_core::lexicon::Lexicon;
use thiserror::Error;

use crate::extractors::{capitalize, EntityExtractors, LocationMatch};
use crate::normalizer::Normalizer;
use crate::roster::SharedRoster;

const MIN_NAME_CHARS: usize = 4;
const MIN_FUZZY_CHARS: usize = 4;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("invalid extractor pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("decision step `{step}` failed: {message}")]
    StepFailed { step: &'static str, message: String },
    #[error("decision chain panicked: {0}")]
    Panicked(String),
}

/// Everything the decision steps may look at for one question.
#[derive(Clone, Debug)]
pub struct QueryContext {
    pub lowered: String,
    /// Normalized tokens followed by the teacher-phrase capture, if any.
    pub tokens: Vec<String>,
    capitalized: Vec<bool>,
}

impl QueryContext {
    pub fn build(text: &str, normalizer: &Normalizer, extractors: &EntityExtractors) -> Self {
        let lowered = text.to_lowercase();
        let words = normalizer.analyze(text);

        let mut capitalized = words.iter().map(|word| word.is_name_cased()).collect::<Vec<_>>();
        let mut tokens = words.into_iter().map(|word| word.lemma).collect::<Vec<_>>();

        if let Some(name) = extractors.teacher_phrase(&lowered) {
            tracing::debug!(
                event_name = "nlp.classify.teacher_phrase",
                candidate = %name,
                "teacher phrase matched"
            );
            tokens.push(name);
            capitalized.push(false);
        }

        Self { lowered, tokens, capitalized }
    }

    pub fn from_parts(lowered: &str, tokens: &[&str], capitalized: &[bool]) -> Self {
        let mut flags = capitalized.to_vec();
        flags.resize(tokens.len(), false);
        Self {
            lowered: lowered.to_string(),
            tokens: tokens.iter().map(|token| token.to_string()).collect(),
            capitalized: flags,
        }
    }

    /// Tokens paired with whether the source word was capitalized mid-sentence.
    pub fn tokens_with_case(&self) -> impl Iterator<Item = (&str, bool)> {
        self.tokens.iter().map(String::as_str).zip(self.capitalized.iter().copied())
    }

    fn mentions_any(&self, phrases: &[String]) -> bool {
        phrases.iter().any(|phrase| self.lowered.contains(phrase.as_str()))
    }
}

pub trait DecisionStep: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(&self, query: &QueryContext) -> Result<Option<ExtractionResult>, ClassifyError>;
}

/// "Кто ведёт ..." questions resolve straight to the course being taught.
pub struct TeachingContextStep {
    lexicon: Arc<Lexicon>,
}

impl TeachingContextStep {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }
}

impl DecisionStep for TeachingContextStep {
    fn name(&self) -> &'static str {
        "teaching_context"
    }

    fn evaluate(&self, query: &QueryContext) -> Result<Option<ExtractionResult>, ClassifyError> {
        if !query.mentions_any(&self.lexicon.teaching_markers) {
            return Ok(None);
        }

        let found = query.tokens.iter().find_map(|token| {
            self.lexicon
                .disciplines
                .iter()
                .find(|name| related_to_course(token, name))
                .map(|name| capitalize(name))
        });
        Ok(found.map(|label| ExtractionResult::single(Category::Discipline, label)))
    }
}

fn related_to_course(token: &str, course: &str) -> bool {
    token.contains(course)
        || (token.chars().count() >= MIN_NAME_CHARS && course.contains(token))
}

/// A known surname anywhere in the question outranks every later signal.
pub struct RosterStep {
    roster: Arc<SharedRoster>,
}

impl RosterStep {
    pub fn new(roster: Arc<SharedRoster>) -> Self {
        Self { roster }
    }
}

impl DecisionStep for RosterStep {
    fn name(&self) -> &'static str {
        "roster_surname"
    }

    fn evaluate(&self, query: &QueryContext) -> Result<Option<ExtractionResult>, ClassifyError> {
        let roster = self.roster.snapshot();
        if roster.is_empty() {
            return Ok(None);
        }

        Ok(query
            .tokens
            .iter()
            .find_map(|token| roster.lookup(token))
            .map(|full_name| ExtractionResult::single(Category::Teacher, full_name)))
    }
}

pub struct NavigationPhraseStep {
    extractors: Arc<EntityExtractors>,
}

impl NavigationPhraseStep {
    pub fn new(extractors: Arc<EntityExtractors>) -> Self {
        Self { extractors }
    }
}

impl DecisionStep for NavigationPhraseStep {
    fn name(&self) -> &'static str {
        "navigation_phrase"
    }

    fn evaluate(&self, query: &QueryContext) -> Result<Option<ExtractionResult>, ClassifyError> {
        Ok(self.extractors.location_phrase(&query.lowered, &query.tokens).map(|found| match found {
            LocationMatch::Named(location) => {
                ExtractionResult::single(Category::Navigation, location.tag())
            }
            LocationMatch::General(tokens) => ExtractionResult::new(Category::Navigation, tokens),
        }))
    }
}

/// "Преподаватель ..." followed by a plausible name that is not in the roster.
pub struct TeacherMentionStep {
    lexicon: Arc<Lexicon>,
}

impl TeacherMentionStep {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }
}

impl DecisionStep for TeacherMentionStep {
    fn name(&self) -> &'static str {
        "teacher_mention"
    }

    fn evaluate(&self, query: &QueryContext) -> Result<Option<ExtractionResult>, ClassifyError> {
        if !query.mentions_any(&self.lexicon.teacher_role_nouns) {
            return Ok(None);
        }

        Ok(query
            .tokens
            .iter()
            .find(|token| looks_like_name(token, &self.lexicon))
            .map(|token| ExtractionResult::single(Category::Teacher, token.as_str())))
    }
}

/// Last-resort surname guess from a word the student wrote with a capital letter.
pub struct CapitalizedSurnameStep {
    lexicon: Arc<Lexicon>,
}

impl CapitalizedSurnameStep {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }
}

impl DecisionStep for CapitalizedSurnameStep {
    fn name(&self) -> &'static str {
        "capitalized_surname"
    }

    fn evaluate(&self, query: &QueryContext) -> Result<Option<ExtractionResult>, ClassifyError> {
        Ok(query
            .tokens_with_case()
            .find(|(token, capitalized)| *capitalized && looks_like_name(token, &self.lexicon))
            .map(|(token, _)| ExtractionResult::single(Category::Teacher, token)))
    }
}

fn looks_like_name(token: &str, lexicon: &Lexicon) -> bool {
    token.chars().count() >= MIN_NAME_CHARS
        && token.chars().all(char::is_alphabetic)
        && !lexicon.is_interrogative(token)
}

pub struct DisciplineInTextStep {
    extractors: Arc<EntityExtractors>,
}

impl DisciplineInTextStep {
    pub fn new(extractors: Arc<EntityExtractors>) -> Self {
        Self { extractors }
    }
}

impl DecisionStep for DisciplineInTextStep {
    fn name(&self) -> &'static str {
        "discipline_in_text"
    }

    fn evaluate(&self, query: &QueryContext) -> Result<Option<ExtractionResult>, ClassifyError> {
        Ok(self
            .extractors
            .discipline_in_text(&query.lowered, &query.tokens)
            .map(|label| ExtractionResult::single(Category::Discipline, label)))
    }
}

/// Literal phrases: the teacher list and the canteen.
pub struct LiteralPhraseStep {
    lexicon: Arc<Lexicon>,
}

impl LiteralPhraseStep {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }
}

impl DecisionStep for LiteralPhraseStep {
    fn name(&self) -> &'static str {
        "literal_phrase"
    }

    fn evaluate(&self, query: &QueryContext) -> Result<Option<ExtractionResult>, ClassifyError> {
        if query.mentions_any(&self.lexicon.teacher_list_phrases) {
            return Ok(Some(ExtractionResult::new(Category::Teacher, query.tokens.clone())));
        }

        if query.mentions_any(&self.lexicon.canteen_phrases) {
            let mut entities = Vec::with_capacity(query.tokens.len() + 1);
            entities.push(Location::Canteen.tag().to_string());
            entities.extend(query.tokens.iter().cloned());
            return Ok(Some(ExtractionResult::new(Category::Navigation, entities)));
        }

        Ok(None)
    }
}

pub struct ExactKeywordStep {
    lexicon: Arc<Lexicon>,
}

impl ExactKeywordStep {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }
}

impl DecisionStep for ExactKeywordStep {
    fn name(&self) -> &'static str {
        "exact_keyword"
    }

    fn evaluate(&self, query: &QueryContext) -> Result<Option<ExtractionResult>, ClassifyError> {
        Ok(self
            .lexicon
            .keyword_sets()
            .iter()
            .find(|set| query.tokens.iter().any(|token| set.contains(token)))
            .map(|set| ExtractionResult::new(set.category, query.tokens.clone())))
    }
}

/// Substring match in either direction; the contained side must be at least four characters.
pub struct FuzzyKeywordStep {
    lexicon: Arc<Lexicon>,
}

impl FuzzyKeywordStep {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }
}

impl DecisionStep for FuzzyKeywordStep {
    fn name(&self) -> &'static str {
        "fuzzy_keyword"
    }

    fn evaluate(&self, query: &QueryContext) -> Result<Option<ExtractionResult>, ClassifyError> {
        Ok(self
            .lexicon
            .keyword_sets()
            .iter()
            .find(|set| {
                query
                    .tokens
                    .iter()
                    .any(|token| set.words().any(|keyword| fuzzy_overlap(token, keyword)))
            })
            .map(|set| ExtractionResult::new(set.category, query.tokens.clone())))
    }
}

fn fuzzy_overlap(token: &str, keyword: &str) -> bool {
    (token.chars().count() >= MIN_FUZZY_CHARS && keyword.contains(token))
        || (keyword.chars().count() >= MIN_FUZZY_CHARS && token.contains(keyword))
}

pub struct Classifier {
    normalizer: Normalizer,
    extractors: Arc<EntityExtractors>,
    steps: Vec<Box<dyn DecisionStep>>,
}

impl Classifier {
    /// Builds the standard ten-rule chain.
    pub fn new(
        lexicon: Arc<Lexicon>,
        normalizer: Normalizer,
        roster: Arc<SharedRoster>,
    ) -> Result<Self, ClassifyError> {
        let extractors = Arc::new(EntityExtractors::new(Arc::clone(&lexicon))?);
        let steps: Vec<Box<dyn DecisionStep>> = vec![
            Box::new(TeachingContextStep::new(Arc::clone(&lexicon))),
            Box::new(RosterStep::new(roster)),
            Box::new(NavigationPhraseStep::new(Arc::clone(&extractors))),
            Box::new(TeacherMentionStep::new(Arc::clone(&lexicon))),
            Box::new(CapitalizedSurnameStep::new(Arc::clone(&lexicon))),
            Box::new(DisciplineInTextStep::new(Arc::clone(&extractors))),
            Box::new(LiteralPhraseStep::new(Arc::clone(&lexicon))),
            Box::new(ExactKeywordStep::new(Arc::clone(&lexicon))),
            Box::new(FuzzyKeywordStep::new(lexicon)),
        ];

        Ok(Self { normalizer, extractors, steps })
    }

    pub fn with_steps(
        normalizer: Normalizer,
        extractors: Arc<EntityExtractors>,
        steps: Vec<Box<dyn DecisionStep>>,
    ) -> Self {
        Self { normalizer, extractors, steps }
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// `None` for bot commands (`/start`, `/help`, ...), which belong to the command router.
    pub fn classify(&self, text: &str) -> Option<ExtractionResult> {
        if text.starts_with('/') {
            return None;
        }

        match self.try_classify(text) {
            Ok(result) => Some(result),
            Err(error) => {
                tracing::error!(
                    event_name = "nlp.classify.failed",
                    error = %error,
                    "classification degraded to unknown"
                );
                Some(ExtractionResult::unknown())
            }
        }
    }

    /// Runs the chain without the fault boundary. Commands are classified like any text.
    pub fn try_classify(&self, text: &str) -> Result<ExtractionResult, ClassifyError> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run_chain(text)));
        match outcome {
            Ok(result) => result,
            Err(payload) => Err(ClassifyError::Panicked(panic_message(payload.as_ref()))),
        }
    }

    fn run_chain(&self, text: &str) -> Result<ExtractionResult, ClassifyError> {
        let query = QueryContext::build(text, &self.normalizer, &self.extractors);

        for step in &self.steps {
            if let Some(result) = step.evaluate(&query)? {
                tracing::debug!(
                    event_name = "nlp.classify.matched",
                    step = step.name(),
                    category = %result.category,
                    entities = result.entities.len(),
                    "question classified"
                );
                return Ok(result);
            }
        }

        tracing::debug!(
            event_name = "nlp.classify.unmatched",
            tokens = query.tokens.len(),
            "no decision step matched"
        );
        Ok(ExtractionResult::new(Category::Unknown, query.tokens))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use campus_core::domain::category::Category;
    use campus_core::domain::extraction::ExtractionResult;
    use campus_core::lexicon::Lexicon;

    use super::{
        CapitalizedSurnameStep, Classifier, ClassifyError, DecisionStep, ExactKeywordStep,
        FuzzyKeywordStep, LiteralPhraseStep, QueryContext, TeacherMentionStep,
        TeachingContextStep,
    };
    use crate::extractors::EntityExtractors;
    use crate::morph::IdentityReducer;
    use crate::normalizer::Normalizer;
    use crate::roster::{RosterIndex, SharedRoster};

    fn lexicon() -> Arc<Lexicon> {
        Arc::new(Lexicon::russian())
    }

    fn normalizer(lexicon: &Arc<Lexicon>) -> Normalizer {
        Normalizer::new(Arc::new(IdentityReducer), Arc::clone(lexicon))
    }

    fn classifier_with_roster(records: &[[&str; 3]]) -> Classifier {
        let lexicon = lexicon();
        let roster = Arc::new(SharedRoster::new(RosterIndex::build(records.iter())));
        Classifier::new(Arc::clone(&lexicon), normalizer(&lexicon), roster)
            .expect("classifier builds")
    }

    fn classify(classifier: &Classifier, text: &str) -> ExtractionResult {
        classifier.classify(text).expect("plain text is always classified")
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn standard_chain_order_is_fixed() {
        let classifier = classifier_with_roster(&[]);

        assert_eq!(
            classifier.step_names(),
            vec![
                "teaching_context",
                "roster_surname",
                "navigation_phrase",
                "teacher_mention",
                "capitalized_surname",
                "discipline_in_text",
                "literal_phrase",
                "exact_keyword",
                "fuzzy_keyword",
            ]
        );
    }

    #[test]
    fn commands_are_left_to_the_command_router() {
        let classifier = classifier_with_roster(&[]);

        assert_eq!(classifier.classify("/start"), None);
        assert_eq!(classifier.classify("/help где библиотека"), None);
    }

    #[test]
    fn stop_words_only_is_unknown_without_entities() {
        let classifier = classifier_with_roster(&[]);

        assert_eq!(classify(&classifier, "и да но"), ExtractionResult::unknown());
        assert_eq!(classify(&classifier, "и, да... но?!"), ExtractionResult::unknown());
        assert_eq!(classify(&classifier, ""), ExtractionResult::unknown());
    }

    #[test]
    fn discipline_code_is_extracted_in_canonical_form() {
        let classifier = classifier_with_roster(&[]);

        for text in ["что за мдк 01.01?", "покажи мдк01.01", "МДК 01.01"] {
            assert_eq!(
                classify(&classifier, text),
                ExtractionResult::single(Category::Discipline, "МДК01.01"),
                "{text}"
            );
        }
    }

    #[test]
    fn library_with_locative_marker_is_tagged_navigation() {
        let classifier = classifier_with_roster(&[["Петров", "Пётр", "Петрович"]]);

        assert_eq!(
            classify(&classifier, "Где находится библиотека?"),
            ExtractionResult::single(Category::Navigation, "library")
        );
    }

    #[test]
    fn roster_surname_outranks_navigation() {
        let classifier = classifier_with_roster(&[["Петров", "Пётр", "Петрович"]]);

        assert_eq!(
            classify(&classifier, "где найти петрова возле библиотеки"),
            ExtractionResult::single(Category::Teacher, "Петров Пётр Петрович")
        );
    }

    #[test]
    fn teaching_marker_routes_to_course() {
        let classifier = classifier_with_roster(&[["Петров", "Пётр", "Петрович"]]);

        assert_eq!(
            classify(&classifier, "кто ведет математика у петрова"),
            ExtractionResult::single(Category::Discipline, "Математика")
        );
    }

    #[test]
    fn general_navigation_keeps_tokens() {
        let classifier = classifier_with_roster(&[]);

        assert_eq!(
            classify(&classifier, "как пройти в аудиторию 305"),
            ExtractionResult::new(
                Category::Navigation,
                strings(&["пройти", "аудиторию", "305"])
            )
        );
    }

    #[test]
    fn role_noun_takes_first_plausible_token() {
        let classifier = classifier_with_roster(&[]);

        assert_eq!(
            classify(&classifier, "преподаватель сидорова"),
            ExtractionResult::single(Category::Teacher, "преподаватель")
        );
    }

    #[test]
    fn capitalized_word_is_taken_as_surname() {
        let classifier = classifier_with_roster(&[]);

        assert_eq!(
            classify(&classifier, "расскажи про Сидорову"),
            ExtractionResult::single(Category::Teacher, "сидорову")
        );
    }

    #[test]
    fn sentence_case_does_not_look_like_a_surname() {
        let classifier = classifier_with_roster(&[]);

        assert_eq!(
            classify(&classifier, "Расписание мдк 01.01"),
            ExtractionResult::single(Category::Discipline, "МДК01.01")
        );
        assert_eq!(
            classify(&classifier, "Нужна справка"),
            ExtractionResult::new(Category::Document, strings(&["нужна", "справка"]))
        );
        assert_eq!(
            classify(&classifier, "Хочу поесть"),
            ExtractionResult::new(Category::Navigation, strings(&["canteen", "хочу", "поесть"]))
        );
        assert_eq!(
            classify(&classifier, "Общежитие"),
            ExtractionResult::new(Category::Dormitory, strings(&["общежитие"]))
        );
        assert_eq!(
            classify(&classifier, "Математика"),
            ExtractionResult::single(Category::Discipline, "Математика")
        );
        assert_eq!(
            classify(&classifier, "Спасибо. Расскажи про Сидорову"),
            ExtractionResult::single(Category::Teacher, "сидорову")
        );
    }

    #[test]
    fn canteen_phrase_prepends_location_tag() {
        let classifier = classifier_with_roster(&[]);

        assert_eq!(
            classify(&classifier, "хочу поесть"),
            ExtractionResult::new(Category::Navigation, strings(&["canteen", "хочу", "поесть"]))
        );
    }

    #[test]
    fn exact_keyword_uses_category_order() {
        let classifier = classifier_with_roster(&[]);

        assert_eq!(
            classify(&classifier, "нужна справка"),
            ExtractionResult::new(Category::Document, strings(&["нужна", "справка"]))
        );
        assert_eq!(
            classify(&classifier, "общежитие"),
            ExtractionResult::new(Category::Dormitory, strings(&["общежитие"]))
        );
    }

    #[test]
    fn fuzzy_match_needs_four_shared_characters() {
        let classifier = classifier_with_roster(&[]);

        assert_eq!(
            classify(&classifier, "футболом"),
            ExtractionResult::new(Category::Sport, strings(&["футболом"]))
        );
        assert_eq!(
            classify(&classifier, "ша"),
            ExtractionResult::new(Category::Unknown, strings(&["ша"]))
        );
    }

    #[test]
    fn teacher_mention_skips_interrogatives_and_short_words() {
        let lexicon = lexicon();
        let step = TeacherMentionStep::new(Arc::clone(&lexicon));
        let query =
            QueryContext::from_parts("кто учитель лев", &["кто", "лев", "учитель"], &[]);

        assert_eq!(
            step.evaluate(&query).expect("evaluates"),
            Some(ExtractionResult::single(Category::Teacher, "учитель"))
        );
    }

    #[test]
    fn capitalized_step_ignores_phrase_captures() {
        let step = CapitalizedSurnameStep::new(lexicon());
        let query = QueryContext::from_parts("кто такая орлова", &["орлова"], &[false]);

        assert_eq!(step.evaluate(&query).expect("evaluates"), None);

        let query = QueryContext::from_parts("Когда Орлова", &["когда", "орлова"], &[true, true]);
        assert_eq!(
            step.evaluate(&query).expect("evaluates"),
            Some(ExtractionResult::single(Category::Teacher, "орлова"))
        );
    }

    #[test]
    fn teaching_context_requires_marker() {
        let step = TeachingContextStep::new(lexicon());
        let without_marker = QueryContext::from_parts("математика", &["математика"], &[]);
        let with_marker = QueryContext::from_parts(
            "кто преподаёт программирование",
            &["кто", "преподаёт", "программирование"],
            &[],
        );

        assert_eq!(step.evaluate(&without_marker).expect("evaluates"), None);
        assert_eq!(
            step.evaluate(&with_marker).expect("evaluates"),
            Some(ExtractionResult::single(Category::Discipline, "Программирование"))
        );
    }

    #[test]
    fn literal_teacher_list_phrase() {
        let step = LiteralPhraseStep::new(lexicon());
        let query =
            QueryContext::from_parts("список преподавателей", &["список", "преподавателей"], &[]);

        assert_eq!(
            step.evaluate(&query).expect("evaluates"),
            Some(ExtractionResult::new(
                Category::Teacher,
                strings(&["список", "преподавателей"])
            ))
        );
    }

    #[test]
    fn exact_and_fuzzy_steps_in_isolation() {
        let exact = ExactKeywordStep::new(lexicon());
        let fuzzy = FuzzyKeywordStep::new(lexicon());
        let query = QueryContext::from_parts("волейболист", &["волейболист"], &[]);

        assert_eq!(exact.evaluate(&query).expect("evaluates"), None);
        assert_eq!(
            fuzzy.evaluate(&query).expect("evaluates").map(|result| result.category),
            Some(Category::Sport)
        );
    }

    struct PanickingStep;

    impl DecisionStep for PanickingStep {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn evaluate(&self, _query: &QueryContext) -> Result<Option<ExtractionResult>, ClassifyError> {
            panic!("lookup table corrupted")
        }
    }

    struct FailingStep;

    impl DecisionStep for FailingStep {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn evaluate(&self, _query: &QueryContext) -> Result<Option<ExtractionResult>, ClassifyError> {
            Err(ClassifyError::StepFailed { step: "failing", message: "boom".to_string() })
        }
    }

    fn chain_of(step: Box<dyn DecisionStep>) -> Classifier {
        let lexicon = lexicon();
        let extractors = Arc::new(EntityExtractors::new(Arc::clone(&lexicon)).expect("patterns"));
        Classifier::with_steps(normalizer(&lexicon), extractors, vec![step])
    }

    #[test]
    fn faults_inside_the_chain_degrade_to_unknown() {
        let panicking = chain_of(Box::new(PanickingStep));
        assert_eq!(panicking.classify("где библиотека"), Some(ExtractionResult::unknown()));
        assert!(matches!(
            panicking.try_classify("где библиотека"),
            Err(ClassifyError::Panicked(ref message)) if message.contains("corrupted")
        ));

        let failing = chain_of(Box::new(FailingStep));
        assert_eq!(failing.classify("справка"), Some(ExtractionResult::unknown()));
    }

    #[test]
    fn roster_swap_is_seen_by_next_query() {
        let lexicon = lexicon();
        let roster = Arc::new(SharedRoster::new(RosterIndex::empty()));
        let classifier =
            Classifier::new(Arc::clone(&lexicon), normalizer(&lexicon), Arc::clone(&roster))
                .expect("classifier builds");

        assert_eq!(
            classify(&classifier, "контакты орловой"),
            ExtractionResult::new(Category::Teacher, strings(&["контакты", "орловой", "орловой"]))
        );

        roster.replace(RosterIndex::build([["Орлов", "Денис", "Игоревич"]].iter()));
        assert_eq!(
            classify(&classifier, "контакты орловой"),
            ExtractionResult::single(Category::Teacher, "Орлов Денис Игоревич")
        );
    }
}
