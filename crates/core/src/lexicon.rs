//! Authored vocabulary for the question classifier.
//!
//! Everything here is static data: keyword tables per category, stop words, the list of
//! common course names and the marker phrases the decision chain looks for. A [`Lexicon`]
//! is built once at start-up and handed to the classifier; nothing reads these tables as
//! ambient globals.

use std::collections::HashSet;

use crate::domain::category::Category;
use crate::domain::location::Location;

const TEACHER_KEYWORDS: &[&str] = &[
    "преподаватель",
    "учитель",
    "педагог",
    "преподает",
    "ведет",
    "пара",
    "пары",
    "урок",
    "уроки",
    "кто",
    "такая",
    "такой",
    "какие",
    "предметы",
    "покажи",
    "расскажи",
    "информация",
    "список",
    "о преподавателях",
    "о учителях",
    "учат",
    "преподаватели",
    "найти",
    "контакты",
    "препод",
    "ведёт",
    "учит",
    "фамилия",
    "препода",
];

const DISCIPLINE_KEYWORDS: &[&str] = &[
    "предмет",
    "дисциплина",
    "математика",
    "информатика",
    "программирование",
    "экономика",
    "бухучет",
    "бухгалтерия",
    "физкультура",
    "английский",
    "история",
    "физика",
    "право",
    "литература",
    "русский",
    "алгебра",
    "геометрия",
    "химия",
    "биология",
    "курс",
    "лекция",
    "семинар",
    "практика",
    "лаба",
    "преподает",
    "ведет",
    "изучает",
    "изучаем",
];

const DOCUMENT_KEYWORDS: &[&str] = &[
    "справка",
    "документ",
    "заявление",
    "получить",
    "оформить",
    "бумага",
    "справки",
    "документы",
    "бумаги",
    "заполнить",
    "подать",
    "справку",
];

const NAVIGATION_KEYWORDS: &[&str] = &[
    "где",
    "найти",
    "находится",
    "расположение",
    "аудитория",
    "кабинет",
    "этаж",
    "корпус",
    "столовая",
    "библиотека",
    "буфет",
    "расположена",
    "аудитории",
    "находятся",
    "поиск",
    "как пройти",
    "дорога",
    "путь",
    "актовый",
    "зал",
    "лаборатория",
    "медпункт",
    "деканат",
];

const EVENT_KEYWORDS: &[&str] = &[
    "мероприятие",
    "событие",
    "праздник",
    "концерт",
    "выступление",
    "когда",
    "какие",
    "фестиваль",
    "встреча",
    "семинар",
    "конференция",
    "анонс",
    "скоро",
    "мероприятия",
    "афиша",
];

const SPORT_KEYWORDS: &[&str] = &[
    "секция",
    "спорт",
    "тренировка",
    "занятие",
    "тренер",
    "игра",
    "какие",
    "есть",
    "секции",
    "занятия",
    "спортивные",
    "спортзал",
    "физкультура",
    "футбол",
    "волейбол",
    "баскетбол",
    "теннис",
    "физрук",
    "спортивный",
    "заниматься",
];

const DORMITORY_KEYWORDS: &[&str] = &[
    "общежитие",
    "общага",
    "комната",
    "проживание",
    "заселение",
    "комендант",
    "жить",
    "поселиться",
    "квартира",
    "общежития",
    "заселиться",
    "условия",
    "плата",
    "снять",
];

const STOP_WORDS: &[&str] = &[
    "и", "в", "во", "не", "что", "он", "на", "я", "с", "со", "как", "а", "то", "все", "она",
    "так", "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по", "только", "ее",
    "мне", "было", "вот", "от", "меня", "еще", "нет", "о", "из", "ему", "такая", "это", "эта",
    "где", "какая",
];

const COMMON_DISCIPLINES: &[&str] = &[
    "математика",
    "информатика",
    "русский язык",
    "литература",
    "история",
    "физика",
    "химия",
    "биология",
    "экономика",
    "право",
    "бухгалтерия",
    "программирование",
    "английский язык",
    "философия",
    "психология",
    "статистика",
    "культура",
    "менеджмент",
    "маркетинг",
    "социология",
    "политология",
    "экология",
];

const TEACHING_MARKERS: &[&str] = &["ведет", "ведёт", "преподает", "преподаёт"];

const TEACHER_ROLE_NOUNS: &[&str] = &["преподаватель", "учитель", "педагог"];

const INTERROGATIVES: &[&str] =
    &["где", "как", "что", "когда", "почему", "кто", "находиться", "расположен"];

const NAVIGATION_MARKERS: &[&str] =
    &["где", "как найти", "как пройти", "местоположение", "расположение"];

const TEACHER_PHRASE_TEMPLATES: &[&str] = &[
    r"кто такая (\w+)",
    r"кто такой (\w+)",
    r"преподаватель (\w+)",
    r"о преподавателе (\w+)",
    r"где найти (\w+)",
    r"контакты (\w+)",
];

const TEACHER_LIST_PHRASES: &[&str] =
    &["преподаватели", "о преподавателях", "список преподавателей"];

const CANTEEN_PHRASES: &[&str] = &["столовая", "буфет", "поесть"];

/// Trigger words of one category; keeps authored order for deterministic fuzzy matching.
#[derive(Clone, Debug)]
pub struct CategoryKeywordSet {
    pub category: Category,
    words: Vec<String>,
    index: HashSet<String>,
}

impl CategoryKeywordSet {
    pub fn new(category: Category, words: &[&str]) -> Self {
        let mut ordered = Vec::with_capacity(words.len());
        let mut index = HashSet::with_capacity(words.len());
        for word in words {
            if index.insert((*word).to_string()) {
                ordered.push((*word).to_string());
            }
        }
        Self { category, words: ordered, index }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains(token)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Substring markers that identify one named location in a navigation question.
#[derive(Clone, Debug)]
pub struct LocationGroup {
    pub location: Location,
    pub markers: Vec<String>,
}

impl LocationGroup {
    fn new(location: Location, markers: &[&str]) -> Self {
        Self { location, markers: to_owned(markers) }
    }

    pub fn matches(&self, lowered_text: &str) -> bool {
        self.markers.iter().any(|marker| lowered_text.contains(marker.as_str()))
    }
}

#[derive(Clone, Debug)]
pub struct Lexicon {
    keyword_sets: Vec<CategoryKeywordSet>,
    stop_words: HashSet<String>,
    pub disciplines: Vec<String>,
    pub teaching_markers: Vec<String>,
    pub teacher_role_nouns: Vec<String>,
    pub interrogatives: Vec<String>,
    pub navigation_markers: Vec<String>,
    /// Checked in order; the first group with a matching marker wins.
    pub location_groups: Vec<LocationGroup>,
    pub teacher_phrase_templates: Vec<String>,
    pub teacher_list_phrases: Vec<String>,
    pub canteen_phrases: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::russian()
    }
}

impl Lexicon {
    pub fn russian() -> Self {
        let keyword_sets = Category::KEYWORD_ORDER
            .into_iter()
            .map(|category| CategoryKeywordSet::new(category, default_keywords(category)))
            .collect();

        Self {
            keyword_sets,
            stop_words: STOP_WORDS.iter().map(|word| (*word).to_string()).collect(),
            disciplines: to_owned(COMMON_DISCIPLINES),
            teaching_markers: to_owned(TEACHING_MARKERS),
            teacher_role_nouns: to_owned(TEACHER_ROLE_NOUNS),
            interrogatives: to_owned(INTERROGATIVES),
            navigation_markers: to_owned(NAVIGATION_MARKERS),
            location_groups: vec![
                LocationGroup::new(Location::Library, &["библиотек"]),
                LocationGroup::new(Location::Canteen, &["столов", "буфет", "поесть", "еда"]),
                LocationGroup::new(Location::Lab, &["vr", "лаборатор"]),
                LocationGroup::new(Location::Deanery, &["деканат"]),
                LocationGroup::new(Location::StudyOffice, &["учебная часть"]),
                LocationGroup::new(Location::StudentCouncil, &["студсовет"]),
                LocationGroup::new(Location::Accounting, &["бухгалтерия"]),
                LocationGroup::new(Location::AssemblyHall, &["актовый зал"]),
                LocationGroup::new(Location::Gym, &["спортзал"]),
                LocationGroup::new(Location::MedicalOffice, &["медпункт"]),
            ],
            teacher_phrase_templates: to_owned(TEACHER_PHRASE_TEMPLATES),
            teacher_list_phrases: to_owned(TEACHER_LIST_PHRASES),
            canteen_phrases: to_owned(CANTEEN_PHRASES),
        }
    }

    /// Keyword tables in matching order. `Unknown` never has one.
    pub fn keyword_sets(&self) -> &[CategoryKeywordSet] {
        &self.keyword_sets
    }

    pub fn keywords_for(&self, category: Category) -> Option<&CategoryKeywordSet> {
        self.keyword_sets.iter().find(|set| set.category == category)
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    pub fn is_interrogative(&self, token: &str) -> bool {
        self.interrogatives.iter().any(|word| word == token)
    }
}

fn default_keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::Teacher => TEACHER_KEYWORDS,
        Category::Discipline => DISCIPLINE_KEYWORDS,
        Category::Document => DOCUMENT_KEYWORDS,
        Category::Navigation => NAVIGATION_KEYWORDS,
        Category::Event => EVENT_KEYWORDS,
        Category::Sport => SPORT_KEYWORDS,
        Category::Dormitory => DORMITORY_KEYWORDS,
        Category::Unknown => &[],
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| (*word).to_string()).collect()
}
