use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use campus_core::domain::directory::TeacherProfile;
use campus_core::errors::DomainError;

/// Lowercase surname to canonical full name, kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct RosterIndex {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl RosterIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the index from positional records: surname, given name, patronymic, then
    /// anything else. Records with fewer than three fields or a blank surname are skipped.
    pub fn build<I, R, S>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut index = Self::default();

        for (position, record) in records.into_iter().enumerate() {
            match parse_record(record.as_ref()) {
                Ok((surname, full_name)) => index.insert(surname, full_name),
                Err(error) => tracing::warn!(
                    event_name = "roster.build.skipped_record",
                    record = position,
                    error = %error,
                    "skipping roster record"
                ),
            }
        }

        tracing::info!(
            event_name = "roster.build.completed",
            entries = index.len(),
            "roster index built"
        );
        index
    }

    pub fn from_profiles(profiles: &[TeacherProfile]) -> Self {
        Self::build(profiles.iter().map(TeacherProfile::roster_fields))
    }

    /// First indexed surname, in insertion order, that occurs inside `token`.
    pub fn lookup(&self, token: &str) -> Option<&str> {
        let token = token.to_lowercase();
        self.entries
            .iter()
            .find(|(surname, _)| token.contains(surname.as_str()))
            .map(|(_, full_name)| full_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, surname: String, full_name: String) {
        match self.positions.get(&surname) {
            Some(&slot) => self.entries[slot].1 = full_name,
            None => {
                self.positions.insert(surname.clone(), self.entries.len());
                self.entries.push((surname, full_name));
            }
        }
    }
}

/// Lowercase surname and display name for one record.
fn parse_record<S: AsRef<str>>(fields: &[S]) -> Result<(String, String), DomainError> {
    if fields.len() < 3 {
        return Err(DomainError::MalformedRosterRecord(format!(
            "expected at least three fields, got {}",
            fields.len()
        )));
    }

    let surname = fields[0].as_ref().trim();
    if surname.is_empty() {
        return Err(DomainError::MalformedRosterRecord("blank surname".to_string()));
    }

    let full_name =
        format!("{} {} {}", fields[0].as_ref(), fields[1].as_ref(), fields[2].as_ref())
            .trim()
            .to_string();
    Ok((surname.to_lowercase(), full_name))
}

/// Holder that lets a rebuilt roster replace the live one without touching readers.
///
/// Readers take an `Arc` snapshot and keep using it even while a newer index is swapped in.
#[derive(Debug, Default)]
pub struct SharedRoster {
    current: RwLock<Arc<RosterIndex>>,
}

impl SharedRoster {
    pub fn new(index: RosterIndex) -> Self {
        Self { current: RwLock::new(Arc::new(index)) }
    }

    pub fn snapshot(&self) -> Arc<RosterIndex> {
        let guard = self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&*guard)
    }

    /// Swaps in a new index and returns its size.
    pub fn replace(&self, index: RosterIndex) -> usize {
        let entries = index.len();
        let next = Arc::new(index);
        let mut guard = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = next;
        entries
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use campus_core::errors::DomainError;

    use super::{parse_record, RosterIndex, SharedRoster};

    fn record(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|field| field.to_string()).collect()
    }

    #[test]
    fn skips_short_and_blank_records() {
        let index = RosterIndex::build(vec![
            record(&["Петров", "Пётр"]),
            record(&["  ", "Анна", "Сергеевна"]),
            record(&["Иванова", "Мария", "Ивановна", "доцент"]),
        ]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("иванова"), Some("Иванова Мария Ивановна"));
    }

    #[test]
    fn malformed_records_are_reported_as_domain_errors() {
        assert!(matches!(
            parse_record(&["Петров", "Пётр"]),
            Err(DomainError::MalformedRosterRecord(ref reason)) if reason.contains("got 2")
        ));
        assert_eq!(
            parse_record(&[" ", "Анна", "Сергеевна"]),
            Err(DomainError::MalformedRosterRecord("blank surname".to_string()))
        );
        assert_eq!(
            parse_record(&["Орлова", "Анна", "Сергеевна"]),
            Ok(("орлова".to_string(), "Орлова Анна Сергеевна".to_string()))
        );
    }

    #[test]
    fn lookup_matches_surname_inside_inflected_token() {
        let index = RosterIndex::build(vec![record(&["Петров", "Пётр", "Петрович"])]);

        assert_eq!(index.lookup("петрова"), Some("Петров Пётр Петрович"));
        assert_eq!(index.lookup("петр"), None);
    }

    #[test]
    fn first_inserted_surname_wins_ties() {
        let index = RosterIndex::build(vec![
            record(&["Ким", "Олег", "Юрьевич"]),
            record(&["Кимова", "Алла", "Петровна"]),
        ]);

        assert_eq!(index.lookup("кимовой"), Some("Ким Олег Юрьевич"));
    }

    #[test]
    fn duplicate_surname_keeps_position_and_latest_name() {
        let index = RosterIndex::build(vec![
            record(&["Смирнов", "Илья", "Олегович"]),
            record(&["Орлов", "Денис", "Игоревич"]),
            record(&["Смирнов", "Игорь", "Олегович"]),
        ]);

        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("смирнову"), Some("Смирнов Игорь Олегович"));
        assert_eq!(index.lookup("смирновыорлов"), Some("Смирнов Игорь Олегович"));
    }

    #[test]
    fn missing_patronymic_is_trimmed() {
        let index = RosterIndex::build(vec![record(&["Ли", "Анна", ""])]);

        assert_eq!(index.lookup("ли"), Some("Ли Анна"));
    }

    #[test]
    fn empty_roster_never_matches() {
        assert_eq!(RosterIndex::empty().lookup("кто-нибудь"), None);
    }

    #[test]
    fn shared_roster_swaps_without_invalidating_snapshots() {
        let shared = SharedRoster::new(RosterIndex::empty());
        let before = shared.snapshot();

        let size =
            shared.replace(RosterIndex::build(vec![record(&["Орлов", "Денис", "Игоревич"])]));

        assert_eq!(size, 1);
        assert!(before.is_empty());
        assert_eq!(shared.snapshot().lookup("орлова"), Some("Орлов Денис Игоревич"));
        assert!(!Arc::ptr_eq(&before, &shared.snapshot()));
    }
}
