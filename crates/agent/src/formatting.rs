/// Text shown when a teacher has no disciplines on record.
pub const NO_DISCIPLINES: &str = "Дисциплины не указаны";

/// Renders disciplines as a bulleted list, one per line, each starting with a capital letter.
pub fn format_disciplines<S: AsRef<str>>(disciplines: &[S]) -> String {
    let lines = disciplines
        .iter()
        .map(|discipline| discipline.as_ref().trim())
        .filter(|discipline| !discipline.is_empty())
        .map(|discipline| format!("• {}", crate::extractors::capitalize(discipline)))
        .collect::<Vec<_>>();

    if lines.is_empty() {
        return NO_DISCIPLINES.to_string();
    }
    lines.join("\n")
}

/// Splits a reply into chunks of at most `max_chars` characters on line boundaries.
///
/// Lines are never cut; a single line longer than the limit becomes a chunk of its own.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for line in text.split('\n') {
        let line_chars = line.chars().count();
        let needed = if current.is_empty() { line_chars } else { current_chars + 1 + line_chars };

        if needed > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }

        if !current.is_empty() {
            current.push('\n');
            current_chars += 1;
        }
        current.push_str(line);
        current_chars += line_chars;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
