/// Removes ASCII control characters and caps the text at `max_chars` characters.
pub fn sanitize_input(text: &str, max_chars: usize) -> String {
    text.chars().filter(|ch| !is_control(*ch)).take(max_chars).collect()
}

fn is_control(ch: char) -> bool {
    matches!(ch, '\u{00}'..='\u{1F}' | '\u{7F}')
}
