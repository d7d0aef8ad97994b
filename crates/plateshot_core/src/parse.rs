use crate::DishEntry;

/// Turns free text into fresh idle dish entries, one per non-blank line.
///
/// `Name: description` and `Name - description` are split on the first
/// separator, `:` taking precedence, and both halves are trimmed. A line
/// without either is kept verbatim as the name.
pub fn parse_menu(text: &str) -> Vec<DishEntry> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> DishEntry {
    let split = line.split_once(':').or_else(|| line.split_once('-'));
    match split {
        Some((name, description)) => DishEntry::new(name.trim(), description.trim()),
        None => DishEntry::new(line, ""),
    }
}
