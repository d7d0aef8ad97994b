use sha2::{Digest, Sha256};

use plateshot_core::DishId;

const MAX_STEM_LEN: usize = 80;

/// Portable, stable filename for a dish photo: `{sanitized_name}--{short_hash(id)}.{ext}`.
///
/// The hash keeps two dishes with the same name apart.
pub fn image_filename(name: &str, dish_id: DishId, extension: &str) -> String {
    let stem = sanitize_name(name);
    let hash = short_hash(&dish_id.to_string());
    format!("{stem}--{hash}.{extension}")
}

fn sanitize_name(input: &str) -> String {
    let mapped: String = input
        .chars()
        .map(|c| if is_forbidden(c) || c.is_whitespace() { '_' } else { c })
        .collect();

    let mut compacted = String::with_capacity(mapped.len());
    for c in mapped.trim_matches(&['_', '.'][..]).chars() {
        if c == '_' && compacted.ends_with('_') {
            continue;
        }
        compacted.push(c);
    }
    if compacted.is_empty() {
        compacted = "dish".to_string();
    }
    if compacted.len() > MAX_STEM_LEN {
        let mut end = MAX_STEM_LEN;
        while !compacted.is_char_boundary(end) {
            end -= 1;
        }
        compacted.truncate(end);
    }
    if is_reserved_windows_name(&compacted) {
        compacted.push('_');
    }
    compacted
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
