//! Byte-order mark handling

/// The byte-order mark code point.
pub const BOM: char = '\u{FEFF}';

/// Remove a single leading byte-order mark, leaving the rest of the text untouched.
pub fn strip_bom_tag(content: &str) -> &str {
    content.strip_prefix(BOM).unwrap_or(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_only_strip_the_first_mark() {
        assert_eq!(strip_bom_tag("\u{FEFF}\u{FEFF}{}"), "\u{FEFF}{}");
    }
}
