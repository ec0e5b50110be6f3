//! Byte-order mark tests

use excalidraw_json::bom::BOM;
use excalidraw_json::strip_bom_tag;

const SAMPLES: [&str; 6] = [
    "",
    "{}",
    "{\"type\":\"excalidraw\"}",
    " \u{FEFF}{}",
    "\u{FEFF}",
    "ünïcødé \u{1F600}",
];

#[test]
fn should_leave_text_without_mark_unchanged() {
    for sample in SAMPLES.iter().filter(|s| !s.starts_with(BOM)) {
        assert_eq!(strip_bom_tag(sample), *sample);
    }
}

#[test]
fn should_strip_one_leading_mark() {
    for sample in SAMPLES {
        let marked = format!("{}{}", BOM, sample);
        let stripped = strip_bom_tag(&marked);

        assert_eq!(stripped, sample);
        assert_eq!(stripped.starts_with(BOM), sample.starts_with(BOM));
    }
}

#[test]
fn should_not_strip_marks_after_the_first_character() {
    assert_eq!(strip_bom_tag("{\u{FEFF}}"), "{\u{FEFF}}");
    assert_eq!(strip_bom_tag("a\u{FEFF}"), "a\u{FEFF}");
}
