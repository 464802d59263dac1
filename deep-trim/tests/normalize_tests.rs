use deep_trim::normalize::{FULL_WIDTH_GT, FULL_WIDTH_LT};
use deep_trim::{normalize, to_full_width, trim, NormalizeOptions};

const ON: NormalizeOptions = NormalizeOptions { convert_to_full_width: true };
const OFF: NormalizeOptions = NormalizeOptions { convert_to_full_width: false };

#[test]
fn trims_ascii_and_unicode_whitespace() {
    assert_eq!(trim("  hello \t\n"), "hello");
    // NBSP, ideographic space, em space
    assert_eq!(trim("\u{00A0}\u{3000}hi\u{2003}"), "hi");
    assert_eq!(trim("   "), "");
    assert_eq!(trim(""), "");
}

#[test]
fn inner_whitespace_is_kept() {
    assert_eq!(normalize("  John   Doe  ", ON), "John   Doe");
}

#[test]
fn converts_angle_brackets_after_trimming() {
    assert_eq!(normalize(" <hi> ", ON), "＜hi＞");
    assert_eq!(normalize("<div>Hello</div>", ON), "＜div＞Hello＜/div＞");
    assert_eq!(to_full_width("a<b>c"), format!("a{FULL_WIDTH_LT}b{FULL_WIDTH_GT}c"));
}

#[test]
fn conversion_can_be_disabled() {
    assert_eq!(normalize(" This is a <sample> ", OFF), "This is a <sample>");
}

#[test]
fn only_the_two_brackets_change() {
    let s = "a&b\"c'd=e(f)[g]{h}";
    assert_eq!(normalize(s, ON), s);
    // already full-width input is stable
    assert_eq!(normalize("＜x＞", ON), "＜x＞");
}

#[test]
fn default_turns_conversion_on() {
    assert!(NormalizeOptions::default().convert_to_full_width);
}

#[test]
fn normalize_is_idempotent() {
    for s in ["  <a>  ", "\u{3000}x<y\u{3000}", "", "plain", " > "] {
        let once = normalize(s, ON);
        assert_eq!(normalize(&once, ON), once, "input {s:?}");
    }
}
