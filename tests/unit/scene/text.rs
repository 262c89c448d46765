use super::*;

#[test]
fn chars_skip_whitespace() {
    let units = split_text("Your data\nruns", SplitMode::Chars);
    let text: String = units.iter().map(|u| u.text.as_str()).collect();
    assert_eq!(text, "Yourdataruns");
    assert_eq!(units.len(), 12);
    assert_eq!(units[11].sequence_index, 11);
}

#[test]
fn lines_alternate_sides() {
    let units = split_text("Your top\n\n  habits.  \n", SplitMode::Lines);
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].text, "Your top");
    assert_eq!(units[0].side_bias, SideBias::Left);
    assert_eq!(units[1].text, "habits.");
    assert_eq!(units[1].side_bias, SideBias::Right);
    assert_eq!(SideBias::Right.sign(), 1.0);
}

#[test]
fn empty_text_has_no_units() {
    assert!(split_text("", SplitMode::Chars).is_empty());
    assert!(split_text(" \n ", SplitMode::Lines).is_empty());
}
