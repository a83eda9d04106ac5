use super::*;

#[test]
fn splits_on_single_spaces_only() {
    let t = Transcript::from_lyrics("Oh cube,\n rocky  cube.");
    assert_eq!(t.tokens(), &["Oh", "cube,\n", "rocky", "", "cube."]);
    assert_eq!(t.len(), 5);
    assert_eq!(t.line_count(), 1);
}

#[test]
fn empty_text_is_one_empty_token() {
    let t = Transcript::from_lyrics("");
    assert_eq!(t.tokens(), &[""]);
    assert!(!t.is_empty());
    assert!(Transcript::from_tokens(Vec::<String>::new()).is_empty());
}

#[test]
fn default_lyrics_break_into_lines() {
    let t = Transcript::from_lyrics(crate::transcript::lyrics::DEFAULT_LYRICS);
    assert_eq!(t.tokens()[0], "Oh");
    assert_eq!(t.tokens()[1], "cube,\n");
    assert_eq!(t.tokens()[2], "rocky");
    assert_eq!(t.line_count(), 23);
    assert!(t.tokens().iter().all(|tok| !tok.contains(ZERO_WIDTH_SPACER)));
}
