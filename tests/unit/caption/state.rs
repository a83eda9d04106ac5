use super::*;

#[test]
fn starts_idle_and_appends_words() {
    let s = CaptionState::new();
    assert_eq!(s.phase(), CaptionPhase::Idle);
    assert_eq!(s.caption(), "");

    let s = s.consume("hello");
    assert_eq!(s.phase(), CaptionPhase::Accumulating);
    assert_eq!(s.caption(), "hello ");

    let s = s.consume("world");
    assert_eq!(s.caption(), "hello world ");
}

#[test]
fn line_break_is_hidden_and_arms_reset() {
    let s = CaptionState::new().consume("hello").consume("world\n");
    assert_eq!(s.caption(), "hello world ");
    assert!(s.pending_reset());
    assert_eq!(s.phase(), CaptionPhase::PendingReset);

    let s = s.consume("foo");
    assert_eq!(s.caption(), "foo ");
    assert_eq!(s.phase(), CaptionPhase::Accumulating);
}

#[test]
fn zero_width_spacer_drops_marker_and_trailing_space_before_reset() {
    let s = CaptionState::new()
        .consume("my")
        .consume("love\u{200B}\n");
    assert_eq!(s.caption(), "my love");
    assert!(s.pending_reset());

    let s = s.consume("next");
    assert_eq!(s.caption(), "next ");
}

#[test]
fn zero_width_spacer_without_break_glues_next_word() {
    let s = CaptionState::new().consume("sun\u{200B}").consume("light");
    assert_eq!(s.caption(), "sunlight ");
    assert!(!s.pending_reset());
}

#[test]
fn empty_token_still_adds_a_space() {
    let s = CaptionState::new().consume("a").consume("").consume("b");
    assert_eq!(s.caption(), "a  b ");
}
