//! Narrative text and the typewriter reveal used by the story and ending screens.

pub const TITLE: &str = "FLIP-BIRDS";
pub const TAGLINE: &str = "A bird-boy's search for love";

pub const STORY_TEXT: &str = "Once there was a boy who was born with wings.\n\
The other children laughed, so he learned to fly alone,\n\
skimming the rooftops every evening at sunset.\n\
One night, far beyond the green pipes of the old city,\n\
he saw a light in a window and a girl singing beside it.\n\
He has been flying toward that window ever since.";

pub const MID_CUTSCENE_CAPTION: [&str; 3] = [
    "Who is that beautiful girl?",
    "She vanished so fast...",
    "Fly on. Maybe you will meet again.",
];

pub const ENDING_TEXT: &str = "Fifty pipes behind him, the sky turned quiet.\n\
The window was open. The song had stopped,\n\
because the girl was standing on the sill, waiting.\n\
\"You took your time,\" she said, and spread her own wings.";

pub const WIN_ACKNOWLEDGED_TEXT: &str = "THE END. Thank you for flying.";

/// Characters of `text` visible after `elapsed_ms` at `chars_per_sec`.
pub fn visible_chars(text: &str, elapsed_ms: f64, chars_per_sec: f64) -> usize {
    let shown = (elapsed_ms.max(0.0) * chars_per_sec / 1000.0).floor() as usize;
    shown.min(text.chars().count())
}

/// The revealed prefix of `text`, cut on a char boundary.
pub fn revealed(text: &str, elapsed_ms: f64, chars_per_sec: f64) -> &str {
    let count = visible_chars(text, elapsed_ms, chars_per_sec);
    match text.char_indices().nth(count) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Whole text is on screen.
pub fn is_revealed(text: &str, elapsed_ms: f64, chars_per_sec: f64) -> bool {
    visible_chars(text, elapsed_ms, chars_per_sec) >= text.chars().count()
}

/// Milliseconds until the whole text is on screen.
pub fn reveal_duration_ms(text: &str, chars_per_sec: f64) -> f64 {
    (text.chars().count() as f64 * 1000.0 / chars_per_sec).ceil()
}

/// Fraction of `text` revealed, 0.0..=1.0.
pub fn reveal_ratio(text: &str, elapsed_ms: f64, chars_per_sec: f64) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 1.0;
    }
    visible_chars(text, elapsed_ms, chars_per_sec) as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_progresses_at_rate() {
        assert_eq!(visible_chars("hello world", 0.0, 10.0), 0);
        assert_eq!(visible_chars("hello world", 500.0, 10.0), 5);
        assert_eq!(revealed("hello world", 500.0, 10.0), "hello");
        assert_eq!(visible_chars("hello world", 60_000.0, 10.0), 11);
    }

    #[test]
    fn test_revealed_respects_char_boundaries() {
        let text = "héllo";
        assert_eq!(revealed(text, 200.0, 10.0), "hé");
        assert_eq!(revealed(text, 10_000.0, 10.0), text);
    }

    #[test]
    fn test_reveal_duration_matches_is_revealed() {
        let ms = reveal_duration_ms(STORY_TEXT, 40.0);
        assert!(is_revealed(STORY_TEXT, ms, 40.0));
        assert!(!is_revealed(STORY_TEXT, ms - 100.0, 40.0));
    }

    #[test]
    fn test_reveal_ratio_bounds() {
        assert_eq!(reveal_ratio(ENDING_TEXT, 0.0, 40.0), 0.0);
        assert_eq!(reveal_ratio(ENDING_TEXT, 1e9, 40.0), 1.0);
        assert_eq!(reveal_ratio("", 0.0, 40.0), 1.0);
    }
}
