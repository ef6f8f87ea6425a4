// position.rs: playback-position scanning over a parsed timeline.
// Maps a raw position in milliseconds to the active line, the active word
// and a continuous per-word fill progress for karaoke rendering.

use crate::types::{LyricLine, LyricsTimeline, Word};

/// Index of the line active at `position_ms`: the last line whose start is at
/// or before the position. `None` before the first line starts.
pub fn active_line(timeline: &LyricsTimeline, position_ms: u64) -> Option<usize> {
    let idx = timeline
        .lines
        .partition_point(|line| line.start_ms <= position_ms);
    idx.checked_sub(1)
}

/// Index of the word active at `position_ms` within one line, i.e. the last
/// word that has started. `None` before the line's first word.
pub fn active_word(line: &LyricLine, position_ms: u64) -> Option<usize> {
    let idx = line.words.partition_point(|w| w.start_ms <= position_ms);
    idx.checked_sub(1)
}

/// Fill progress of a word at `position_ms`, clamped to [0, 1].
/// Zero-duration words report 1.0 once the position reaches them.
pub fn word_progress(word: &Word, position_ms: u64) -> f32 {
    if position_ms < word.start_ms {
        return 0.0;
    }
    let duration = word.duration_ms();
    if duration == 0 {
        return 1.0;
    }
    (((position_ms - word.start_ms) as f32) / duration as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::parse::parse_timeline;

    fn sample() -> LyricsTimeline {
        parse_timeline(
            "[00:10.000]v1:<00:11.000>He<00:11.500>llo <00:12.000>World\n\
             [00:13.000]v2:<00:13.500>Next \n\
             [00:19.000]v1:<00:20.000>Last",
            &EngineConfig::default(),
        )
    }

    #[test]
    fn active_line_tracks_position_across_the_document() {
        let t = sample();
        assert_eq!(active_line(&t, 0), None);
        assert_eq!(active_line(&t, 9_999), None);
        assert_eq!(active_line(&t, 10_000), Some(0));
        assert_eq!(active_line(&t, 12_999), Some(0));
        assert_eq!(active_line(&t, 13_000), Some(1));
        assert_eq!(active_line(&t, 60_000), Some(2));
    }

    #[test]
    fn active_line_on_empty_timeline_is_none() {
        let t = LyricsTimeline::default();
        assert_eq!(active_line(&t, 5_000), None);
    }

    #[test]
    fn active_word_tracks_position_within_a_line() {
        let t = sample();
        let line = &t.lines[0];
        assert_eq!(active_word(line, 10_500), None);
        assert_eq!(active_word(line, 11_000), Some(0));
        assert_eq!(active_word(line, 11_999), Some(0));
        assert_eq!(active_word(line, 12_000), Some(1));
        assert_eq!(active_word(line, 99_000), Some(1));
    }

    #[test]
    fn word_progress_is_clamped_and_monotonic() {
        let word = Word::new("Hello", 11_000, 12_000);
        assert_eq!(word_progress(&word, 10_000), 0.0);
        assert_eq!(word_progress(&word, 11_000), 0.0);
        assert!((word_progress(&word, 11_500) - 0.5).abs() < 1e-6);
        assert_eq!(word_progress(&word, 12_000), 1.0);
        assert_eq!(word_progress(&word, 20_000), 1.0);
    }

    #[test]
    fn zero_duration_word_fills_immediately() {
        let word = Word::new("x", 1_000, 1_000);
        assert_eq!(word_progress(&word, 999), 0.0);
        assert_eq!(word_progress(&word, 1_000), 1.0);
    }
}
