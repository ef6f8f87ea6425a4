// types.rs: shared data model for the synchronized lyrics engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who sings a line. Enhanced LRC marks these with `v1:`, `v2:` and `bg:`
/// prefixes; untagged lines are `Unknown` and treated like `V1` by layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeakerRole {
    V1,
    V2,
    Bg,
    #[default]
    Unknown,
}

/// A single timed word inside a line.
///
/// `end_ms` always equals the next word's `start_ms` within the same line;
/// the last word's end is inferred from the next line in the document (or a
/// fallback tail when there is none), so `end_ms >= start_ms` holds by
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
    /// Highlight intensity in [0, 1], assigned by the emphasis scorer.
    pub emphasis: f32,
}

impl Word {
    pub fn new(text: impl Into<String>, start_ms: u64, end_ms: u64) -> Self {
        Self {
            text: text.into(),
            start_ms,
            end_ms,
            emphasis: 0.0,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

/// One lyric line: speaker, ordered words and the line's own time span.
///
/// `start_ms` is the line's declared timestamp (or the inherited one for
/// tag-less continuation lines); it is not guaranteed to equal the first
/// word's start. Lines that parse to zero words are never emitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    pub speaker: SpeakerRole,
    pub words: Vec<Word>,
    pub start_ms: u64,
    pub end_ms: u64,
    /// For background-vocal lines only: the speaker of the most recent
    /// non-background line, used for layout alignment.
    pub parent_speaker: Option<SpeakerRole>,
}

impl LyricLine {
    /// Plain text of the line, words joined by single spaces.
    pub fn full_text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Top-level parse artifact: lines in document order, read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LyricsTimeline {
    pub lines: Vec<LyricLine>,
}

impl LyricsTimeline {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Failure modes of the (out-of-scope) raw lyrics fetch layer. Providers map
/// network/HTTP problems into these before text ever reaches the parser.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("lyrics not found")]
    NotFound,
    #[error("provider error: {0}")]
    Provider(String),
}

/// Fetch result: raw enhanced-LRC markup as UTF-8 text.
pub type FetchResult = Result<String, FetchError>;

/// Opaque producer of raw lyrics markup. The engine itself never performs
/// I/O; callers plug a provider in front of `parse::parse_timeline`.
pub trait RawLyricsSource {
    fn fetch_raw_lyrics(
        &self,
        title: &str,
        artist: &str,
        duration_hint_ms: Option<u64>,
    ) -> FetchResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_text_joins_words_with_spaces() {
        let line = LyricLine {
            speaker: SpeakerRole::V1,
            words: vec![Word::new("Hello", 0, 500), Word::new("World", 500, 1000)],
            start_ms: 0,
            end_ms: 1000,
            parent_speaker: None,
        };
        assert_eq!(line.full_text(), "Hello World");
    }

    #[test]
    fn timeline_round_trips_through_serde() {
        let timeline = LyricsTimeline {
            lines: vec![LyricLine {
                speaker: SpeakerRole::Bg,
                words: vec![Word::new("Ooh", 1000, 2500)],
                start_ms: 1000,
                end_ms: 2500,
                parent_speaker: Some(SpeakerRole::V2),
            }],
        };
        let json = serde_json::to_string(&timeline).unwrap();
        let back: LyricsTimeline = serde_json::from_str(&json).unwrap();
        assert_eq!(back, timeline);
    }
}
