// lib.rs - synchronized lyrics engine: compiles enhanced (word-timestamped)
// LRC markup into a speaker-aware, time-indexed timeline and scores the
// emphasis ("glow") values that drive playback-synchronized highlighting.

pub mod config;
pub mod emphasis;
pub mod flatten;
pub mod parse;
pub mod position;
pub mod types;

pub use config::{EmphasisConfig, EngineConfig, ParserConfig};
pub use emphasis::score_words;
pub use flatten::{FlatLine, WordTimestamp, flatten_timeline};
pub use parse::parse_timeline;
pub use types::{
    FetchError, FetchResult, LyricLine, LyricsTimeline, RawLyricsSource, SpeakerRole, Word,
};
