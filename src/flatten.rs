// flatten.rs: lossy single-track projection of a timeline for callers that
// only need line-timestamped karaoke highlighting (legacy rendering modes).
// Speaker and background-vocal structure are dropped.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::types::LyricsTimeline;

/// Per-word timing for the flat view, with grapheme clusters precomputed so
/// renderers can slice highlight boundaries without per-tick allocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTimestamp {
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
    /// Grapheme cluster slices of `text`.
    pub graphemes: Vec<String>,
    /// Byte offset of the start of each grapheme in `text`.
    pub grapheme_byte_offsets: Vec<usize>,
}

/// One flattened line: timestamp, joined text, optional word timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatLine {
    pub time_ms: u64,
    pub text: String,
    pub words: Option<Vec<WordTimestamp>>,
}

/// Project a hierarchical timeline onto the flat shape, in line order.
pub fn flatten_timeline(timeline: &LyricsTimeline) -> Vec<FlatLine> {
    timeline
        .lines
        .iter()
        .map(|line| {
            let words: Vec<WordTimestamp> = line
                .words
                .iter()
                .map(|w| {
                    let graphemes: Vec<String> =
                        UnicodeSegmentation::graphemes(w.text.as_str(), true)
                            .map(|g| g.to_string())
                            .collect();
                    let mut offsets = Vec::with_capacity(graphemes.len());
                    let mut acc = 0usize;
                    for g in &graphemes {
                        offsets.push(acc);
                        acc += g.len();
                    }
                    WordTimestamp {
                        start_ms: w.start_ms,
                        end_ms: w.end_ms,
                        text: w.text.clone(),
                        graphemes,
                        grapheme_byte_offsets: offsets,
                    }
                })
                .collect();
            FlatLine {
                time_ms: line.start_ms,
                text: line.full_text(),
                words: if words.is_empty() { None } else { Some(words) },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::parse::parse_timeline;

    #[test]
    fn flattening_drops_speaker_structure_but_keeps_timing() {
        let timeline = parse_timeline(
            "[00:10.000]v1:<00:11.000>He<00:11.500>llo <00:12.000>World\n\
             [00:13.000]bg:<00:13.500>Ooh",
            &EngineConfig::default(),
        );
        let flat = flatten_timeline(&timeline);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].time_ms, 10_000);
        assert_eq!(flat[0].text, "Hello World");
        let words = flat[0].words.as_ref().unwrap();
        assert_eq!(words[0].text, "Hello");
        assert_eq!(words[0].start_ms, 11_000);
        assert_eq!(words[1].end_ms, 13_000);
    }

    #[test]
    fn grapheme_offsets_line_up_with_byte_positions() {
        let timeline = parse_timeline(
            "[00:00.000]v1:<00:00.000>ne\u{301}e",
            &EngineConfig::default(),
        );
        let flat = flatten_timeline(&timeline);
        let words = flat[0].words.as_ref().unwrap();
        let word = &words[0];
        assert_eq!(word.graphemes.len(), 3); // "n", "e\u{301}", "e"
        assert_eq!(word.grapheme_byte_offsets, vec![0, 1, 4]);
        for (g, off) in word.graphemes.iter().zip(&word.grapheme_byte_offsets) {
            assert_eq!(&word.text[*off..*off + g.len()], g.as_str());
        }
    }
}
