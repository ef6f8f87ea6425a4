// parse.rs: enhanced LRC (word-timestamped) markup -> hierarchical timeline.
//
// The format is loose: a line optionally starts with `[MM:SS.mmm]`, then an
// optional `v1:`/`v2:`/`bg:` speaker tag, then `<MM:SS.mmm>text` word tokens.
// Fractional timestamps come in two widths (2 digits = centiseconds,
// 3 digits = milliseconds). End times are absent from the source and have to
// be inferred from the next word, or from the next informative line.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::EngineConfig;
use crate::emphasis::score_words;
use crate::types::{LyricLine, LyricsTimeline, SpeakerRole, Word};

static LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(\d{2}):(\d{2})\.(\d{2,3})\](.*)$").unwrap());
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(\d{2}):(\d{2})\.(\d{2,3})>([^<]*)").unwrap());

/// A `<timestamp>text` token, text kept verbatim (trailing spaces matter for
/// word-boundary reconstruction).
struct Token {
    start_ms: u64,
    text: String,
}

/// One physical line that produced at least one token.
struct Entry {
    /// Declared line timestamp, or the inherited one for tag-less lines.
    start_ms: u64,
    /// Look-ahead anchor: the declared timestamp if present, else the first
    /// token's start. The previous line's last word ends here.
    anchor_ms: u64,
    speaker: SpeakerRole,
    tokens: Vec<Token>,
}

/// Parse enhanced LRC markup into a speaker-aware, word-timed timeline with
/// emphasis already scored.
///
/// Never fails: lines that match no recognized grammar are skipped, and the
/// worst case is an empty timeline. Pure and deterministic, so results may be
/// memoized by the caller.
pub fn parse_timeline(markup: &str, cfg: &EngineConfig) -> LyricsTimeline {
    let entries = collect_entries(markup);

    let mut lines = Vec::with_capacity(entries.len());
    let mut last_non_bg = SpeakerRole::V1;

    for (i, entry) in entries.iter().enumerate() {
        let next_anchor_ms = entries.get(i + 1).map(|e| e.anchor_ms);
        let words = build_words(&entry.tokens, next_anchor_ms, cfg.parser.fallback_tail_ms);
        if words.is_empty() {
            continue;
        }

        // Score before trimming: the scorer needs the raw trailing spaces to
        // tell word boundaries apart from timestamp-split syllables.
        let mut words = score_words(&words, &cfg.emphasis);
        for word in &mut words {
            word.text = word.text.trim().to_string();
        }

        let parent_speaker = (entry.speaker == SpeakerRole::Bg).then_some(last_non_bg);
        if entry.speaker != SpeakerRole::Bg {
            last_non_bg = entry.speaker;
        }

        let end_ms = words.last().map_or(entry.start_ms, |w| w.end_ms);
        lines.push(LyricLine {
            speaker: entry.speaker,
            words,
            start_ms: entry.start_ms,
            end_ms,
            parent_speaker,
        });
    }

    LyricsTimeline { lines }
}

/// First pass: one record per informative physical line, in document order.
/// Timestamp-only marker lines update the inherited timestamp but produce no
/// entry, so the look-ahead naturally skips them.
fn collect_entries(markup: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut last_tag_ms: Option<u64> = None;
    let mut skipped = 0usize;

    for raw in markup.lines() {
        let (tag_ms, content) = match LINE_RE.captures(raw) {
            Some(caps) => {
                let tag = timestamp_ms(&caps[1], &caps[2], &caps[3]);
                let rest = caps.get(4).map_or("", |m| m.as_str());
                (Some(tag), rest)
            }
            None => (None, raw),
        };

        let (speaker, body) = strip_speaker_tag(content);
        let tokens: Vec<Token> = WORD_RE
            .captures_iter(body)
            .map(|caps| Token {
                start_ms: timestamp_ms(&caps[1], &caps[2], &caps[3]),
                text: caps.get(4).map_or("", |m| m.as_str()).to_string(),
            })
            .filter(|t| !t.text.trim().is_empty())
            .collect();

        // Tag-less lines inherit the most recent declared timestamp, or 0
        // when the document starts without one.
        let start_ms = tag_ms.or(last_tag_ms).unwrap_or(0);
        if let Some(tag) = tag_ms {
            last_tag_ms = Some(tag);
        }

        if tokens.is_empty() {
            if tag_ms.is_none() && !raw.trim().is_empty() {
                skipped += 1;
                tracing::debug!(line = raw, "skipped non-lyric line");
            }
            continue;
        }

        let anchor_ms = tag_ms.unwrap_or(tokens[0].start_ms);
        entries.push(Entry {
            start_ms,
            anchor_ms,
            speaker,
            tokens,
        });
    }

    if skipped > 0 {
        tracing::debug!(skipped, "ignored non-lyric lines during parse");
    }
    entries
}

fn strip_speaker_tag(content: &str) -> (SpeakerRole, &str) {
    if let Some(rest) = content.strip_prefix("v1:") {
        (SpeakerRole::V1, rest)
    } else if let Some(rest) = content.strip_prefix("v2:") {
        (SpeakerRole::V2, rest)
    } else if let Some(rest) = content.strip_prefix("bg:") {
        (SpeakerRole::Bg, rest)
    } else {
        (SpeakerRole::Unknown, content)
    }
}

/// Merge timestamp-split syllables and assign end times.
///
/// Adjacent tokens whose accumulated text does not end in a space belong to
/// the same word. Each word ends where the next one starts; the last word
/// ends at the next informative line's anchor, or gets the fallback tail when
/// the document ends here.
fn build_words(tokens: &[Token], next_anchor_ms: Option<u64>, fallback_tail_ms: u64) -> Vec<Word> {
    let mut merged: Vec<(u64, String)> = Vec::new();
    for token in tokens {
        let continues = merged
            .last()
            .map(|(_, text)| !text.ends_with(' '))
            .unwrap_or(false);
        if continues {
            if let Some((_, text)) = merged.last_mut() {
                text.push_str(&token.text);
            }
        } else {
            merged.push((token.start_ms, token.text.clone()));
        }
    }

    let mut words = Vec::with_capacity(merged.len());
    for (j, (start_ms, text)) in merged.iter().enumerate() {
        let end_ms = match merged.get(j + 1) {
            Some((next_start, _)) => *next_start,
            None => next_anchor_ms.unwrap_or(start_ms + fallback_tail_ms),
        };
        // Out-of-order documents can put the next anchor before this word;
        // clamp instead of rejecting.
        words.push(Word::new(text.clone(), *start_ms, end_ms.max(*start_ms)));
    }
    words
}

/// `minutes*60000 + seconds*1000 + fractional`, scaling 2-digit fractional
/// fields (centiseconds) by 10. Unparseable groups degrade to 0 so a single
/// bad number never sinks the whole document.
fn timestamp_ms(min: &str, sec: &str, frac: &str) -> u64 {
    let minutes = min.parse::<u64>().unwrap_or(0);
    let seconds = sec.parse::<u64>().unwrap_or(0);
    let fractional = frac.parse::<u64>().unwrap_or(0);
    let millis = if frac.len() == 2 { fractional * 10 } else { fractional };
    minutes * 60_000 + seconds * 1000 + millis
}
