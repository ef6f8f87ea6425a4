// emphasis.rs: "glow" scoring for sustained or emphasized syllables.
//
// Two heuristics cooperate in one left-to-right scan:
//   A. hyphen chains - a word wrapped across timestamp boundaries, each
//      member ending in `-` except the last, accumulates emphasis over the
//      whole chain;
//   B. conceptual words - adjacent words not separated by a space form one
//      unit whose length and duration feed a continuous score.
// A word consumed by one heuristic is never reconsidered by the other.

use crate::config::EmphasisConfig;
use crate::types::Word;

/// Annotate one line's words with emphasis values in [0, 1].
///
/// Pure and order-preserving: returns a new vector with identical text and
/// times, only `emphasis` populated. Lines are independent, so callers may
/// score them in any order (or in parallel).
pub fn score_words(words: &[Word], cfg: &EmphasisConfig) -> Vec<Word> {
    let mut out: Vec<Word> = words
        .iter()
        .map(|w| {
            let mut w = w.clone();
            w.emphasis = 0.0;
            w
        })
        .collect();

    let mut i = 0;
    while i < out.len() {
        if ends_with_hyphen(&out[i].text) {
            let last = chain_last_index(&out, i);
            if chain_qualifies(&out[i..=last], cfg) {
                apply_chain_emphasis(&mut out[i..=last], cfg);
                i = last + 1;
                continue;
            }
            // Non-qualifying chains fall through to the conceptual-word path.
        }

        let last = conceptual_last_index(&out, i);
        apply_conceptual_emphasis(&mut out[i..=last], cfg);
        i = last + 1;
    }

    out
}

/// Trailing-space tolerant: parser-fed words may keep the source token's
/// trailing space, which must not hide a wrap hyphen.
fn ends_with_hyphen(text: &str) -> bool {
    text.trim_end().ends_with('-')
}

/// Index of the chain's last member: the first word from `start` that does
/// not end in `-` closes the chain (and belongs to it).
fn chain_last_index(words: &[Word], start: usize) -> usize {
    let mut j = start;
    while ends_with_hyphen(&words[j].text) && j + 1 < words.len() {
        j += 1;
    }
    j
}

fn chain_qualifies(chain: &[Word], cfg: &EmphasisConfig) -> bool {
    if chain.len() < 2 {
        return false;
    }
    let joined: String = chain.iter().map(|w| w.text.as_str()).collect();
    if joined.matches('-').count() < 2 {
        return false;
    }
    let longest = chain.iter().map(Word::duration_ms).max().unwrap_or(0);
    longest >= cfg.long_word_threshold_ms
}

fn apply_chain_emphasis(chain: &mut [Word], cfg: &EmphasisConfig) {
    let lead = longest_member(chain);
    let lead_value = (cfg.chain_lead_base + cfg.chain_member_weight * (chain.len() - 1) as f32)
        .clamp(0.0, 1.0);
    for (k, word) in chain.iter_mut().enumerate() {
        word.emphasis = if k == lead {
            lead_value
        } else {
            cfg.chain_member_weight
        };
    }
}

/// Index of the conceptual word's last member: extend while the current
/// member's text does not end in a literal space.
fn conceptual_last_index(words: &[Word], start: usize) -> usize {
    let mut j = start;
    while !words[j].text.ends_with(' ') && j + 1 < words.len() {
        j += 1;
    }
    j
}

fn apply_conceptual_emphasis(group: &mut [Word], cfg: &EmphasisConfig) {
    let duration_ms = group[group.len() - 1]
        .end_ms
        .saturating_sub(group[0].start_ms);
    if duration_ms < cfg.long_word_threshold_ms {
        return;
    }

    let joined: String = group.iter().map(|w| w.text.as_str()).collect();
    let score = joined.trim().chars().count() as f32 / cfg.length_divisor
        + (duration_ms as f32 / 1000.0) / cfg.duration_divisor;
    if score > cfg.score_threshold {
        let lead = longest_member(group);
        group[lead].emphasis = ((score - cfg.score_threshold) * cfg.score_scale).clamp(0.0, 1.0);
    }
}

/// First index with the maximal duration (ties resolve to the earliest).
fn longest_member(words: &[Word]) -> usize {
    let mut best = 0;
    for (k, word) in words.iter().enumerate().skip(1) {
        if word.duration_ms() > words[best].duration_ms() {
            best = k;
        }
    }
    best
}
