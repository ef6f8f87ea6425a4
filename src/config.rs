// config.rs: named tunables for the parser and the emphasis scorer.
// The thresholds are empirical and subject to re-tuning, so they live here
// as plain configuration instead of literals inside the algorithms.

/// Parser tunables.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Tail duration granted to the last word of the document when no later
    /// line exists to infer an end time from.
    pub fallback_tail_ms: u64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            fallback_tail_ms: 1000,
        }
    }
}

/// Emphasis ("glow") scorer tunables.
#[derive(Debug, Clone)]
pub struct EmphasisConfig {
    /// Minimum duration for a word (or the longest member of a hyphen chain)
    /// to count as sustained.
    pub long_word_threshold_ms: u64,
    /// Divisor applied to the trimmed text length in the continuous score.
    pub length_divisor: f32,
    /// Divisor applied to the duration in seconds in the continuous score.
    pub duration_divisor: f32,
    /// Scores at or below this produce no emphasis.
    pub score_threshold: f32,
    /// Multiplier mapping the above-threshold score excess into [0, 1].
    pub score_scale: f32,
    /// Base emphasis for the longest member of a qualifying hyphen chain.
    pub chain_lead_base: f32,
    /// Per-member increment for the chain lead, and the flat emphasis every
    /// other chain member receives.
    pub chain_member_weight: f32,
}

impl Default for EmphasisConfig {
    fn default() -> Self {
        Self {
            long_word_threshold_ms: 1200,
            length_divisor: 12.0,
            duration_divisor: 2.0,
            score_threshold: 1.3,
            score_scale: 0.45,
            chain_lead_base: 0.5,
            chain_member_weight: 0.25,
        }
    }
}

/// Bundle passed to `parse::parse_timeline`.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub parser: ParserConfig,
    pub emphasis: EmphasisConfig,
}
