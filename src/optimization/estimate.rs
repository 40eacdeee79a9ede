//! Client-side token estimation
//!
//! Heuristic only: roughly 0.75 words per token. The backend's own counts are
//! authoritative whenever it reports them.

use serde::{Deserialize, Serialize};

/// Approximate token count: `ceil(words / 0.75)` over whitespace-delimited
/// words. Empty or blank text is 0.
pub fn estimate_tokens(text: &str) -> u64 {
    let words = text.split_whitespace().count() as u64;
    // words / 0.75 == words * 4 / 3, rounded up
    (words * 4).div_ceil(3)
}

/// Comparison of input and optimized token counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsEstimate {
    pub original_tokens: u64,
    pub optimized_tokens: u64,
    /// Negative when the optimized text is larger
    pub estimated_savings: i64,
    /// Percentage of `original_tokens`, rounded to two decimals
    pub estimated_savings_percent: f64,
}

impl SavingsEstimate {
    pub fn new(original_tokens: u64, optimized_tokens: u64) -> Self {
        let estimated_savings = original_tokens as i64 - optimized_tokens as i64;
        let estimated_savings_percent = if original_tokens > 0 {
            let percent = estimated_savings as f64 / original_tokens as f64 * 100.0;
            (percent * 100.0).round() / 100.0
        } else {
            0.0
        };

        Self {
            original_tokens,
            optimized_tokens,
            estimated_savings,
            estimated_savings_percent,
        }
    }

    /// Prefer backend-reported counts; fall back to the heuristic on each
    /// side independently when a count is missing or zero.
    pub fn from_counts(
        original_text: &str,
        optimized_text: &str,
        reported_original: Option<u64>,
        reported_optimized: Option<u64>,
    ) -> Self {
        let original = reported_original
            .filter(|&n| n > 0)
            .unwrap_or_else(|| estimate_tokens(original_text));
        let optimized = reported_optimized
            .filter(|&n| n > 0)
            .unwrap_or_else(|| estimate_tokens(optimized_text));
        Self::new(original, optimized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("   \n\t "), 0);
    }

    #[test]
    fn test_word_ratio() {
        assert_eq!(estimate_tokens("a b c"), 4);
        assert_eq!(estimate_tokens("  one  "), 2);
        assert_eq!(estimate_tokens("a b c d e f"), 8);
    }

    #[test]
    fn test_savings_percent_rounding() {
        let estimate = SavingsEstimate::new(3, 1);
        assert_eq!(estimate.estimated_savings, 2);
        assert_eq!(estimate.estimated_savings_percent, 66.67);
    }

    #[test]
    fn test_zero_original() {
        let estimate = SavingsEstimate::new(0, 4);
        assert_eq!(estimate.estimated_savings, -4);
        assert_eq!(estimate.estimated_savings_percent, 0.0);
    }

    #[test]
    fn test_reported_counts_win() {
        let estimate = SavingsEstimate::from_counts("a b c", "a", Some(100), Some(60));
        assert_eq!(estimate.original_tokens, 100);
        assert_eq!(estimate.optimized_tokens, 60);
        assert_eq!(estimate.estimated_savings_percent, 40.0);
    }

    #[test]
    fn test_missing_counts_fall_back() {
        let estimate = SavingsEstimate::from_counts("a b c", "a", None, Some(0));
        assert_eq!(estimate.original_tokens, 4);
        assert_eq!(estimate.optimized_tokens, 2);
    }
}
