// Token estimation
//
// One fixed character-to-token ratio, used for every budget check so that
// the sum of per-addition estimates never drifts from the whole-map estimate.

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenEstimator;

impl TokenEstimator {
    /// Average UTF-16 code units per token
    pub const CHARS_PER_TOKEN: f64 = 4.0;

    pub fn new() -> Self {
        Self
    }

    /// `ceil(units / 4)` over UTF-16 code units, so astral icons such as
    /// 🔧 count twice.
    pub fn estimate_string(&self, text: &str) -> usize {
        if text.is_empty() {
            0
        } else {
            (text.encode_utf16().count() as f64 / Self::CHARS_PER_TOKEN).ceil() as usize
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_up() {
        let estimator = TokenEstimator::new();
        assert_eq!(estimator.estimate_string(""), 0);
        assert_eq!(estimator.estimate_string("\n"), 1);
        assert_eq!(estimator.estimate_string("abcd"), 1);
        assert_eq!(estimator.estimate_string("abcde"), 2);
    }

    #[test]
    fn test_counts_utf16_units_not_bytes_or_scalars() {
        // 🔧 is a surrogate pair, the rest are single units
        assert_eq!(TokenEstimator.estimate_string("⋮│🔧⚡"), 2);
        assert_eq!(TokenEstimator.estimate_string("⋮│⚡x"), 1);
        assert_eq!(TokenEstimator.estimate_string("🏛️🔧"), 2);
    }
}
