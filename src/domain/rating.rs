//! Star breakdown for a product rating.

use super::entities::Rating;

/// Number of star slots shown for every rating.
pub const STAR_SLOTS: u8 = 5;

/// Glyph counts for a rating rendered as five stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarBreakdown {
    /// Fully filled stars.
    pub filled: u8,
    /// Half star indicator, 0 or 1.
    pub half: u8,
    /// Empty stars filling the remaining slots.
    pub empty: u8,
}

impl StarBreakdown {
    /// Splits `rate` into filled, half and empty stars.
    ///
    /// `rate` is clamped into `[0, 5]`. A fractional part of 0.5 or more
    /// adds a half star.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_rate(rate: f64) -> Self {
        let rate = if rate.is_finite() {
            rate.clamp(0.0, Rating::MAX)
        } else {
            0.0
        };

        let filled = rate.floor() as u8;
        let half = u8::from(rate.fract() >= 0.5);
        let empty = STAR_SLOTS - filled - half;

        Self {
            filled,
            half,
            empty,
        }
    }

    /// Total glyphs, always [`STAR_SLOTS`].
    #[must_use]
    pub const fn total(self) -> u8 {
        self.filled + self.half + self.empty
    }
}

/// Numeric rating fixed to one decimal place, e.g. `(4.5)`.
#[must_use]
pub fn rating_caption(rate: f64) -> String {
    format!("({rate:.1})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0, 0, 0, 5 ; "zero")]
    #[test_case(5.0, 5, 0, 0 ; "perfect")]
    #[test_case(4.5, 4, 1, 0 ; "four and a half")]
    #[test_case(3.9, 3, 1, 1 ; "rounds up to half")]
    #[test_case(2.1, 2, 0, 3 ; "small remainder")]
    #[test_case(0.5, 0, 1, 4 ; "half only")]
    fn test_breakdown(rate: f64, filled: u8, half: u8, empty: u8) {
        let stars = StarBreakdown::from_rate(rate);
        assert_eq!(
            stars,
            StarBreakdown {
                filled,
                half,
                empty
            }
        );
    }

    #[test]
    fn test_glyphs_always_sum_to_five() {
        for step in 0..=500 {
            let rate = f64::from(step) / 100.0;
            let stars = StarBreakdown::from_rate(rate);
            assert_eq!(stars.total(), STAR_SLOTS, "rate {rate}");
            assert_eq!(f64::from(stars.filled), rate.floor(), "rate {rate}");
            assert_eq!(stars.half == 1, rate % 1.0 >= 0.5, "rate {rate}");
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(StarBreakdown::from_rate(9.0).filled, 5);
        assert_eq!(StarBreakdown::from_rate(-2.0).empty, 5);
    }

    #[test]
    fn test_caption_uses_one_decimal() {
        assert_eq!(rating_caption(4.0), "(4.0)");
        assert_eq!(rating_caption(3.94), "(3.9)");
        assert_eq!(rating_caption(4.5), "(4.5)");
    }
}
