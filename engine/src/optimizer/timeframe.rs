// Timeframe horizon: multiplier and allowed R:R band per chart timeframe
use shared::models::TimeFrame;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeframeProfile {
    pub timeframe: TimeFrame,
    pub multiplier: f64,
    pub min_rr: f64,
    pub max_rr: f64,
    pub label: &'static str,
}

impl TimeframeProfile {
    pub fn for_timeframe(timeframe: TimeFrame) -> Self {
        let (multiplier, min_rr, max_rr, label) = match timeframe {
            TimeFrame::Minute1 => (0.8, 1.2, 2.0, "1 Minute"),
            TimeFrame::Minute5 => (0.9, 1.5, 2.5, "5 Minutes"),
            TimeFrame::Minute15 => (1.0, 1.5, 3.0, "15 Minutes"),
            TimeFrame::Hour1 => (1.1, 2.0, 4.0, "1 Hour"),
            TimeFrame::Hour4 => (1.2, 2.5, 5.0, "4 Hours"),
            TimeFrame::Day1 => (1.3, 3.0, 6.0, "1 Day"),
        };
        TimeframeProfile {
            timeframe,
            multiplier,
            min_rr,
            max_rr,
            label,
        }
    }

    /// Unknown codes resolve to the 15m profile.
    pub fn resolve(code: &str) -> Self {
        Self::for_timeframe(TimeFrame::from_code(code))
    }

    /// Keeps a ratio inside this timeframe's band. NaN lands on the floor.
    pub fn clamp_rr(&self, ratio: f64) -> f64 {
        ratio.max(self.min_rr).min(self.max_rr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_table() {
        let expected = [
            ("1m", 0.8, 1.2, 2.0),
            ("5m", 0.9, 1.5, 2.5),
            ("15m", 1.0, 1.5, 3.0),
            ("1h", 1.1, 2.0, 4.0),
            ("4h", 1.2, 2.5, 5.0),
            ("1d", 1.3, 3.0, 6.0),
        ];
        for (code, multiplier, min_rr, max_rr) in expected {
            let profile = TimeframeProfile::resolve(code);
            assert_eq!(profile.timeframe.code(), code);
            assert_eq!(profile.multiplier, multiplier, "multiplier for {}", code);
            assert_eq!(profile.min_rr, min_rr, "min_rr for {}", code);
            assert_eq!(profile.max_rr, max_rr, "max_rr for {}", code);
        }
    }

    #[test]
    fn test_unknown_code_falls_back_to_fifteen_minutes() {
        let profile = TimeframeProfile::resolve("2w");
        assert_eq!(profile, TimeframeProfile::for_timeframe(TimeFrame::Minute15));
        assert_eq!(profile.label, "15 Minutes");
    }

    #[test]
    fn test_clamp_rr() {
        let profile = TimeframeProfile::resolve("1h");
        assert_eq!(profile.clamp_rr(1.0), 2.0);
        assert_eq!(profile.clamp_rr(3.3), 3.3);
        assert_eq!(profile.clamp_rr(9.0), 4.0);
        assert_eq!(profile.clamp_rr(f64::NAN), 2.0);
    }
}
