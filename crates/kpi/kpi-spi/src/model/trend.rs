//! Trend model: labels, directions, thresholds and the fitted line

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Strength/direction category of a fitted trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrendLabel {
    StrongGrowth,
    ModerateGrowth,
    Stable,
    ModerateDecline,
    StrongDecline,
}

impl TrendLabel {
    /// Identifier used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendLabel::StrongGrowth => "strongGrowth",
            TrendLabel::ModerateGrowth => "moderateGrowth",
            TrendLabel::Stable => "stable",
            TrendLabel::ModerateDecline => "moderateDecline",
            TrendLabel::StrongDecline => "strongDecline",
        }
    }

    /// Human-readable phrase, suitable for prompts and summaries
    pub fn description(&self) -> &'static str {
        match self {
            TrendLabel::StrongGrowth => "strong growth",
            TrendLabel::ModerateGrowth => "moderate growth",
            TrendLabel::Stable => "stable",
            TrendLabel::ModerateDecline => "moderate decline",
            TrendLabel::StrongDecline => "strong decline",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            TrendLabel::StrongGrowth | TrendLabel::ModerateGrowth => Direction::Positive,
            TrendLabel::Stable => Direction::Neutral,
            TrendLabel::ModerateDecline | TrendLabel::StrongDecline => Direction::Negative,
        }
    }

    /// Position on the decline-to-growth scale, -2..=2
    pub fn rank(&self) -> i8 {
        match self {
            TrendLabel::StrongDecline => -2,
            TrendLabel::ModerateDecline => -1,
            TrendLabel::Stable => 0,
            TrendLabel::ModerateGrowth => 1,
            TrendLabel::StrongGrowth => 2,
        }
    }
}

impl std::fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-way directional signal used to pick driver pools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
    Neutral,
}

impl Direction {
    /// Derive a direction from free text such as "moderate growth".
    ///
    /// Recognizes English and Russian keywords; anything else is neutral.
    pub fn from_description(text: &str) -> Self {
        let text = text.to_lowercase();
        if ["growth", "рост"].iter().any(|k| text.contains(k)) {
            Direction::Positive
        } else if ["decline", "сниж", "паден"].iter().any(|k| text.contains(k)) {
            Direction::Negative
        } else {
            Direction::Neutral
        }
    }
}

impl From<TrendLabel> for Direction {
    fn from(label: TrendLabel) -> Self {
        label.direction()
    }
}

/// Relative slope thresholds (fractions of the series' first value)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendThresholds {
    /// Above this the trend is strong (default 0.015)
    pub strong: f64,
    /// Above this the trend is moderate (default 0.005)
    pub moderate: f64,
}

impl TrendThresholds {
    pub fn new(strong: f64, moderate: f64) -> Result<Self> {
        let thresholds = Self { strong, moderate };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.strong.is_finite() || !self.moderate.is_finite() {
            return Err(AnalysisError::invalid("trend thresholds must be finite"));
        }
        if self.moderate < 0.0 || self.strong < 0.0 {
            return Err(AnalysisError::invalid("trend thresholds must be non-negative"));
        }
        if self.moderate > self.strong {
            return Err(AnalysisError::invalid(format!(
                "moderate threshold {} exceeds strong threshold {}",
                self.moderate, self.strong
            )));
        }
        Ok(())
    }
}

impl Default for TrendThresholds {
    fn default() -> Self {
        Self {
            strong: 0.015,
            moderate: 0.005,
        }
    }
}

/// Fitted OLS trend of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Fitted value at every input index; same length as the input
    pub line: Vec<f64>,
    pub label: TrendLabel,
    pub slope: f64,
    pub intercept: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_serializes_camel_case() {
        let json = serde_json::to_string(&TrendLabel::ModerateGrowth).unwrap();
        assert_eq!(json, "\"moderateGrowth\"");
        assert_eq!(TrendLabel::ModerateGrowth.to_string(), "moderateGrowth");
    }

    #[test]
    fn test_label_round_trips_through_identifier() {
        let label: TrendLabel = serde_json::from_str("\"strongDecline\"").unwrap();
        assert_eq!(label, TrendLabel::StrongDecline);
    }

    #[test]
    fn test_label_direction() {
        assert_eq!(TrendLabel::StrongGrowth.direction(), Direction::Positive);
        assert_eq!(TrendLabel::ModerateGrowth.direction(), Direction::Positive);
        assert_eq!(TrendLabel::Stable.direction(), Direction::Neutral);
        assert_eq!(TrendLabel::ModerateDecline.direction(), Direction::Negative);
        assert_eq!(Direction::from(TrendLabel::StrongDecline), Direction::Negative);
    }

    #[test]
    fn test_label_rank_is_ordered() {
        let labels = [
            TrendLabel::StrongDecline,
            TrendLabel::ModerateDecline,
            TrendLabel::Stable,
            TrendLabel::ModerateGrowth,
            TrendLabel::StrongGrowth,
        ];
        for pair in labels.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn test_direction_from_description() {
        assert_eq!(Direction::from_description("Moderate growth"), Direction::Positive);
        assert_eq!(Direction::from_description("сильный рост"), Direction::Positive);
        assert_eq!(Direction::from_description("strong decline"), Direction::Negative);
        assert_eq!(Direction::from_description("Умеренное снижение"), Direction::Negative);
        assert_eq!(Direction::from_description("stable"), Direction::Neutral);
        assert_eq!(Direction::from_description(""), Direction::Neutral);
    }

    #[test]
    fn test_default_thresholds() {
        let t = TrendThresholds::default();
        assert_eq!(t.strong, 0.015);
        assert_eq!(t.moderate, 0.005);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_thresholds_reject_inverted_order() {
        assert!(TrendThresholds::new(0.001, 0.01).is_err());
    }

    #[test]
    fn test_thresholds_reject_non_finite() {
        assert!(TrendThresholds::new(f64::NAN, 0.01).is_err());
        assert!(TrendThresholds::new(0.02, -0.01).is_err());
    }
}
