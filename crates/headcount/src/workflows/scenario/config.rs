use serde::{Deserialize, Serialize};

/// Caller-supplied weights for the impact score. Each weight is a
/// non-negative real; there is no upper bound here, a reasonable front end
/// caps its sliders. Defaults favor compensation and seniority.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub compensation: f64,
    pub tenure: f64,
    pub seniority: f64,
    pub direct_reports: f64,
    pub equity: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            compensation: 1.0,
            tenure: 0.5,
            seniority: 1.0,
            direct_reports: 0.5,
            equity: 0.2,
        }
    }
}

impl ScoreWeights {
    /// Negative weights make the ranking meaningless; floor them at zero.
    pub(crate) fn clamped(self) -> Self {
        Self {
            compensation: self.compensation.max(0.0),
            tenure: self.tenure.max(0.0),
            seniority: self.seniority.max(0.0),
            direct_reports: self.direct_reports.max(0.0),
            equity: self.equity.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_sliders() {
        let weights = ScoreWeights::default();
        assert_eq!(weights.compensation, 1.0);
        assert_eq!(weights.tenure, 0.5);
        assert_eq!(weights.seniority, 1.0);
        assert_eq!(weights.direct_reports, 0.5);
        assert_eq!(weights.equity, 0.2);
    }

    #[test]
    fn clamped_floors_negative_weights() {
        let weights = ScoreWeights {
            compensation: -1.0,
            ..ScoreWeights::default()
        }
        .clamped();
        assert_eq!(weights.compensation, 0.0);
        assert_eq!(weights.tenure, 0.5);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let weights: ScoreWeights =
            serde_json::from_str(r#"{"compensation": 2.0}"#).expect("deserializes");
        assert_eq!(weights.compensation, 2.0);
        assert_eq!(weights.equity, 0.2);
    }
}
