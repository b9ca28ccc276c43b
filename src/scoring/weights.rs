use serde::{Deserialize, Serialize};

use crate::config;
use crate::structures::score_err::ScorecardError;

/// The three coefficients of the composite-score formula.
///
/// Each weight must sit inside `[0.0, 1.0]`; the weights are NOT
/// required to sum to 1, so composite scores may leave the range of
/// the underlying metrics. That is accepted behavior, not a bug.
///
/// Example JSON, any field may be left out to keep its default:
/// ```json
/// { "productivity": 0.5, "quality": 0.3, "timeliness": 0.2 }
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WeightVector {
    /// Weight applied to the Productivity column (default: 0.4)
    #[serde(default = "default_productivity")]
    pub productivity: f64,

    /// Weight applied to the Quality column (default: 0.35)
    #[serde(default = "default_quality")]
    pub quality: f64,

    /// Weight applied to the Timeliness column (default: 0.25)
    #[serde(default = "default_timeliness")]
    pub timeliness: f64,
}

fn default_productivity() -> f64 { config::DEFAULT_PRODUCTIVITY_WEIGHT }
fn default_quality() -> f64 { config::DEFAULT_QUALITY_WEIGHT }
fn default_timeliness() -> f64 { config::DEFAULT_TIMELINESS_WEIGHT }

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            productivity: default_productivity(),
            quality: default_quality(),
            timeliness: default_timeliness(),
        }
    }
}

impl WeightVector {
    pub fn new(productivity: f64, quality: f64, timeliness: f64) -> Self {
        Self { productivity, quality, timeliness }
    }

    /// checks every weight sits inside [0.0, 1.0]. NaN fails too.
    pub fn validate(&self) -> Result<(), ScorecardError> {
        for (name, value) in [
            ("productivity", self.productivity),
            ("quality", self.quality),
            ("timeliness", self.timeliness),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScorecardError::WeightOutOfRange { name, value });
            }
        }
        Ok(())
    }

    /// loads weights from a JSON document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, ScorecardError> {
        let weights: WeightVector = serde_json::from_str(json)
            .map_err(|e| ScorecardError::ParseFailure("weights".to_string(), e.to_string()))?;
        weights.validate()?;
        Ok(weights)
    }
}
