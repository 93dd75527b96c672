use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ThresholdError {
    #[error("healthy threshold {healthy_min} must exceed at-risk threshold {at_risk_min}")]
    Inverted { healthy_min: u8, at_risk_min: u8 },

    #[error("healthy threshold {0} is above 100")]
    OutOfRange(u8),
}

/// Qualitative classification of a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Healthy,
    AtRisk,
    Critical,
}

impl HealthBand {
    /// Label as stored in the remote store's single-select field.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            HealthBand::Healthy => "Healthy",
            HealthBand::AtRisk => "At Risk",
            HealthBand::Critical => "Critical",
        }
    }

    /// Hex color used wherever the band is rendered.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            HealthBand::Healthy => "#16a34a",
            HealthBand::AtRisk => "#f97316",
            HealthBand::Critical => "#ef4444",
        }
    }

    #[must_use]
    pub fn headline(&self) -> &'static str {
        match self {
            HealthBand::Healthy => "Your Inventory Is in Good Shape",
            HealthBand::AtRisk => "Your Inventory Is Leaking Money",
            HealthBand::Critical => "Your Inventory Is Actively Hurting Cash Flow",
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            HealthBand::Healthy => {
                "You have solid control over your inventory, with only minor \
                 optimization opportunities."
            }
            HealthBand::AtRisk => {
                "You're carrying avoidable costs and inefficiencies that will \
                 compound if left unchecked."
            }
            HealthBand::Critical => {
                "Excess stock, stockouts, and manual fixes are draining time \
                 and working capital."
            }
        }
    }
}

/// Band boundaries, configuration rather than constants.
///
/// Earlier rubric revisions disagreed on the cut points (70/40 vs 75/45);
/// the defaults are the canonical 70/40 choice, and callers that need the
/// other revision construct their own thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandThresholds {
    healthy_min: u8,
    at_risk_min: u8,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            healthy_min: 70,
            at_risk_min: 40,
        }
    }
}

impl BandThresholds {
    /// Build thresholds with explicit cut points.
    ///
    /// # Errors
    ///
    /// Returns `ThresholdError` when `at_risk_min >= healthy_min` or
    /// `healthy_min > 100`.
    pub fn new(healthy_min: u8, at_risk_min: u8) -> Result<Self, ThresholdError> {
        if healthy_min > 100 {
            return Err(ThresholdError::OutOfRange(healthy_min));
        }
        if at_risk_min >= healthy_min {
            return Err(ThresholdError::Inverted {
                healthy_min,
                at_risk_min,
            });
        }
        Ok(Self {
            healthy_min,
            at_risk_min,
        })
    }

    #[must_use]
    pub fn healthy_min(&self) -> u8 {
        self.healthy_min
    }

    #[must_use]
    pub fn at_risk_min(&self) -> u8 {
        self.at_risk_min
    }

    /// Classify a percentage, highest band first.
    ///
    /// Partitions [0, 100] into three contiguous, non-overlapping bands.
    #[must_use]
    pub fn classify(&self, percentage: u8) -> HealthBand {
        if percentage >= self.healthy_min {
            HealthBand::Healthy
        } else if percentage >= self.at_risk_min {
            HealthBand::AtRisk
        } else {
            HealthBand::Critical
        }
    }
}
