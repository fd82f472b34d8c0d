// Section weights for the overall relevance score.
//
// The short description carries the most weight: it is what store search
// and users see first after the title.

use anyhow::Result;
use serde::Serialize;

/// Allowed drift from 1.0 when checking that weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Weights applied to each section's score. Always a convex combination:
/// every weight is finite and non-negative and they sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionWeights {
    /// Weight of the title score (default 0.3)
    pub title: f64,
    /// Weight of the short description score (default 0.5)
    pub short_description: f64,
    /// Weight of the long description score (default 0.2)
    pub long_description: f64,
}

impl Default for SectionWeights {
    fn default() -> Self {
        Self {
            title: 0.3,
            short_description: 0.5,
            long_description: 0.2,
        }
    }
}

impl SectionWeights {
    /// Build validated weights.
    pub fn new(title: f64, short_description: f64, long_description: f64) -> Result<Self> {
        let weights = Self {
            title,
            short_description,
            long_description,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn sum(&self) -> f64 {
        self.title + self.short_description + self.long_description
    }

    /// Check the convex-combination invariant.
    pub fn validate(&self) -> Result<()> {
        for (name, w) in [
            ("title", self.title),
            ("short description", self.short_description),
            ("long description", self.long_description),
        ] {
            if !w.is_finite() || w < 0.0 {
                anyhow::bail!("Invalid {name} weight {w}: weights must be finite and non-negative");
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            anyhow::bail!(
                "Section weights must sum to 1.0 (got {} + {} + {} = {})",
                self.title,
                self.short_description,
                self.long_description,
                sum
            );
        }
        Ok(())
    }

    /// Weighted sum of the three section scores. NaN in any score
    /// propagates to the result.
    pub fn combine(&self, title: f64, short_description: f64, long_description: f64) -> f64 {
        title * self.title
            + short_description * self.short_description
            + long_description * self.long_description
    }
}
