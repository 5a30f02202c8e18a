//! Video generation pricing.

use crate::CLIP_SECONDS;
use serde::{Deserialize, Serialize};

/// Per-second pricing for generated clips.
///
/// The video service bills by output length, so one clip costs
/// `per_second_usd * clip_seconds`.
///
/// # Examples
///
/// ```
/// use clipchain_core::PricingPolicy;
///
/// let pricing = PricingPolicy::default();
/// assert_eq!(pricing.per_clip(), 4.0);
/// assert_eq!(pricing.estimate(3, false).total, 12.0);
/// assert_eq!(pricing.estimate(3, true).total, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PricingPolicy {
    /// USD per second of generated video
    #[serde(default = "default_per_second")]
    per_second_usd: f64,
    /// Seconds per clip
    #[serde(default = "default_clip_seconds")]
    clip_seconds: u32,
}

fn default_per_second() -> f64 {
    0.50
}

fn default_clip_seconds() -> u32 {
    CLIP_SECONDS
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            per_second_usd: default_per_second(),
            clip_seconds: default_clip_seconds(),
        }
    }
}

impl PricingPolicy {
    /// Create a policy with explicit rates.
    pub fn new(per_second_usd: f64, clip_seconds: u32) -> Self {
        Self {
            per_second_usd,
            clip_seconds,
        }
    }

    /// Cost of one clip in USD.
    pub fn per_clip(&self) -> f64 {
        self.per_second_usd * f64::from(self.clip_seconds)
    }

    /// Estimate the cost of generating `clips` videos.
    ///
    /// When only prompts are requested nothing is billed.
    pub fn estimate(&self, clips: usize, prompts_only: bool) -> CostEstimate {
        let cost_per_clip = self.per_clip();
        let total = if prompts_only {
            0.0
        } else {
            cost_per_clip * clips as f64
        };
        CostEstimate {
            clips,
            cost_per_clip,
            total,
            currency: "USD".to_string(),
            prompts_only,
        }
    }
}

/// Result of [`PricingPolicy::estimate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    /// Number of clips
    pub clips: usize,
    /// USD per clip
    pub cost_per_clip: f64,
    /// Total USD
    pub total: f64,
    /// Currency code
    pub currency: String,
    /// Whether video generation was skipped
    pub prompts_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_rate() {
        let pricing = PricingPolicy::new(0.75, 4);
        assert_eq!(pricing.per_clip(), 3.0);
        let estimate = pricing.estimate(2, false);
        assert_eq!(estimate.total, 6.0);
        assert_eq!(estimate.currency, "USD");
    }

    #[test]
    fn zero_clips_costs_nothing() {
        assert_eq!(PricingPolicy::default().estimate(0, false).total, 0.0);
    }
}
