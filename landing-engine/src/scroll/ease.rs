// ease.rs - Easing curves for scrubbed properties
//
// Each curve maps [0, 1] onto [0, 1] with both ends fixed.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    #[default]
    Linear,
    #[serde(alias = "power1.in")]
    QuadIn,
    #[serde(alias = "power1.out")]
    QuadOut,
    #[serde(alias = "power1.inOut")]
    QuadInOut,
    #[serde(alias = "power2.in")]
    CubicIn,
    #[serde(alias = "power2.out")]
    CubicOut,
    #[serde(alias = "power2.inOut")]
    CubicInOut,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadIn => t * t,
            Ease::QuadOut => 1.0 - (1.0 - t).powi(2),
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::CubicIn => t * t * t,
            Ease::CubicOut => 1.0 - (1.0 - t).powi(3),
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}
