//! Easing curves applied to tween progress

use serde::{Deserialize, Serialize};

/// Easing curve mapping linear progress in [0, 1] onto eased progress.
///
/// Every curve is monotonic and maps 0 → 0 and 1 → 1, so an eased tween
/// never overshoots its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ease {
    #[serde(rename = "none", alias = "linear")]
    Linear,
    /// Quadratic ease-out, the default for property tweens
    #[default]
    #[serde(rename = "power1.out")]
    Power1Out,
    #[serde(rename = "power2.out")]
    Power2Out,
    /// Quartic ease-out, used by scrub catch-up
    #[serde(rename = "power3.out")]
    Power3Out,
    #[serde(rename = "power1.inOut")]
    Power1InOut,
}

impl Ease {
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 5] = [
        Ease::Linear,
        Ease::Power1Out,
        Ease::Power2Out,
        Ease::Power3Out,
        Ease::Power1InOut,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0, "{:?}", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{:?}", ease);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for ease in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = ease.apply(i as f32 / 100.0);
                assert!(v >= prev, "{:?} decreased at step {}", ease, i);
                prev = v;
            }
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Ease::Power1Out.apply(-1.0), 0.0);
        assert!((Ease::Power1Out.apply(2.0) - 1.0).abs() < 1e-6);
    }
}
