//! Scrub smoothing between scroll-derived progress and rendered progress

use crate::ease::Ease;
use serde::{Deserialize, Serialize};

/// How a trigger's progress follows the scroll position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScrubRepr", into = "ScrubRepr")]
pub enum Scrub {
    /// Rendered progress equals scroll progress on every scroll change
    Linked,
    /// Rendered progress catches up with scroll progress over this many seconds
    Smoothed(f64),
}

impl Default for Scrub {
    fn default() -> Self {
        Scrub::Linked
    }
}

/// Config-file form: `scrub = true` or `scrub = 2`
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ScrubRepr {
    Flag(bool),
    Seconds(f64),
}

impl TryFrom<ScrubRepr> for Scrub {
    type Error = String;

    fn try_from(repr: ScrubRepr) -> Result<Self, Self::Error> {
        match repr {
            ScrubRepr::Flag(true) => Ok(Scrub::Linked),
            ScrubRepr::Flag(false) => {
                Err("scrub = false is not supported; segments are always scroll-driven".into())
            }
            ScrubRepr::Seconds(s) if s.is_finite() && s > 0.0 => Ok(Scrub::Smoothed(s)),
            ScrubRepr::Seconds(s) if s == 0.0 => Ok(Scrub::Linked),
            ScrubRepr::Seconds(s) => Err(format!("scrub must be a non-negative number, got {}", s)),
        }
    }
}

impl From<Scrub> for ScrubRepr {
    fn from(scrub: Scrub) -> Self {
        match scrub {
            Scrub::Linked => ScrubRepr::Flag(true),
            Scrub::Smoothed(s) => ScrubRepr::Seconds(s),
        }
    }
}

/// Rendered progress below this distance from the target counts as settled.
const SETTLE_EPSILON: f32 = 1e-6;

/// Playback state of one scrubbed trigger.
///
/// `target` is where the scroll position says the tween should be;
/// `rendered` is what was last applied. A scroll change retargets the
/// catch-up from the current rendered value, so a sequence of scrolls in
/// one direction moves `rendered` monotonically.
#[derive(Debug, Clone)]
pub struct ScrubState {
    mode: Scrub,
    rendered: f32,
    target: f32,
    from: f32,
    elapsed: f64,
}

impl ScrubState {
    pub fn new(mode: Scrub, initial: f32) -> Self {
        let mode = match mode {
            Scrub::Smoothed(s) if s <= 0.0 => Scrub::Linked,
            other => other,
        };
        Self {
            mode,
            rendered: initial,
            target: initial,
            from: initial,
            elapsed: 0.0,
        }
    }

    pub fn mode(&self) -> Scrub {
        self.mode
    }

    pub fn rendered(&self) -> f32 {
        self.rendered
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        (self.rendered - self.target).abs() <= SETTLE_EPSILON
    }

    /// Point the scrub at a new scroll-derived progress.
    ///
    /// Returns true when the rendered progress changed immediately, which
    /// only happens for `Scrub::Linked`.
    pub fn set_target(&mut self, target: f32) -> bool {
        let target = target.clamp(0.0, 1.0);
        if (target - self.target).abs() <= SETTLE_EPSILON {
            return false;
        }
        self.target = target;

        match self.mode {
            Scrub::Linked => {
                let changed = (self.rendered - target).abs() > SETTLE_EPSILON;
                self.rendered = target;
                changed
            }
            Scrub::Smoothed(_) => {
                self.from = self.rendered;
                self.elapsed = 0.0;
                false
            }
        }
    }

    /// Advance the catch-up by `dt` seconds. Returns true when the rendered
    /// progress moved.
    pub fn advance(&mut self, dt: f64) -> bool {
        let Scrub::Smoothed(duration) = self.mode else {
            return false;
        };
        if self.is_settled() {
            if self.rendered != self.target {
                self.rendered = self.target;
                return true;
            }
            return false;
        }

        self.elapsed += dt.max(0.0);
        let previous = self.rendered;
        let t = self.elapsed / duration;
        self.rendered = if t >= 1.0 {
            self.target
        } else {
            self.from + (self.target - self.from) * Ease::Power3Out.apply(t as f32)
        };
        self.rendered != previous
    }
}
