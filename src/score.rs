//! Scoreboard with an interpolated display value
//!
//! `target` is the raw running total; `displayed` chases it a fraction of the
//! remaining gap per tick so the HUD counts up smoothly.

use serde::{Deserialize, Serialize};

/// Raw score plus the value currently shown on the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    target: i64,
    displayed: i64,
    /// Fraction of the remaining gap closed per update
    rate: f64,
}

impl Scoreboard {
    pub fn new(rate: f64) -> Self {
        Self {
            target: 0,
            displayed: 0,
            rate,
        }
    }

    /// Adjust the raw total (negative for penalties)
    pub fn add(&mut self, delta: i64) {
        self.target += delta;
    }

    pub fn reset(&mut self) {
        self.target = 0;
        self.displayed = 0;
    }

    /// Move the displayed value one step toward the raw total.
    ///
    /// Rounds away from the current value so every call makes progress of at
    /// least one point; the step is clamped so it never passes the target.
    pub fn update(&mut self) {
        let gap = self.target - self.displayed;
        if gap == 0 {
            return;
        }
        let step = gap as f64 * self.rate;
        let next = if gap > 0 {
            ((self.displayed as f64 + step).ceil() as i64).clamp(self.displayed + 1, self.target)
        } else {
            ((self.displayed as f64 + step).floor() as i64).clamp(self.target, self.displayed - 1)
        };
        self.displayed = next;
    }

    /// Snap the display to the raw total
    pub fn finish(&mut self) {
        self.displayed = self.target;
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn displayed(&self) -> i64 {
        self.displayed
    }

    pub fn is_settled(&self) -> bool {
        self.displayed == self.target
    }
}
