use crate::foundation::error::{RankCardError, RankCardResult};

/// Smallest visible fill width of the experience bar, in pixels.
pub const MIN_FILL_PX: f64 = 50.0;

/// Experience progress as a `current / max` pair with `max > 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressFraction {
    current: u64,
    max: u64,
}

impl ProgressFraction {
    pub fn new(current: u64, max: u64) -> RankCardResult<Self> {
        if max == 0 {
            return Err(RankCardError::validation("max_exp must be > 0"));
        }
        Ok(Self { current, max })
    }

    pub fn current(self) -> u64 {
        self.current
    }

    pub fn max(self) -> u64 {
        self.max
    }

    /// `current / max`, not clamped (over-leveled users report > 1).
    pub fn fraction(self) -> f64 {
        self.current as f64 / self.max as f64
    }

    /// `true` when there is no experience to show, in which case no fill is drawn at all.
    pub fn is_empty(self) -> bool {
        self.current == 0
    }

    /// Pixel width of the fill rectangle inside a track `track_width` wide.
    ///
    /// Never narrower than `min_px`. Over-full progress runs past the track; the bar surface
    /// bounds what is visible.
    pub fn fill_width(self, track_width: f64, min_px: f64) -> f64 {
        (self.fraction() * track_width).max(min_px)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/card/progress.rs"]
mod tests;
