// range.rs - Scroll ranges and progress
//
// Pure functions of the scroll offset. Nothing here remembers the
// previous offset.

use serde::{Deserialize, Serialize};

use super::edge::{Edge, Layout};
use crate::error::{LandingError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollRange {
    pub start: Edge,
    pub end: Edge,
}

impl ScrollRange {
    pub fn new(start: Edge, end: Edge) -> Self {
        Self { start, end }
    }

    pub fn resolve(&self, layout: &Layout) -> Result<ResolvedRange> {
        ResolvedRange::new(self.start.resolve(layout), self.end.resolve(layout))
    }
}

/// Where an offset sits relative to a range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Before,
    Active,
    After,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedRange {
    start: f64,
    end: f64,
}

impl ResolvedRange {
    /// Rejects ranges whose start comes after their end (and NaN bounds).
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if start <= end {
            Ok(Self { start, end })
        } else {
            Err(LandingError::InvalidRange { start, end })
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Normalized progress in [0, 1]. A zero-length range is a step.
    #[inline]
    pub fn progress(&self, offset: f64) -> f64 {
        let len = self.end - self.start;
        if len <= 0.0 {
            return if offset >= self.start { 1.0 } else { 0.0 };
        }
        ((offset - self.start) / len).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn region(&self, offset: f64) -> Region {
        if offset < self.start {
            Region::Before
        } else if offset > self.end {
            Region::After
        } else {
            Region::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_endpoints_and_clamp() {
        let r = ResolvedRange::new(0.0, 100.0).unwrap();
        assert_eq!(r.progress(-20.0), 0.0);
        assert_eq!(r.progress(0.0), 0.0);
        assert_eq!(r.progress(50.0), 0.5);
        assert_eq!(r.progress(100.0), 1.0);
        assert_eq!(r.progress(400.0), 1.0);
    }

    #[test]
    fn zero_length_is_a_step() {
        let r = ResolvedRange::new(300.0, 300.0).unwrap();
        assert_eq!(r.progress(299.9), 0.0);
        assert_eq!(r.progress(300.0), 1.0);
        assert_eq!(r.region(300.0), Region::Active);
    }

    #[test]
    fn regions() {
        let r = ResolvedRange::new(10.0, 20.0).unwrap();
        assert_eq!(r.region(9.0), Region::Before);
        assert_eq!(r.region(10.0), Region::Active);
        assert_eq!(r.region(20.0), Region::Active);
        assert_eq!(r.region(20.5), Region::After);
    }

    #[test]
    fn backwards_range_is_rejected() {
        assert!(matches!(
            ResolvedRange::new(100.0, 0.0),
            Err(LandingError::InvalidRange { .. })
        ));
        assert!(ResolvedRange::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn resolves_edges() {
        let layout = Layout {
            viewport_height: 800.0,
            trigger_top: 0.0,
            trigger_height: 1000.0,
        };
        let range = ScrollRange::new("top top".parse().unwrap(), "100px top".parse().unwrap());
        let r = range.resolve(&layout).unwrap();
        assert_eq!((r.start(), r.end()), (0.0, 100.0));

        // a fade-back written with start and end swapped
        let backwards = ScrollRange::new("100px top".parse().unwrap(), "top top".parse().unwrap());
        assert!(backwards.resolve(&layout).is_err());
    }
}
