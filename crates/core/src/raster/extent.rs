//! Axis-aligned bounding extent

use serde::{Deserialize, Serialize};

/// Bounding box in map units: `min_x..max_x` by `min_y..max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The unit square, used when nothing could be loaded.
    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    pub fn from_bounds((min_x, min_y, max_x, max_y): (f64, f64, f64, f64)) -> Self {
        Self::new(min_x, min_y, max_x, max_y)
    }

    /// Envelope of a set of points; `None` when there are no finite points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut envelope: Option<Self> = None;
        for (x, y) in points {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            envelope = Some(match envelope {
                None => Self::new(x, y, x, y),
                Some(e) => Self::new(e.min_x.min(x), e.min_y.min(y), e.max_x.max(x), e.max_y.max(y)),
            });
        }
        envelope
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Grow each side by `fraction` of the span. Degenerate axes get a span of 1.
    pub fn padded(&self, fraction: f64) -> Self {
        let pad = |lo: f64, hi: f64| {
            let span = hi - lo;
            if span.abs() < f64::EPSILON {
                (lo - 0.5, hi + 0.5)
            } else {
                (lo - span * fraction, hi + span * fraction)
            }
        };
        let (min_x, max_x) = pad(self.min_x, self.max_x);
        let (min_y, max_y) = pad(self.min_y, self.max_y);
        Self::new(min_x, min_y, max_x, max_y)
    }
}
