//! Marker placement along the fixed walking route.
//!
//! Coordinates live in a normalized 0-100 plane (percent of the map
//! container), so the same numbers position both the SVG route and the
//! absolutely positioned marker.

use serde::{Deserialize, Serialize};

use crate::constants::PROGRESS_MAX;
use crate::numbers::clamp_progress;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Quadratic Bezier curve through three control points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezier {
    pub p0: PathPoint,
    pub p1: PathPoint,
    pub p2: PathPoint,
}

impl QuadraticBezier {
    /// Route from the user's start to the destination store.
    pub const ROUTE: Self = Self {
        p0: PathPoint::new(25.0, 38.0),
        p1: PathPoint::new(35.0, 35.0),
        p2: PathPoint::new(55.0, 18.0),
    };

    /// Evaluate the curve at `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> PathPoint {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let u = 1.0 - t;
        let a = u * u;
        let b = 2.0 * u * t;
        let c = t * t;
        PathPoint {
            x: a * self.p0.x + b * self.p1.x + c * self.p2.x,
            y: a * self.p0.y + b * self.p1.y + c * self.p2.y,
        }
    }

    /// SVG path data (`M x0 y0 Q x1 y1 x2 y2`) for drawing this curve.
    #[must_use]
    pub fn svg_path(&self) -> String {
        format!(
            "M {} {} Q {} {} {} {}",
            self.p0.x, self.p0.y, self.p1.x, self.p1.y, self.p2.x, self.p2.y
        )
    }

    #[must_use]
    pub const fn start(&self) -> PathPoint {
        self.p0
    }

    #[must_use]
    pub const fn destination(&self) -> PathPoint {
        self.p2
    }
}

/// Marker position for the given walk progress.
#[must_use]
pub fn interpolate(progress: f64) -> PathPoint {
    QuadraticBezier::ROUTE.point_at(clamp_progress(progress) / PROGRESS_MAX)
}
