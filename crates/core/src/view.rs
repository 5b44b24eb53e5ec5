//! Visible map window, tick placement and axis label formatting

use crate::crs::CRS;
use crate::raster::Extent;

/// The part of map space currently shown in the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewBounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn from_extent(extent: &Extent) -> Self {
        Self::new(extent.min_x, extent.max_x, extent.min_y, extent.max_y)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Larger of the two spans
    pub fn max_span(&self) -> f64 {
        self.width().abs().max(self.height().abs())
    }

    /// Scale both spans by `factor` around the view center.
    ///
    /// A factor below 1 zooms in, above 1 zooms out.
    pub fn zoom(&self, factor: f64) -> Self {
        let (cx, cy) = self.center();
        let half_w = self.width() * factor / 2.0;
        let half_h = self.height() * factor / 2.0;
        Self::new(cx - half_w, cx + half_w, cy - half_h, cy + half_h)
    }

    /// Scale around an anchor point, keeping the anchor fixed on screen
    pub fn zoom_at(&self, factor: f64, anchor: (f64, f64)) -> Self {
        let (ax, ay) = anchor;
        Self::new(
            ax - (ax - self.x_min) * factor,
            ax + (self.x_max - ax) * factor,
            ay - (ay - self.y_min) * factor,
            ay + (self.y_max - ay) * factor,
        )
    }

    /// Shift the window by a map-space offset
    pub fn pan(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.x_min + dx,
            self.x_max + dx,
            self.y_min + dy,
            self.y_max + dy,
        )
    }

    /// Window spanned by two opposite corners, or `None` if it has no area
    pub fn zoom_to_rect(a: (f64, f64), b: (f64, f64)) -> Option<Self> {
        let view = Self::new(a.0.min(b.0), a.0.max(b.0), a.1.min(b.1), a.1.max(b.1));
        if view.width() <= f64::EPSILON || view.height() <= f64::EPSILON {
            None
        } else {
            Some(view)
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

/// Tick label style for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisFormat {
    /// Six-decimal degrees, used when the raster is in EPSG:4326
    Degrees,
    /// Whole map units with thousands separators
    Projected,
}

impl AxisFormat {
    /// Degrees only when the raster CRS is known to be EPSG:4326
    pub fn for_raster_crs(crs: Option<&CRS>) -> Self {
        match crs {
            Some(crs) if crs.is_wgs84() => Self::Degrees,
            _ => Self::Projected,
        }
    }

    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Degrees => format!("{:.6}", value),
            Self::Projected => format_thousands(value),
        }
    }
}

/// Round to an integer and group digits by thousands: `1234567.8` → `1,234,568`.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Evenly spaced "nice" tick values (1, 2 or 5 times a power of ten) inside `[min, max]`.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 || target == 0 {
        return Vec::new();
    }

    let raw_step = span / target as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let step = if residual <= 1.0 {
        magnitude
    } else if residual <= 2.0 {
        2.0 * magnitude
    } else if residual <= 5.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zoom_in_halves_spans_around_center() {
        let view = ViewBounds::new(0.0, 10.0, 0.0, 10.0).zoom(0.5);
        assert_eq!(view, ViewBounds::new(2.5, 7.5, 2.5, 7.5));
        let out = view.zoom(2.0);
        assert_eq!(out, ViewBounds::new(0.0, 10.0, 0.0, 10.0));
    }

    #[test]
    fn zoom_at_keeps_anchor() {
        let view = ViewBounds::new(0.0, 10.0, 0.0, 20.0).zoom_at(0.5, (2.0, 4.0));
        assert_relative_eq!(view.x_min, 1.0);
        assert_relative_eq!(view.x_max, 6.0);
        assert_relative_eq!(view.y_min, 2.0);
        assert_relative_eq!(view.y_max, 12.0);
    }

    #[test]
    fn zoom_rect_needs_area() {
        assert!(ViewBounds::zoom_to_rect((1.0, 1.0), (1.0, 5.0)).is_none());
        let view = ViewBounds::zoom_to_rect((4.0, 1.0), (2.0, 3.0)).unwrap();
        assert_eq!(view, ViewBounds::new(2.0, 4.0, 1.0, 3.0));
    }

    #[test]
    fn contains_includes_edges() {
        let view = ViewBounds::new(0.0, 10.0, -5.0, 5.0);
        assert!(view.contains(0.0, 5.0));
        assert!(view.contains(3.0, 0.0));
        assert!(!view.contains(10.5, 0.0));
        assert!(!view.contains(3.0, -5.1));
    }

    #[test]
    fn axis_format_follows_raster_crs() {
        assert_eq!(AxisFormat::for_raster_crs(Some(&CRS::wgs84())), AxisFormat::Degrees);
        assert_eq!(
            AxisFormat::for_raster_crs(Some(&CRS::from_epsg(32630))),
            AxisFormat::Projected
        );
        assert_eq!(AxisFormat::for_raster_crs(None), AxisFormat::Projected);
        assert_eq!(AxisFormat::Degrees.format(5.0), "5.000000");
        assert_eq!(AxisFormat::Projected.format(440298.94), "440,299");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(-4_474_257.31), "-4,474,257");
    }

    #[test]
    fn ticks_are_round_numbers() {
        assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        let ticks = nice_ticks(440_000.0, 446_500.0, 4);
        assert_eq!(ticks.first().copied(), Some(440_000.0));
        assert!(ticks.windows(2).all(|w| (w[1] - w[0] - 2000.0).abs() < 1e-9));
        assert!(nice_ticks(1.0, 1.0, 5).is_empty());
    }
}
