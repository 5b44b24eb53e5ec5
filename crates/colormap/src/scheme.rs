//! Color schemes and multi-stop interpolation engine.

/// RGB color as (r, g, b) with values in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A color stop: position in [0, 1] mapped to an RGB color.
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub t: f64,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(t: f64, r: u8, g: u8, b: u8) -> Self {
        Self {
            t,
            color: Rgb::new(r, g, b),
        }
    }
}

/// Colormaps offered by the map styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    /// Black -> White
    Gray,
    /// Blue -> Cyan -> Green -> Yellow -> Brown -> White (land and sea)
    Terrain,
    /// Black -> Blue -> Green -> Tan -> White (earth tones)
    GistEarth,
}

impl ColorScheme {
    pub const ALL: &[ColorScheme] = &[Self::Gray, Self::Terrain, Self::GistEarth];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Terrain => "terrain",
            Self::GistEarth => "gist_earth",
        }
    }
}

// ─── Color stop definitions ───────────────────────────────────────────

const TERRAIN_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 51, 51, 153),
    ColorStop::new(0.15, 0, 153, 255),
    ColorStop::new(0.25, 0, 204, 102),
    ColorStop::new(0.50, 255, 255, 153),
    ColorStop::new(0.75, 128, 92, 84),
    ColorStop::new(1.00, 255, 255, 255),
];

const GIST_EARTH_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 0, 0, 0),
    ColorStop::new(0.15, 34, 66, 122),
    ColorStop::new(0.30, 54, 122, 128),
    ColorStop::new(0.45, 72, 148, 93),
    ColorStop::new(0.60, 128, 165, 84),
    ColorStop::new(0.75, 183, 168, 101),
    ColorStop::new(0.90, 214, 187, 163),
    ColorStop::new(1.00, 253, 250, 250),
];

// ─── Interpolation engine ──────────────────────────────────────────────

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_color(c1: Rgb, c2: Rgb, t: f64) -> Rgb {
    Rgb::new(
        lerp(c1.r as f64, c2.r as f64, t).round() as u8,
        lerp(c1.g as f64, c2.g as f64, t).round() as u8,
        lerp(c1.b as f64, c2.b as f64, t).round() as u8,
    )
}

fn multi_stop(stops: &[ColorStop], t: f64) -> Rgb {
    if t <= 0.0 {
        return stops[0].color;
    }
    if t >= 1.0 {
        return stops[stops.len() - 1].color;
    }
    for pair in stops.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if t <= hi.t {
            let ratio = (t - lo.t) / (hi.t - lo.t);
            return lerp_color(lo.color, hi.color, ratio);
        }
    }
    stops[stops.len() - 1].color
}

/// Evaluate a color scheme at normalized position `t` ∈ [0, 1].
///
/// Values outside the range are clamped to the end colors.
pub fn evaluate(scheme: ColorScheme, t: f64) -> Rgb {
    match scheme {
        ColorScheme::Gray => {
            let v = (t.clamp(0.0, 1.0) * 255.0).round() as u8;
            Rgb::new(v, v, v)
        }
        ColorScheme::Terrain => multi_stop(TERRAIN_STOPS, t),
        ColorScheme::GistEarth => multi_stop(GIST_EARTH_STOPS, t),
    }
}
