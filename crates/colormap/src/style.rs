//! Map styles offered in the "Map Style" selector.

use crate::scheme::ColorScheme;

/// Colormap and opacity used for single-band rasters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MapStyle {
    #[default]
    Default,
    Terrain,
    Satellite,
}

impl MapStyle {
    pub const ALL: &[MapStyle] = &[Self::Default, Self::Terrain, Self::Satellite];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Terrain => "Terrain",
            Self::Satellite => "Satellite",
        }
    }

    pub fn scheme(&self) -> ColorScheme {
        match self {
            Self::Default => ColorScheme::Gray,
            Self::Terrain => ColorScheme::Terrain,
            Self::Satellite => ColorScheme::GistEarth,
        }
    }

    /// Layer opacity in [0, 1]
    pub fn alpha(&self) -> f64 {
        match self {
            Self::Default => 0.5,
            Self::Terrain => 0.8,
            Self::Satellite => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_table() {
        assert_eq!(MapStyle::default(), MapStyle::Default);
        assert_eq!(MapStyle::Default.scheme(), ColorScheme::Gray);
        assert_eq!(MapStyle::Terrain.alpha(), 0.8);
        assert_eq!(MapStyle::Satellite.scheme(), ColorScheme::GistEarth);
        assert_eq!(MapStyle::Satellite.alpha(), 1.0);
        let labels: Vec<_> = MapStyle::ALL.iter().map(MapStyle::label).collect();
        assert_eq!(labels, vec!["Default", "Terrain", "Satellite"]);
    }
}
