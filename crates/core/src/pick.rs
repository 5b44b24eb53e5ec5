//! Marker picking in screen space

/// Marker pick radius in screen points
pub const PICK_TOLERANCE: f64 = 6.0;

/// Index of the marker closest to `cursor` within `tolerance`.
///
/// Positions and cursor must be in the same (screen) space. On equal
/// distances the lowest index wins.
pub fn nearest_marker<I>(positions: I, cursor: (f64, f64), tolerance: f64) -> Option<usize>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let limit = tolerance * tolerance;
    let mut best: Option<(usize, f64)> = None;
    for (index, (x, y)) in positions.into_iter().enumerate() {
        let d2 = (x - cursor.0).powi(2) + (y - cursor.1).powi(2);
        if !d2.is_finite() || d2 > limit {
            continue;
        }
        if best.map_or(true, |(_, b)| d2 < b) {
            best = Some((index, d2));
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_closest_within_tolerance() {
        let markers = [(0.0, 0.0), (10.0, 0.0), (12.0, 1.0)];
        assert_eq!(nearest_marker(markers, (11.5, 0.5), PICK_TOLERANCE), Some(2));
        assert_eq!(nearest_marker(markers, (1.0, 1.0), PICK_TOLERANCE), Some(0));
        assert_eq!(nearest_marker(markers, (50.0, 50.0), PICK_TOLERANCE), None);
    }

    #[test]
    fn ties_go_to_first() {
        let markers = [(5.0, 5.0), (5.0, 5.0)];
        assert_eq!(nearest_marker(markers, (5.0, 6.0), PICK_TOLERANCE), Some(0));
    }

    #[test]
    fn non_finite_positions_are_skipped() {
        let markers = [(f64::NAN, 0.0), (1.0, 0.0)];
        assert_eq!(nearest_marker(markers, (0.0, 0.0), PICK_TOLERANCE), Some(1));
    }
}
