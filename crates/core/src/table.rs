//! Attribute table model shown beside the map
//!
//! Row `i` always describes point `i` of the layer it was built from.

use crate::vector::{AttributeValue, PointFeatureSet};

pub const LONGITUDE: &str = "Longitude";
pub const LATITUDE: &str = "Latitude";
pub const MAPPED_LONGITUDE: &str = "Mapped Longitude";
pub const MAPPED_LATITUDE: &str = "Mapped Latitude";

/// Attributes surfaced in the hover annotation, in display order
pub const TOOLTIP_ATTRIBUTES: [&str; 3] = ["TN Bearing", "Signal Strength", "Date & Time"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAlign {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub text: String,
    pub align: CellAlign,
}

impl TableCell {
    fn from_value(value: &AttributeValue) -> Self {
        Self {
            text: value.to_string(),
            align: if value.is_numeric() {
                CellAlign::Right
            } else {
                CellAlign::Left
            },
        }
    }

    fn coordinate(value: f64) -> Self {
        Self {
            text: format!("{:.15}", value),
            align: CellAlign::Right,
        }
    }
}

/// Rendered table: header labels plus one row of cells per point.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeTable {
    columns: Vec<String>,
    rows: Vec<Vec<TableCell>>,
    attribute_count: usize,
}

impl AttributeTable {
    /// Build the table for a point set.
    ///
    /// `mapped` holds the reprojected positions and adds the two
    /// "Mapped" columns; pass `None` when no reprojection happened.
    pub fn build(points: &PointFeatureSet, mapped: Option<&[(f64, f64)]>) -> Self {
        let mut columns = points.columns.clone();
        let attribute_count = columns.len();
        columns.push(LONGITUDE.to_string());
        columns.push(LATITUDE.to_string());
        if mapped.is_some() {
            columns.push(MAPPED_LONGITUDE.to_string());
            columns.push(MAPPED_LATITUDE.to_string());
        }

        let rows = points
            .features
            .iter()
            .enumerate()
            .map(|(i, feature)| {
                let mut row: Vec<TableCell> = points
                    .columns
                    .iter()
                    .map(|name| {
                        TableCell::from_value(feature.get(name).unwrap_or(&AttributeValue::Null))
                    })
                    .collect();
                row.push(TableCell::coordinate(feature.position.x));
                row.push(TableCell::coordinate(feature.position.y));
                if let Some((mx, my)) = mapped.and_then(|m| m.get(i)) {
                    row.push(TableCell::coordinate(*mx));
                    row.push(TableCell::coordinate(*my));
                }
                row
            })
            .collect();

        Self {
            columns,
            rows,
            attribute_count,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row(&self, index: usize) -> Option<&[TableCell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&TableCell> {
        self.rows.get(row)?.get(column)
    }

    /// Text of the named column in a row
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.cell(row, col).map(|c| c.text.as_str())
    }

    /// Whether the two mapped-coordinate columns are present
    pub fn has_mapped_columns(&self) -> bool {
        self.columns.len() == self.attribute_count + 4
    }

    /// Every column of a row as `key: value` lines, for the attribute popup
    pub fn row_details(&self, row: usize) -> Vec<String> {
        match self.rows.get(row) {
            Some(cells) => self
                .columns
                .iter()
                .zip(cells)
                .map(|(name, cell)| format!("{}: {}", name, cell.text))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Hover lines for a row: bearing, signal strength and timestamp, when present
    pub fn tooltip_lines(&self, row: usize) -> Vec<String> {
        let attribute_columns = &self.columns[..self.attribute_count];
        TOOLTIP_ATTRIBUTES
            .iter()
            .filter(|name| attribute_columns.iter().any(|c| c == *name))
            .filter_map(|name| {
                self.value(row, name)
                    .map(|text| format!("{}: {}", name, text))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::CRS;
    use crate::vector::PointFeature;
    use geo_types::Coord;

    fn sample() -> PointFeatureSet {
        PointFeatureSet::new(
            vec![
                PointFeature::new(
                    Coord { x: 1.0, y: 1.0 },
                    vec![
                        ("TN Bearing".into(), AttributeValue::Int(0)),
                        ("Date & Time".into(), AttributeValue::Text("2024-05-01".into())),
                    ],
                ),
                PointFeature::new(
                    Coord { x: 5.0, y: 5.0 },
                    vec![("TN Bearing".into(), AttributeValue::Float(90.5))],
                ),
            ],
            CRS::wgs84(),
        )
    }

    #[test]
    fn columns_without_reprojection() {
        let table = AttributeTable::build(&sample(), None);
        assert_eq!(
            table.columns(),
            &["TN Bearing", "Date & Time", "Longitude", "Latitude"]
        );
        assert_eq!(table.row_count(), 2);
        assert!(!table.has_mapped_columns());
        assert_eq!(table.value(0, LONGITUDE), Some("1.000000000000000"));
    }

    #[test]
    fn mapped_columns_follow_originals() {
        let mapped = [(100.25, 200.5), (556_597.5, 557_305.25)];
        let table = AttributeTable::build(&sample(), Some(&mapped[..]));
        assert_eq!(table.column_count(), 6);
        assert!(table.has_mapped_columns());
        assert_eq!(table.value(1, MAPPED_LONGITUDE), Some("556597.500000000000000"));
        assert_eq!(table.value(1, LATITUDE), Some("5.000000000000000"));
    }

    #[test]
    fn alignment_by_value_type() {
        let table = AttributeTable::build(&sample(), None);
        assert_eq!(table.cell(0, 0).unwrap().align, CellAlign::Right);
        assert_eq!(table.cell(0, 1).unwrap().align, CellAlign::Left);
        // Missing attribute renders as an empty, left-aligned cell
        assert_eq!(table.cell(1, 1).unwrap().text, "");
        assert_eq!(table.cell(1, 1).unwrap().align, CellAlign::Left);
    }

    #[test]
    fn tooltip_and_details() {
        let table = AttributeTable::build(&sample(), None);
        assert_eq!(
            table.tooltip_lines(0),
            vec!["TN Bearing: 0", "Date & Time: 2024-05-01"]
        );
        assert_eq!(table.tooltip_lines(1), vec!["TN Bearing: 90.5", "Date & Time: "]);
        let details = table.row_details(1);
        assert_eq!(details.len(), 4);
        assert_eq!(details[2], "Longitude: 5.000000000000000");
        assert!(table.row_details(7).is_empty());
    }
}
