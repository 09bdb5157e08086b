//! Design rule check results for marker navigation.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// One DRC result row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrcViolation {
    pub category: String,
    pub cell: String,
    pub visited: bool,
    pub multiplicity: u32,
    pub polygons: Vec<Vec<Point>>,
    pub points: Vec<Point>,
}

impl DrcViolation {
    /// Bounds of all marker polygons.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(self.polygons.iter().flatten().copied())
    }
}

/// Result table as presented to the user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrcReport {
    pub rows: Vec<DrcViolation>,
}

impl DrcReport {
    pub const HEADERS: [&'static str; 6] =
        ["Category", "Cell", "Visited", "Multiplicity", "Polygons", "Points"];

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Display text for a table cell; `None` outside the table.
    pub fn cell_text(&self, row: usize, column: usize) -> Option<String> {
        let violation = self.rows.get(row)?;
        let text = match column {
            0 => violation.category.clone(),
            1 => violation.cell.clone(),
            2 => violation.visited.to_string(),
            3 => violation.multiplicity.to_string(),
            4 => format!("{} polygon(s)", violation.polygons.len()),
            5 => violation.points.len().to_string(),
            _ => return None,
        };
        Some(text)
    }

    pub fn polygons(&self, row: usize) -> &[Vec<Point>] {
        self.rows.get(row).map_or(&[], |v| v.polygons.as_slice())
    }
}
