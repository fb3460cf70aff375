//! Table models built from a wait-time document.
//!
//! A [`WaitTable`] is everything the UI needs to draw one direction: the
//! column headings, one [`DisplayRow`] per bridge, and a formatted,
//! color-classified cell for every (bridge, vehicle type) pair.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::format::{
    format_bridge_name, format_wait_time, is_excluded_bridge, vehicle_type_label,
    wait_time_class, WaitClass,
};
use super::reshape::transpose;
use crate::source::{Direction, DirectionData, WaitTimesDocument};

/// Columns used by the bridge-major layout, in display order.
pub const FIXED_VEHICLE_TYPES: [&str; 3] = ["autos", "trucks", "nexus"];

/// How a direction's data is turned into rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableLayout {
    /// Columns are the vehicle types found in the document; Whirlpool rows
    /// are left out.
    #[default]
    ByVehicle,
    /// The data is reshaped bridge-first and shown against a fixed set of
    /// vehicle-type columns; every bridge is kept.
    ByBridge,
}

/// One formatted wait-time cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitCell {
    pub text: String,
    pub class: WaitClass,
}

impl WaitCell {
    fn new(raw: Option<&str>) -> Self {
        Self {
            text: format_wait_time(raw).to_string(),
            class: wait_time_class(raw),
        }
    }
}

/// A column heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Vehicle type as used for lookups.
    pub key: String,
    /// Heading text.
    pub label: String,
}

/// One bridge's row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    /// Lower-cased bridge name; stable across refreshes.
    pub key: String,
    /// Display label from the alias table.
    pub label: String,
    /// One cell per column, in column order.
    pub cells: Vec<WaitCell>,
}

/// A rendered table for one direction of travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitTable {
    pub direction: Direction,
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<DisplayRow>,
}

impl WaitTable {
    /// Count cells of a given class.
    pub fn count(&self, class: WaitClass) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| c.class == class)
            .count()
    }
}

/// Build the table for one direction.
pub fn build_table(direction: Direction, data: &DirectionData, layout: TableLayout) -> WaitTable {
    let (columns, rows) = match layout {
        TableLayout::ByVehicle => by_vehicle(data),
        TableLayout::ByBridge => by_bridge(data),
    };

    WaitTable {
        direction,
        title: direction.title().to_string(),
        columns,
        rows,
    }
}

fn by_vehicle(data: &DirectionData) -> (Vec<Column>, Vec<DisplayRow>) {
    let columns: Vec<Column> = data
        .keys()
        .map(|vehicle_type| Column {
            key: vehicle_type.to_string(),
            label: vehicle_type.to_string(),
        })
        .collect();

    // Bridge lookups ignore case; a later spelling overrides an earlier one,
    // the same as `transpose`.
    let lookups: Vec<HashMap<String, &str>> = data
        .values()
        .map(|waits| {
            waits
                .iter()
                .map(|(bridge, wait)| (bridge.to_lowercase(), wait.as_str()))
                .collect()
        })
        .collect();

    // Union of bridges across vehicle types, first spelling wins.
    let mut seen = HashSet::new();
    let mut bridges = Vec::new();
    for waits in data.values() {
        for bridge in waits.keys() {
            if is_excluded_bridge(bridge) {
                continue;
            }
            if seen.insert(bridge.to_lowercase()) {
                bridges.push(bridge.as_str());
            }
        }
    }

    let rows = bridges
        .into_iter()
        .map(|bridge| {
            let key = bridge.to_lowercase();
            DisplayRow {
                label: format_bridge_name(bridge).to_string(),
                cells: lookups
                    .iter()
                    .map(|lookup| WaitCell::new(lookup.get(&key).copied()))
                    .collect(),
                key,
            }
        })
        .collect();

    (columns, rows)
}

fn by_bridge(data: &DirectionData) -> (Vec<Column>, Vec<DisplayRow>) {
    let columns: Vec<Column> = FIXED_VEHICLE_TYPES
        .iter()
        .map(|vehicle_type| Column {
            key: vehicle_type.to_string(),
            label: vehicle_type_label(vehicle_type),
        })
        .collect();

    let rows = transpose(data)
        .iter()
        .map(|(bridge, waits)| DisplayRow {
            key: bridge.to_string(),
            label: format_bridge_name(bridge).to_string(),
            cells: columns
                .iter()
                .map(|col| WaitCell::new(waits.get(&col.key).map(String::as_str)))
                .collect(),
        })
        .collect();

    (columns, rows)
}

/// Both direction tables for one document, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    /// Upstream timestamp text.
    pub timestamp: String,
    /// Tables in display order.
    pub tables: Vec<WaitTable>,
    /// When the document was received.
    #[serde(skip)]
    pub received_at: Instant,
}

impl Board {
    /// Build the board for a freshly fetched document.
    pub fn from_document(document: &WaitTimesDocument, layout: TableLayout) -> Self {
        let tables = Direction::ALL
            .iter()
            .map(|&direction| build_table(direction, document.direction(direction), layout))
            .collect();

        Self {
            timestamp: document.timestamp.clone(),
            tables,
            received_at: Instant::now(),
        }
    }

    /// Returns the table for one direction.
    pub fn table(&self, direction: Direction) -> Option<&WaitTable> {
        self.tables.iter().find(|t| t.direction == direction)
    }

    /// Timestamp text, or a placeholder if the producer did not send one.
    pub fn timestamp_label(&self) -> &str {
        if self.timestamp.is_empty() {
            "Unknown time"
        } else {
            &self.timestamp
        }
    }

    /// True when no table has any rows.
    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(|t| t.rows.is_empty())
    }

    /// Count cells of a given class across all tables.
    pub fn count(&self, class: WaitClass) -> usize {
        self.tables.iter().map(|t| t.count(class)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direction(json: &str) -> DirectionData {
        serde_json::from_str(json).unwrap()
    }

    fn labels(table: &WaitTable) -> Vec<&str> {
        table.rows.iter().map(|r| r.label.as_str()).collect()
    }

    fn texts(row: &DisplayRow) -> Vec<&str> {
        row.cells.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_by_vehicle_columns_in_document_order() {
        let data = direction(r#"{"Trucks": {"Rainbow": "x"}, "Autos": {}, "NEXUS": {}}"#);
        let table = build_table(Direction::ToUsa, &data, TableLayout::ByVehicle);
        let cols: Vec<&str> = table.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(cols, vec!["Trucks", "Autos", "NEXUS"]);
        assert_eq!(table.title, "Canada to USA");
    }

    #[test]
    fn test_by_vehicle_union_of_bridges() {
        let data = direction(
            r#"{
                "Autos": {"Rainbow": "No Delay"},
                "Trucks": {"PeaceBridge": "45 MIN", "RAINBOW": "10 MIN"}
            }"#,
        );
        let table = build_table(Direction::ToCanada, &data, TableLayout::ByVehicle);

        assert_eq!(labels(&table), vec!["Rainbow Bridge", "Peace Bridge"]);
        assert_eq!(texts(&table.rows[0]), vec!["No Delay", "10 MIN"]);
        assert_eq!(texts(&table.rows[1]), vec!["N/A", "45 MIN"]);
        assert_eq!(table.rows[1].cells[0].class, WaitClass::Unavailable);
    }

    #[test]
    fn test_layouts_agree_on_case_variants() {
        let data = direction(r#"{"Autos": {"Rainbow": "5 MIN", "RAINBOW": "No Delay"}}"#);

        let by_vehicle = build_table(Direction::ToUsa, &data, TableLayout::ByVehicle);
        let by_bridge = build_table(Direction::ToUsa, &data, TableLayout::ByBridge);

        assert_eq!(by_vehicle.rows.len(), 1);
        assert_eq!(by_bridge.rows.len(), 1);
        assert_eq!(by_vehicle.rows[0].cells[0].text, "No Delay");
        assert_eq!(by_bridge.rows[0].cells[0].text, "No Delay");
    }

    #[test]
    fn test_by_vehicle_excludes_whirlpool() {
        let data = direction(
            r#"{
                "Autos": {"rainbow": "No Delay"},
                "NEXUS": {"rainbow": "N/A", "whirlpool": "No Delay", "Whirlpool**(NEXUS only)": ""}
            }"#,
        );
        let table = build_table(Direction::ToUsa, &data, TableLayout::ByVehicle);
        assert_eq!(labels(&table), vec!["Rainbow Bridge"]);
    }

    #[test]
    fn test_by_bridge_fixed_columns_keep_all_bridges() {
        let data = direction(
            r#"{
                "Autos": {"Rainbow": "No Delay", "Whirlpool": "N/A"},
                "NEXUS": {"whirlpool": "5 MIN"},
                "Buses": {"Rainbow": "15 MIN"}
            }"#,
        );
        let table = build_table(Direction::ToUsa, &data, TableLayout::ByBridge);

        let cols: Vec<&str> = table.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(cols, vec!["Autos", "Trucks", "NEXUS"]);

        assert_eq!(labels(&table), vec!["Rainbow Bridge", "Whirlpool Rapids"]);
        assert_eq!(texts(&table.rows[0]), vec!["No Delay", "N/A", "N/A"]);
        assert_eq!(texts(&table.rows[1]), vec!["N/A", "N/A", "5 MIN"]);
        assert_eq!(table.rows[1].cells[2].class, WaitClass::Delayed);
    }

    #[test]
    fn test_every_input_cell_survives() {
        let data = direction(
            r#"{
                "Autos": {"Rainbow": "No Delay", "PeaceBridge": "20 MIN", "Lewiston": "5 MIN"},
                "Trucks": {"PeaceBridge": "45 MIN", "Lewiston": "No Delay"}
            }"#,
        );
        let table = build_table(Direction::ToUsa, &data, TableLayout::ByVehicle);

        for (col_index, (_, waits)) in data.iter().enumerate() {
            for (bridge, wait) in waits.iter() {
                let row = table
                    .rows
                    .iter()
                    .find(|r| r.key == bridge.to_lowercase())
                    .unwrap();
                assert_eq!(row.cells[col_index].text, *wait);
            }
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let doc = WaitTimesDocument::from_json(
            br#"{"timestamp":"t","to_canada":{"Autos":{"Rainbow":"No Delay","PeaceBridge":"20 MIN"}},"to_usa":{}}"#,
        )
        .unwrap();
        let board = Board::from_document(&doc, TableLayout::ByVehicle);

        let first = &board.tables[0];
        assert_eq!(first.title, "USA to Canada");
        assert_eq!(first.rows.len(), 2);
        assert_eq!(first.rows[0].label, "Rainbow Bridge");
        assert_eq!(
            first.rows[0].cells[0],
            WaitCell {
                text: "No Delay".into(),
                class: WaitClass::Clear
            }
        );
        assert_eq!(first.rows[1].label, "Peace Bridge");
        assert_eq!(
            first.rows[1].cells[0],
            WaitCell {
                text: "20 MIN".into(),
                class: WaitClass::Delayed
            }
        );

        let second = board.table(Direction::ToUsa).unwrap();
        assert_eq!(second.title, "Canada to USA");
        assert!(second.rows.is_empty());

        assert!(!board.is_empty());
        assert_eq!(board.count(WaitClass::Clear), 1);
        assert_eq!(board.count(WaitClass::Delayed), 1);
        assert_eq!(board.timestamp_label(), "t");
    }

    #[test]
    fn test_empty_document() {
        let board = Board::from_document(&WaitTimesDocument::default(), TableLayout::ByBridge);
        assert!(board.is_empty());
        assert_eq!(board.tables.len(), 2);
        assert_eq!(board.timestamp_label(), "Unknown time");
    }
}
