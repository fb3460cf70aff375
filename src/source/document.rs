//! Shared types for wait-time documents.
//!
//! These types match the `waitTimes.json` file written by the scraper that
//! polls the Niagara Falls Bridges traffic page. They are the common format
//! between that producer and this dashboard.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::LoadError;

/// A complete snapshot of border wait times.
///
/// Each successful fetch produces a fresh document that fully replaces the
/// previous one. The timestamp is the only identity it carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitTimesDocument {
    /// Free-form time string as published upstream.
    #[serde(default)]
    pub timestamp: String,

    /// Crossings into the United States.
    #[serde(default)]
    pub to_usa: DirectionData,

    /// Crossings into Canada.
    #[serde(default)]
    pub to_canada: DirectionData,
}

/// Vehicle type (e.g. "Autos", "NEXUS") to the bridges reporting for it.
pub type DirectionData = OrderedMap<BridgeWaitMap>;

/// Bridge name (free-form casing) to wait-time text.
pub type BridgeWaitMap = OrderedMap<String>;

impl WaitTimesDocument {
    /// Decode a document from raw JSON bytes.
    ///
    /// The top level and both directions must be JSON objects whose leaves
    /// are strings. Missing fields are allowed and decode as empty.
    pub fn from_json(bytes: &[u8]) -> Result<Self, LoadError> {
        serde_json::from_slice(bytes).map_err(|e| LoadError::Parse(e.to_string()))
    }

    /// Returns the data for one direction of travel.
    pub fn direction(&self, direction: Direction) -> &DirectionData {
        match direction {
            Direction::ToUsa => &self.to_usa,
            Direction::ToCanada => &self.to_canada,
        }
    }

    /// True when neither direction has any vehicle types.
    pub fn is_empty(&self) -> bool {
        self.to_usa.is_empty() && self.to_canada.is_empty()
    }
}

/// Direction of travel across the border.
///
/// The document field names describe the destination, so `to_canada`
/// holds crossings from the USA into Canada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    ToCanada,
    ToUsa,
}

impl Direction {
    /// Display order: into Canada first, as on the bridge authority's page.
    pub const ALL: [Direction; 2] = [Direction::ToCanada, Direction::ToUsa];

    /// Table title for this direction.
    pub fn title(&self) -> &'static str {
        match self {
            Direction::ToCanada => "USA to Canada",
            Direction::ToUsa => "Canada to USA",
        }
    }

    /// Field name in the JSON document.
    pub fn field(&self) -> &'static str {
        match self {
            Direction::ToCanada => "to_canada",
            Direction::ToUsa => "to_usa",
        }
    }
}

/// A string-keyed map that keeps the key order of the source document.
///
/// Columns and rows are shown in the order the producer wrote them, so a
/// sorted map would not do. A key that appears twice keeps its first
/// position and takes the later value.
pub type OrderedMap<V> = IndexMap<String, V>;
