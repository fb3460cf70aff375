//! Vehicle-type-major to bridge-major reshaping.
//!
//! The document groups wait times by vehicle type, then bridge. Tables
//! with one row per bridge want the opposite nesting.

use serde::Serialize;

use crate::source::{DirectionData, OrderedMap, WaitTimesDocument};

/// Lower-cased bridge name to lower-cased vehicle type to wait-time text.
pub type BridgeMajor = OrderedMap<OrderedMap<String>>;

/// Both directions of a document, nested bridge-first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReshapedDocument {
    pub to_usa: BridgeMajor,
    pub to_canada: BridgeMajor,
}

/// Reshape a whole document.
pub fn reshape(document: &WaitTimesDocument) -> ReshapedDocument {
    ReshapedDocument {
        to_usa: transpose(&document.to_usa),
        to_canada: transpose(&document.to_canada),
    }
}

/// Swap the two key levels of a nested map, lower-casing both keys.
///
/// Entries for the same outer key accumulate; a repeated
/// (outer, inner) pair keeps the value seen last. Outer keys keep the order
/// in which they are first encountered.
pub fn transpose(data: &DirectionData) -> BridgeMajor {
    let mut out = BridgeMajor::new();
    for (vehicle_type, bridges) in data.iter() {
        let vehicle_type = vehicle_type.to_lowercase();
        for (bridge, wait) in bridges.iter() {
            out.entry(bridge.to_lowercase())
                .or_default()
                .insert(vehicle_type.clone(), wait.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DirectionData {
        serde_json::from_str(
            r#"{
                "Autos": { "Rainbow": "No Delay", "PeaceBridge": "20 MIN" },
                "Trucks": { "PeaceBridge": "45 MIN" },
                "NEXUS": { "Rainbow": "N/A", "Whirlpool": "No Delay" }
            }"#,
        )
        .unwrap()
    }

    fn get<'a>(map: &'a BridgeMajor, outer: &str, inner: &str) -> Option<&'a str> {
        map.get(outer).and_then(|m| m.get(inner)).map(String::as_str)
    }

    #[test]
    fn test_transpose_groups_by_bridge() {
        let out = transpose(&sample());

        let bridges: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(bridges, vec!["rainbow", "peacebridge", "whirlpool"]);

        assert_eq!(get(&out, "rainbow", "autos"), Some("No Delay"));
        assert_eq!(get(&out, "rainbow", "nexus"), Some("N/A"));
        assert_eq!(get(&out, "peacebridge", "autos"), Some("20 MIN"));
        assert_eq!(get(&out, "peacebridge", "trucks"), Some("45 MIN"));
        assert_eq!(out.get("peacebridge").unwrap().len(), 2);
    }

    #[test]
    fn test_every_input_value_is_reachable() {
        let input = sample();
        let out = transpose(&input);
        for (vehicle_type, bridges) in input.iter() {
            for (bridge, wait) in bridges.iter() {
                assert_eq!(
                    get(&out, &bridge.to_lowercase(), &vehicle_type.to_lowercase()),
                    Some(wait.as_str())
                );
            }
        }
    }

    #[test]
    fn test_case_variants_merge_last_write_wins() {
        let input: DirectionData = serde_json::from_str(
            r#"{
                "Autos": { "Rainbow": "5 MIN" },
                "autos": { "RAINBOW": "No Delay", "Peace": "x" }
            }"#,
        )
        .unwrap();
        let out = transpose(&input);
        assert_eq!(out.len(), 2);
        assert_eq!(get(&out, "rainbow", "autos"), Some("No Delay"));
    }

    #[test]
    fn test_applying_twice_loses_nothing() {
        let input = sample();
        let once = transpose(&input);
        let twice = transpose(&once);

        // Every value is still reachable, back in vehicle-type-major order.
        for (bridge, types) in once.iter() {
            for (vehicle_type, wait) in types.iter() {
                assert_eq!(get(&twice, vehicle_type, bridge), Some(wait.as_str()));
            }
        }

        // And a third pass lands exactly where the first did.
        assert_eq!(transpose(&twice), once);
    }

    #[test]
    fn test_reshape_document() {
        let doc = WaitTimesDocument {
            timestamp: "t".into(),
            to_usa: sample(),
            to_canada: DirectionData::new(),
        };
        let out = reshape(&doc);
        assert_eq!(out.to_usa.len(), 3);
        assert!(out.to_canada.is_empty());
    }
}
