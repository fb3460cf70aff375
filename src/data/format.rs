//! Display rules for bridge names and wait-time text.

use serde::Serialize;

/// Canonical labels for bridge names as the upstream page spells them,
/// keyed by lower-cased name.
const BRIDGE_ALIASES: &[(&str, &str)] = &[
    ("lewistonqueenston", "Lewiston-Queenston"),
    ("rainbow", "Rainbow Bridge"),
    ("whirlpool**(nexus only)", "Whirlpool Rapids"),
    ("whirlpool", "Whirlpool Rapids"),
    ("peacebridge", "Peace Bridge"),
];

/// Text shown when no wait time is available.
pub const UNAVAILABLE: &str = "N/A";

/// Display label for a bridge, or the name unchanged if it has no alias.
pub fn format_bridge_name(bridge: &str) -> &str {
    let lower = bridge.to_lowercase();
    BRIDGE_ALIASES
        .iter()
        .find(|(key, _)| *key == lower)
        .map(|(_, label)| *label)
        .unwrap_or(bridge)
}

/// Normalize a wait-time value for display.
///
/// Absent, empty and "N/A" values all read "N/A"; anything else is shown
/// as published.
pub fn format_wait_time(time: Option<&str>) -> &str {
    match time {
        Some(text) if !is_unavailable(text) => text,
        _ => UNAVAILABLE,
    }
}

/// Color class of a wait-time cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitClass {
    /// No reading (gray).
    Unavailable,
    /// Traffic moving freely (green).
    Clear,
    /// Any reported delay (red).
    Delayed,
}

/// Classify a wait-time value.
///
/// This looks at the text only and never parses a duration: anything that
/// is neither unavailable nor mentions "no delay" counts as a delay.
pub fn wait_time_class(time: Option<&str>) -> WaitClass {
    match time {
        None => WaitClass::Unavailable,
        Some(text) if is_unavailable(text) => WaitClass::Unavailable,
        Some(text) if text.to_lowercase().contains("no delay") => WaitClass::Clear,
        Some(_) => WaitClass::Delayed,
    }
}

/// Whether a bridge is left out of the vehicle-type tables.
///
/// Whirlpool Rapids is NEXUS-only and reported inconsistently upstream.
pub fn is_excluded_bridge(bridge: &str) -> bool {
    bridge.to_lowercase().contains("whirlpool")
}

/// Header text for a lower-cased vehicle type.
pub fn vehicle_type_label(vehicle_type: &str) -> String {
    if vehicle_type.eq_ignore_ascii_case("nexus") {
        return "NEXUS".to_string();
    }
    let mut chars = vehicle_type.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_unavailable(text: &str) -> bool {
    text.is_empty() || text == UNAVAILABLE
}
