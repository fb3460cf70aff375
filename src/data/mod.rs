//! Data models and processing for wait-time documents.
//!
//! This module turns raw documents into display-ready tables. Everything
//! here is pure and deterministic.
//!
//! ## Submodules
//!
//! - [`format`]: Bridge aliases, wait-time text and color classes
//! - [`reshape`]: Vehicle-type-major to bridge-major transposition
//! - [`board`]: Table models ([`Board`], [`WaitTable`], [`DisplayRow`])
//!
//! ## Data Flow
//!
//! ```text
//! WaitTimesDocument (raw JSON)
//!        │
//!        ├──▶ by-vehicle: columns = vehicle types, rows = bridge union
//!        │
//!        └──▶ by-bridge: reshape::transpose() → fixed columns
//!                 │
//!                 ▼
//!        Board::from_document() → WaitTable per direction
//! ```

pub mod board;
pub mod format;
pub mod reshape;

pub use board::{build_table, Board, Column, DisplayRow, TableLayout, WaitCell, WaitTable};
pub use format::{format_bridge_name, format_wait_time, wait_time_class, WaitClass};
pub use reshape::{reshape, transpose, BridgeMajor, ReshapedDocument};
