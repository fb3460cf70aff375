// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # bordertraffic
//!
//! A terminal dashboard and library for Niagara border crossing wait times.
//!
//! A scraper publishes `waitTimes.json` with the current wait at each bridge,
//! per direction and vehicle type. This crate polls that document from a
//! URL or a local file and renders one table per direction in an
//! interactive terminal UI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (tables) │    │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── PollingSource (file | http) | ChannelSource │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Page state (loading, ready, error), view navigation and filtering
//! - **[`source`]**: The [`WaitTimesDocument`] model and the [`DataSource`] trait with a
//!   timed poller and a channel-fed source
//! - **[`data`]**: Display rules for bridge names and wait times, and the
//!   [`Board`] of per-direction tables built from a document
//! - **[`settings`]**: Layered configuration (defaults, TOML file, environment, flags)
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the published file every five minutes
//! bordertraffic --base-path https://example.github.io/bordertraffic/
//!
//! # Read a local copy, transposed to one column per vehicle type
//! bordertraffic --base-path ./public/ --layout by-bridge
//!
//! # Fetch once and write the tables as JSON
//! bordertraffic --export tables.json
//! ```
//!
//! ### As a library with a polling source
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use bordertraffic::{App, ErrorPolicy, FileFetcher, PollingSource, TableLayout};
//!
//! # tokio_test::block_on(async {
//! let fetcher = Arc::new(FileFetcher::new("public/waitTimes.json"));
//! let source = PollingSource::spawn(fetcher, Duration::from_secs(300));
//! let app = App::new(Box::new(source), TableLayout::ByVehicle, ErrorPolicy::Panel);
//! # });
//! ```
//!
//! ### As a library with channel source
//!
//! ```
//! use bordertraffic::{Board, ChannelSource, TableLayout, Update, WaitTimesDocument};
//!
//! let (tx, source) = ChannelSource::create("scraper");
//!
//! let document = WaitTimesDocument::from_json(
//!     br#"{"timestamp":"t","to_canada":{"Autos":{"Rainbow":"No Delay"}},"to_usa":{}}"#,
//! )
//! .unwrap();
//! let board = Board::from_document(&document, TableLayout::ByVehicle);
//! assert_eq!(board.tables[0].rows[0].label, "Rainbow Bridge");
//!
//! tx.send(Update::Loaded(document)).unwrap();
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{export_board, App, PageState, View};
pub use data::{
    format_bridge_name, format_wait_time, reshape, transpose, wait_time_class, Board,
    TableLayout, WaitClass, WaitTable,
};
pub use settings::{ErrorPolicy, Settings};
pub use source::{
    ChannelSource, DataSource, Direction, Fetch, FileFetcher, HttpFetcher, LoadError, Location,
    PollingSource, Update, WaitTimesDocument,
};
