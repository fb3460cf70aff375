//! Data source abstraction for receiving wait-time documents.
//!
//! This module provides a trait-based abstraction over where documents come
//! from: a background poller fetching a file or URL on a timer, or an
//! in-memory channel fed by the embedding program.

mod channel;
mod document;
mod error;
mod fetch;
mod poller;

pub use channel::ChannelSource;
pub use document::{
    BridgeWaitMap, Direction, DirectionData, OrderedMap, WaitTimesDocument,
};
pub use error::{ErrorKind, LoadError};
pub use fetch::{Fetch, FileFetcher, HttpFetcher, Location};
pub use poller::PollingSource;

use std::fmt::Debug;

/// Progress reported by a data source.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// A request has been issued.
    Fetching,
    /// A fresh document replaces the current one.
    Loaded(WaitTimesDocument),
    /// The latest request failed.
    Failed(LoadError),
}

/// Trait for receiving wait-time updates from various sources.
///
/// # Example
///
/// ```
/// use bordertraffic::{ChannelSource, DataSource, Update};
///
/// let (tx, mut source) = ChannelSource::create("example");
/// // The first poll reports the initial state.
/// assert_eq!(source.poll(), Some(Update::Fetching));
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the next update.
    ///
    /// Returns `Some(update)` if something happened since the last poll,
    /// `None` otherwise. This method must not block.
    fn poll(&mut self) -> Option<Update>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Ask the source to fetch again as soon as possible.
    fn request_refresh(&mut self) {}
}
