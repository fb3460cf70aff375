//! Channel-based data source.
//!
//! Receives updates via a tokio watch channel. This is useful when the
//! program embedding the dashboard already owns the document (for example
//! a scraper running in the same process) and pushes it rather than having
//! it polled from a file.

use tokio::sync::watch;

use super::{DataSource, Update};

/// A data source that receives updates via a channel.
///
/// Only the most recent update is kept: a producer that pushes faster than
/// the TUI polls simply overwrites older values.
///
/// # Example
///
/// ```
/// use bordertraffic::{ChannelSource, Update, WaitTimesDocument};
///
/// let (tx, source) = ChannelSource::create("scraper");
/// tx.send(Update::Loaded(WaitTimesDocument::default())).unwrap();
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Update>,
    description: String,
    /// Track if we've returned the initial value yet
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    pub fn new(receiver: watch::Receiver<Update>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            initial_returned: false,
        }
    }

    /// Create a channel pair whose initial state is [`Update::Fetching`].
    ///
    /// Returns (sender, source).
    pub fn create(source_description: &str) -> (watch::Sender<Update>, Self) {
        let (tx, rx) = watch::channel(Update::Fetching);
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<Update> {
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        if self.receiver.has_changed().unwrap_or(false) {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}
