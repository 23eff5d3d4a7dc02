//! Change notifications for observers of the list store
//!
//! The controller publishes one [`ChangeEvent`] after each mutation that
//! altered state. Observers hold a broadcast receiver; a slow observer that
//! falls more than the channel capacity behind sees `Lagged` and should
//! refresh from the store.

use tokio::sync::broadcast;
use tracing::debug;

const CHANNEL_CAPACITY: usize = 64;

/// What changed
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    ListCreated { list: String },
    ListDeleted { list: String },
    ListRenamed { from: String, to: String },
    TaskAdded { list: String, created_at: f64 },
    TaskDeleted { list: String, created_at: f64 },
    TaskEdited { list: String, created_at: f64 },
    TaskCompleted { list: String, created_at: f64 },
    TaskReopened { list: String, created_at: f64 },
    DataLoaded { lists: usize },
}

pub struct Notifier {
    sender: broadcast::Sender<ChangeEvent>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Register a new observer
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    pub fn observer_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Deliver `event` to every current observer
    pub fn notify(&self, event: ChangeEvent) {
        debug!(?event, observers = self.sender.receiver_count(), "data changed");
        // no observers is not an error
        let _ = self.sender.send(event);
    }
}
