use std::sync::{Arc, Mutex};

use tradepost::ports::{Event, Presenter};

/// Thread-safe event collector for notification assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().expect("lock presenter events").len()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().expect("lock presenter events").clone()
    }

    /// Count recorded events matching a predicate.
    pub fn count_where(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events()
            .iter()
            .filter(|event| predicate(event))
            .count()
    }
}

impl Presenter for RecordingPresenter {
    fn notify(&self, event: Event) {
        self.events
            .lock()
            .expect("lock presenter events")
            .push(event);
    }
}
