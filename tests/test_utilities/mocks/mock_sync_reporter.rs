use preflight_dash::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock SyncReporter for testing that captures messages
#[derive(Default, Clone)]
pub struct MockSyncReporter {
    pub messages: Arc<Mutex<Vec<String>>>,
    pub errors: Arc<Mutex<Vec<SyncError>>>,
}

#[allow(dead_code)]
impl MockSyncReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn error_kinds(&self) -> Vec<&'static str> {
        self.errors.lock().unwrap().iter().map(|e| e.kind()).collect()
    }
}

impl SyncReporter for MockSyncReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_error(&self, error: &SyncError) {
        self.errors.lock().unwrap().push(error.clone());
    }
}
