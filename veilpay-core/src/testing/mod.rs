//! In-memory test doubles for driving the transfer view without a
//! gateway.
//!
//! The mock directories store data behind `Arc<RwLock>` so cloned
//! handles observe the same state, record every transfer submission,
//! and can be switched into failure mode per operation.

mod mock_directory;

pub use mock_directory::{MockCommitmentDirectory, MockUserDirectory};

use std::sync::{Arc, Mutex, RwLock};

use crate::models::Commitment;
use crate::view::{Notifier, Route, Router};

/// Build a commitment fixture with randomized hash and salt.
pub fn sample_commitment(value: u128) -> Commitment {
    let commitment_tag: [u8; 16] = rand::random();
    let salt_tag: [u8; 16] = rand::random();
    Commitment::new(
        value.to_string(),
        format!("0x{}", hex::encode(commitment_tag)),
        format!("0x{}", hex::encode(salt_tag)),
        "alice",
    )
}

/// Severity of a recorded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Notifier double that records every message it is handed.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<RwLock<Vec<(NoticeLevel, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn of_level(&self, level: NoticeLevel) -> Vec<String> {
        self.messages
            .read()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn infos(&self) -> Vec<String> {
        self.of_level(NoticeLevel::Info)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.of_level(NoticeLevel::Warning)
    }

    pub fn errors(&self) -> Vec<String> {
        self.of_level(NoticeLevel::Error)
    }

    pub fn clear(&self) {
        self.messages.write().unwrap().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.messages
            .write()
            .unwrap()
            .push((NoticeLevel::Info, message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.messages
            .write()
            .unwrap()
            .push((NoticeLevel::Warning, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.messages
            .write()
            .unwrap()
            .push((NoticeLevel::Error, message.to_string()));
    }
}

/// Router double that records every navigation.
#[derive(Clone, Default)]
pub struct RecordingRouter {
    routes: Arc<Mutex<Vec<Route>>>,
}

impl RecordingRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigations(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Router for RecordingRouter {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}
