//! Test helpers module
//!
//! Notifier doubles, store setup and a progress service builder shared by the
//! integration tests.

#![allow(dead_code)]

pub mod database_helper;
pub mod telegram_mock;

use std::sync::{Arc, Mutex, Once};
use std::sync::atomic::{AtomicUsize, Ordering};
use BirthdayGift::config::ProgressConfig;
use BirthdayGift::database::{InMemorySessionStore, SessionStore};
use BirthdayGift::services::{Notifier, ProgressService};
use BirthdayGift::utils::errors::{GiftError, Result};

static INIT: Once = Once::new();

/// Initialize test logging once per test binary
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("BirthdayGift=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Notifier that records every session it was called for
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    calls: AtomicUsize,
    sessions: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sessions(&self) -> Vec<String> {
        self.sessions.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, session_id: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sessions.lock().unwrap().push(session_id.to_string());
        Ok(())
    }
}

/// Notifier whose delivery always fails
#[derive(Debug, Default)]
pub struct FailingNotifier {
    calls: AtomicUsize,
}

impl FailingNotifier {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Notifier for FailingNotifier {
    fn notify(&self, _session_id: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GiftError::NotificationFailure("admin chat unreachable".to_string()))
    }
}

/// Progress service over a fresh in-memory store
pub struct TestContext {
    pub store: Arc<InMemorySessionStore>,
    pub service: ProgressService,
}

impl TestContext {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        init_test_logging();
        let store = Arc::new(InMemorySessionStore::new());
        let service = ProgressService::new(
            store.clone() as Arc<dyn SessionStore>,
            notifier,
            ProgressConfig::default(),
        );
        Self { store, service }
    }
}
