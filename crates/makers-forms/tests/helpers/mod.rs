//! Test doubles for the asset store, product backend and notifier.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use makers_core::models::{LocalFile, Product, ProductSubmission};
use makers_core::{AppError, CurrentUser, NoticeLevel, Notifier, ProductBackend, StaticSession};
use makers_storage::{AssetStore, StorageError, StorageResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

/// Asset store that records when each upload started and how many overlapped.
///
/// Files whose name starts with `fail` are rejected.
#[derive(Clone, Default)]
pub struct MockAssetStore {
    started: Arc<Mutex<Vec<(String, Instant)>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    latency: Duration,
}

impl MockAssetStore {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_millis(100),
            ..Default::default()
        }
    }

    pub fn started(&self) -> Vec<(String, Instant)> {
        self.started.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.started.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetStore for MockAssetStore {
    async fn upload(&self, file: &LocalFile) -> StorageResult<String> {
        self.started
            .lock()
            .unwrap()
            .push((file.file_name.clone(), Instant::now()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.latency).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if file.file_name.starts_with("fail") {
            return Err(StorageError::UploadFailed("server rejected file".to_string()));
        }
        Ok(format!("https://cdn.example.com/{}", file.file_name))
    }
}

/// Product backend that counts calls and echoes the submission back
#[derive(Clone, Default)]
pub struct MockProductBackend {
    creates: Arc<AtomicUsize>,
    updates: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<ProductSubmission>>>,
    reject_with: Option<String>,
}

impl MockProductBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            reject_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn last_submission(&self) -> Option<ProductSubmission> {
        self.last.lock().unwrap().clone()
    }

    fn respond(&self, id: Uuid, submission: &ProductSubmission) -> Result<Product, AppError> {
        *self.last.lock().unwrap() = Some(submission.clone());
        if let Some(message) = &self.reject_with {
            return Err(AppError::Remote(message.clone()));
        }
        Ok(Product {
            id,
            fields: submission.fields.clone(),
            icon_url: Some(submission.icon_url.clone()),
            screenshot_urls: submission.screenshot_urls.clone(),
            vote_count: 0,
            has_voted: false,
            maker_username: Some("ada".to_string()),
            created_at: Utc::now(),
        })
    }
}

#[async_trait]
impl ProductBackend for MockProductBackend {
    async fn create_product(&self, submission: &ProductSubmission) -> Result<Product, AppError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.respond(Uuid::new_v4(), submission)
    }

    async fn update_product(
        &self,
        product_id: Uuid,
        submission: &ProductSubmission,
    ) -> Result<Product, AppError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.respond(product_id, submission)
    }
}

/// Notifier that keeps every message
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(NoticeLevel, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn has(&self, level: NoticeLevel) -> bool {
        self.messages().iter().any(|(l, _)| *l == level)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.messages.lock().unwrap().push((level, message.to_string()));
    }
}

pub fn signed_in() -> StaticSession {
    StaticSession::signed_in(CurrentUser {
        id: Uuid::new_v4(),
        username: "ada".to_string(),
    })
}

pub fn png(name: &str) -> LocalFile {
    LocalFile::new(name, "image/png", b"\x89PNG".to_vec())
}
