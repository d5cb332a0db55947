//! Upload phase pacing and commit behavior.
//!
//! Run with: `cargo test -p makers-forms --test upload_test`

mod helpers;

use helpers::{png, MockAssetStore};
use makers_core::models::{AssetRef, FormMode};
use makers_forms::{FormSettings, ProductFormManager, UploadPhase, UploadSettings};
use makers_storage::{MemorySessionStore, SessionStore};
use std::sync::Arc;
use std::time::Duration;

async fn open(store: &MemorySessionStore) -> ProductFormManager {
    ProductFormManager::open(
        FormMode::Create,
        Arc::new(store.clone()),
        FormSettings::default(),
    )
    .await
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_four_screenshots_upload_in_two_waves() {
    let session = MemorySessionStore::new();
    let mut form = open(&session).await;
    for name in ["a.png", "b.png", "c.png", "d.png"] {
        form.add_screenshot(png(name)).await.unwrap();
    }

    let assets = MockAssetStore::new();
    let settings = UploadSettings::default();
    let report = UploadPhase::new(&assets, &settings)
        .run(&mut form)
        .await
        .unwrap();

    assert_eq!(report.attempted, 4);
    assert_eq!(report.failed, 0);
    assert_eq!(report.screenshots_uploaded, 4);
    assert_eq!(assets.max_in_flight(), 3);

    let started = assets.started();
    assert_eq!(started.len(), 4);
    let first_wave = started[0].1;
    assert!(started[..3].iter().all(|(_, at)| *at == first_wave));
    assert_eq!(started[3].0, "d.png");
    assert!(started[3].1 - first_wave >= Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn test_icon_is_uploaded_before_screenshots() {
    let session = MemorySessionStore::new();
    let mut form = open(&session).await;
    form.set_icon(png("icon.png")).await.unwrap();
    form.add_screenshot(png("a.png")).await.unwrap();

    let assets = MockAssetStore::new();
    let settings = UploadSettings::default();
    let report = UploadPhase::new(&assets, &settings)
        .run(&mut form)
        .await
        .unwrap();

    assert!(report.icon_uploaded);
    let started = assets.started();
    assert_eq!(started[0].0, "icon.png");
    assert!(started[1].1 > started[0].1);
    assert_eq!(
        form.draft().icon_url(),
        Some("https://cdn.example.com/icon.png")
    );
}

#[tokio::test(start_paused = true)]
async fn test_failed_uploads_stay_pending_and_committed_urls_persist() {
    let session = MemorySessionStore::new();
    let mut form = open(&session).await;
    for name in ["a.png", "fail-b.png", "c.png"] {
        form.add_screenshot(png(name)).await.unwrap();
    }

    let assets = MockAssetStore::new();
    let settings = UploadSettings::default();
    let report = UploadPhase::new(&assets, &settings)
        .run(&mut form)
        .await
        .unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].starts_with("fail-b.png"));

    let screenshots = &form.draft().screenshots;
    assert_eq!(screenshots[0], AssetRef::uploaded("https://cdn.example.com/a.png"));
    assert!(screenshots[1].is_pending());
    assert_eq!(screenshots[2], AssetRef::uploaded("https://cdn.example.com/c.png"));

    // A fresh manager sees the committed URLs only, in order.
    let restored = open(&session).await;
    assert_eq!(
        restored.draft().screenshot_urls(),
        vec![
            "https://cdn.example.com/a.png".to_string(),
            "https://cdn.example.com/c.png".to_string()
        ]
    );
    assert!(!restored.draft().has_pending_assets());
}

#[tokio::test(start_paused = true)]
async fn test_second_run_only_retries_pending() {
    let session = MemorySessionStore::new();
    let mut form = open(&session).await;
    form.add_screenshot(png("a.png")).await.unwrap();
    form.add_screenshot(png("fail.png")).await.unwrap();

    let assets = MockAssetStore::new();
    let settings = UploadSettings::default();
    let phase = UploadPhase::new(&assets, &settings);
    phase.run(&mut form).await.unwrap();
    assert_eq!(assets.calls(), 2);

    let report = phase.run(&mut form).await.unwrap();
    assert_eq!(report.attempted, 1);
    assert_eq!(assets.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_nothing_pending_is_a_no_op() {
    let session = MemorySessionStore::new();
    let mut form = open(&session).await;

    let assets = MockAssetStore::new();
    let settings = UploadSettings::default();
    let report = UploadPhase::new(&assets, &settings)
        .run(&mut form)
        .await
        .unwrap();

    assert_eq!(report.attempted, 0);
    assert_eq!(assets.calls(), 0);
    assert!(session
        .get("product-form:create:draft")
        .await
        .unwrap()
        .is_none());
}
