mod common;

use chrono::NaiveDate;
use common::TestBackend;
use hydro_dashboard::application::Dashboard;
use hydro_dashboard::domain::{Call, QueryParams};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn march_5() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

#[tokio::test]
async fn test_unsubscribed_call_never_notifies() {
    let backend = TestBackend::spawn().await;
    let api = backend.client();
    let hits = Arc::new(AtomicUsize::new(0));

    let call = Call::spawn(async move { api.get::<Value>("slow", &QueryParams::new()).await });
    let counter = hits.clone();
    let subscription = call.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    subscription.unsubscribe();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(backend.state.requests_to("/slow").len(), 1);
}

#[tokio::test]
async fn test_subscribed_call_notifies_once_with_result() {
    let backend = TestBackend::spawn().await;
    let api = backend.client();
    let (tx, rx) = tokio::sync::oneshot::channel();

    let call = Call::spawn(async move { api.get::<Value>("incidents", &QueryParams::new()).await });
    let _subscription = call.subscribe(move |result| {
        let _ = tx.send(result);
    });

    let result = tokio::time::timeout(Duration::from_secs(2), rx)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result.unwrap().as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_dashboard_refresh_fills_every_panel() {
    let backend = TestBackend::spawn().await;
    let mut dashboard = Dashboard::new(backend.client());

    dashboard.refresh(march_5()).await;

    assert!(!dashboard.has_errors());
    assert_eq!(dashboard.incidents.data().map(Vec::len), Some(0));
    assert_eq!(dashboard.reservoirs.data().map(Vec::len), Some(2));
    assert!(dashboard.snow_cover.data().is_some());
    assert!(!dashboard.incidents.is_loading());
}

#[tokio::test]
async fn test_cancelled_refresh_keeps_panels_untouched() {
    let backend = TestBackend::spawn().await;
    let mut dashboard = Dashboard::new(backend.client());
    dashboard.refresh(march_5()).await;

    let refresh = dashboard.start(march_5());
    assert!(dashboard.reservoirs.is_loading());
    refresh.cancel();
    dashboard.finish(refresh).await;

    assert!(!dashboard.reservoirs.is_loading());
    assert!(!dashboard.has_errors());
    assert_eq!(dashboard.reservoirs.data().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_dropped_refresh_cancels_its_calls() {
    let backend = TestBackend::spawn().await;
    let mut dashboard = Dashboard::new(backend.client());

    let refresh = dashboard.start(march_5());
    let cancellation = refresh.cancellation();
    assert!(!cancellation.is_cancelled());

    drop(refresh);

    assert!(cancellation.is_cancelled());
    assert!(dashboard.incidents.is_loading());

    dashboard.refresh(march_5()).await;
    assert!(!dashboard.incidents.is_loading());
    assert!(!dashboard.has_errors());
}
