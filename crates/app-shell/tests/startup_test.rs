//! Shell startup against a scripted data service.

use app_shell::settings::{QUERY_SERVICE_KEY, UI_ZONE_KEY};
use app_shell::{AppConfig, AppShell, SettingValue, StaticDetector, ViewportSize};
use cm_01_query_dispatch::{DispatchError, MockReply, MockTransport, QueryDispatcher};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn shell(transport: MockTransport) -> (AppShell, Arc<MockTransport>) {
    let transport = Arc::new(transport);
    let shell = AppShell::with_transport(
        AppConfig::default(),
        transport.clone(),
        &StaticDetector::desktop(),
    )
    .unwrap();
    (shell, transport)
}

#[tokio::test]
async fn test_startup_query_is_user_get_multiple() {
    let (shell, transport) = shell(MockTransport::with_body(json!({ "status": "ok", "data": [] })));

    shell.start().await;

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].method, "GET");
    let envelope = calls[1].envelope.clone().unwrap();
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({ "entity": "User", "action": "get_multiple", "data": {} })
    );
    shell.shutdown();
}

#[tokio::test]
async fn test_startup_rejection_is_reported_not_fatal() {
    let (shell, _) = shell(MockTransport::with_body(json!({ "status": "ok" })).scripted([
        MockReply::Body(json!({ "status": "ok" })),
        MockReply::Absent,
    ]));

    let report = shell.start().await;

    assert!(report.status.is_ok());
    assert_eq!(report.users, Err(DispatchError::EmptyResponse));
    shell.shutdown();
}

#[tokio::test]
async fn test_ignored_handles_never_notify() {
    let (shell, _) = shell(MockTransport::default());
    let container = shell.container();
    let mut changes = container.settings.changes();

    container.settings.set_value(UI_ZONE_KEY, SettingValue::handle("zone", Arc::new(())));
    container.settings.set_value("language", SettingValue::from(json!("en")));

    let change = tokio::time::timeout(Duration::from_secs(1), changes.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(change.key, "language");
    assert!(changes.try_recv().unwrap().is_none());

    let dispatcher = container
        .settings
        .get_value(QUERY_SERVICE_KEY)
        .and_then(|v| v.service::<QueryDispatcher>())
        .unwrap();
    assert!(Arc::ptr_eq(&dispatcher, &container.dispatcher));
}

#[tokio::test]
async fn test_resize_reaches_layout_listeners() {
    let (shell, _) = shell(MockTransport::default());
    let container = shell.container();
    let mut layout = container.layout_changes.listen();

    container.layout.on_resize(ViewportSize::new(700, 1000));

    tokio::time::timeout(Duration::from_secs(1), layout.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(container.device().is_mobile);
}
