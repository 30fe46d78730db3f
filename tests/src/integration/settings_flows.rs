//! # Settings Flows
//!
//! The shared settings store as screens use it: one screen writes, others
//! observe through callbacks or the async change stream. Service handles sit
//! next to plain settings and never leak into notifications or exports.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;
    use serde_json::json;
    use tokio::time::timeout;

    use app_shell::settings::{DIALOG_MANAGER_KEY, QUERY_SERVICE_KEY};
    use app_shell::{AppConfig, AppShell, SettingValue, StaticDetector};
    use cm_01_query_dispatch::MockTransport;
    use cm_02_prop_tracker::PropTracker;

    fn shell() -> AppShell {
        AppShell::with_transport(
            AppConfig::default(),
            Arc::new(MockTransport::default()),
            &StaticDetector::desktop(),
        )
        .unwrap()
    }

    struct DialogManager;

    #[tokio::test]
    async fn test_screens_observe_each_other() {
        let shell = shell();
        let settings = shell.container().settings.clone();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        settings.subscribe(move |change| sink.lock().push(change.key.clone()));
        let mut stream = settings.changes();

        settings.set_value(
            DIALOG_MANAGER_KEY,
            SettingValue::handle("dialogs", Arc::new(DialogManager)),
        );
        settings.set_value("language", SettingValue::from(json!("de")));
        settings.set_value("campaign", SettingValue::from(json!({ "id": 3 })));

        assert_eq!(*seen.lock(), vec!["language", "campaign"]);

        let first = timeout(Duration::from_secs(1), stream.recv()).await.unwrap().unwrap();
        let second = timeout(Duration::from_secs(1), stream.recv()).await.unwrap().unwrap();
        assert_eq!(first.key, "language");
        assert_eq!(second.key, "campaign");
        assert!(first.sequence < second.sequence);
    }

    #[tokio::test]
    async fn test_export_and_diff_skip_handles() {
        let shell = shell();
        let settings = shell.container().settings.clone();

        settings.set_value("language", SettingValue::from(json!("en")));
        let baseline = settings.snapshot();

        settings.set_value("language", SettingValue::from(json!("fr")));
        settings.set_value(
            DIALOG_MANAGER_KEY,
            SettingValue::handle("dialogs", Arc::new(DialogManager)),
        );

        assert_eq!(settings.to_json().unwrap(), json!({ "language": "fr" }));

        let diffs = settings.diff(&baseline);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].key, "language");
        assert_eq!(diffs[0].before, Some(SettingValue::from(json!("en"))));

        assert!(settings.contains_key(QUERY_SERVICE_KEY));
        assert!(settings.contains_key(DIALOG_MANAGER_KEY));
    }

    #[test]
    fn test_observer_writing_back_sees_ordered_notifications() {
        let settings: Arc<PropTracker<SettingValue>> = Arc::new(PropTracker::new());
        let order = Arc::new(Mutex::new(Vec::new()));

        let store = Arc::clone(&settings);
        let log = Arc::clone(&order);
        settings.subscribe(move |change| {
            log.lock().push(change.key.clone());
            if change.key == "campaign" {
                store.set_value("lastOpened", SettingValue::from(json!(change.sequence)));
            }
        });

        settings.set_value("campaign", SettingValue::from(json!(1)));

        assert_eq!(*order.lock(), vec!["campaign", "lastOpened"]);
    }

    #[test]
    fn test_panicking_screen_does_not_block_others() {
        let settings: PropTracker<SettingValue> = PropTracker::new();
        let delivered = Arc::new(AtomicUsize::new(0));

        settings.subscribe(|_| panic!("screen crashed"));
        let counter = Arc::clone(&delivered);
        settings.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        settings.set_value("language", SettingValue::from(json!("en")));
        settings.set_value("language", SettingValue::from(json!("es")));

        assert_eq!(delivered.load(Ordering::SeqCst), 2);
    }
}
