//! # Layout Flows
//!
//! Resize events from the shell reach every kind of layout listener: sync
//! observers, async subscriptions and streams. Late listeners see nothing
//! that happened before they joined.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use futures::StreamExt;
    use tokio::time::timeout;

    use app_shell::{AppConfig, AppShell, StaticDetector, ViewportSize};
    use cm_01_query_dispatch::MockTransport;

    fn shell() -> AppShell {
        AppShell::with_transport(
            AppConfig::default(),
            Arc::new(MockTransport::default()),
            &StaticDetector::desktop(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_every_listener_kind_is_signalled() {
        let shell = shell();
        let container = shell.container();

        let observed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&observed);
        container.layout_changes.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let mut listener = container.layout_changes.listen();
        let stream = container.layout_changes.listen().into_stream();

        container.layout.on_resize(ViewportSize::new(640, 900));
        container.layout.on_resize(ViewportSize::new(1440, 900));

        assert_eq!(observed.load(Ordering::SeqCst), 2);
        for _ in 0..2 {
            timeout(Duration::from_secs(1), listener.recv())
                .await
                .unwrap()
                .unwrap();
        }
        let streamed = timeout(Duration::from_secs(1), stream.take(2).collect::<Vec<_>>())
            .await
            .unwrap();
        assert_eq!(streamed.len(), 2);
        assert!(!container.device().is_mobile);
    }

    #[tokio::test]
    async fn test_late_listener_sees_no_replay() {
        let shell = shell();
        let container = shell.container();

        container.layout.on_resize(ViewportSize::new(500, 500));
        let mut late = container.layout_changes.listen();

        assert!(late.try_recv().unwrap().is_none());

        container.layout.on_resize(ViewportSize::new(1200, 900));
        let signal = timeout(Duration::from_secs(1), late.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(signal.sequence, 2);
    }

    #[tokio::test]
    async fn test_unsubscribed_view_stops_receiving() {
        let shell = shell();
        let container = shell.container();

        let observed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&observed);
        let handle = container.layout_changes.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        container.layout.on_resize(ViewportSize::new(700, 700));
        assert!(container.layout_changes.unsubscribe(handle));
        container.layout.on_resize(ViewportSize::new(700, 700));

        assert_eq!(observed.load(Ordering::SeqCst), 1);
        assert!(!container.layout_changes.unsubscribe(handle));
    }

    #[tokio::test]
    async fn test_shell_watcher_tolerates_shutdown() {
        let shell = shell();
        shell.start().await;
        let container = shell.container();
        container.layout.on_resize(ViewportSize::new(320, 640));
        shell.shutdown();
        container.layout.on_resize(ViewportSize::new(1920, 1080));
        assert_eq!(container.layout_changes.emissions(), 2);
    }
}
