//! End-to-end service tests: browser events against a real (temp-file)
//! database and a fake tab collaborator.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use zoomer_core::config::Settings;
use zoomer_core::service::{Command, CommandReply, NavEvent, TabControl, TabId, ZoomService};
use zoomer_core::store::ZoomDb;

/// In-memory stand-in for the browser's tab/zoom API.
#[derive(Default)]
struct FakeTabs {
    urls: Mutex<HashMap<TabId, String>>,
    zooms: Mutex<HashMap<TabId, f64>>,
}

impl FakeTabs {
    fn set_url(&self, tab: TabId, url: &str) {
        self.urls.lock().unwrap().insert(tab, url.to_string());
    }

    fn zoom_of(&self, tab: TabId) -> Option<f64> {
        self.zooms.lock().unwrap().get(&tab).copied()
    }
}

impl TabControl for FakeTabs {
    fn current_url(&self, tab: TabId) -> anyhow::Result<String> {
        self.urls
            .lock()
            .unwrap()
            .get(&tab)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("tab {tab} closed"))
    }

    fn get_zoom(&self, tab: TabId) -> anyhow::Result<f64> {
        Ok(self.zoom_of(tab).unwrap_or(1.0))
    }

    fn set_zoom(&self, tab: TabId, factor: f64) -> anyhow::Result<()> {
        self.zooms.lock().unwrap().insert(tab, factor);
        Ok(())
    }
}

async fn temp_db(dir: &tempfile::TempDir) -> ZoomDb {
    ZoomDb::open_at(dir.path().join("zoom.db")).await.unwrap()
}

fn service(db: ZoomDb, settings: Settings, tabs: Arc<FakeTabs>) -> ZoomService {
    ZoomService::new(db, settings, tabs).with_capacity_check_delay(Duration::from_millis(10))
}

#[tokio::test]
async fn zoom_change_stores_and_navigation_applies() {
    let dir = tempfile::tempdir().unwrap();
    let db = temp_db(&dir).await;
    let tabs = Arc::new(FakeTabs::default());
    let svc = service(db.clone(), Settings::default(), Arc::clone(&tabs));

    // User zooms to 150% on a messy URL spelling.
    tabs.set_url(1, "https://Example.com/Page/");
    svc.handle_event(NavEvent::ZoomChanged {
        tab: 1,
        old_factor: 1.0,
        new_factor: 1.5,
    })
    .await;

    let records = db.find_by_host("example.com").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path, "/Page");
    assert_eq!(records[0].component_mask.bits(), 1);
    assert!((records[0].zoom_level - 1.5).abs() < f64::EPSILON);

    // A later navigation to the same path with extra query/fragment matches.
    svc.handle_event(NavEvent::Committed {
        tab: 2,
        url: "https://example.com/Page?x=1#y".to_string(),
        frame_id: 0,
    })
    .await;
    assert_eq!(tabs.zoom_of(2), Some(1.5));
}

#[tokio::test]
async fn iframe_navigation_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let db = temp_db(&dir).await;
    let tabs = Arc::new(FakeTabs::default());
    let svc = service(db.clone(), Settings::default(), Arc::clone(&tabs));

    svc.store_zoom("https://example.com/page", 1.5).await.unwrap();
    svc.handle_event(NavEvent::Committed {
        tab: 1,
        url: "https://example.com/page".to_string(),
        frame_id: 7,
    })
    .await;
    assert_eq!(tabs.zoom_of(1), None);
}

#[tokio::test]
async fn more_specific_record_wins_on_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let db = temp_db(&dir).await;
    let tabs = Arc::new(FakeTabs::default());

    // One preference anchored to the path, one to the host alone.
    let path_svc = service(db.clone(), Settings::default(), Arc::clone(&tabs));
    path_svc.store_zoom("https://a.com/foo", 1.2).await.unwrap();

    let host_settings = Settings {
        include_path: false,
        ..Settings::default()
    };
    let host_svc = service(db.clone(), host_settings, Arc::clone(&tabs));
    host_svc.store_zoom("https://a.com/", 2.0).await.unwrap();

    let best = path_svc.resolve_zoom("https://a.com/foo").await.unwrap().unwrap();
    assert!((best.zoom_level - 1.2).abs() < f64::EPSILON);

    // Elsewhere on the host only the host-wide record matches.
    let best = path_svc.resolve_zoom("https://a.com/bar").await.unwrap().unwrap();
    assert!((best.zoom_level - 2.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn zoom_back_to_default_removes_stored_record() {
    let dir = tempfile::tempdir().unwrap();
    let db = temp_db(&dir).await;
    let tabs = Arc::new(FakeTabs::default());
    let svc = service(db.clone(), Settings::default(), Arc::clone(&tabs));

    tabs.set_url(1, "https://example.com/doc");
    svc.handle_event(NavEvent::ZoomChanged {
        tab: 1,
        old_factor: 1.0,
        new_factor: 1.5,
    })
    .await;
    assert_eq!(db.count().await.unwrap(), 1);

    // Back to 100% (within rounding tolerance): record goes away, none added.
    svc.handle_event(NavEvent::ZoomChanged {
        tab: 1,
        old_factor: 1.5,
        new_factor: 1.004,
    })
    .await;
    assert_eq!(db.count().await.unwrap(), 0);
}

#[tokio::test]
async fn non_http_urls_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let db = temp_db(&dir).await;
    let tabs = Arc::new(FakeTabs::default());
    let svc = service(db.clone(), Settings::default(), Arc::clone(&tabs));

    tabs.set_url(1, "about:blank");
    svc.handle_event(NavEvent::ZoomChanged {
        tab: 1,
        old_factor: 1.0,
        new_factor: 1.5,
    })
    .await;
    assert_eq!(db.count().await.unwrap(), 0);

    // Malformed URL on the read path degrades to "no zoom applied".
    svc.handle_event(NavEvent::UrlChanged {
        tab: 2,
        url: "http://".to_string(),
    })
    .await;
    assert_eq!(tabs.zoom_of(2), None);
}

#[tokio::test]
async fn deferred_capacity_check_prunes_after_writes() {
    let dir = tempfile::tempdir().unwrap();
    let db = temp_db(&dir).await;
    let tabs = Arc::new(FakeTabs::default());
    let settings = Settings {
        storage_limit: 5,
        purge_percentage: 20,
        ..Settings::default()
    };
    let svc = service(db.clone(), settings, Arc::clone(&tabs));

    for i in 0..6 {
        svc.store_zoom(&format!("https://example.com/page-{i}"), 1.5)
            .await
            .unwrap();
    }
    assert_eq!(db.count().await.unwrap(), 6);

    // The write path returned immediately; the purge runs a moment later.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(db.count().await.unwrap() <= 5);
}

#[tokio::test]
async fn lookup_refreshes_timestamp_of_match() {
    let dir = tempfile::tempdir().unwrap();
    let db = temp_db(&dir).await;
    let tabs = Arc::new(FakeTabs::default());
    let svc = service(db.clone(), Settings::default(), Arc::clone(&tabs));

    let id = svc.store_zoom("https://example.com/p", 1.5).await.unwrap();
    let before = db.get(id).await.unwrap().unwrap().timestamp;

    tokio::time::sleep(Duration::from_millis(5)).await;
    svc.resolve_zoom("https://example.com/p").await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let after = db.get(id).await.unwrap().unwrap().timestamp;
    assert!(after > before);
}

#[tokio::test]
async fn command_surface_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let db = temp_db(&dir).await;
    let tabs = Arc::new(FakeTabs::default());
    tabs.set_zoom(1, 1.25).unwrap();
    let svc = service(db.clone(), Settings::default(), Arc::clone(&tabs));

    svc.store_zoom("https://a.com/x", 1.5).await.unwrap();
    svc.store_zoom("https://b.com/y", 0.8).await.unwrap();

    match svc.handle_command(Command::GetCurrentZoom { tab: 1 }).await.unwrap() {
        CommandReply::CurrentZoom { factor } => assert!((factor - 1.25).abs() < f64::EPSILON),
        other => panic!("unexpected reply: {other:?}"),
    }

    match svc.handle_command(Command::GetDatabaseMetrics).await.unwrap() {
        CommandReply::DatabaseMetrics(m) => {
            assert_eq!(m.total_entries, 2);
            assert_eq!(m.unique_hosts, 2);
        }
        other => panic!("unexpected reply: {other:?}"),
    }

    match svc.handle_command(Command::CheckStorageLimit).await.unwrap() {
        CommandReply::StorageLimit { purge_performed } => assert!(!purge_performed),
        other => panic!("unexpected reply: {other:?}"),
    }

    match svc.handle_command(Command::PurgeOldEntries).await.unwrap() {
        CommandReply::Purged { removed } => assert_eq!(removed, 1),
        other => panic!("unexpected reply: {other:?}"),
    }

    match svc.handle_command(Command::ClearAllEntries).await.unwrap() {
        CommandReply::Cleared { removed } => assert_eq!(removed, 1),
        other => panic!("unexpected reply: {other:?}"),
    }
    assert_eq!(db.count().await.unwrap(), 0);
}
