//! Event-driven zoom engine: reacts to navigation and zoom-change events,
//! resolves and applies stored preferences, and serves the UI command
//! surface.
//!
//! The browser side is abstracted behind [`TabControl`]; everything here is
//! deterministic core logic plus store I/O. Read-path failures (bad URL,
//! store trouble) are logged and degrade to "apply no stored zoom" so
//! navigation is never blocked.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::capacity::{self, DbMetrics};
use crate::config::Settings;
use crate::matcher::find_best_match;
use crate::store::{RecordId, ZoomDb, ZoomEntry, ZoomRecord};
use crate::url_parts::{is_http_scheme, UrlParts};

/// Browser tab identifier.
pub type TabId = i64;

/// Tolerance when comparing a zoom factor against the configured default.
const DEFAULT_ZOOM_EPSILON: f64 = 0.01;

/// Delay before the post-write capacity check runs, so persistence is never
/// blocked waiting on a purge.
const CAPACITY_CHECK_DELAY: Duration = Duration::from_millis(100);

/// Seam to the browser's tab/zoom API.
///
/// Calls fail when the tab has gone away; the service logs and moves on.
pub trait TabControl: Send + Sync {
    fn current_url(&self, tab: TabId) -> Result<String>;
    fn get_zoom(&self, tab: TabId) -> Result<f64>;
    fn set_zoom(&self, tab: TabId, factor: f64) -> Result<()>;
}

/// Navigation and zoom events delivered by the browser collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    /// Top-level navigation committed (frame 0) or iframe load (ignored).
    Committed {
        tab: TabId,
        url: String,
        frame_id: i64,
    },
    /// Same-document (SPA) URL change.
    UrlChanged { tab: TabId, url: String },
    /// The user changed the tab's zoom factor.
    ZoomChanged {
        tab: TabId,
        old_factor: f64,
        new_factor: f64,
    },
}

/// Commands exposed to the popup/options UI, one variant per action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    GetCurrentZoom { tab: TabId },
    GetDatabaseMetrics,
    PurgeOldEntries,
    ClearAllEntries,
    CheckStorageLimit,
}

/// Typed replies, one per command variant.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandReply {
    CurrentZoom { factor: f64 },
    DatabaseMetrics(DbMetrics),
    Purged { removed: u64 },
    Cleared { removed: u64 },
    StorageLimit { purge_performed: bool },
}

/// The zoom preference engine.
pub struct ZoomService {
    db: ZoomDb,
    settings: Settings,
    tabs: Arc<dyn TabControl>,
    capacity_check_delay: Duration,
}

impl ZoomService {
    pub fn new(db: ZoomDb, settings: Settings, tabs: Arc<dyn TabControl>) -> Self {
        Self {
            db,
            settings,
            tabs,
            capacity_check_delay: CAPACITY_CHECK_DELAY,
        }
    }

    /// Override the deferred capacity-check delay (tests shorten it).
    pub fn with_capacity_check_delay(mut self, delay: Duration) -> Self {
        self.capacity_check_delay = delay;
        self
    }

    /// Dispatch one browser event. Errors are logged, never propagated: a
    /// failed lookup or store write must not break navigation.
    pub async fn handle_event(&self, event: NavEvent) {
        match event {
            NavEvent::Committed { tab, url, frame_id } => {
                if frame_id != 0 {
                    return;
                }
                tracing::debug!("navigation committed: tab {tab} -> {url}");
                self.apply_stored_zoom(tab, &url).await;
            }
            NavEvent::UrlChanged { tab, url } => {
                tracing::debug!("SPA URL change: tab {tab} -> {url}");
                self.apply_stored_zoom(tab, &url).await;
            }
            NavEvent::ZoomChanged {
                tab,
                old_factor,
                new_factor,
            } => {
                tracing::debug!(
                    "zoom changed on tab {tab}: {:.0}% -> {:.0}%",
                    old_factor * 100.0,
                    new_factor * 100.0
                );
                if let Err(e) = self.on_zoom_changed(tab, new_factor).await {
                    tracing::warn!("zoom change for tab {tab} not persisted: {e:#}");
                }
            }
        }
    }

    /// Resolve and apply the stored zoom for a URL, if any.
    async fn apply_stored_zoom(&self, tab: TabId, url: &str) {
        if !is_http_scheme(url) {
            tracing::debug!("ignoring non-http URL: {url}");
            return;
        }
        match self.resolve_zoom(url).await {
            Ok(Some(record)) => {
                tracing::debug!(
                    "applying stored zoom {:.0}% to tab {tab}",
                    record.zoom_level * 100.0
                );
                if let Err(e) = self.tabs.set_zoom(tab, record.zoom_level) {
                    tracing::warn!("failed to set zoom on tab {tab}: {e:#}");
                }
            }
            Ok(None) => tracing::debug!("no stored zoom for {url}"),
            Err(e) => tracing::warn!("zoom lookup failed for {url}: {e:#}"),
        }
    }

    /// Find the best-matching stored record for a URL and refresh its
    /// timestamp in the background.
    pub async fn resolve_zoom(&self, url: &str) -> Result<Option<ZoomRecord>> {
        let parts = UrlParts::parse(url)?;
        let candidates = self.db.find_by_host(&parts.host).await?;
        let best = find_best_match(&parts, &candidates).cloned();

        if let Some(record) = &best {
            let db = self.db.clone();
            let id = record.id;
            tokio::spawn(async move {
                if let Err(e) = db.touch(id).await {
                    tracing::warn!("failed to refresh timestamp for record {id}: {e}");
                }
            });
        }

        Ok(best)
    }

    /// Handle a user zoom change: back to default deletes the stored
    /// preference, anything else writes one.
    async fn on_zoom_changed(&self, tab: TabId, new_factor: f64) -> Result<()> {
        let url = self.tabs.current_url(tab)?;
        if !is_http_scheme(&url) {
            tracing::debug!("ignoring zoom change on non-http URL: {url}");
            return Ok(());
        }

        let default = self.settings.default_zoom_factor();
        if (new_factor - default).abs() < DEFAULT_ZOOM_EPSILON {
            match self.remove_stored_zoom(&url).await? {
                Some(id) => tracing::debug!("zoom reset to default, removed record {id}"),
                None => tracing::debug!("zoom reset to default, nothing stored for {url}"),
            }
            return Ok(());
        }

        let id = self.store_zoom(&url, new_factor).await?;
        tracing::debug!("stored zoom {:.0}% as record {id}", new_factor * 100.0);
        Ok(())
    }

    /// Persist a zoom preference for a URL under the current component
    /// settings, then schedule the deferred capacity check.
    pub async fn store_zoom(&self, url: &str, factor: f64) -> Result<RecordId> {
        let parts = UrlParts::parse(url)?;
        let entry = ZoomEntry::from_parts(&parts, self.settings.component_mask(), factor);
        let id = self.db.upsert(&entry).await?;
        self.schedule_capacity_check();
        Ok(id)
    }

    /// Delete the best-matching stored record for a URL, returning its id.
    pub async fn remove_stored_zoom(&self, url: &str) -> Result<Option<RecordId>> {
        let parts = UrlParts::parse(url)?;
        let candidates = self.db.find_by_host(&parts.host).await?;
        let Some(record) = find_best_match(&parts, &candidates) else {
            return Ok(None);
        };
        let id = record.id;
        self.db.remove(id).await?;
        Ok(Some(id))
    }

    /// Kick off the storage-limit check without blocking the write path.
    /// Failures are logged, never surfaced to the write caller.
    fn schedule_capacity_check(&self) {
        let db = self.db.clone();
        let settings = self.settings.clone();
        let delay = self.capacity_check_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match capacity::check_and_enforce_limit(&db, &settings).await {
                Ok(true) => tracing::info!("deferred capacity check purged old entries"),
                Ok(false) => {}
                Err(e) => tracing::warn!("deferred capacity check failed: {e}"),
            }
        });
    }

    /// Serve one UI command.
    pub async fn handle_command(&self, command: Command) -> Result<CommandReply> {
        match command {
            Command::GetCurrentZoom { tab } => {
                let factor = self.tabs.get_zoom(tab)?;
                Ok(CommandReply::CurrentZoom { factor })
            }
            Command::GetDatabaseMetrics => {
                let metrics = capacity::metrics(&self.db).await?;
                Ok(CommandReply::DatabaseMetrics(metrics))
            }
            Command::PurgeOldEntries => {
                let removed =
                    capacity::purge_oldest_entries(&self.db, self.settings.purge_percentage)
                        .await?;
                Ok(CommandReply::Purged { removed })
            }
            Command::ClearAllEntries => {
                let removed = self.db.clear().await?;
                Ok(CommandReply::Cleared { removed })
            }
            Command::CheckStorageLimit => {
                let purge_performed =
                    capacity::check_and_enforce_limit(&self.db, &self.settings).await?;
                Ok(CommandReply::StorageLimit { purge_performed })
            }
        }
    }
}
