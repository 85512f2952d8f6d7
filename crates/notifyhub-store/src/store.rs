//! The notification inbox store.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use notifyhub_core::AppResult;
use notifyhub_core::config::inbox::InboxConfig;
use notifyhub_core::types::{NotificationId, PageWindow};
use notifyhub_entity::notification::{Notification, NotificationPage};
use notifyhub_gateway::{ListQuery, NotificationGateway};

use crate::tab::InboxTab;

/// Callback invoked with the new unread count whenever it changes, so a
/// parent badge can stay in sync without re-querying.
pub type UnreadListener = Arc<dyn Fn(u64) + Send + Sync>;

/// Client-side inbox state over a remote notification service.
///
/// One store instance is owned per mounted surface. State lives behind a
/// mutex that is never held across a gateway await, so rapid user actions
/// produce independent in-flight requests; every mutation is keyed by
/// notification id, which makes out-of-order completion safe.
pub struct NotificationStore {
    /// Remote collaborator.
    gateway: Arc<dyn NotificationGateway>,
    /// Inbox settings (page size, archive counting).
    config: InboxConfig,
    /// Inbox state. Held only for synchronous mutation.
    state: Mutex<InboxState>,
    /// Unread-count observer.
    listener: Mutex<Option<UnreadListener>>,
}

/// Mutable inbox state.
#[derive(Debug, Default)]
struct InboxState {
    /// Active tab filter.
    tab: InboxTab,
    /// Cached notification records, server order preserved.
    items: Vec<Notification>,
    /// Unread count across all pages, server-authoritative after a fetch.
    unread_count: u64,
    /// Total count across all pages.
    total: u64,
    /// Whether further pages exist.
    has_more: bool,
    /// Next page index to fetch (0-based).
    page: u64,
    /// Number of list requests currently in flight.
    in_flight: u32,
    /// Bumped on refresh and tab switch; stale list responses are
    /// discarded by comparing against the value they were issued under.
    generation: u64,
    /// Ids deleted or archived this session. Load-more responses never
    /// resurrect them; the set resets on a successful refresh.
    removed: HashSet<NotificationId>,
}

/// Undo record for an optimistic removal.
struct RemovedEntry {
    /// Position the item occupied.
    index: usize,
    /// The removed record.
    item: Notification,
    /// Whether `total` was decremented for this removal.
    deducted_total: bool,
}

impl InboxState {
    /// Optimistically remove an item by id, adjusting counters.
    fn take_item(&mut self, id: NotificationId, deduct_total: bool) -> Option<RemovedEntry> {
        let index = self.items.iter().position(|n| n.id == id)?;
        let item = self.items.remove(index);
        if !item.is_read {
            self.unread_count = self.unread_count.saturating_sub(1);
        }
        if deduct_total {
            self.total = self.total.saturating_sub(1);
        }
        self.removed.insert(id);
        Some(RemovedEntry {
            index,
            item,
            deducted_total: deduct_total,
        })
    }

    /// Undo a [`take_item`](Self::take_item) removal.
    fn restore_item(&mut self, entry: RemovedEntry) {
        let RemovedEntry {
            index,
            item,
            deducted_total,
        } = entry;
        self.removed.remove(&item.id);
        if !item.is_read {
            self.unread_count += 1;
        }
        if deducted_total {
            self.total += 1;
        }
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// Merge a list response into state. Returns the new unread count.
    ///
    /// `issued_page` is the window the response answers; the next fetch
    /// continues from there even when responses settle out of order.
    fn apply_page(&mut self, page: NotificationPage, replace: bool, issued_page: u64) -> u64 {
        let NotificationPage {
            notifications,
            total,
            unread_count,
            has_more,
        } = page;

        if replace {
            // Server truth wins on an explicit refresh, including ids
            // removed locally this session.
            let mut seen = HashSet::new();
            self.items = notifications
                .into_iter()
                .filter(|n| seen.insert(n.id))
                .collect();
            self.removed.clear();
        } else {
            let mut seen: HashSet<NotificationId> = self.items.iter().map(|n| n.id).collect();
            for notification in notifications {
                if self.removed.contains(&notification.id) {
                    continue;
                }
                if seen.insert(notification.id) {
                    self.items.push(notification);
                }
            }
        }

        // The server counts the whole collection; the local page is a subset.
        self.unread_count = unread_count;
        self.total = total;
        self.has_more = has_more;
        self.page = issued_page + 1;
        self.unread_count
    }
}

/// Read-only copy of the inbox state for rendering.
#[derive(Debug, Clone)]
pub struct InboxSnapshot {
    /// Active tab filter.
    pub tab: InboxTab,
    /// Cached notification records, server order preserved.
    pub items: Vec<Notification>,
    /// Unread count across all pages.
    pub unread_count: u64,
    /// Total count across all pages.
    pub total: u64,
    /// Whether further pages exist.
    pub has_more: bool,
    /// Whether a list request is in flight.
    pub loading: bool,
}

impl NotificationStore {
    /// Create a store over the given gateway.
    pub fn new(gateway: Arc<dyn NotificationGateway>, config: InboxConfig) -> Self {
        Self {
            gateway,
            config,
            state: Mutex::new(InboxState::default()),
            listener: Mutex::new(None),
        }
    }

    /// Register the unread-count observer, replacing any previous one.
    pub fn set_unread_listener(&self, listener: impl Fn(u64) + Send + Sync + 'static) {
        *self.lock_listener() = Some(Arc::new(listener));
    }

    /// Read-only copy of the current state.
    pub fn snapshot(&self) -> InboxSnapshot {
        let s = self.lock_state();
        InboxSnapshot {
            tab: s.tab,
            items: s.items.clone(),
            unread_count: s.unread_count,
            total: s.total,
            has_more: s.has_more,
            loading: s.in_flight > 0,
        }
    }

    /// Current unread count.
    pub fn unread_count(&self) -> u64 {
        self.lock_state().unread_count
    }

    /// Currently active tab.
    pub fn active_tab(&self) -> InboxTab {
        self.lock_state().tab
    }

    /// Whether a list request is in flight.
    pub fn is_loading(&self) -> bool {
        self.lock_state().in_flight > 0
    }

    /// Discard pagination state and fetch the first page.
    pub async fn refresh(&self) -> AppResult<()> {
        self.load(true).await
    }

    /// Fetch and append the next page.
    pub async fn load_more(&self) -> AppResult<()> {
        self.load(false).await
    }

    /// Fetch a page for the active tab.
    ///
    /// With `refresh` the page counter resets and the response replaces
    /// the held items; otherwise the next page is appended with id
    /// de-duplication. Items are only touched on success, and the loading
    /// flag clears on every path. A response that was superseded by a tab
    /// switch or a newer refresh is discarded.
    pub async fn load(&self, refresh: bool) -> AppResult<()> {
        let (generation, window, tab) = {
            let mut s = self.lock_state();
            if refresh {
                s.generation += 1;
                s.page = 0;
            } else if !s.has_more {
                return Ok(());
            }
            s.in_flight += 1;
            (
                s.generation,
                PageWindow::new(s.page, self.config.page_size),
                s.tab,
            )
        };

        let query = ListQuery::new(window).unread_only(tab == InboxTab::Unread);
        let result = self.gateway.list(&query).await;

        let count = {
            let mut s = self.lock_state();
            s.in_flight -= 1;
            if s.generation != generation {
                debug!(
                    issued = generation,
                    current = s.generation,
                    "Discarding stale list response"
                );
                return Ok(());
            }
            match result {
                Ok(page) => s.apply_page(page, refresh, window.page),
                Err(e) => {
                    warn!(error = %e, "Failed to load notifications");
                    return Err(e);
                }
            }
        };
        self.notify_unread(count);
        Ok(())
    }

    /// Switch the tab filter and reload from the first page.
    ///
    /// Selecting the already-active tab is a no-op.
    pub async fn switch_tab(&self, tab: InboxTab) -> AppResult<()> {
        {
            let mut s = self.lock_state();
            if s.tab == tab {
                return Ok(());
            }
            s.tab = tab;
        }
        self.load(true).await
    }

    /// Mark one notification read.
    ///
    /// Applies locally first, then confirms with the gateway; on failure
    /// the flag and counter are reverted. Already-read or unheld ids are
    /// no-ops.
    pub async fn mark_read(&self, id: NotificationId) -> AppResult<()> {
        let count = {
            let mut s = self.lock_state();
            let Some(item) = s.items.iter_mut().find(|n| n.id == id) else {
                return Ok(());
            };
            if item.is_read {
                return Ok(());
            }
            item.is_read = true;
            s.unread_count = s.unread_count.saturating_sub(1);
            s.unread_count
        };
        self.notify_unread(count);

        match self.gateway.mark_read(id).await {
            Ok(_) => Ok(()),
            Err(e) => {
                let count = {
                    let mut s = self.lock_state();
                    if let Some(item) = s.items.iter_mut().find(|n| n.id == id) {
                        item.is_read = false;
                        s.unread_count += 1;
                    }
                    s.unread_count
                };
                warn!(%id, error = %e, "Failed to mark notification read, reverting");
                self.notify_unread(count);
                Err(e)
            }
        }
    }

    /// Mark every held notification read and zero the counter.
    pub async fn mark_all_read(&self) -> AppResult<()> {
        let (flipped, previous_count) = {
            let mut s = self.lock_state();
            let flipped: Vec<NotificationId> = s
                .items
                .iter()
                .filter(|n| !n.is_read)
                .map(|n| n.id)
                .collect();
            for item in s.items.iter_mut() {
                item.is_read = true;
            }
            let previous = s.unread_count;
            s.unread_count = 0;
            (flipped, previous)
        };
        self.notify_unread(0);

        match self.gateway.mark_all_read().await {
            Ok(count) => {
                debug!(count, "Marked all notifications read");
                Ok(())
            }
            Err(e) => {
                let count = {
                    let mut s = self.lock_state();
                    for item in s.items.iter_mut() {
                        if flipped.contains(&item.id) {
                            item.is_read = false;
                        }
                    }
                    s.unread_count = previous_count;
                    s.unread_count
                };
                warn!(error = %e, "Failed to mark all read, reverting");
                self.notify_unread(count);
                Err(e)
            }
        }
    }

    /// Delete one notification.
    ///
    /// Removes it locally (decrementing `unread_count` if unread and
    /// `total` always), then confirms with the gateway; on failure the
    /// item is restored at its position. Unheld ids are no-ops.
    pub async fn delete(&self, id: NotificationId) -> AppResult<()> {
        self.remove(id, RemovalKind::Delete).await
    }

    /// Archive one notification.
    ///
    /// Same removal semantics as [`delete`](Self::delete), except `total`
    /// only decrements when [`InboxConfig::archive_reduces_total`] is set.
    pub async fn archive(&self, id: NotificationId) -> AppResult<()> {
        self.remove(id, RemovalKind::Archive).await
    }

    /// Mark read and hand back the click-through target.
    ///
    /// The read mutation always runs first; a gateway failure is logged
    /// and does not block navigation, so the action URL (if any) is
    /// returned either way.
    pub async fn click(&self, id: NotificationId) -> Option<String> {
        let url = {
            let s = self.lock_state();
            s.items
                .iter()
                .find(|n| n.id == id)
                .and_then(|n| n.action_url.clone())
        };
        if let Err(e) = self.mark_read(id).await {
            warn!(%id, error = %e, "Click-through mark-read failed");
        }
        url
    }

    /// Mark a batch of notifications read in one round trip.
    ///
    /// Held unread items flip locally first; on gateway failure they are
    /// reverted. Returns the number the backend reports touching.
    pub async fn bulk_mark_read(&self, ids: &[NotificationId]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let (applied, count) = {
            let mut s = self.lock_state();
            let mut applied = Vec::new();
            for &id in ids {
                if let Some(item) = s.items.iter_mut().find(|n| n.id == id) {
                    if !item.is_read {
                        item.is_read = true;
                        applied.push(id);
                    }
                }
            }
            s.unread_count = s.unread_count.saturating_sub(applied.len() as u64);
            (applied, s.unread_count)
        };
        if !applied.is_empty() {
            self.notify_unread(count);
        }

        match self.gateway.bulk_mark_read(ids).await {
            Ok(touched) => Ok(touched),
            Err(e) => {
                let count = {
                    let mut s = self.lock_state();
                    for id in &applied {
                        if let Some(item) = s.items.iter_mut().find(|n| n.id == *id) {
                            item.is_read = false;
                        }
                    }
                    s.unread_count += applied.len() as u64;
                    s.unread_count
                };
                warn!(error = %e, "Failed bulk mark-read, reverting");
                if !applied.is_empty() {
                    self.notify_unread(count);
                }
                Err(e)
            }
        }
    }

    /// Delete a batch of notifications in one round trip.
    pub async fn bulk_delete(&self, ids: &[NotificationId]) -> AppResult<u64> {
        self.bulk_remove(ids, RemovalKind::Delete).await
    }

    /// Archive a batch of notifications in one round trip.
    pub async fn bulk_archive(&self, ids: &[NotificationId]) -> AppResult<u64> {
        self.bulk_remove(ids, RemovalKind::Archive).await
    }

    async fn remove(&self, id: NotificationId, kind: RemovalKind) -> AppResult<()> {
        let deduct_total = self.deducts_total(kind);
        let (entry, count) = {
            let mut s = self.lock_state();
            let Some(entry) = s.take_item(id, deduct_total) else {
                return Ok(());
            };
            (entry, s.unread_count)
        };
        let was_unread = !entry.item.is_read;
        if was_unread {
            self.notify_unread(count);
        }

        let result = match kind {
            RemovalKind::Delete => self.gateway.delete(id).await,
            RemovalKind::Archive => self.gateway.archive(id).await.map(|_| ()),
        };
        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                let count = {
                    let mut s = self.lock_state();
                    s.restore_item(entry);
                    s.unread_count
                };
                warn!(%id, op = kind.as_str(), error = %e, "Removal failed, restoring");
                if was_unread {
                    self.notify_unread(count);
                }
                Err(e)
            }
        }
    }

    async fn bulk_remove(&self, ids: &[NotificationId], kind: RemovalKind) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let deduct_total = self.deducts_total(kind);
        let (entries, count) = {
            let mut s = self.lock_state();
            let mut entries = Vec::new();
            for &id in ids {
                if let Some(entry) = s.take_item(id, deduct_total) {
                    entries.push(entry);
                }
            }
            (entries, s.unread_count)
        };
        let changed_unread = entries.iter().any(|e| !e.item.is_read);
        if changed_unread {
            self.notify_unread(count);
        }

        let result = match kind {
            RemovalKind::Delete => self.gateway.bulk_delete(ids).await,
            RemovalKind::Archive => self.gateway.bulk_archive(ids).await,
        };
        match result {
            Ok(touched) => Ok(touched),
            Err(e) => {
                let count = {
                    let mut s = self.lock_state();
                    for entry in entries.into_iter().rev() {
                        s.restore_item(entry);
                    }
                    s.unread_count
                };
                warn!(op = kind.as_str(), error = %e, "Bulk removal failed, restoring");
                if changed_unread {
                    self.notify_unread(count);
                }
                Err(e)
            }
        }
    }

    fn deducts_total(&self, kind: RemovalKind) -> bool {
        match kind {
            RemovalKind::Delete => true,
            RemovalKind::Archive => self.config.archive_reduces_total,
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, InboxState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_listener(&self) -> MutexGuard<'_, Option<UnreadListener>> {
        self.listener.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Invoke the unread observer outside any internal lock.
    fn notify_unread(&self, count: u64) {
        let listener = self.lock_listener().clone();
        if let Some(listener) = listener {
            listener(count);
        }
    }
}

/// Which removal flavor an operation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RemovalKind {
    Delete,
    Archive,
}

impl RemovalKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Archive => "archive",
        }
    }
}
