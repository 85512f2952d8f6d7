//! Store behavior tests against a scripted gateway.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Notify;

use notifyhub_core::config::inbox::InboxConfig;
use notifyhub_core::types::NotificationId;
use notifyhub_core::{AppError, AppResult};
use notifyhub_entity::notification::{
    Notification, NotificationKind, NotificationPage, NotificationPreferences,
    NotificationPriority, NotificationStats,
};
use notifyhub_gateway::dto::DeviceRegistration;
use notifyhub_gateway::{ListQuery, NotificationGateway};
use notifyhub_store::{InboxTab, NotificationStore};

fn item(id: NotificationId, is_read: bool) -> Notification {
    Notification {
        id,
        kind: NotificationKind::NewOrder,
        priority: NotificationPriority::Medium,
        title: "Order #1001".to_string(),
        message: "A new order arrived".to_string(),
        is_read,
        created_at: Utc::now(),
        action_url: None,
    }
}

fn page(
    notifications: Vec<Notification>,
    total: u64,
    unread_count: u64,
    has_more: bool,
) -> NotificationPage {
    NotificationPage {
        notifications,
        total,
        unread_count,
        has_more,
    }
}

/// Scripted gateway. List responses pop from a queue in completion
/// order; mutations succeed unless `fail_mutations` is set; every call
/// is recorded for assertions.
struct MockGateway {
    list_responses: Mutex<VecDeque<AppResult<NotificationPage>>>,
    calls: Mutex<Vec<String>>,
    fail_mutations: AtomicBool,
    /// When set, the next list call waits here before answering.
    gate_next_list: Mutex<Option<Arc<Notify>>>,
}

impl MockGateway {
    fn with_pages(pages: Vec<AppResult<NotificationPage>>) -> Arc<Self> {
        Arc::new(Self {
            list_responses: Mutex::new(pages.into()),
            calls: Mutex::new(Vec::new()),
            fail_mutations: AtomicBool::new(false),
            gate_next_list: Mutex::new(None),
        })
    }

    fn fail_mutations(&self) {
        self.fail_mutations.store(true, Ordering::SeqCst);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn calls_matching(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn mutation_result<T>(&self, ok: T) -> AppResult<T> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            Err(AppError::transport("scripted failure"))
        } else {
            Ok(ok)
        }
    }
}

#[async_trait]
impl NotificationGateway for MockGateway {
    async fn list(&self, query: &ListQuery) -> AppResult<NotificationPage> {
        self.record(format!(
            "list skip={} unread_only={}",
            query.window.skip(),
            query.unread_only
        ));
        let gate = self.gate_next_list.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.list_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(NotificationPage::empty()))
    }

    async fn get(&self, id: NotificationId) -> AppResult<Notification> {
        self.record(format!("get {id}"));
        Ok(item(id, false))
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<Notification> {
        self.record(format!("mark_read {id}"));
        self.mutation_result(item(id, true))
    }

    async fn mark_all_read(&self) -> AppResult<u64> {
        self.record("mark_all_read".to_string());
        self.mutation_result(0)
    }

    async fn delete(&self, id: NotificationId) -> AppResult<()> {
        self.record(format!("delete {id}"));
        self.mutation_result(())
    }

    async fn archive(&self, id: NotificationId) -> AppResult<Notification> {
        self.record(format!("archive {id}"));
        self.mutation_result(item(id, true))
    }

    async fn bulk_mark_read(&self, ids: &[NotificationId]) -> AppResult<u64> {
        self.record(format!("bulk_mark_read n={}", ids.len()));
        self.mutation_result(ids.len() as u64)
    }

    async fn bulk_delete(&self, ids: &[NotificationId]) -> AppResult<u64> {
        self.record(format!("bulk_delete n={}", ids.len()));
        self.mutation_result(ids.len() as u64)
    }

    async fn bulk_archive(&self, ids: &[NotificationId]) -> AppResult<u64> {
        self.record(format!("bulk_archive n={}", ids.len()));
        self.mutation_result(ids.len() as u64)
    }

    async fn stats(&self) -> AppResult<NotificationStats> {
        self.record("stats".to_string());
        Ok(NotificationStats {
            total: 0,
            unread: 0,
            by_type: Default::default(),
            by_priority: Default::default(),
        })
    }

    async fn get_preferences(&self) -> AppResult<NotificationPreferences> {
        self.record("get_preferences".to_string());
        Ok(NotificationPreferences {
            preferences: serde_json::json!({}),
            updated_at: None,
        })
    }

    async fn update_preferences(
        &self,
        preferences: &serde_json::Value,
    ) -> AppResult<NotificationPreferences> {
        self.record("update_preferences".to_string());
        Ok(NotificationPreferences {
            preferences: preferences.clone(),
            updated_at: None,
        })
    }

    async fn register_device(&self, registration: &DeviceRegistration) -> AppResult<String> {
        self.record(format!("register_device {}", registration.platform));
        Ok("registered".to_string())
    }

    async fn unregister_device(&self, token: &str) -> AppResult<()> {
        self.record(format!("unregister_device {token}"));
        Ok(())
    }
}

fn store_over(mock: &Arc<MockGateway>) -> NotificationStore {
    NotificationStore::new(
        Arc::clone(mock) as Arc<dyn NotificationGateway>,
        InboxConfig::default(),
    )
}

/// Records every unread-count callback the store emits.
fn track_unread(store: &NotificationStore) -> Arc<Mutex<Vec<u64>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.set_unread_listener(move |count| sink.lock().unwrap().push(count));
    seen
}

#[tokio::test]
async fn test_refresh_populates_state_and_notifies() {
    let a = NotificationId::new();
    let b = NotificationId::new();
    let mock = MockGateway::with_pages(vec![Ok(page(
        vec![item(a, false), item(b, true)],
        10,
        4,
        true,
    ))]);
    let store = store_over(&mock);
    let counts = track_unread(&store);

    store.refresh().await.expect("refresh succeeds");

    let snapshot = store.snapshot();
    assert_eq!(snapshot.items.len(), 2);
    // The server count is authoritative even though only one held item is unread.
    assert_eq!(snapshot.unread_count, 4);
    assert_eq!(snapshot.total, 10);
    assert!(snapshot.has_more);
    assert!(!snapshot.loading);
    assert_eq!(counts.lock().unwrap().as_slice(), &[4]);
}

#[tokio::test]
async fn test_empty_refresh_yields_empty_state() {
    let mock = MockGateway::with_pages(vec![Ok(NotificationPage::empty())]);
    let store = store_over(&mock);

    store.refresh().await.expect("refresh succeeds");

    let snapshot = store.snapshot();
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.unread_count, 0);
    assert_eq!(snapshot.total, 0);
    assert!(!snapshot.has_more);
}

#[tokio::test]
async fn test_load_more_appends_without_duplicates() {
    let a = NotificationId::new();
    let b = NotificationId::new();
    let c = NotificationId::new();
    let mock = MockGateway::with_pages(vec![
        Ok(page(vec![item(a, false), item(b, true)], 3, 1, true)),
        // The server window slid; `b` comes back again.
        Ok(page(vec![item(b, true), item(c, false)], 3, 1, false)),
    ]);
    let store = store_over(&mock);

    store.refresh().await.expect("refresh succeeds");
    store.load_more().await.expect("load more succeeds");

    let snapshot = store.snapshot();
    let ids: Vec<NotificationId> = snapshot.items.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![a, b, c]);
    assert!(!snapshot.has_more);
    assert_eq!(mock.calls_matching("list skip=0"), 1);
    assert_eq!(mock.calls_matching("list skip=50"), 1);
}

#[tokio::test]
async fn test_load_more_without_more_pages_is_noop() {
    let mock = MockGateway::with_pages(vec![]);
    let store = store_over(&mock);

    store.load_more().await.expect("no-op succeeds");

    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_load_failure_clears_loading_and_keeps_items() {
    let a = NotificationId::new();
    let mock = MockGateway::with_pages(vec![
        Ok(page(vec![item(a, false)], 1, 1, true)),
        Err(AppError::transport("scripted failure")),
    ]);
    let store = store_over(&mock);

    store.refresh().await.expect("first refresh succeeds");
    store.load_more().await.expect_err("second load fails");

    let snapshot = store.snapshot();
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.unread_count, 1);
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn test_mark_read_is_idempotent() {
    let a = NotificationId::new();
    let b = NotificationId::new();
    let mock = MockGateway::with_pages(vec![Ok(page(
        vec![item(a, false), item(b, false)],
        2,
        2,
        false,
    ))]);
    let store = store_over(&mock);
    store.refresh().await.expect("refresh succeeds");

    store.mark_read(a).await.expect("mark read succeeds");
    store.mark_read(a).await.expect("repeat is a no-op");

    assert_eq!(store.unread_count(), 1);
    assert_eq!(mock.calls_matching("mark_read"), 1);
}

#[tokio::test]
async fn test_mark_read_unheld_id_is_noop() {
    let mock = MockGateway::with_pages(vec![Ok(NotificationPage::empty())]);
    let store = store_over(&mock);
    store.refresh().await.expect("refresh succeeds");

    store
        .mark_read(NotificationId::new())
        .await
        .expect("no-op succeeds");

    assert_eq!(mock.calls_matching("mark_read"), 0);
}

#[tokio::test]
async fn test_mark_one_then_mark_all_scenario() {
    let a = NotificationId::new();
    let b = NotificationId::new();
    let c = NotificationId::new();
    let mock = MockGateway::with_pages(vec![Ok(page(
        vec![item(a, false), item(b, false), item(c, true)],
        3,
        2,
        false,
    ))]);
    let store = store_over(&mock);
    let counts = track_unread(&store);
    store.refresh().await.expect("refresh succeeds");

    store.mark_read(a).await.expect("mark read succeeds");
    assert_eq!(store.unread_count(), 1);

    store.mark_all_read().await.expect("mark all succeeds");
    let snapshot = store.snapshot();
    assert_eq!(snapshot.unread_count, 0);
    assert!(snapshot.items.iter().all(|n| n.is_read));
    assert_eq!(counts.lock().unwrap().as_slice(), &[2, 1, 0]);
}

#[tokio::test]
async fn test_delete_scenario_and_repeat_noop() {
    let target = NotificationId::new();
    let other = NotificationId::new();
    let mock = MockGateway::with_pages(vec![Ok(page(
        vec![item(target, false), item(other, true)],
        8,
        5,
        true,
    ))]);
    let store = store_over(&mock);
    store.refresh().await.expect("refresh succeeds");

    store.delete(target).await.expect("delete succeeds");
    let snapshot = store.snapshot();
    assert!(snapshot.items.iter().all(|n| n.id != target));
    assert_eq!(snapshot.unread_count, 4);
    assert_eq!(snapshot.total, 7);

    store.delete(target).await.expect("repeat is a no-op");
    let snapshot = store.snapshot();
    assert_eq!(snapshot.unread_count, 4);
    assert_eq!(snapshot.total, 7);
    assert_eq!(mock.calls_matching("delete"), 1);
}

#[tokio::test]
async fn test_unread_count_never_goes_negative() {
    let a = NotificationId::new();
    // The server reports zero unread while the page still shows one: a
    // divergence the counters must absorb without underflow.
    let mock = MockGateway::with_pages(vec![Ok(page(vec![item(a, false)], 1, 0, false))]);
    let store = store_over(&mock);
    store.refresh().await.expect("refresh succeeds");

    store.delete(a).await.expect("delete succeeds");

    assert_eq!(store.unread_count(), 0);
    assert_eq!(store.snapshot().total, 0);
}

#[tokio::test]
async fn test_archive_keeps_total_by_default() {
    let a = NotificationId::new();
    let mock = MockGateway::with_pages(vec![Ok(page(vec![item(a, true)], 6, 0, false))]);
    let store = store_over(&mock);
    store.refresh().await.expect("refresh succeeds");

    store.archive(a).await.expect("archive succeeds");

    let snapshot = store.snapshot();
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.total, 6);
}

#[tokio::test]
async fn test_archive_reduces_total_when_configured() {
    let a = NotificationId::new();
    let mock = MockGateway::with_pages(vec![Ok(page(vec![item(a, true)], 6, 0, false))]);
    let store = NotificationStore::new(
        Arc::clone(&mock) as Arc<dyn NotificationGateway>,
        InboxConfig {
            archive_reduces_total: true,
            ..InboxConfig::default()
        },
    );
    store.refresh().await.expect("refresh succeeds");

    store.archive(a).await.expect("archive succeeds");

    assert_eq!(store.snapshot().total, 5);
}

#[tokio::test]
async fn test_removed_item_never_resurrected_by_load_more() {
    let a = NotificationId::new();
    let b = NotificationId::new();
    let c = NotificationId::new();
    let mock = MockGateway::with_pages(vec![
        Ok(page(vec![item(a, true), item(b, true)], 3, 0, true)),
        // Offsets shifted after the delete; the server resends `b`.
        Ok(page(vec![item(b, true), item(c, true)], 2, 0, false)),
    ]);
    let store = store_over(&mock);
    store.refresh().await.expect("refresh succeeds");

    store.delete(b).await.expect("delete succeeds");
    store.load_more().await.expect("load more succeeds");

    let ids: Vec<NotificationId> = store.snapshot().items.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![a, c]);
}

#[tokio::test]
async fn test_explicit_refresh_resyncs_removed_items() {
    let a = NotificationId::new();
    let mock = MockGateway::with_pages(vec![
        Ok(page(vec![item(a, true)], 1, 0, false)),
        // The delete never reached the backend; refresh shows it again.
        Ok(page(vec![item(a, true)], 1, 0, false)),
    ]);
    let store = store_over(&mock);
    store.refresh().await.expect("refresh succeeds");
    store.delete(a).await.expect("delete succeeds");
    assert!(store.snapshot().items.is_empty());

    // Only load-more is barred from resurrecting removed ids; an
    // explicit refresh shows server truth again.
    store.refresh().await.expect("refresh succeeds");
    assert_eq!(store.snapshot().items.len(), 1);
}

#[tokio::test]
async fn test_unread_tab_requests_unread_only() {
    let a = NotificationId::new();
    let mock = MockGateway::with_pages(vec![
        Ok(page(vec![item(a, true)], 1, 0, false)),
        Ok(page(vec![item(NotificationId::new(), false)], 1, 1, false)),
    ]);
    let store = store_over(&mock);
    store.refresh().await.expect("refresh succeeds");

    store
        .switch_tab(InboxTab::Unread)
        .await
        .expect("switch succeeds");

    assert_eq!(store.active_tab(), InboxTab::Unread);
    let snapshot = store.snapshot();
    assert!(snapshot.items.iter().all(|n| !n.is_read));
    assert_eq!(mock.calls_matching("list skip=0 unread_only=true"), 1);

    // Re-selecting the active tab does not refetch.
    store
        .switch_tab(InboxTab::Unread)
        .await
        .expect("no-op succeeds");
    assert_eq!(mock.calls_matching("list"), 2);
}

#[tokio::test]
async fn test_stale_list_response_is_discarded() {
    let stale = NotificationId::new();
    let fresh = NotificationId::new();
    let mock = MockGateway::with_pages(vec![
        // Completion order: the tab-switch list answers first, then the
        // gated initial load settles with this stale page.
        Ok(page(vec![item(fresh, false)], 1, 1, false)),
        Ok(page(vec![item(stale, true)], 9, 0, true)),
    ]);
    let gate = Arc::new(Notify::new());
    *mock.gate_next_list.lock().unwrap() = Some(Arc::clone(&gate));

    let store = Arc::new(store_over(&mock));
    let slow = {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.load(true).await })
    };
    while mock.calls_matching("list") < 1 {
        tokio::task::yield_now().await;
    }

    store
        .switch_tab(InboxTab::Unread)
        .await
        .expect("switch succeeds");
    gate.notify_one();
    slow.await
        .expect("task joins")
        .expect("stale load returns ok");

    let snapshot = store.snapshot();
    let ids: Vec<NotificationId> = snapshot.items.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![fresh]);
    assert_eq!(snapshot.unread_count, 1);
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn test_mark_read_failure_rolls_back() {
    let a = NotificationId::new();
    let mock = MockGateway::with_pages(vec![Ok(page(vec![item(a, false)], 1, 1, false))]);
    let store = store_over(&mock);
    let counts = track_unread(&store);
    store.refresh().await.expect("refresh succeeds");
    mock.fail_mutations();

    store.mark_read(a).await.expect_err("gateway fails");

    let snapshot = store.snapshot();
    assert!(!snapshot.items[0].is_read);
    assert_eq!(snapshot.unread_count, 1);
    // Optimistic decrement, then the revert.
    assert_eq!(counts.lock().unwrap().as_slice(), &[1, 0, 1]);
}

#[tokio::test]
async fn test_delete_failure_restores_item_in_place() {
    let a = NotificationId::new();
    let b = NotificationId::new();
    let c = NotificationId::new();
    let mock = MockGateway::with_pages(vec![Ok(page(
        vec![item(a, true), item(b, false), item(c, true)],
        3,
        1,
        false,
    ))]);
    let store = store_over(&mock);
    store.refresh().await.expect("refresh succeeds");
    mock.fail_mutations();

    store.delete(b).await.expect_err("gateway fails");

    let snapshot = store.snapshot();
    let ids: Vec<NotificationId> = snapshot.items.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![a, b, c]);
    assert_eq!(snapshot.unread_count, 1);
    assert_eq!(snapshot.total, 3);
}

#[tokio::test]
async fn test_mark_all_read_failure_restores_flags() {
    let a = NotificationId::new();
    let b = NotificationId::new();
    let mock = MockGateway::with_pages(vec![Ok(page(
        vec![item(a, false), item(b, true)],
        2,
        1,
        false,
    ))]);
    let store = store_over(&mock);
    store.refresh().await.expect("refresh succeeds");
    mock.fail_mutations();

    store.mark_all_read().await.expect_err("gateway fails");

    let snapshot = store.snapshot();
    let a_item = snapshot.items.iter().find(|n| n.id == a).expect("a held");
    let b_item = snapshot.items.iter().find(|n| n.id == b).expect("b held");
    assert!(!a_item.is_read);
    // Items read before the call stay read after the revert.
    assert!(b_item.is_read);
    assert_eq!(snapshot.unread_count, 1);
}

#[tokio::test]
async fn test_click_marks_read_and_returns_url() {
    let a = NotificationId::new();
    let mut clickable = item(a, false);
    clickable.action_url = Some("/orders/1001".to_string());
    let mock = MockGateway::with_pages(vec![Ok(page(vec![clickable], 1, 1, false))]);
    let store = store_over(&mock);
    store.refresh().await.expect("refresh succeeds");

    let url = store.click(a).await;

    assert_eq!(url.as_deref(), Some("/orders/1001"));
    assert!(store.snapshot().items[0].is_read);
    assert_eq!(store.unread_count(), 0);
    assert_eq!(mock.calls_matching("mark_read"), 1);
}

#[tokio::test]
async fn test_click_unknown_id_returns_none() {
    let mock = MockGateway::with_pages(vec![Ok(NotificationPage::empty())]);
    let store = store_over(&mock);
    store.refresh().await.expect("refresh succeeds");

    assert!(store.click(NotificationId::new()).await.is_none());
}

#[tokio::test]
async fn test_bulk_mark_read_updates_held_items() {
    let a = NotificationId::new();
    let b = NotificationId::new();
    let c = NotificationId::new();
    let mock = MockGateway::with_pages(vec![Ok(page(
        vec![item(a, false), item(b, false), item(c, true)],
        3,
        2,
        false,
    ))]);
    let store = store_over(&mock);
    store.refresh().await.expect("refresh succeeds");

    let touched = store
        .bulk_mark_read(&[a, b, c])
        .await
        .expect("bulk succeeds");

    assert_eq!(touched, 3);
    let snapshot = store.snapshot();
    assert!(snapshot.items.iter().all(|n| n.is_read));
    assert_eq!(snapshot.unread_count, 0);
    assert_eq!(mock.calls_matching("bulk_mark_read"), 1);
}

#[tokio::test]
async fn test_bulk_delete_failure_restores_everything() {
    let a = NotificationId::new();
    let b = NotificationId::new();
    let mock = MockGateway::with_pages(vec![Ok(page(
        vec![item(a, false), item(b, true)],
        2,
        1,
        false,
    ))]);
    let store = store_over(&mock);
    store.refresh().await.expect("refresh succeeds");
    mock.fail_mutations();

    store
        .bulk_delete(&[a, b])
        .await
        .expect_err("gateway fails");

    let snapshot = store.snapshot();
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.unread_count, 1);
    assert_eq!(snapshot.total, 2);
}

#[tokio::test]
async fn test_bulk_archive_respects_total_policy() {
    let a = NotificationId::new();
    let b = NotificationId::new();
    let mock = MockGateway::with_pages(vec![Ok(page(
        vec![item(a, true), item(b, true)],
        5,
        0,
        false,
    ))]);
    let store = store_over(&mock);
    store.refresh().await.expect("refresh succeeds");

    let touched = store.bulk_archive(&[a, b]).await.expect("bulk succeeds");

    assert_eq!(touched, 2);
    let snapshot = store.snapshot();
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.total, 5);
}
