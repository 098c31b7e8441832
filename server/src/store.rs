//! In-memory todo store.
//!
//! # Design
//! `TodoStore` owns the authoritative collection. Records live in an
//! `IndexMap` keyed by id, which gives insertion-ordered iteration plus keyed
//! lookup. Every operation takes the single `RwLock` exactly once, so each
//! call is atomic with respect to every other call on the same store.
//!
//! The store never validates input: callers are expected to reject empty
//! titles before calling `create`. Absence is reported as `None` / `false`,
//! never as an error, and the caller decides what that means externally.
//!
//! All reads hand out clones; nothing outside the lock can observe or mutate
//! a stored record.

use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::{Todo, TodoChanges};

/// Handle shared between the router and anything else that needs the store.
pub type SharedStore = Arc<TodoStore>;

#[derive(Debug, Default)]
pub struct TodoStore {
    todos: RwLock<IndexMap<String, Todo>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }

    /// Append a new record. `completed` defaults to `false`.
    pub async fn create(&self, title: String, completed: Option<bool>) -> Todo {
        let now = Utc::now();
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            title,
            completed: completed.unwrap_or(false),
            created_at: now,
            updated_at: now,
        };
        self.todos
            .write()
            .await
            .insert(todo.id.clone(), todo.clone());
        todo
    }

    /// Snapshot of every record in insertion order.
    pub async fn list(&self) -> Vec<Todo> {
        self.todos.read().await.values().cloned().collect()
    }

    pub async fn get(&self, id: &str) -> Option<Todo> {
        self.todos.read().await.get(id).cloned()
    }

    /// Overwrite the supplied fields and refresh `updated_at`.
    ///
    /// The record keeps its position in the collection. `updated_at` never
    /// moves backwards, even if the wall clock does.
    pub async fn update(&self, id: &str, changes: TodoChanges) -> Option<Todo> {
        let mut todos = self.todos.write().await;
        let todo = todos.get_mut(id)?;
        if let Some(title) = changes.title {
            todo.title = title;
        }
        if let Some(completed) = changes.completed {
            todo.completed = completed;
        }
        todo.updated_at = Utc::now().max(todo.updated_at);
        Some(todo.clone())
    }

    /// Remove a record. Returns `false` when nothing matched.
    pub async fn delete(&self, id: &str) -> bool {
        self.todos.write().await.shift_remove(id).is_some()
    }

    /// Drop every record. Not reachable over HTTP.
    pub async fn clear(&self) {
        self.todos.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn title_changes(title: &str) -> TodoChanges {
        TodoChanges {
            title: Some(title.to_string()),
            completed: None,
        }
    }

    fn completed_changes(completed: bool) -> TodoChanges {
        TodoChanges {
            title: None,
            completed: Some(completed),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_equal_timestamps() {
        let store = TodoStore::new();
        let todo = store.create("Test Todo".to_string(), Some(false)).await;

        assert!(!todo.id.is_empty());
        assert_eq!(todo.title, "Test Todo");
        assert!(!todo.completed);
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[tokio::test]
    async fn create_defaults_completed_to_false() {
        let store = TodoStore::new();
        let todo = store.create("No flag".to_string(), None).await;
        assert!(!todo.completed);

        let done = store.create("Done".to_string(), Some(true)).await;
        assert!(done.completed);
    }

    #[tokio::test]
    async fn create_does_not_validate_title() {
        let store = TodoStore::new();
        let todo = store.create(String::new(), None).await;
        assert_eq!(todo.title, "");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn created_todo_round_trips_through_get() {
        let store = TodoStore::new();
        let created = store.create("Round trip".to_string(), None).await;
        assert_eq!(store.get(&created.id).await, Some(created));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = TodoStore::new();
        store.create("Present".to_string(), None).await;
        assert!(store.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn list_is_a_snapshot() {
        let store = TodoStore::new();
        store.create("First".to_string(), None).await;
        let snapshot = store.list().await;

        store.create("Second".to_string(), None).await;
        store.clear().await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].title, "First");
    }

    #[tokio::test]
    async fn update_merges_fields_and_preserves_identity() {
        let store = TodoStore::new();
        let created = store.create("Walk dog".to_string(), None).await;

        let updated = store
            .update(&created.id, completed_changes(true))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Walk dog");
        assert!(updated.completed);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let renamed = store
            .update(&created.id, title_changes("Walk cat"))
            .await
            .unwrap();
        assert_eq!(renamed.title, "Walk cat");
        assert!(renamed.completed);
        assert!(renamed.updated_at >= updated.updated_at);
        assert_eq!(store.get(&created.id).await, Some(renamed));
    }

    #[tokio::test]
    async fn update_with_no_fields_still_refreshes_timestamp() {
        let store = TodoStore::new();
        let created = store.create("Idle".to_string(), None).await;
        let updated = store
            .update(&created.id, TodoChanges::default())
            .await
            .unwrap();
        assert_eq!(updated.title, created.title);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_keeps_position() {
        let store = TodoStore::new();
        let a = store.create("a".to_string(), None).await;
        let b = store.create("b".to_string(), None).await;
        let c = store.create("c".to_string(), None).await;

        store.update(&b.id, title_changes("b2")).await.unwrap();

        let ids: Vec<_> = store.list().await.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[tokio::test]
    async fn update_missing_leaves_store_untouched() {
        let store = TodoStore::new();
        store.create("Keep".to_string(), None).await;
        let before = store.list().await;

        assert!(store.update("missing", completed_changes(true)).await.is_none());
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn delete_removes_and_reports() {
        let store = TodoStore::new();
        let a = store.create("a".to_string(), None).await;
        let b = store.create("b".to_string(), None).await;
        let c = store.create("c".to_string(), None).await;

        assert!(store.delete(&b.id).await);
        assert!(store.get(&b.id).await.is_none());

        let ids: Vec<_> = store.list().await.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[tokio::test]
    async fn delete_missing_is_a_noop() {
        let store = TodoStore::new();
        store.create("Stay".to_string(), None).await;

        assert!(!store.delete("missing").await);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn clear_empties_the_store() {
        let store = TodoStore::new();
        store.create("a".to_string(), None).await;
        store.create("b".to_string(), None).await;

        store.clear().await;
        assert!(store.is_empty().await);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = TodoStore::new();
        let mut seen = HashSet::new();
        for i in 0..50 {
            let todo = store.create(format!("todo {i}"), None).await;
            assert!(seen.insert(todo.id.clone()));
            assert!(store.delete(&todo.id).await);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_are_all_kept() {
        let store = TodoStore::shared();
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(format!("todo {i}"), None).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.len().await, 32);
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    proptest! {
        #[test]
        fn list_preserves_creation_order(titles in prop::collection::vec("[a-z]{1,12}", 0..20)) {
            let listed = block_on(async {
                let store = TodoStore::new();
                for title in &titles {
                    store.create(title.clone(), None).await;
                }
                store.list().await
            });
            let listed_titles: Vec<_> = listed.iter().map(|t| t.title.clone()).collect();
            prop_assert_eq!(listed_titles, titles);
            let ids: HashSet<_> = listed.iter().map(|t| t.id.clone()).collect();
            prop_assert_eq!(ids.len(), listed.len());
        }

        #[test]
        fn update_never_moves_a_record(count in 1usize..12, pick in 0usize..12, completed in any::<bool>()) {
            let (before, after) = block_on(async {
                let store = TodoStore::new();
                for i in 0..count {
                    store.create(format!("todo {i}"), None).await;
                }
                let before = store.list().await;
                let target = &before[pick % count];
                store.update(&target.id, completed_changes(completed)).await.unwrap();
                (before, store.list().await)
            });
            let before_ids: Vec<_> = before.iter().map(|t| &t.id).collect();
            let after_ids: Vec<_> = after.iter().map(|t| &t.id).collect();
            prop_assert_eq!(before_ids, after_ids);
            for todo in &after {
                prop_assert!(todo.created_at <= todo.updated_at);
            }
        }
    }
}
