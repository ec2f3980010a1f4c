//! Toast Notifications
//!
//! A store of on-screen notifications with explicit subscribe/unsubscribe.
//! There is no process-wide registry: the UI root creates one
//! [`ToastHandle`], hands it down through context, and every component that
//! renders toasts subscribes on mount and unsubscribes on cleanup.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// How long a toast stays up before the UI dismisses it
pub const AUTO_DISMISS_MS: u64 = 5_000;

/// Identifier of a toast, unique within its store
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToastId(u64);

impl std::fmt::Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier returned by [`ToastStore::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// A single notification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub variant: ToastVariant,
}

type Listener = Box<dyn Fn(&[Toast]) + Send + Sync>;

/// Active toasts plus the listeners watching them
#[derive(Default)]
pub struct ToastStore {
    toasts: Vec<Toast>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_toast: u64,
    next_subscription: u64,
}

impl ToastStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast and notify listeners
    pub fn push(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
        variant: ToastVariant,
    ) -> ToastId {
        self.next_toast += 1;
        let id = ToastId(self.next_toast);
        self.toasts.push(Toast {
            id,
            title: title.into(),
            description,
            variant,
        });
        self.notify();
        id
    }

    /// Remove a toast. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        let removed = self.toasts.len() != before;
        if removed {
            self.notify();
        }
        removed
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Register a listener; it is called immediately with the current list.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&[Toast]) + Send + Sync + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        listener(&self.toasts);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.toasts);
        }
    }
}

impl std::fmt::Debug for ToastStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastStore")
            .field("toasts", &self.toasts)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Shared, cloneable handle to one store
///
/// Listeners run while the store is locked and must not call back into the handle.
#[derive(Clone, Debug, Default)]
pub struct ToastHandle {
    inner: Arc<Mutex<ToastStore>>,
}

impl ToastHandle {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ToastStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn show(&self, title: impl Into<String>, description: Option<String>) -> ToastId {
        self.lock().push(title, description, ToastVariant::Default)
    }

    pub fn error(&self, title: impl Into<String>, description: Option<String>) -> ToastId {
        self.lock().push(title, description, ToastVariant::Destructive)
    }

    pub fn dismiss(&self, id: ToastId) -> bool {
        self.lock().dismiss(id)
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.lock().toasts().to_vec()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&[Toast]) + Send + Sync + 'static,
    {
        self.lock().subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_push_and_dismiss() {
        let mut store = ToastStore::new();
        let first = store.push("Saved", None, ToastVariant::Default);
        let second = store.push("Failed", Some("try again".into()), ToastVariant::Destructive);

        assert_ne!(first, second);
        assert_eq!(store.toasts().len(), 2);
        assert!(store.dismiss(first));
        assert!(!store.dismiss(first));
        assert_eq!(store.toasts()[0].id, second);
    }

    #[test]
    fn test_listener_lifecycle() {
        let seen = Arc::new(AtomicUsize::new(0));
        let handle = ToastHandle::new();

        let counter = seen.clone();
        let sub = handle.subscribe(move |toasts| {
            counter.store(toasts.len(), Ordering::SeqCst);
        });

        handle.show("One", None);
        handle.show("Two", None);
        assert_eq!(seen.load(Ordering::SeqCst), 2);

        assert!(handle.unsubscribe(sub));
        handle.show("Three", None);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(handle.toasts().len(), 3);
    }

    #[test]
    fn test_handles_are_independent() {
        let a = ToastHandle::new();
        let b = ToastHandle::new();
        a.show("only in a", None);
        assert!(b.toasts().is_empty());
    }

    #[test]
    fn test_clone_shares_store() {
        let a = ToastHandle::new();
        let b = a.clone();
        let id = a.error("Oops", None);
        assert!(b.dismiss(id));
        assert!(a.toasts().is_empty());
    }
}
