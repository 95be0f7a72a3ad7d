use crate::models::NetworkStatus;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

/// Callback invoked whenever the bridge reports a connectivity change.
pub type StatusListener = Box<dyn Fn(&NetworkStatus) + Send + 'static>;

/// Capability boundary to the host platform.
///
/// The simulators only ever see the native flag and the last connectivity
/// snapshot; everything behind this trait is outside the simulation core.
pub trait PlatformBridge: Send + Sync {
    /// Whether bridged device APIs are available (mobile runtime) as opposed
    /// to the web/desktop fallback path.
    fn is_native(&self) -> bool;

    /// Last known connectivity snapshot.
    fn network_status(&self) -> NetworkStatus;

    /// Register a connectivity-change listener. The returned guard
    /// unregisters the listener when dropped.
    fn subscribe(&self, listener: StatusListener) -> StatusSubscription;
}

struct BridgeInner {
    native: bool,
    status: NetworkStatus,
    listeners: HashMap<u64, StatusListener>,
    next_listener_id: u64,
}

/// Desktop stand-in for the mobile platform bridge.
///
/// The native flag and the connectivity snapshot are both settable so the
/// settings screen can flip them at runtime; every snapshot change is fanned
/// out to the registered listeners.
pub struct DesktopBridge {
    inner: Arc<Mutex<BridgeInner>>,
}

impl DesktopBridge {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BridgeInner {
                native: false,
                status: NetworkStatus {
                    connected: true,
                    connection_type: "wifi".to_string(),
                    ssid: Some("HomeNet".to_string()),
                    ip_address: Some("192.168.1.100".to_string()),
                },
                listeners: HashMap::new(),
                next_listener_id: 0,
            })),
        }
    }

    pub fn set_native(&self, native: bool) {
        self.inner.lock().unwrap().native = native;
    }

    /// Replace the snapshot and notify every registered listener.
    pub fn set_status(&self, status: NetworkStatus) {
        let mut inner = self.inner.lock().unwrap();
        inner.status = status.clone();
        for listener in inner.listeners.values() {
            listener(&status);
        }
    }
}

impl Default for DesktopBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for DesktopBridge {
    fn is_native(&self) -> bool {
        self.inner.lock().unwrap().native
    }

    fn network_status(&self) -> NetworkStatus {
        self.inner.lock().unwrap().status.clone()
    }

    fn subscribe(&self, listener: StatusListener) -> StatusSubscription {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.insert(id, listener);
        StatusSubscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }
}

/// Guard for one registered connectivity listener.
///
/// Dropping the guard removes the listener, so a screen that subscribes on
/// mount releases its registration on teardown.
pub struct StatusSubscription {
    id: u64,
    inner: Weak<Mutex<BridgeInner>>,
}

impl Drop for StatusSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().listeners.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn disconnected() -> NetworkStatus {
        NetworkStatus {
            connected: false,
            connection_type: "none".to_string(),
            ssid: None,
            ip_address: None,
        }
    }

    #[test]
    fn listeners_observe_status_changes() {
        let bridge = DesktopBridge::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = bridge.subscribe(Box::new(move |status| {
            sink.lock().unwrap().push(status.clone());
        }));

        bridge.set_status(disconnected());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(!seen[0].connected);
        assert_eq!(bridge.network_status(), disconnected());
    }

    #[test]
    fn dropping_the_subscription_unregisters_the_listener() {
        let bridge = DesktopBridge::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sub = bridge.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        bridge.set_status(disconnected());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        drop(sub);
        bridge.set_status(disconnected());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn native_flag_round_trips() {
        let bridge = DesktopBridge::new();
        assert!(!bridge.is_native());
        bridge.set_native(true);
        assert!(bridge.is_native());
    }
}
