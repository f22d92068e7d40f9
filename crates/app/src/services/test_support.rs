//! In-memory port fakes shared by the service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;

use gridminer_domain::error::GridMinerError;
use gridminer_domain::options::EntryOptions;
use gridminer_domain::service::ServiceCall;

use crate::ports::{OptionsStore, ServiceCaller};

/// Options kept in a map; can be told to fail every operation.
#[derive(Default)]
pub struct InMemoryOptionsStore {
    entries: Mutex<HashMap<String, EntryOptions>>,
    failing: AtomicBool,
}

impl InMemoryOptionsStore {
    pub fn with(entry_id: &str, options: EntryOptions) -> Self {
        let store = Self::default();
        store
            .entries
            .lock()
            .unwrap()
            .insert(entry_id.to_string(), options);
        store
    }

    pub fn get(&self, entry_id: &str) -> EntryOptions {
        self.entries
            .lock()
            .unwrap()
            .get(entry_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), GridMinerError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(GridMinerError::Storage(Box::new(std::io::Error::other(
                "disk unavailable",
            ))))
        } else {
            Ok(())
        }
    }
}

impl OptionsStore for InMemoryOptionsStore {
    fn load(
        &self,
        entry_id: &str,
    ) -> impl Future<Output = Result<EntryOptions, GridMinerError>> + Send {
        let result = self.check().map(|()| self.get(entry_id));
        async { result }
    }

    fn save(
        &self,
        entry_id: &str,
        options: &EntryOptions,
    ) -> impl Future<Output = Result<(), GridMinerError>> + Send {
        let result = self.check().map(|()| {
            let mut entries = self.entries.lock().unwrap();
            let stored = entries.entry(entry_id.to_string()).or_default();
            for (key, value) in options.iter() {
                stored.insert(key.clone(), value.clone());
            }
        });
        async { result }
    }
}

/// Records every service call and forwards it on a channel.
pub struct RecordingCaller {
    calls: Mutex<Vec<ServiceCall>>,
    notify: Option<mpsc::UnboundedSender<ServiceCall>>,
    failing: AtomicBool,
}

impl Default for RecordingCaller {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            notify: None,
            failing: AtomicBool::new(false),
        }
    }
}

impl RecordingCaller {
    pub fn notifying() -> (Self, mpsc::UnboundedReceiver<ServiceCall>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let caller = Self {
            notify: Some(tx),
            ..Self::default()
        };
        (caller, rx)
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The `value` of every recorded call, in order.
    pub fn values(&self) -> Vec<f64> {
        self.calls()
            .iter()
            .filter_map(ServiceCall::value)
            .collect()
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

impl ServiceCaller for RecordingCaller {
    fn call_service(
        &self,
        call: ServiceCall,
    ) -> impl Future<Output = Result<(), GridMinerError>> + Send {
        let result = if self.failing.load(Ordering::SeqCst) {
            Err(GridMinerError::Service(Box::new(std::io::Error::other(
                "miner unreachable",
            ))))
        } else {
            self.calls.lock().unwrap().push(call.clone());
            if let Some(tx) = &self.notify {
                let _ = tx.send(call);
            }
            Ok(())
        };
        async { result }
    }
}
