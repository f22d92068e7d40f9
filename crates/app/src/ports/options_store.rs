//! Options store port — persistence of per-entry options.

use std::future::Future;

use gridminer_domain::error::GridMinerError;
use gridminer_domain::options::EntryOptions;

/// Loads and saves the options of a config entry.
pub trait OptionsStore {
    /// Load every option of `entry_id`. An unknown entry yields empty options.
    fn load(
        &self,
        entry_id: &str,
    ) -> impl Future<Output = Result<EntryOptions, GridMinerError>> + Send;

    /// Persist `options` for `entry_id`.
    ///
    /// Keys absent from `options` must be left as they are.
    fn save(
        &self,
        entry_id: &str,
        options: &EntryOptions,
    ) -> impl Future<Output = Result<(), GridMinerError>> + Send;
}

impl<T: OptionsStore + Send + Sync> OptionsStore for std::sync::Arc<T> {
    fn load(
        &self,
        entry_id: &str,
    ) -> impl Future<Output = Result<EntryOptions, GridMinerError>> + Send {
        (**self).load(entry_id)
    }

    fn save(
        &self,
        entry_id: &str,
        options: &EntryOptions,
    ) -> impl Future<Output = Result<(), GridMinerError>> + Send {
        (**self).save(entry_id, options)
    }
}
