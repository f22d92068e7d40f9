//! Service caller port — invoke a service on a device control.

use std::future::Future;

use gridminer_domain::error::GridMinerError;
use gridminer_domain::service::ServiceCall;

/// Invokes host services (e.g. `number.set_value`).
pub trait ServiceCaller {
    /// Run `call`; when `call.blocking` is set, resolve only once the target
    /// acknowledged it.
    fn call_service(
        &self,
        call: ServiceCall,
    ) -> impl Future<Output = Result<(), GridMinerError>> + Send;
}

impl<T: ServiceCaller + Send + Sync> ServiceCaller for std::sync::Arc<T> {
    fn call_service(
        &self,
        call: ServiceCall,
    ) -> impl Future<Output = Result<(), GridMinerError>> + Send {
        (**self).call_service(call)
    }
}
