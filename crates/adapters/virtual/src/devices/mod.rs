//! Simulated devices.

mod grid_meter;
mod power_limit;

pub use grid_meter::VirtualGridMeter;
pub use power_limit::VirtualPowerLimit;

use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
