//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod automation_switch;
pub mod power_adjustment;
pub mod runner;

#[cfg(test)]
pub(crate) mod test_support;
