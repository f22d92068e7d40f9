//! # gridminer-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `StateChangeSource` — subscribe to state changes of one entity
//!   - `ServiceCaller` — invoke a service such as `number.set_value`
//!   - `OptionsStore` — load & save per-entry options
//!   - `StateWriter` — tell the host an entity's state changed
//! - Define **driving/inbound ports** as use-case structs:
//!   - `PowerAdjustment` — the grid-responsive power throttle
//!   - `PowerAutomationSwitch` — on/off switch entity for the throttle
//!   - `PowerAdjustmentRunner` — serialises events and switch commands
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `gridminer-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod services;
