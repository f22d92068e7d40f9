//! # gridminer-domain
//!
//! Pure domain model for the gridminer power throttle.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **Entities** by id and raw state (`sensor.*`, `number.*`, `switch.*`)
//! - Define **Events** (state-change records delivered by the host)
//! - Define **Service calls** (commands such as `number.set_value`)
//! - Define **Entry options** (persisted per-instance settings)
//! - Define the **power adjustment** configuration and its hysteresis regulator
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod entity;
pub mod event;
pub mod options;
pub mod power_adjustment;
pub mod service;
