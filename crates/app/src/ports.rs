//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod event_bus;
pub mod options_store;
pub mod service_caller;
pub mod state_writer;

pub use event_bus::{EntitySubscription, EventPublisher, StateChangeSource};
pub use options_store::OptionsStore;
pub use service_caller::ServiceCaller;
pub use state_writer::StateWriter;
