//! Client-side coordination for the residence / payment-method lookup: a
//! session store, the workflow controller driving it, and the socket plumbing
//! that feeds it.

pub mod controller;
pub mod error;
pub mod runtime;
pub mod store;
pub mod transport;
pub mod view;

pub use controller::{RequestSink, WorkflowController, WorkflowPhase};
pub use error::TransportError;
pub use runtime::{apply_action, run_workflow, UserAction};
pub use store::PaymentMethodStore;
pub use transport::{connect, endpoint_url, WsSender};
pub use view::{DropdownOption, PaymentMethodRow, ViewState};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
