//! User-facing text of the application.
//!
//! Every line printed to the console goes through a [`Message`] variant so
//! wording lives in one place ([`display`]) and the `msg_*` macros decide
//! whether it is printed or routed to `tracing`.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
