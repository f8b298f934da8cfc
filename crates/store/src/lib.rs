//! In-memory application state store.
//!
//! Holds the slices of application state the region controller reads
//! (`loading`, `view`, `app`) and notifies listeners synchronously on every
//! dispatch.

pub mod state;
pub mod store;

pub use state::*;
pub use store::*;
