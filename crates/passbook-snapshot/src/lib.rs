//! Read-only JSON snapshot backend for the Passbook engine.
//!
//! A snapshot is a single exported document holding every student, group,
//! lesson, attendance mark and pass. [`Snapshot`] validates it once on load
//! and then serves narrowed record sets through
//! [`passbook_core::RecordSource`].

mod snapshot;

pub mod error;

pub use error::{Error, Result};
pub use snapshot::{Enrolment, Snapshot};
