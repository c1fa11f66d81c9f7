//! Core types and the reconciliation engine for Passbook.
//!
//! Given a student's lesson passes, a group's lesson calendar and the
//! student's attendance marks, the engine decides which pass paid for which
//! lesson, what the student owes or has prepaid, and why.
//!
//! This crate is deliberately free of storage and I/O. Every run is a full,
//! pure recomputation from in-memory inputs and an injected `today`.

pub mod attendance;
pub mod audit;
pub mod error;
pub mod fingerprint;
pub mod id;
pub mod lesson;
pub mod pass;
pub mod pricing;
pub mod reconcile;
pub mod source;

mod aggregate;
mod allocation;
mod calendar;
mod fallback;
mod schedule;
mod validity;

pub use attendance::{AttendanceMark, AttendanceStatus};
pub use audit::{AuditEntry, AuditReason, Outcome};
pub use error::{Error, Result};
pub use fingerprint::Fingerprint;
pub use id::{GroupId, LessonId, MarkId, PassId, StudentId};
pub use lesson::{Lesson, LessonStatus};
pub use pass::{Pass, PassBuilder, PassStatus};
pub use pricing::{CostModel, LessonCost, ProRata, Revenue, lesson_costs};
pub use reconcile::{PassUsage, Reconciliation, UncoveredLesson, reconcile};
pub use source::{Recomputation, RecordSource, recompute};
pub use validity::covers;

#[cfg(test)]
mod proptests;
