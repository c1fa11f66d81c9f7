//! The `RecordSource` trait and the recompute workflow built on it.
//!
//! Record access lives outside the engine. A source narrows stored records to
//! one (student, group) pair and reports its own errors (unknown student,
//! unknown group, unreadable data) before the engine ever runs.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
  attendance::AttendanceMark,
  fingerprint::Fingerprint,
  id::{GroupId, StudentId},
  lesson::Lesson,
  pass::Pass,
  reconcile::{Reconciliation, reconcile},
};

/// Read access to the records the engine consumes.
pub trait RecordSource {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Passes `student` holds in `group`.
  fn passes(
    &self,
    student: &StudentId,
    group: &GroupId,
  ) -> Result<Vec<Pass>, Self::Error>;

  /// Every lesson scheduled for `group`.
  fn lessons(&self, group: &GroupId) -> Result<Vec<Lesson>, Self::Error>;

  /// Marks recorded for `student` at lessons of `group`.
  fn marks(
    &self,
    student: &StudentId,
    group: &GroupId,
  ) -> Result<Vec<AttendanceMark>, Self::Error>;
}

/// A fresh reconciliation together with its change status.
#[derive(Debug, Clone, Serialize)]
pub struct Recomputation {
  pub reconciliation: Reconciliation,
  pub fingerprint:    Fingerprint,
  /// False when `fingerprint` equals the previously stored one, in which
  /// case the caller has nothing to write.
  pub changed:        bool,
}

/// Load one (student, group) pair from `source`, reconcile it, and compare
/// the result against `previous`.
///
/// Callers must not run two recomputations for the same pair concurrently.
pub fn recompute<S: RecordSource>(
  source: &S,
  student: &StudentId,
  group: &GroupId,
  today: NaiveDate,
  previous: Option<&Fingerprint>,
) -> Result<Recomputation, S::Error> {
  let passes = source.passes(student, group)?;
  let lessons = source.lessons(group)?;
  let marks = source.marks(student, group)?;
  debug!(
    %student,
    %group,
    passes = passes.len(),
    lessons = lessons.len(),
    marks = marks.len(),
    "loaded records"
  );

  let reconciliation =
    reconcile(student, group, &passes, &lessons, &marks, today);
  let fingerprint = Fingerprint::of(&reconciliation);
  let changed = previous != Some(&fingerprint);

  if changed {
    info!(%student, %group, %fingerprint, "reconciliation changed");
  } else {
    debug!(%student, %group, "reconciliation unchanged");
  }

  Ok(Recomputation {
    reconciliation,
    fingerprint,
    changed,
  })
}
