//! Reconciliation for a student holding no passes in the group.
//!
//! Without a pass nothing can be paid for and nothing is auto-consumed: only
//! marked lessons are visited, and every attended lesson is debt.

use crate::{
  attendance::AttendanceStatus,
  audit::{AuditEntry, AuditReason},
  lesson::Lesson,
  schedule::MarkIndex,
};

/// `lessons` must already be in chronological order.
pub(crate) fn without_passes(
  lessons: &[&Lesson],
  marks: &MarkIndex<'_>,
) -> Vec<AuditEntry> {
  lessons
    .iter()
    .filter_map(|lesson| {
      let status = marks.get(&lesson.id).copied()?;
      let reason = if lesson.is_cancelled() {
        AuditReason::NotCountedCancelled
      } else {
        match status {
          AttendanceStatus::AbsenceValid => AuditReason::NotCountedValidSkip,
          AttendanceStatus::Present => AuditReason::UncoveredNoMatchingPass,
          // Nothing to charge an unexcused absence to.
          AttendanceStatus::AbsenceInvalid => {
            AuditReason::NotCountedNoAttendance
          }
        }
      };
      Some(AuditEntry::new(lesson, Some(status), reason))
    })
    .collect()
}
