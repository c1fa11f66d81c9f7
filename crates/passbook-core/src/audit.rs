//! The audit trail: one immutable entry per lesson decision.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{
  attendance::AttendanceStatus,
  calendar,
  id::{LessonId, PassId},
  lesson::Lesson,
};

/// Whether a lesson was charged to the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
  Counted,
  NotCounted,
}

/// Why a lesson was (or was not) charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditReason {
  /// Marked present and paid by a pass.
  CountedPresent,
  /// Unexcused absence paid by a consecutive pass.
  CountedAbsenceInvalid,
  /// Unmarked past lesson paid by a consecutive pass.
  CountedNoAttendanceConsecutive,
  /// Charged as debt: a pass covered the date but had no credit left.
  UncoveredPassDepleted,
  /// Charged as debt: no pass covered the date.
  UncoveredNoMatchingPass,
  NotCountedCancelled,
  NotCountedValidSkip,
  NotCountedNoAttendance,
}

impl AuditReason {
  pub fn outcome(self) -> Outcome {
    match self {
      Self::CountedPresent
      | Self::CountedAbsenceInvalid
      | Self::CountedNoAttendanceConsecutive
      | Self::UncoveredPassDepleted
      | Self::UncoveredNoMatchingPass => Outcome::Counted,
      Self::NotCountedCancelled
      | Self::NotCountedValidSkip
      | Self::NotCountedNoAttendance => Outcome::NotCounted,
    }
  }

  /// True for the reasons that create debt instead of consuming credit.
  pub fn is_uncovered(self) -> bool {
    matches!(
      self,
      Self::UncoveredPassDepleted | Self::UncoveredNoMatchingPass
    )
  }

  /// The stable snake_case code used in stored audit logs.
  pub fn code(self) -> &'static str {
    match self {
      Self::CountedPresent => "counted_present",
      Self::CountedAbsenceInvalid => "counted_absence_invalid",
      Self::CountedNoAttendanceConsecutive => {
        "counted_no_attendance_consecutive"
      }
      Self::UncoveredPassDepleted => "uncovered_pass_depleted",
      Self::UncoveredNoMatchingPass => "uncovered_no_matching_pass",
      Self::NotCountedCancelled => "not_counted_cancelled",
      Self::NotCountedValidSkip => "not_counted_valid_skip",
      Self::NotCountedNoAttendance => "not_counted_no_attendance",
    }
  }
}

/// One decision about one lesson. `covered_by` is set only when a pass paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
  pub lesson_id:  LessonId,
  pub date:       NaiveDate,
  #[serde(serialize_with = "calendar::serialize_time")]
  pub time:       NaiveTime,
  pub attendance: Option<AttendanceStatus>,
  pub outcome:    Outcome,
  pub reason:     AuditReason,
  pub covered_by: Option<PassId>,
}

impl AuditEntry {
  pub(crate) fn new(
    lesson: &Lesson,
    attendance: Option<AttendanceStatus>,
    reason: AuditReason,
  ) -> Self {
    Self {
      lesson_id: lesson.id.clone(),
      date: lesson.date,
      time: lesson.time,
      attendance,
      outcome: reason.outcome(),
      reason,
      covered_by: None,
    }
  }

  pub(crate) fn paid_by(mut self, pass: &PassId) -> Self {
    self.covered_by = Some(pass.clone());
    self
  }

  pub fn is_counted(&self) -> bool { self.outcome == Outcome::Counted }

  /// Counted, but no pass paid: the lesson is debt.
  pub fn is_uncovered(&self) -> bool { self.reason.is_uncovered() }
}
