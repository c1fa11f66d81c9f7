//! The reconciliation entry point and its result types.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::{
  aggregate, allocation,
  attendance::AttendanceMark,
  audit::AuditEntry,
  fallback,
  id::{GroupId, LessonId, PassId, StudentId},
  lesson::Lesson,
  pass::{Pass, PassStatus},
  schedule,
};

/// A lesson charged to the student with no pass to pay for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UncoveredLesson {
  pub lesson_id: LessonId,
  pub date:      NaiveDate,
  pub group:     GroupId,
}

/// How much of one pass has been drawn down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassUsage {
  pub pass_id:        PassId,
  pub used:           u32,
  pub total:          u32,
  pub purchase_date:  NaiveDate,
  pub expiry_date:    Option<NaiveDate>,
  pub is_consecutive: bool,
  pub status:         PassStatus,
}

/// The outcome of reconciling one student in one group.
///
/// `balance` is negative when the student owes lessons and positive when
/// lessons are prepaid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
  pub balance:           i64,
  /// Credits of every open pass plus every archived pass that was drawn on.
  pub total_capacity:    u64,
  /// Entries with a `counted` outcome, paid or not.
  pub lessons_owed:      u32,
  /// Entries paid for by a pass.
  pub lessons_covered:   u32,
  pub uncovered_lessons: Vec<UncoveredLesson>,
  pub audit_entries:     Vec<AuditEntry>,
  /// One row per pass the student holds in the group, oldest first.
  pub pass_usage:        Vec<PassUsage>,
}

/// Reconcile `student`'s standing in `group` as of `today`.
///
/// The inputs may be supersets: passes of other students or groups, lessons
/// of other groups and marks of other students are ignored. Marks for
/// lessons not in `lessons` are never visited. Input order does not matter.
pub fn reconcile<'a>(
  student: &StudentId,
  group: &GroupId,
  passes: impl IntoIterator<Item = &'a Pass>,
  lessons: impl IntoIterator<Item = &'a Lesson>,
  marks: impl IntoIterator<Item = &'a AttendanceMark>,
  today: NaiveDate,
) -> Reconciliation {
  let mut passes: Vec<&Pass> = passes
    .into_iter()
    .filter(|pass| pass.belongs_to(student, group))
    .collect();
  schedule::by_purchase(&mut passes);

  let mut lessons: Vec<&Lesson> = lessons
    .into_iter()
    .filter(|lesson| &lesson.group == group)
    .collect();
  schedule::chronological(&mut lessons);

  let marks =
    schedule::index_marks(marks.into_iter().filter(|m| &m.student == student));

  let result = if passes.is_empty() {
    let entries = fallback::without_passes(&lessons, &marks);
    aggregate::summarize(group, entries, &[])
  } else {
    let (entries, state) =
      allocation::allocate(&lessons, &marks, &passes, today);
    aggregate::summarize(group, entries, state.slots())
  };

  debug!(
    %student,
    %group,
    %today,
    passes = passes.len(),
    lessons = lessons.len(),
    balance = result.balance,
    owed = result.lessons_owed,
    covered = result.lessons_covered,
    "reconciled"
  );
  result
}
