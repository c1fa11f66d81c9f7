//! Credit allocation loop.
//!
//! Walks lessons in chronological order and decides, for each one, whether a
//! pass pays for it, whether it becomes debt, or whether it is excluded. The
//! per-pass counters live in [`AllocationState`], which is owned by a single
//! call and only leaves this module folded into usage rows.

use chrono::NaiveDate;
use tracing::trace;

use crate::{
  attendance::AttendanceStatus,
  audit::{AuditEntry, AuditReason},
  lesson::Lesson,
  pass::Pass,
  schedule::MarkIndex,
  validity::covers,
};

/// Counters for one pass. `used + remaining == pass.lessons_total` always.
#[derive(Debug, Clone)]
pub(crate) struct Slot<'a> {
  pub(crate) pass:      &'a Pass,
  pub(crate) used:      u32,
  pub(crate) remaining: u32,
}

impl Slot<'_> {
  fn charge(&mut self) {
    debug_assert!(self.remaining > 0, "charged an exhausted pass");
    self.remaining -= 1;
    self.used += 1;
    debug_assert_eq!(self.used + self.remaining, self.pass.lessons_total);
  }
}

/// Remaining capacity and used count for every pass, in purchase order.
#[derive(Debug, Clone)]
pub(crate) struct AllocationState<'a> {
  slots: Vec<Slot<'a>>,
}

impl<'a> AllocationState<'a> {
  /// `passes` must already be in purchase order.
  pub(crate) fn seed(passes: &[&'a Pass]) -> Self {
    let slots = passes
      .iter()
      .map(|&pass| Slot {
        pass,
        used: 0,
        remaining: pass.lessons_total,
      })
      .collect();
    Self { slots }
  }

  pub(crate) fn slots(&self) -> &[Slot<'a>] { &self.slots }

  fn consecutive_covers(&self, date: NaiveDate, today: NaiveDate) -> bool {
    self
      .slots
      .iter()
      .any(|slot| slot.pass.is_consecutive && covers(slot.pass, date, today))
  }
}

/// How a spending lesson asks to be paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spend {
  /// Unmarked past lesson inside a consecutive window.
  Auto,
  Present,
  InvalidSkip,
}

impl Spend {
  fn is_present(self) -> bool { matches!(self, Self::Auto | Self::Present) }

  /// Auto-consumed lessons and unexcused absences may only be charged to a
  /// consecutive pass.
  fn consecutive_only(self) -> bool {
    matches!(self, Self::Auto | Self::InvalidSkip)
  }

  fn paid_reason(self) -> AuditReason {
    match self {
      Self::Auto => AuditReason::CountedNoAttendanceConsecutive,
      Self::Present => AuditReason::CountedPresent,
      Self::InvalidSkip => AuditReason::CountedAbsenceInvalid,
    }
  }
}

/// Run the allocation loop over `lessons` (already in chronological order)
/// against `passes` (already in purchase order).
pub(crate) fn allocate<'a>(
  lessons: &[&Lesson],
  marks: &MarkIndex<'_>,
  passes: &[&'a Pass],
  today: NaiveDate,
) -> (Vec<AuditEntry>, AllocationState<'a>) {
  let mut state = AllocationState::seed(passes);
  let mut entries = Vec::new();

  for lesson in lessons {
    let attendance = marks.get(&lesson.id).copied();
    let Some(entry) = decide(lesson, attendance, &mut state, today) else {
      continue;
    };
    trace!(
      lesson = %entry.lesson_id,
      date = %entry.date,
      reason = entry.reason.code(),
      pass = entry.covered_by.as_ref().map(|p| p.as_str()),
      "allocation decision"
    );
    entries.push(entry);
  }

  (entries, state)
}

fn decide(
  lesson: &Lesson,
  attendance: Option<AttendanceStatus>,
  state: &mut AllocationState<'_>,
  today: NaiveDate,
) -> Option<AuditEntry> {
  let auto_consume = attendance.is_none()
    && lesson.date < today
    && state.consecutive_covers(lesson.date, today);
  if attendance.is_none() && !auto_consume {
    // Unmarked lessons outside a consecutive window are invisible.
    return None;
  }

  let entry = |reason| AuditEntry::new(lesson, attendance, reason);

  if lesson.is_cancelled() {
    return Some(entry(AuditReason::NotCountedCancelled));
  }

  let spend = match attendance {
    None => Spend::Auto,
    Some(AttendanceStatus::Present) => Spend::Present,
    Some(AttendanceStatus::AbsenceInvalid) => Spend::InvalidSkip,
    Some(AttendanceStatus::AbsenceValid) => {
      return Some(entry(AuditReason::NotCountedValidSkip));
    }
  };

  let mut any_candidate = false;
  let mut consecutive_candidate = false;
  for slot in state.slots.iter_mut() {
    if !covers(slot.pass, lesson.date, today) {
      continue;
    }
    any_candidate = true;
    if slot.pass.is_consecutive {
      consecutive_candidate = true;
    } else if spend.consecutive_only() {
      continue;
    }
    if slot.remaining == 0 {
      continue;
    }

    slot.charge();
    return Some(entry(spend.paid_reason()).paid_by(&slot.pass.id));
  }

  let reason = if spend.is_present() || consecutive_candidate {
    if any_candidate {
      AuditReason::UncoveredPassDepleted
    } else {
      AuditReason::UncoveredNoMatchingPass
    }
  } else {
    AuditReason::NotCountedNoAttendance
  };
  Some(entry(reason))
}
