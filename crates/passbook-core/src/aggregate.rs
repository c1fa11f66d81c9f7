//! Folds audit entries and allocation counters into the final figures.

use crate::{
  allocation::Slot,
  audit::{AuditEntry, AuditReason},
  id::GroupId,
  reconcile::{PassUsage, Reconciliation, UncoveredLesson},
};

/// `slots` is empty when the student holds no passes in the group.
pub(crate) fn summarize(
  group: &GroupId,
  audit_entries: Vec<AuditEntry>,
  slots: &[Slot<'_>],
) -> Reconciliation {
  let mut lessons_owed = 0u32;
  let mut lessons_covered = 0u32;
  let mut uncovered_lessons = Vec::new();

  for entry in &audit_entries {
    match entry.reason {
      AuditReason::CountedPresent
      | AuditReason::CountedAbsenceInvalid
      | AuditReason::CountedNoAttendanceConsecutive => {
        debug_assert!(entry.covered_by.is_some());
        lessons_owed += 1;
        lessons_covered += 1;
      }
      AuditReason::UncoveredPassDepleted
      | AuditReason::UncoveredNoMatchingPass => {
        lessons_owed += 1;
        uncovered_lessons.push(UncoveredLesson {
          lesson_id: entry.lesson_id.clone(),
          date:      entry.date,
          group:     group.clone(),
        });
      }
      AuditReason::NotCountedCancelled
      | AuditReason::NotCountedValidSkip
      | AuditReason::NotCountedNoAttendance => {}
    }
  }

  // Archived passes that were actually drawn on still count towards the
  // historical balance.
  let total_capacity: u64 = slots
    .iter()
    .filter(|slot| slot.pass.is_open() || slot.used > 0)
    .map(|slot| u64::from(slot.pass.lessons_total))
    .sum();

  let balance = total_capacity as i64 - i64::from(lessons_owed);

  let pass_usage = slots
    .iter()
    .map(|slot| PassUsage {
      pass_id:        slot.pass.id.clone(),
      used:           slot.used,
      total:          slot.pass.lessons_total,
      purchase_date:  slot.pass.purchase_date,
      expiry_date:    slot.pass.expiry_date,
      is_consecutive: slot.pass.is_consecutive,
      status:         slot.pass.status,
    })
    .collect();

  Reconciliation {
    balance,
    total_capacity,
    lessons_owed,
    lessons_covered,
    uncovered_lessons,
    audit_entries,
    pass_usage,
  }
}
