//! Property-based tests for the reconciliation invariants.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use crate::{
  AttendanceMark, AttendanceStatus, AuditReason, Fingerprint, GroupId, Lesson,
  LessonStatus, Pass, PassId, PassStatus, StudentId, allocation, fallback,
  reconcile, schedule,
};

const TIMES: [&str; 3] = ["09:00", "12:30", "18:00"];

fn day(offset: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(u64::from(offset))
}

fn student() -> StudentId { StudentId::new("s1").unwrap() }

fn group() -> GroupId { GroupId::new("g1").unwrap() }

fn pass_status() -> impl Strategy<Value = PassStatus> {
  prop_oneof![
    Just(PassStatus::Active),
    Just(PassStatus::Archived),
    Just(PassStatus::Unset),
  ]
}

fn lesson_status() -> impl Strategy<Value = LessonStatus> {
  prop_oneof![
    3 => Just(LessonStatus::Completed),
    1 => Just(LessonStatus::Upcoming),
    1 => Just(LessonStatus::Cancelled),
  ]
}

fn attendance() -> impl Strategy<Value = AttendanceStatus> {
  prop_oneof![
    3 => Just(AttendanceStatus::Present),
    1 => Just(AttendanceStatus::AbsenceValid),
    1 => Just(AttendanceStatus::AbsenceInvalid),
  ]
}

/// Up to three passes with small credit counts so depletion is common.
fn passes() -> impl Strategy<Value = Vec<Pass>> {
  prop::collection::vec(
    (
      0u32..6,
      0u32..40,
      prop::option::of(0u32..30),
      any::<bool>(),
      pass_status(),
    ),
    0..4,
  )
  .prop_map(|raw| {
    raw
      .into_iter()
      .enumerate()
      .map(|(i, (total, purchased, length, consecutive, status))| {
        let mut builder = Pass::builder(
          PassId::new(format!("p{i}")).unwrap(),
          student(),
          group(),
          total,
          day(purchased),
        )
        .consecutive(consecutive)
        .status(status);
        if let Some(length) = length {
          builder = builder.expires(day(purchased + length));
        }
        builder.build().unwrap()
      })
      .collect()
  })
}

/// Lessons over roughly two months, each optionally marked.
fn calendar() -> impl Strategy<Value = (Vec<Lesson>, Vec<AttendanceMark>)> {
  prop::collection::vec(
    (
      0u32..60,
      0usize..TIMES.len(),
      lesson_status(),
      prop::option::of(attendance()),
    ),
    0..12,
  )
  .prop_map(|raw| {
    let mut lessons = Vec::new();
    let mut marks = Vec::new();
    for (i, (offset, time, status, mark)) in raw.into_iter().enumerate() {
      let id = format!("l{i:02}");
      lessons.push(
        Lesson::parse(
          &id,
          "g1",
          &day(offset).format("%Y-%m-%d").to_string(),
          TIMES[time],
          status,
        )
        .unwrap(),
      );
      if let Some(mark) = mark {
        marks.push(
          AttendanceMark::parse(&format!("m{i:02}"), &id, "s1", mark).unwrap(),
        );
      }
    }
    (lessons, marks)
  })
}

fn today() -> impl Strategy<Value = NaiveDate> { (0u32..70).prop_map(day) }

fn is_paid_reason(reason: AuditReason) -> bool {
  matches!(
    reason,
    AuditReason::CountedPresent
      | AuditReason::CountedAbsenceInvalid
      | AuditReason::CountedNoAttendanceConsecutive
  )
}

proptest! {
  /// Property: a pass is never drawn beyond its credits, and its used count
  /// matches the entries it paid for.
  #[test]
  fn prop_pass_credit_is_conserved(
    passes in passes(),
    (lessons, marks) in calendar(),
    today in today(),
  ) {
    let result =
      reconcile(&student(), &group(), &passes, &lessons, &marks, today);

    for usage in &result.pass_usage {
      let paid = result
        .audit_entries
        .iter()
        .filter(|e| e.covered_by.as_ref() == Some(&usage.pass_id))
        .count() as u32;
      prop_assert_eq!(paid, usage.used);
      prop_assert!(usage.used <= usage.total);
    }
  }

  /// Property: a pass id is attached exactly to the paid reasons, and each
  /// lesson is decided at most once.
  #[test]
  fn prop_at_most_one_payer_per_lesson(
    passes in passes(),
    (lessons, marks) in calendar(),
    today in today(),
  ) {
    let result =
      reconcile(&student(), &group(), &passes, &lessons, &marks, today);

    for entry in &result.audit_entries {
      prop_assert_eq!(entry.covered_by.is_some(), is_paid_reason(entry.reason));
      prop_assert_eq!(entry.outcome, entry.reason.outcome());
    }
    let ids: BTreeSet<_> =
      result.audit_entries.iter().map(|e| &e.lesson_id).collect();
    prop_assert_eq!(ids.len(), result.audit_entries.len());
  }

  /// Property: balance = capacity - owed, and owed = covered + uncovered.
  #[test]
  fn prop_balance_reconciles(
    passes in passes(),
    (lessons, marks) in calendar(),
    today in today(),
  ) {
    let result =
      reconcile(&student(), &group(), &passes, &lessons, &marks, today);

    prop_assert_eq!(
      result.balance,
      result.total_capacity as i64 - i64::from(result.lessons_owed)
    );
    prop_assert_eq!(
      result.lessons_owed as usize,
      result.lessons_covered as usize + result.uncovered_lessons.len()
    );
    let counted =
      result.audit_entries.iter().filter(|e| e.is_counted()).count();
    prop_assert_eq!(counted, result.lessons_owed as usize);
  }

  /// Property: the order records arrive in never changes the result.
  #[test]
  fn prop_input_order_is_irrelevant(
    passes in passes(),
    (lessons, marks) in calendar(),
    today in today(),
    rotation in 0usize..12,
  ) {
    let expected =
      reconcile(&student(), &group(), &passes, &lessons, &marks, today);

    let mut passes = passes;
    let mut lessons = lessons;
    let mut marks = marks;
    passes.reverse();
    lessons.reverse();
    if !lessons.is_empty() {
      let by = rotation % lessons.len();
      lessons.rotate_left(by);
    }
    marks.reverse();

    let shuffled =
      reconcile(&student(), &group(), &passes, &lessons, &marks, today);
    prop_assert_eq!(shuffled, expected);
  }

  /// Property: with no passes, the result is the fallback path's, and the
  /// allocation loop run over zero passes agrees with it.
  #[test]
  fn prop_no_pass_equivalence(
    (lessons, marks) in calendar(),
    today in today(),
  ) {
    let result =
      reconcile(&student(), &group(), &[] as &[Pass], &lessons, &marks, today);

    let mut ordered: Vec<&Lesson> = lessons.iter().collect();
    schedule::chronological(&mut ordered);
    let index = schedule::index_marks(&marks);
    let fallback = fallback::without_passes(&ordered, &index);
    let (looped, _) = allocation::allocate(&ordered, &index, &[], today);

    prop_assert_eq!(&result.audit_entries, &fallback);
    prop_assert_eq!(&looped, &fallback);
    prop_assert_eq!(result.balance, -i64::from(result.lessons_owed));
    prop_assert_eq!(result.lessons_covered, 0);
    prop_assert!(result.pass_usage.is_empty());
  }

  /// Property: running twice over the same inputs gives identical output.
  #[test]
  fn prop_reconcile_is_idempotent(
    passes in passes(),
    (lessons, marks) in calendar(),
    today in today(),
  ) {
    let first =
      reconcile(&student(), &group(), &passes, &lessons, &marks, today);
    let second =
      reconcile(&student(), &group(), &passes, &lessons, &marks, today);
    prop_assert_eq!(Fingerprint::of(&first), Fingerprint::of(&second));
    prop_assert_eq!(first, second);
  }
}
