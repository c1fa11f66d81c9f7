//! Canonical orderings for the allocation sequence.
//!
//! Lessons are walked by (date, time); earlier lessons claim credit first.
//! Passes are charged oldest purchase first. Identifiers break exact ties so
//! the result never depends on the order records arrived in.
//!
//! Times are compared as parsed values, not as the stored strings: `18:00`
//! and `18:00:00` are the same slot, and the lesson id orders them.

use std::collections::BTreeMap;

use crate::{
  attendance::{AttendanceMark, AttendanceStatus},
  id::LessonId,
  lesson::Lesson,
  pass::Pass,
};

/// The attendance status recorded for each lesson, keyed by lesson id.
pub(crate) type MarkIndex<'a> = BTreeMap<&'a LessonId, AttendanceStatus>;

/// Index marks by lesson. Stored data should hold at most one mark per
/// lesson and student; if it does not, the mark with the smallest id wins.
pub(crate) fn index_marks<'a>(
  marks: impl IntoIterator<Item = &'a AttendanceMark>,
) -> MarkIndex<'a> {
  let mut chosen: BTreeMap<&LessonId, &AttendanceMark> = BTreeMap::new();
  for mark in marks {
    chosen
      .entry(&mark.lesson)
      .and_modify(|held| {
        if mark.id < held.id {
          *held = mark;
        }
      })
      .or_insert(mark);
  }
  chosen
    .into_iter()
    .map(|(lesson, mark)| (lesson, mark.status))
    .collect()
}

pub(crate) fn chronological(lessons: &mut [&Lesson]) {
  lessons.sort_by(|a, b| {
    (a.date, a.time, &a.id).cmp(&(b.date, b.time, &b.id))
  });
}

pub(crate) fn by_purchase(passes: &mut [&Pass]) {
  passes.sort_by(|a, b| (a.purchase_date, &a.id).cmp(&(b.purchase_date, &b.id)));
}
