//! `Snapshot`: an in-memory record set loaded from one JSON document.

use std::{
  collections::{BTreeMap, BTreeSet},
  path::Path,
};

use passbook_core::{
  AttendanceMark, GroupId, Lesson, LessonId, Pass, RecordSource, StudentId,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

/// A named directory entry. Only the id matters to reconciliation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct Member<Id> {
  id:    Id,
  #[serde(default, rename = "name")]
  _name: Option<String>,
}

/// Wire shape of a snapshot document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
  #[serde(default)]
  students: Vec<Member<StudentId>>,
  #[serde(default)]
  groups:   Vec<Member<GroupId>>,
  #[serde(default)]
  lessons:  Vec<Lesson>,
  #[serde(default)]
  marks:    Vec<AttendanceMark>,
  #[serde(default)]
  passes:   Vec<Pass>,
}

/// A (student, group) pair with at least one pass or mark on record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Enrolment {
  pub student: StudentId,
  pub group:   GroupId,
}

/// Validated, read-only record set.
#[derive(Debug, Clone)]
pub struct Snapshot {
  students:     BTreeSet<StudentId>,
  groups:       BTreeSet<GroupId>,
  lessons:      Vec<Lesson>,
  marks:        Vec<AttendanceMark>,
  passes:       Vec<Pass>,
  /// Group of every known lesson.
  lesson_group: BTreeMap<LessonId, GroupId>,
}

impl Snapshot {
  /// Read and validate a snapshot file.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading snapshot");
    let raw = std::fs::read_to_string(path)?;
    Self::from_json(&raw)
  }

  /// Parse and validate a snapshot document.
  pub fn from_json(raw: &str) -> Result<Self> {
    let doc: Document = serde_json::from_str(raw)?;

    // Directory entries are optional; anything referenced is known.
    let mut students: BTreeSet<StudentId> =
      doc.students.into_iter().map(|m| m.id).collect();
    let mut groups: BTreeSet<GroupId> =
      doc.groups.into_iter().map(|m| m.id).collect();
    students.extend(doc.passes.iter().map(|p| p.student.clone()));
    students.extend(doc.marks.iter().map(|m| m.student.clone()));
    groups.extend(doc.passes.iter().map(|p| p.group.clone()));
    groups.extend(doc.lessons.iter().map(|l| l.group.clone()));

    let mut seen = BTreeSet::new();
    for mark in &doc.marks {
      if !seen.insert((&mark.lesson, &mark.student)) {
        return Err(Error::DuplicateMark {
          lesson:  mark.lesson.clone(),
          student: mark.student.clone(),
        });
      }
    }

    let lesson_group: BTreeMap<LessonId, GroupId> = doc
      .lessons
      .iter()
      .map(|l| (l.id.clone(), l.group.clone()))
      .collect();

    let dangling = doc
      .marks
      .iter()
      .filter(|m| !lesson_group.contains_key(&m.lesson))
      .count();
    if dangling > 0 {
      warn!(dangling, "marks reference unknown lessons and will be ignored");
    }

    debug!(
      students = students.len(),
      groups = groups.len(),
      lessons = doc.lessons.len(),
      marks = doc.marks.len(),
      passes = doc.passes.len(),
      "snapshot loaded"
    );

    Ok(Self {
      students,
      groups,
      lessons: doc.lessons,
      marks: doc.marks,
      passes: doc.passes,
      lesson_group,
    })
  }

  /// Every (student, group) pair with a pass, or with a mark at one of the
  /// group's lessons, in id order.
  pub fn enrolments(&self) -> Vec<Enrolment> {
    let from_passes = self.passes.iter().map(|p| Enrolment {
      student: p.student.clone(),
      group:   p.group.clone(),
    });
    let from_marks = self.marks.iter().filter_map(|m| {
      self.lesson_group.get(&m.lesson).map(|group| Enrolment {
        student: m.student.clone(),
        group:   group.clone(),
      })
    });
    from_passes
      .chain(from_marks)
      .collect::<BTreeSet<_>>()
      .into_iter()
      .collect()
  }

  /// All passes in the snapshot, unfiltered.
  pub fn all_passes(&self) -> &[Pass] { &self.passes }

  fn ensure_student(&self, student: &StudentId) -> Result<()> {
    if self.students.contains(student) {
      Ok(())
    } else {
      Err(Error::StudentNotFound(student.clone()))
    }
  }

  fn ensure_group(&self, group: &GroupId) -> Result<()> {
    if self.groups.contains(group) {
      Ok(())
    } else {
      Err(Error::GroupNotFound(group.clone()))
    }
  }
}

impl RecordSource for Snapshot {
  type Error = Error;

  fn passes(&self, student: &StudentId, group: &GroupId) -> Result<Vec<Pass>> {
    self.ensure_student(student)?;
    self.ensure_group(group)?;
    Ok(
      self
        .passes
        .iter()
        .filter(|p| p.belongs_to(student, group))
        .cloned()
        .collect(),
    )
  }

  fn lessons(&self, group: &GroupId) -> Result<Vec<Lesson>> {
    self.ensure_group(group)?;
    Ok(
      self
        .lessons
        .iter()
        .filter(|l| &l.group == group)
        .cloned()
        .collect(),
    )
  }

  fn marks(
    &self,
    student: &StudentId,
    group: &GroupId,
  ) -> Result<Vec<AttendanceMark>> {
    self.ensure_student(student)?;
    self.ensure_group(group)?;
    Ok(
      self
        .marks
        .iter()
        .filter(|m| {
          &m.student == student
            && self.lesson_group.get(&m.lesson) == Some(group)
        })
        .cloned()
        .collect(),
    )
  }
}
