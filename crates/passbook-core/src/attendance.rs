//! Attendance marks recorded by a teacher for one student at one lesson.
//!
//! A missing mark means "no data", never "absent".

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  id::{LessonId, MarkId, StudentId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
  Present,
  /// Excused absence; never consumes a credit.
  AbsenceValid,
  /// Unexcused absence; only a consecutive pass is charged for it.
  AbsenceInvalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MarkRecord")]
pub struct AttendanceMark {
  pub id:      MarkId,
  pub lesson:  LessonId,
  pub student: StudentId,
  pub status:  AttendanceStatus,
}

impl AttendanceMark {
  pub fn new(
    id: MarkId,
    lesson: LessonId,
    student: StudentId,
    status: AttendanceStatus,
  ) -> Self {
    Self {
      id,
      lesson,
      student,
      status,
    }
  }

  pub fn parse(
    id: &str,
    lesson: &str,
    student: &str,
    status: AttendanceStatus,
  ) -> Result<Self> {
    Ok(Self::new(
      MarkId::new(id)?,
      LessonId::new(lesson)?,
      StudentId::new(student)?,
      status,
    ))
  }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MarkRecord {
  id:      String,
  lesson:  String,
  student: String,
  status:  AttendanceStatus,
}

impl TryFrom<MarkRecord> for AttendanceMark {
  type Error = Error;

  fn try_from(raw: MarkRecord) -> Result<Self> {
    AttendanceMark::parse(&raw.id, &raw.lesson, &raw.student, raw.status)
  }
}
