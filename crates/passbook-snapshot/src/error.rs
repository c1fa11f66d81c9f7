//! Error type for `passbook-snapshot`.

use passbook_core::{GroupId, LessonId, StudentId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] passbook_core::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("student not found: {0}")]
  StudentNotFound(StudentId),

  #[error("group not found: {0}")]
  GroupNotFound(GroupId),

  /// Stored data may hold at most one mark per lesson and student.
  #[error("duplicate attendance mark for lesson {lesson}, student {student}")]
  DuplicateMark { lesson: LessonId, student: StudentId },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
