//! Opaque record identifiers.
//!
//! Records arrive from a document store whose keys are arbitrary strings.
//! Each kind of record gets its own newtype so a lesson id can never be
//! passed where a pass id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

macro_rules! record_id {
  ($(#[$doc:meta])* $name:ident, $label:literal) => {
    $(#[$doc])*
    #[derive(
      Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    )]
    #[serde(try_from = "String", into = "String")]
    pub struct $name(String);

    impl $name {
      /// Wrap a raw key. Blank keys are rejected.
      pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
          return Err(Error::EmptyId($label));
        }
        Ok(Self(raw))
      }

      pub fn as_str(&self) -> &str { &self.0 }
    }

    impl TryFrom<String> for $name {
      type Error = Error;

      fn try_from(raw: String) -> Result<Self> { Self::new(raw) }
    }

    impl From<$name> for String {
      fn from(id: $name) -> Self { id.0 }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }
  };
}

record_id!(
  /// Identity of a scheduled lesson.
  LessonId,
  "lesson"
);
record_id!(
  /// Identity of a teaching group.
  GroupId,
  "group"
);
record_id!(
  /// Identity of a student.
  StudentId,
  "student"
);
record_id!(
  /// Identity of a purchased pass.
  PassId,
  "pass"
);
record_id!(
  /// Identity of an attendance mark.
  MarkId,
  "mark"
);
