//! Lessons: the scheduled calendar entries a group attends.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result, calendar,
  id::{GroupId, LessonId},
};

/// Lifecycle status of a lesson.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
  #[default]
  Upcoming,
  Cancelled,
  Completed,
}

/// One scheduled lesson of a group. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LessonRecord")]
pub struct Lesson {
  pub id:     LessonId,
  pub group:  GroupId,
  pub date:   NaiveDate,
  #[serde(serialize_with = "calendar::serialize_time")]
  pub time:   NaiveTime,
  pub status: LessonStatus,
}

impl Lesson {
  pub fn new(
    id: LessonId,
    group: GroupId,
    date: NaiveDate,
    time: NaiveTime,
    status: LessonStatus,
  ) -> Self {
    Self {
      id,
      group,
      date,
      time,
      status,
    }
  }

  /// Build a lesson from the raw strings a document store hands back.
  pub fn parse(
    id: &str,
    group: &str,
    date: &str,
    time: &str,
    status: LessonStatus,
  ) -> Result<Self> {
    Ok(Self::new(
      LessonId::new(id)?,
      GroupId::new(group)?,
      calendar::parse_date(date)?,
      calendar::parse_time(time)?,
      status,
    ))
  }

  pub fn is_cancelled(&self) -> bool {
    self.status == LessonStatus::Cancelled
  }
}

/// Wire shape of a lesson before validation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LessonRecord {
  id:     String,
  group:  String,
  date:   String,
  time:   String,
  #[serde(default)]
  status: LessonStatus,
}

impl TryFrom<LessonRecord> for Lesson {
  type Error = Error;

  fn try_from(raw: LessonRecord) -> Result<Self> {
    Lesson::parse(&raw.id, &raw.group, &raw.date, &raw.time, raw.status)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lesson_deserializes_and_validates() {
    let lesson: Lesson = serde_json::from_str(
      r#"{"id":"l1","group":"g1","date":"2024-01-02","time":"18:00","status":"completed"}"#,
    )
    .unwrap();
    assert_eq!(lesson.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    assert_eq!(lesson.status, LessonStatus::Completed);
  }

  #[test]
  fn unknown_fields_are_rejected() {
    let err = serde_json::from_str::<Lesson>(
      r#"{"id":"l1","group":"g1","date":"2024-01-02","time":"18:00","room":"A"}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("unknown field"));
  }

  #[test]
  fn missing_status_means_upcoming() {
    let lesson: Lesson = serde_json::from_str(
      r#"{"id":"l1","group":"g1","date":"2024-01-02","time":"18:00"}"#,
    )
    .unwrap();
    assert_eq!(lesson.status, LessonStatus::Upcoming);
  }

  #[test]
  fn serialized_time_keeps_short_form() {
    let lesson =
      Lesson::parse("l1", "g1", "2024-01-02", "09:30", LessonStatus::Upcoming)
        .unwrap();
    let json = serde_json::to_value(&lesson).unwrap();
    assert_eq!(json["time"], "09:30");
    assert_eq!(json["date"], "2024-01-02");
  }
}
