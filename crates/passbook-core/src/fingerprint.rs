//! Change detection for computed reconciliations.
//!
//! A fingerprint is a SHA-256 digest over every persisted field of a
//! [`Reconciliation`], in the engine's canonical order. Two runs over the
//! same inputs yield the same fingerprint, so a caller can compare against
//! the previously stored value and skip the write when nothing moved.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
  attendance::AttendanceStatus,
  calendar,
  pass::PassStatus,
  reconcile::Reconciliation,
};

/// Lowercase hex SHA-256 digest of a reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
  pub fn of(result: &Reconciliation) -> Self {
    let mut hasher = Sha256::new();

    hasher.update(result.balance.to_le_bytes());
    hasher.update(result.total_capacity.to_le_bytes());
    hasher.update(result.lessons_owed.to_le_bytes());
    hasher.update(result.lessons_covered.to_le_bytes());

    hasher.update((result.audit_entries.len() as u64).to_le_bytes());
    for entry in &result.audit_entries {
      field(&mut hasher, entry.lesson_id.as_str());
      date(&mut hasher, entry.date);
      field(&mut hasher, &calendar::format_time(&entry.time));
      field(&mut hasher, attendance_code(entry.attendance));
      field(&mut hasher, entry.reason.code());
      field(&mut hasher, entry.covered_by.as_ref().map_or("", |p| p.as_str()));
    }

    hasher.update((result.uncovered_lessons.len() as u64).to_le_bytes());
    for lesson in &result.uncovered_lessons {
      field(&mut hasher, lesson.lesson_id.as_str());
      date(&mut hasher, lesson.date);
      field(&mut hasher, lesson.group.as_str());
    }

    hasher.update((result.pass_usage.len() as u64).to_le_bytes());
    for usage in &result.pass_usage {
      field(&mut hasher, usage.pass_id.as_str());
      hasher.update(usage.used.to_le_bytes());
      hasher.update(usage.total.to_le_bytes());
      date(&mut hasher, usage.purchase_date);
      match usage.expiry_date {
        Some(expiry) => date(&mut hasher, expiry),
        None => field(&mut hasher, ""),
      }
      hasher.update([u8::from(usage.is_consecutive)]);
      field(&mut hasher, status_code(usage.status));
    }

    Self(hex::encode(hasher.finalize()))
  }

  /// Wrap a previously stored digest.
  pub fn from_hex(hex: impl Into<String>) -> Self {
    Self(hex.into().trim().to_ascii_lowercase())
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Fingerprint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Length-prefixed so adjacent fields cannot run together.
fn field(hasher: &mut Sha256, value: &str) {
  hasher.update((value.len() as u64).to_le_bytes());
  hasher.update(value.as_bytes());
}

fn date(hasher: &mut Sha256, value: NaiveDate) {
  field(hasher, &value.format("%Y-%m-%d").to_string());
}

fn attendance_code(status: Option<AttendanceStatus>) -> &'static str {
  match status {
    None => "",
    Some(AttendanceStatus::Present) => "present",
    Some(AttendanceStatus::AbsenceValid) => "absence_valid",
    Some(AttendanceStatus::AbsenceInvalid) => "absence_invalid",
  }
}

fn status_code(status: PassStatus) -> &'static str {
  match status {
    PassStatus::Active => "active",
    PassStatus::Archived => "archived",
    PassStatus::Unset => "unset",
  }
}
