//! Plain-text rendering of reconciliation results.

use std::io::{self, Write};

use chrono::NaiveDate;
use passbook_core::{
  AttendanceStatus, Outcome, PassStatus, Reconciliation, Revenue,
};
use passbook_snapshot::Enrolment;

pub fn reconciliation(
  out: &mut impl Write,
  pair: &Enrolment,
  today: NaiveDate,
  result: &Reconciliation,
) -> io::Result<()> {
  writeln!(
    out,
    "student {}, group {}, as of {today}",
    pair.student, pair.group
  )?;
  writeln!(
    out,
    "balance: {} (capacity {}, owed {}, covered {})",
    result.balance,
    result.total_capacity,
    result.lessons_owed,
    result.lessons_covered
  )?;

  writeln!(out, "\npasses:")?;
  if result.pass_usage.is_empty() {
    writeln!(out, "  (none)")?;
  }
  for usage in &result.pass_usage {
    let window = match usage.expiry_date {
      Some(expiry) => format!("{}..{}", usage.purchase_date, expiry),
      None => format!("{}..", usage.purchase_date),
    };
    writeln!(
      out,
      "  {:<16} {:>3}/{:<3} {:<22} {:<11} {}",
      usage.pass_id.as_str(),
      usage.used,
      usage.total,
      window,
      if usage.is_consecutive { "consecutive" } else { "regular" },
      pass_status(usage.status),
    )?;
  }

  writeln!(out, "\nuncovered:")?;
  if result.uncovered_lessons.is_empty() {
    writeln!(out, "  (none)")?;
  }
  for lesson in &result.uncovered_lessons {
    writeln!(out, "  {} {}", lesson.date, lesson.lesson_id)?;
  }

  writeln!(out, "\naudit:")?;
  for entry in &result.audit_entries {
    writeln!(
      out,
      "  {} {:<5}  {:<16} {:<15} {:<11} {:<33} {}",
      entry.date,
      entry.time.format("%H:%M").to_string(),
      entry.lesson_id.as_str(),
      attendance(entry.attendance),
      outcome(entry.outcome),
      entry.reason.code(),
      entry.covered_by.as_ref().map_or("-", |p| p.as_str()),
    )?;
  }
  Ok(())
}

pub fn revenue(out: &mut impl Write, revenue: &Revenue) -> io::Result<()> {
  for lesson in &revenue.lessons {
    writeln!(
      out,
      "  {:<16} {:<16} {:>10}",
      lesson.lesson_id.as_str(),
      lesson.pass_id.as_ref().map_or("-", |p| p.as_str()),
      lesson.cost
    )?;
  }
  writeln!(out, "total: {}", revenue.total)
}

pub fn summary_line(
  out: &mut impl Write,
  pair: &Enrolment,
  result: &Reconciliation,
) -> io::Result<()> {
  writeln!(
    out,
    "{:<16} {:<16} balance {:>4}  owed {:>3}  uncovered {:>3}",
    pair.student.as_str(),
    pair.group.as_str(),
    result.balance,
    result.lessons_owed,
    result.uncovered_lessons.len()
  )
}

fn attendance(status: Option<AttendanceStatus>) -> &'static str {
  match status {
    None => "-",
    Some(AttendanceStatus::Present) => "present",
    Some(AttendanceStatus::AbsenceValid) => "absence_valid",
    Some(AttendanceStatus::AbsenceInvalid) => "absence_invalid",
  }
}

fn outcome(outcome: Outcome) -> &'static str {
  match outcome {
    Outcome::Counted => "counted",
    Outcome::NotCounted => "not_counted",
  }
}

fn pass_status(status: PassStatus) -> &'static str {
  match status {
    PassStatus::Active => "active",
    PassStatus::Archived => "archived",
    PassStatus::Unset => "-",
  }
}
