//! Subcommand definitions and their execution against a loaded snapshot.

use std::io::Write;

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use passbook_core::{
  Fingerprint, GroupId, ProRata, RecordSource, StudentId, lesson_costs,
  recompute, reconcile,
};
use passbook_snapshot::{Enrolment, Snapshot};
use serde::Serialize;
use tracing::info;

use crate::{report, settings::Format};

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Print the balance, pass usage and audit log for one student in a group
  Reconcile {
    #[command(flatten)]
    pair:   PairArgs,
    /// Output format (overrides the configured one)
    #[arg(long, value_enum)]
    format: Option<Format>,
  },
  /// Print the pro-rata cost of every audited lesson
  Revenue {
    #[command(flatten)]
    pair:   PairArgs,
    #[arg(long, value_enum)]
    format: Option<Format>,
  },
  /// Print the result fingerprint and whether it differs from a stored one
  Fingerprint {
    #[command(flatten)]
    pair:     PairArgs,
    /// Previously stored fingerprint (hex)
    #[arg(long)]
    previous: Option<String>,
  },
  /// Print one balance line for every enrolled student and group
  Summary {
    #[command(flatten)]
    day:    DayArgs,
    #[arg(long, value_enum)]
    format: Option<Format>,
  },
}

#[derive(Args, Debug)]
pub struct PairArgs {
  /// Student id
  #[arg(long, value_parser = parse_student)]
  pub student: StudentId,
  /// Group id
  #[arg(long, value_parser = parse_group)]
  pub group:   GroupId,
  #[command(flatten)]
  pub day:     DayArgs,
}

#[derive(Args, Debug)]
pub struct DayArgs {
  /// Evaluation date, YYYY-MM-DD (defaults to today)
  #[arg(long, value_parser = parse_date)]
  pub today: Option<NaiveDate>,
}

impl DayArgs {
  fn resolve(&self) -> NaiveDate {
    self
      .today
      .unwrap_or_else(|| chrono::Local::now().date_naive())
  }
}

impl PairArgs {
  fn enrolment(&self) -> Enrolment {
    Enrolment {
      student: self.student.clone(),
      group:   self.group.clone(),
    }
  }
}

fn parse_student(raw: &str) -> Result<StudentId, passbook_core::Error> {
  StudentId::new(raw)
}

fn parse_group(raw: &str) -> Result<GroupId, passbook_core::Error> {
  GroupId::new(raw)
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

#[derive(Serialize)]
struct FingerprintReport<'a> {
  fingerprint: &'a Fingerprint,
  changed:     bool,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
  #[serde(flatten)]
  pair:            &'a Enrolment,
  balance:         i64,
  lessons_owed:    u32,
  lessons_covered: u32,
  uncovered:       usize,
}

/// Execute `command`, writing the report to `out`. `default_format` comes
/// from the settings.
pub fn run(
  command: Command,
  snapshot: &Snapshot,
  default_format: Format,
  out: &mut impl Write,
) -> anyhow::Result<()> {
  match command {
    Command::Reconcile { pair, format } => {
      let today = pair.day.resolve();
      let computed = recompute(snapshot, &pair.student, &pair.group, today, None)
        .context("reconciliation failed")?;
      match format.unwrap_or(default_format) {
        Format::Json => write_json(out, &computed.reconciliation)?,
        Format::Text => report::reconciliation(
          out,
          &pair.enrolment(),
          today,
          &computed.reconciliation,
        )?,
      }
    }

    Command::Revenue { pair, format } => {
      let today = pair.day.resolve();
      let passes = snapshot
        .passes(&pair.student, &pair.group)
        .context("failed to load passes")?;
      let result = recompute(snapshot, &pair.student, &pair.group, today, None)
        .context("reconciliation failed")?
        .reconciliation;
      let revenue = lesson_costs(&result, &passes, &ProRata);
      match format.unwrap_or(default_format) {
        Format::Json => write_json(out, &revenue)?,
        Format::Text => report::revenue(out, &revenue)?,
      }
    }

    Command::Fingerprint { pair, previous } => {
      let previous = previous.map(Fingerprint::from_hex);
      let result = recompute(
        snapshot,
        &pair.student,
        &pair.group,
        pair.day.resolve(),
        previous.as_ref(),
      )
      .context("reconciliation failed")?;
      write_json(
        out,
        &FingerprintReport {
          fingerprint: &result.fingerprint,
          changed:     result.changed,
        },
      )?;
    }

    Command::Summary { day, format } => {
      let today = day.resolve();
      let pairs = snapshot.enrolments();
      info!(pairs = pairs.len(), %today, "summarising enrolments");

      // The snapshot already holds every record, so the unfiltered pass
      // list is handed straight to the engine.
      let results: Vec<_> = pairs
        .iter()
        .map(|pair| -> passbook_snapshot::Result<_> {
          let lessons = snapshot.lessons(&pair.group)?;
          let marks = snapshot.marks(&pair.student, &pair.group)?;
          let result = reconcile(
            &pair.student,
            &pair.group,
            snapshot.all_passes(),
            &lessons,
            &marks,
            today,
          );
          Ok((pair, result))
        })
        .collect::<passbook_snapshot::Result<_>>()
        .context("failed to load enrolment records")?;

      match format.unwrap_or(default_format) {
        Format::Json => {
          let rows: Vec<_> = results
            .iter()
            .map(|(pair, r)| SummaryRow {
              pair,
              balance: r.balance,
              lessons_owed: r.lessons_owed,
              lessons_covered: r.lessons_covered,
              uncovered: r.uncovered_lessons.len(),
            })
            .collect();
          write_json(out, &rows)?;
        }
        Format::Text => {
          for (pair, result) in &results {
            report::summary_line(out, pair, result)?;
          }
        }
      }
    }
  }
  Ok(())
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> anyhow::Result<()> {
  serde_json::to_writer_pretty(&mut *out, value).context("failed to write json")?;
  writeln!(out)?;
  Ok(())
}
