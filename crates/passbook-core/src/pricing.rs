//! The seam for downstream revenue recalculation.
//!
//! A [`CostModel`] assigns a monetary cost to each audit entry. Only entries
//! paid for by a pass ever carry a cost; debt and excluded lessons cost 0.

use serde::Serialize;

use crate::{
  audit::AuditEntry,
  id::{LessonId, PassId},
  pass::Pass,
  reconcile::Reconciliation,
};

/// Prices a single audit entry, in minor currency units.
pub trait CostModel {
  /// `payer` is the pass named by `entry.covered_by`, if it could be found.
  fn cost(&self, entry: &AuditEntry, payer: Option<&Pass>) -> i64;
}

/// Spreads a pass's price evenly over its credits, rounding down.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProRata;

impl CostModel for ProRata {
  fn cost(&self, entry: &AuditEntry, payer: Option<&Pass>) -> i64 {
    if entry.covered_by.is_none() {
      return 0;
    }
    match payer {
      Some(pass) if pass.lessons_total > 0 => pass
        .price
        .map_or(0, |price| price.div_euclid(i64::from(pass.lessons_total))),
      _ => 0,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonCost {
  pub lesson_id: LessonId,
  pub pass_id:   Option<PassId>,
  pub cost:      i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revenue {
  pub lessons: Vec<LessonCost>,
  pub total:   i64,
}

/// Price every audit entry of `result` with `model`. `passes` is searched for
/// the paying pass by id.
pub fn lesson_costs<'a>(
  result: &Reconciliation,
  passes: impl IntoIterator<Item = &'a Pass>,
  model: &impl CostModel,
) -> Revenue {
  let passes: Vec<&Pass> = passes.into_iter().collect();
  let lessons: Vec<LessonCost> = result
    .audit_entries
    .iter()
    .map(|entry| {
      let payer = entry
        .covered_by
        .as_ref()
        .and_then(|id| passes.iter().copied().find(|p| &p.id == id));
      LessonCost {
        lesson_id: entry.lesson_id.clone(),
        pass_id:   entry.covered_by.clone(),
        cost:      model.cost(entry, payer),
      }
    })
    .collect();
  let total = lessons.iter().map(|l| l.cost).sum();
  Revenue { lessons, total }
}
