//! Passes (subscriptions): purchased bundles of lesson credits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result, calendar,
  id::{GroupId, PassId, StudentId},
};

/// Lifecycle status of a pass as stored. Older records carry no status at
/// all; those behave like active passes.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PassStatus {
  Active,
  Archived,
  #[default]
  Unset,
}

/// A purchased bundle of lesson credits for one student in one group.
///
/// The validity window is `[purchase_date, expiry_date]`, open-ended when
/// there is no expiry. A consecutive pass covers every scheduled lesson in
/// its window, marked or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PassRecord")]
pub struct Pass {
  pub id:             PassId,
  pub student:        StudentId,
  pub group:          GroupId,
  pub lessons_total:  u32,
  pub purchase_date:  NaiveDate,
  pub expiry_date:    Option<NaiveDate>,
  pub is_consecutive: bool,
  pub status:         PassStatus,
  /// Purchase price in minor currency units, when known. Never negative.
  pub price:          Option<i64>,
}

impl Pass {
  /// Start building a pass. Optional attributes default to: no expiry,
  /// non-consecutive, status unset, no price.
  pub fn builder(
    id: PassId,
    student: StudentId,
    group: GroupId,
    lessons_total: u32,
    purchase_date: NaiveDate,
  ) -> PassBuilder {
    PassBuilder {
      pass: Pass {
        id,
        student,
        group,
        lessons_total,
        purchase_date,
        expiry_date: None,
        is_consecutive: false,
        status: PassStatus::Unset,
        price: None,
      },
    }
  }

  pub fn is_archived(&self) -> bool { self.status == PassStatus::Archived }

  /// Whether the pass still counts towards forward-looking capacity.
  pub fn is_open(&self) -> bool {
    matches!(self.status, PassStatus::Active | PassStatus::Unset)
  }

  pub fn belongs_to(&self, student: &StudentId, group: &GroupId) -> bool {
    &self.student == student && &self.group == group
  }
}

/// Builder returned by [`Pass::builder`]; [`PassBuilder::build`] validates
/// the window.
#[derive(Debug, Clone)]
pub struct PassBuilder {
  pass: Pass,
}

impl PassBuilder {
  pub fn expires(mut self, expiry: NaiveDate) -> Self {
    self.pass.expiry_date = Some(expiry);
    self
  }

  pub fn consecutive(mut self, is_consecutive: bool) -> Self {
    self.pass.is_consecutive = is_consecutive;
    self
  }

  pub fn status(mut self, status: PassStatus) -> Self {
    self.pass.status = status;
    self
  }

  pub fn price(mut self, price: i64) -> Self {
    self.pass.price = Some(price);
    self
  }

  pub fn build(self) -> Result<Pass> {
    let pass = self.pass;
    if let Some(expiry) = pass.expiry_date
      && expiry < pass.purchase_date
    {
      return Err(Error::InvalidWindow {
        pass: pass.id,
        purchase: pass.purchase_date,
        expiry,
      });
    }
    if let Some(price) = pass.price
      && price < 0
    {
      return Err(Error::InvalidPrice {
        pass: pass.id,
        price,
      });
    }
    Ok(pass)
  }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PassRecord {
  id:             String,
  student:        String,
  group:          String,
  lessons_total:  u32,
  purchase_date:  String,
  #[serde(default)]
  expiry_date:    Option<String>,
  #[serde(default)]
  is_consecutive: bool,
  #[serde(default)]
  status:         Option<PassStatus>,
  #[serde(default)]
  price:          Option<i64>,
}

impl TryFrom<PassRecord> for Pass {
  type Error = Error;

  fn try_from(raw: PassRecord) -> Result<Self> {
    let mut builder = Pass::builder(
      PassId::new(raw.id)?,
      StudentId::new(raw.student)?,
      GroupId::new(raw.group)?,
      raw.lessons_total,
      calendar::parse_date(&raw.purchase_date)?,
    )
    .consecutive(raw.is_consecutive)
    .status(raw.status.unwrap_or_default());

    if let Some(expiry) = raw.expiry_date.as_deref() {
      builder = builder.expires(calendar::parse_date(expiry)?);
    }
    if let Some(price) = raw.price {
      builder = builder.price(price);
    }
    builder.build()
  }
}
