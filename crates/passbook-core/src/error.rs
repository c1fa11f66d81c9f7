//! Error types for `passbook-core`.
//!
//! The engine itself never fails. These errors come from the validating
//! constructors that build input records at the boundary.

use chrono::NaiveDate;
use thiserror::Error;

use crate::id::PassId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("{0} id must not be empty")]
  EmptyId(&'static str),

  #[error("pass {pass}: expiry date {expiry} precedes purchase date {purchase}")]
  InvalidWindow {
    pass:     PassId,
    purchase: NaiveDate,
    expiry:   NaiveDate,
  },

  #[error("pass {pass}: price {price} must not be negative")]
  InvalidPrice { pass: PassId, price: i64 },

  #[error("invalid date {0:?}: expected YYYY-MM-DD")]
  InvalidDate(String),

  #[error("invalid time {0:?}: expected HH:MM or HH:MM:SS")]
  InvalidTime(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
