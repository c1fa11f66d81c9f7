//! Validity predicate: does a pass's credit window cover a date?
//!
//! Past dates are judged against the raw window only, so historical
//! reconciliation stays stable after a pass is archived or lapses. Today and
//! later dates additionally require the pass to still be usable.

use chrono::NaiveDate;

use crate::pass::Pass;

/// Returns true if `pass` may pay for a lesson on `date`, evaluated on
/// `today`.
pub fn covers(pass: &Pass, date: NaiveDate, today: NaiveDate) -> bool {
  if date < pass.purchase_date {
    return false;
  }
  if pass.expiry_date.is_some_and(|expiry| date > expiry) {
    return false;
  }

  let forward = date >= today;
  if forward && pass.is_archived() {
    return false;
  }
  if forward && pass.expiry_date.is_some_and(|expiry| expiry < today) {
    return false;
  }
  true
}
