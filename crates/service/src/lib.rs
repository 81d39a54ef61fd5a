//! Service layer for the repair desk.
//! - Catalog store operations (brands, models, repair types) with their invariants.
//! - Ordering index: dense `0..n-1` positions per scope, batch reorder.
//! - Pricing: resolution engine and bulk override replace.
//! - Intake: bookings and contact messages, followed by best-effort notifications.

pub mod errors;
pub mod catalog;
pub mod ordering;
pub mod pricing;
pub mod intake;
pub mod notify;
#[cfg(test)]
pub mod test_support;
