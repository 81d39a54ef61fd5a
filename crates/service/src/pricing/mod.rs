//! Per-model pricing: the resolution engine that merges the shared repair
//! catalog with a model's overrides, and the bulk override replace.

pub mod resolution;
pub mod overrides;

pub use resolution::{resolve_model_repairs, ResolvedModelRepairs, ResolvedRepairEntry};
pub use overrides::{set_model_repair_prices, RepairPriceEntry};
