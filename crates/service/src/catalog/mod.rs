//! Catalog store: brands, device models and repair types.
//!
//! Every create, delete and brand move keeps the ordering index dense
//! (see [`crate::ordering`]) inside the same transaction as the row change.

pub mod brand_service;
pub mod model_service;
pub mod repair_type_service;
