//! Shared helpers for the repair desk crates: logging setup, startup checks,
//! pagination parameters and small wire types.

pub mod types;
pub mod utils;
pub mod pagination;
pub mod env;
