//! Per-stop aggregation and network summaries.
//!
//! This module joins gap records with stop coordinates, reduces them to one
//! mean wait per stop, and describes the resulting distribution.

pub mod aggregate;
pub mod summary;
pub mod types;
pub mod utility;
