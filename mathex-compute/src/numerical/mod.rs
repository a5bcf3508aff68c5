//! Numerical evaluation of expression trees.
//!
//! # Features
//!
//! - `serde`: Derives `Serialize` and `Deserialize` for the configuration types.

pub mod config;
pub mod error;
pub mod eval;
pub mod func;
pub mod function_set;
pub mod resolve;
pub mod trig_mode;
