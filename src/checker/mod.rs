//! Semantic phase
//!
//! - [`semantic`]: the checker pass over a syntax tree
//! - [`type_system`]: literal type inference and widening compatibility
//! - [`findings`]: the diagnostic records the pass produces
//!
//! The checker never fails.  Problems are reported as
//! [`findings::Level::Error`] findings in the returned log.

pub mod findings;
pub mod semantic;
pub mod type_system;
