//! System-state domain: the immutable scan snapshot and the pure rules
//! (layering, risk thresholds, parsing) applied to it.

pub mod domain;
pub mod policies;
pub mod services;
