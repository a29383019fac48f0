// strut_core/src/lib.rs

//! Engine-agnostic wheel physics: ground probing, spring-damper suspension
//! and slip-based tire friction for a single wheel pushing on a chassis it
//! does not own.

pub mod abstractions;
pub mod error;
pub mod models;
pub mod prelude;
pub mod types;
