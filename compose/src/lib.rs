//! admix composition layer
//!
//! The composer folds fragments and mixin descriptors into class chains with
//! dependency resolution and ledger-based de-duplication; redefine/decorate
//! wrap existing members with call-through access to the prior
//! implementation.

mod mix;
mod mixin;
mod redefine;

pub use mix::*;
pub use mixin::*;
pub use redefine::*;
