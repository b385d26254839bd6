//! admix Core Types
//!
//! This crate provides the class-model substrate the composition layer builds
//! on:
//! - Identity types (FragmentId)
//! - Value types (the dynamic Value enum and the `props!` macro)
//! - Members (data-or-method slots carried by classes and fragments)
//! - Fragments (immutable capability bundles with stable identity)
//! - Classes and instances (single-inheritance chains with an initializer
//!   chain and the `mixed` ledger)
//! - Common error types

mod class;
mod error;
mod fragment;
mod id;
mod instance;
mod member;
mod value;

pub use class::*;
pub use error::*;
pub use fragment::*;
pub use id::*;
pub use instance::*;
pub use member::*;
pub use value::*;
