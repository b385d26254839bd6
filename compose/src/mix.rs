//! The `mix` operation: dependency-ordered, de-duplicated composition.

use crate::Mixin;
use admix_core::{ChainMode, Class, ClassError, Fragment, Value};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during composition.
#[derive(Debug, Error)]
pub enum MixError {
    /// A loose entry was not a structured object. Fail-fast: the call site
    /// must be fixed, there is nothing to retry.
    #[error("Mixin must be a structured object, got {type_name}")]
    InvalidMixin { type_name: &'static str },

    /// A decoration hook failed during dispatch.
    #[error(transparent)]
    Class(#[from] ClassError),
}

/// Result type for composition operations.
pub type MixResult<T> = Result<T, MixError>;

/// A single composition entry: a fragment, a descriptor, or a loose value.
#[derive(Debug, Clone)]
pub enum MixEntry {
    /// A capability bundle applied as-is.
    Fragment(Arc<Fragment>),
    /// A descriptor whose dependencies are applied before its own fragment.
    Mixin(Arc<Mixin>),
    /// Loose dynamic input. An Object value is promoted to an anonymous
    /// fragment; anything else is the InvalidMixin error path. Note that a
    /// promoted object gets a fresh fragment identity on every promotion;
    /// callers that want de-duplication should build a Fragment once and
    /// share it.
    Raw(Value),
}

impl From<Arc<Fragment>> for MixEntry {
    fn from(fragment: Arc<Fragment>) -> Self {
        MixEntry::Fragment(fragment)
    }
}

impl From<&Arc<Fragment>> for MixEntry {
    fn from(fragment: &Arc<Fragment>) -> Self {
        MixEntry::Fragment(Arc::clone(fragment))
    }
}

impl From<Arc<Mixin>> for MixEntry {
    fn from(mixin: Arc<Mixin>) -> Self {
        MixEntry::Mixin(mixin)
    }
}

impl From<&Arc<Mixin>> for MixEntry {
    fn from(mixin: &Arc<Mixin>) -> Self {
        MixEntry::Mixin(Arc::clone(mixin))
    }
}

impl From<Value> for MixEntry {
    fn from(value: Value) -> Self {
        MixEntry::Raw(value)
    }
}

/// Composition policy.
///
/// Controls what happens to fragment initializers that did not declare a
/// chain mode. The default chains them parent-first, so consumers never have
/// to remember to call through to the base initializer; `manual()` restores
/// the older behavior where an undeclared initializer replaces the chain
/// below it. Explicitly declared chain modes always win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixPolicy {
    /// Chain undeclared initializers parent-first.
    pub auto_chain: bool,
}

impl Default for MixPolicy {
    fn default() -> Self {
        MixPolicy { auto_chain: true }
    }
}

impl MixPolicy {
    /// The policy where undeclared initializers replace the chain below.
    pub fn manual() -> Self {
        MixPolicy { auto_chain: false }
    }

    fn default_chain(&self) -> ChainMode {
        if self.auto_chain {
            ChainMode::ParentFirst
        } else {
            ChainMode::Replace
        }
    }
}

/// Compose entries into `base` left-to-right under the default policy.
///
/// Descriptor dependencies are applied (recursively, in order) before the
/// descriptor's own fragment. A fragment already present on the accumulated
/// class's ledger is skipped, so composition is idempotent per fragment
/// identity and a fragment reached through several dependency paths is only
/// ever applied once, at its first encounter.
///
/// On error, fragments applied before the failing entry remain on the
/// partially built class, which the propagated error keeps the caller from
/// ever retaining.
pub fn mix<I>(base: &Class, entries: I) -> MixResult<Class>
where
    I: IntoIterator,
    I::Item: Into<MixEntry>,
{
    mix_with(base, entries, MixPolicy::default())
}

/// Compose entries into `base` under an explicit policy.
pub fn mix_with<I>(base: &Class, entries: I, policy: MixPolicy) -> MixResult<Class>
where
    I: IntoIterator,
    I::Item: Into<MixEntry>,
{
    let mut class = base.clone();
    for entry in entries {
        class = apply_entry(class, entry.into(), policy)?;
    }
    Ok(class)
}

/// Apply one descriptor: dependencies in order, then its own fragment.
pub(crate) fn apply_mixin(class: Class, mixin: &Mixin, policy: MixPolicy) -> MixResult<Class> {
    let mut class = class;
    for dependency in mixin.dependencies() {
        class = apply_entry(class, dependency.clone(), policy)?;
    }
    Ok(apply_fragment(class, mixin.fragment(), policy))
}

fn apply_entry(class: Class, entry: MixEntry, policy: MixPolicy) -> MixResult<Class> {
    let fragment = match entry {
        MixEntry::Mixin(mixin) => return apply_mixin(class, &mixin, policy),
        MixEntry::Fragment(fragment) => fragment,
        MixEntry::Raw(value) => Fragment::from_object(&value).ok_or(MixError::InvalidMixin {
            type_name: value.type_name(),
        })?,
    };
    Ok(apply_fragment(class, &fragment, policy))
}

fn apply_fragment(class: Class, fragment: &Arc<Fragment>, policy: MixPolicy) -> Class {
    if class.has_mixed(fragment.id()) {
        return class;
    }
    class.extend_with_fragment(fragment, policy.default_chain())
}
