//! Mixin descriptors: a fragment plus declared dependencies.

use crate::mix::apply_mixin;
use crate::{adopt, MixEntry, MixPolicy, MixResult};
use admix_core::{Fragment, Instance, Members, Props, Value};
use std::sync::Arc;

/// An immutable descriptor pairing a fragment with the dependencies that must
/// be composed before it, plus optional static attributes.
///
/// Dependencies are ordered and applied in order; static attributes live on
/// the descriptor itself and are never merged into any class. Descriptors are
/// not validated at construction; invalid entries surface when `mix` runs.
#[derive(Debug)]
pub struct Mixin {
    fragment: Arc<Fragment>,
    dependencies: Vec<MixEntry>,
    statics: Props,
}

impl Mixin {
    /// A descriptor with no dependencies.
    pub fn new(fragment: Arc<Fragment>) -> Arc<Mixin> {
        Arc::new(Mixin {
            fragment,
            dependencies: Vec::new(),
            statics: Props::new(),
        })
    }

    /// A descriptor whose dependencies are applied before the fragment.
    pub fn with_dependencies(dependencies: Vec<MixEntry>, fragment: Arc<Fragment>) -> Arc<Mixin> {
        Arc::new(Mixin {
            fragment,
            dependencies,
            statics: Props::new(),
        })
    }

    /// A descriptor with dependencies and static attributes.
    pub fn full(
        dependencies: Vec<MixEntry>,
        fragment: Arc<Fragment>,
        statics: Props,
    ) -> Arc<Mixin> {
        Arc::new(Mixin {
            fragment,
            dependencies,
            statics,
        })
    }

    /// The wrapped fragment.
    pub fn fragment(&self) -> &Arc<Fragment> {
        &self.fragment
    }

    /// Dependencies in application order.
    pub fn dependencies(&self) -> &[MixEntry] {
        &self.dependencies
    }

    /// All static attributes.
    pub fn statics(&self) -> &Props {
        &self.statics
    }

    /// A single static attribute.
    pub fn static_attr(&self, name: &str) -> Option<&Value> {
        self.statics.get(name)
    }

    /// Decorate a single instance with this mixin: compose it into the
    /// instance's class, reclassify the instance under the result, and run
    /// the `on_decorate` hook if the new class defines one. Siblings keep
    /// their original class.
    pub fn decorate(&self, instance: Instance) -> MixResult<Instance> {
        let decorated = apply_mixin(instance.class().clone(), self, MixPolicy::default())?;
        Ok(adopt(instance, &decorated)?)
    }

    /// Layer an override onto this mixin's fragment, returning a new
    /// descriptor. The factory receives the prior member set and returns the
    /// overriding members; untouched members are carried over. The new
    /// fragment has its own identity; the original descriptor is unchanged
    /// and still composable.
    pub fn redefine<F>(&self, factory: F) -> Arc<Mixin>
    where
        F: FnOnce(&Members) -> Members,
    {
        let origin = self.fragment.members();
        let mut members = origin.clone();
        for (name, member) in factory(origin) {
            members.insert(name, member);
        }
        let mut builder = Fragment::build(self.fragment.name());
        if let Some(init) = self.fragment.init() {
            builder = builder.init(init.clone());
        }
        for (name, member) in members {
            builder = builder.member(name, member);
        }
        let fragment = builder.finish();
        Arc::new(Mixin {
            fragment,
            dependencies: self.dependencies.clone(),
            statics: self.statics.clone(),
        })
    }
}
