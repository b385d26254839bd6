//! Redefine/decorate: wrapping members with call-through access to the prior
//! implementation.

use admix_core::{Class, ClassError, ClassResult, Instance, Member, Members, Value};

/// Member name of the hook run after an instance is reclassified.
pub const ON_DECORATE: &str = "on_decorate";

/// Handle on the implementation set as it was before a redefinition.
///
/// Overriding members clone this into their closures and call the prior
/// implementation through it at will, typically as their first action to
/// keep behavior additive. Each redefinition layer captures its own origin,
/// so repeated redefinition forms a call chain from the outermost (most
/// recently applied) layer to the innermost one.
#[derive(Debug, Clone)]
pub struct Origin {
    class: Class,
}

impl Origin {
    /// Invoke the prior implementation of a member.
    pub fn call(&self, instance: &mut Instance, name: &str, args: &[Value]) -> ClassResult<Value> {
        let member = self
            .class
            .lookup(name)
            .ok_or_else(|| ClassError::MethodNotFound {
                class: self.class.display_name().to_string(),
                method: name.to_string(),
            })?;
        member.invoke(instance, args)
    }

    /// Look at the prior member, if any.
    pub fn get(&self, name: &str) -> Option<&Member> {
        self.class.lookup(name)
    }

    /// The class as it was before the redefinition.
    pub fn class(&self) -> &Class {
        &self.class
    }
}

/// Derive a class whose members override the given class's, with call-through
/// access to the originals.
///
/// The factory receives the origin handle and returns the overriding members;
/// everything it does not name keeps resolving to the prior implementation
/// through the chain.
pub fn redefine<F>(class: &Class, factory: F) -> Class
where
    F: FnOnce(Origin) -> Members,
{
    let origin = Origin {
        class: class.clone(),
    };
    let members = factory(origin);
    class.extend(members)
}

/// Apply a redefinition to a single instance.
///
/// Synthesizes a one-off derived class carrying the override, reclassifies
/// the instance under it, and returns the instance. Siblings sharing the
/// original class are unaffected.
pub fn decorate<F>(instance: Instance, factory: F) -> ClassResult<Instance>
where
    F: FnOnce(Origin) -> Members,
{
    let decorated = redefine(instance.class(), factory);
    adopt(instance, &decorated)
}

/// Reclassify an instance under a class, running its `on_decorate` hook if
/// the class defines one. This is the primitive `decorate` builds on.
pub fn adopt(mut instance: Instance, class: &Class) -> ClassResult<Instance> {
    instance.reclass(class.clone());
    if instance.class().lookup(ON_DECORATE).is_some() {
        instance.call(ON_DECORATE, &[])?;
    }
    Ok(instance)
}
