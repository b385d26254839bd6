//! Fragments: immutable capability bundles with stable identity.

use crate::{data_members, ClassError, FragmentId, Initializer, Instance, Member, Members, Value};
use std::sync::Arc;

/// A reusable bundle of members, optionally with an initializer, meant to be
/// folded into class chains by the composer.
///
/// Fragments are immutable after construction and identified by a
/// process-unique FragmentId; the composer de-duplicates on that id. Create a
/// fragment once and share the Arc: building an identical fragment twice
/// yields two distinct identities.
#[derive(Debug)]
pub struct Fragment {
    id: FragmentId,
    name: String,
    members: Members,
    init: Option<Initializer>,
}

impl Fragment {
    /// Start building a named fragment.
    pub fn build(name: impl Into<String>) -> FragmentBuilder {
        FragmentBuilder {
            name: name.into(),
            members: Members::new(),
            init: None,
        }
    }

    /// Build a fragment directly from a member map.
    pub fn from_members(name: impl Into<String>, members: Members) -> Arc<Fragment> {
        Arc::new(Fragment {
            id: FragmentId::next(),
            name: name.into(),
            members,
            init: None,
        })
    }

    /// Promote a loose Object value into an anonymous fragment of data
    /// members. Returns None for any non-object value.
    pub fn from_object(value: &Value) -> Option<Arc<Fragment>> {
        value
            .as_object()
            .map(|props| Fragment::from_members("object", data_members(props.clone())))
    }

    /// The fragment's stable identity.
    pub fn id(&self) -> FragmentId {
        self.id
    }

    /// Diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The members this fragment contributes.
    pub fn members(&self) -> &Members {
        &self.members
    }

    /// The fragment's initializer, if it declares one.
    pub fn init(&self) -> Option<&Initializer> {
        self.init.as_ref()
    }
}

/// Builder for fragments.
#[derive(Debug)]
pub struct FragmentBuilder {
    name: String,
    members: Members,
    init: Option<Initializer>,
}

impl FragmentBuilder {
    /// Add a data member.
    pub fn data(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members.insert(name.into(), Member::data(value));
        self
    }

    /// Add an already-built member.
    pub fn member(mut self, name: impl Into<String>, member: Member) -> Self {
        self.members.insert(name.into(), member);
        self
    }

    /// Add a method member.
    pub fn method<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<Value, ClassError> + Send + Sync + 'static,
    {
        self.members.insert(name.into(), Member::method(body));
        self
    }

    /// Set the fragment's initializer.
    pub fn init(mut self, init: Initializer) -> Self {
        self.init = Some(init);
        self
    }

    /// Allocate the fragment's identity and finish.
    pub fn finish(self) -> Arc<Fragment> {
        Arc::new(Fragment {
            id: FragmentId::next(),
            name: self.name,
            members: self.members,
            init: self.init,
        })
    }
}
