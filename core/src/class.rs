//! Classes: immutable single-inheritance chains with an initializer chain and
//! the `mixed` ledger.
//!
//! A Class value is a cheap handle on an immutable chain node; cloning the
//! handle never copies the chain. Every derivation, whether `extend` or
//! folding in a fragment, produces a new leaf node pointing at its parent and
//! carrying a
//! *copied* ledger, so sibling derivations from a shared base can never
//! interfere with each other or with the base.

use crate::{ClassError, Fragment, FragmentId, Instance, Member, Members, Value};
use std::fmt;
use std::sync::Arc;

/// How a class layer's initializer relates to the layers below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainMode {
    /// Run the parent chain's initializers first, then this layer's body.
    ParentFirst,
    /// This layer's body replaces the entire chain below it.
    Replace,
}

/// An initializer body.
pub type InitFn = Arc<dyn Fn(&mut Instance, &[Value]) -> Result<(), ClassError> + Send + Sync>;

/// An initializer as declared on a fragment or an `extend` call.
///
/// The chain mode is optional at declaration time: `None` means the declarer
/// did not say whether it calls through, and the composition policy picks the
/// default when the initializer is folded into a class.
#[derive(Clone)]
pub struct Initializer {
    body: InitFn,
    chain: Option<ChainMode>,
}

impl Initializer {
    /// An initializer that leaves chaining to the composition policy.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<(), ClassError> + Send + Sync + 'static,
    {
        Initializer {
            body: Arc::new(body),
            chain: None,
        }
    }

    /// An initializer that always runs the parent chain first.
    pub fn chained<F>(body: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<(), ClassError> + Send + Sync + 'static,
    {
        Initializer {
            body: Arc::new(body),
            chain: Some(ChainMode::ParentFirst),
        }
    }

    /// An initializer that replaces the chain below it.
    pub fn replacing<F>(body: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<(), ClassError> + Send + Sync + 'static,
    {
        Initializer {
            body: Arc::new(body),
            chain: Some(ChainMode::Replace),
        }
    }

    /// The declared chain mode, if any.
    pub fn chain(&self) -> Option<ChainMode> {
        self.chain
    }

    /// Fix the chain mode, falling back to `default_chain` when undeclared.
    fn resolve(&self, default_chain: ChainMode) -> ResolvedInit {
        ResolvedInit {
            mode: self.chain.unwrap_or(default_chain),
            body: Arc::clone(&self.body),
        }
    }
}

impl fmt::Debug for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Initializer")
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

/// An initializer whose chain mode has been fixed at class-construction time.
#[derive(Clone)]
struct ResolvedInit {
    mode: ChainMode,
    body: InitFn,
}

impl fmt::Debug for ResolvedInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedInit")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct ClassNode {
    /// Diagnostic name; fragment-derived layers carry the fragment's name.
    name: Option<String>,
    parent: Option<Class>,
    members: Members,
    init: Option<ResolvedInit>,
    /// Ordered record of fragments folded into this class's ancestry.
    /// Copied (never shared, never mutated in place) on every derivation.
    mixed: Vec<FragmentId>,
}

/// A handle on a node in a single-inheritance class chain.
///
/// Clones share the node; class identity is node identity (`ptr_eq`), not
/// structural equality.
#[derive(Debug, Clone)]
pub struct Class {
    node: Arc<ClassNode>,
}

impl Class {
    /// Create a root class with no members.
    pub fn base(name: impl Into<String>) -> Class {
        Class {
            node: Arc::new(ClassNode {
                name: Some(name.into()),
                parent: None,
                members: Members::new(),
                init: None,
                mixed: Vec::new(),
            }),
        }
    }

    /// Create a root class with members and an optional initializer.
    pub fn base_with(
        name: impl Into<String>,
        members: Members,
        init: Option<Initializer>,
    ) -> Class {
        Class {
            node: Arc::new(ClassNode {
                name: Some(name.into()),
                parent: None,
                members,
                init: init.map(|i| i.resolve(ChainMode::ParentFirst)),
                mixed: Vec::new(),
            }),
        }
    }

    /// Derive a new class adding the given members.
    pub fn extend(&self, members: Members) -> Class {
        self.derive(None, members, None, None)
    }

    /// Derive a new class adding members and an initializer. Undeclared chain
    /// modes default to parent-first.
    pub fn extend_with_init(&self, members: Members, init: Initializer) -> Class {
        self.derive(None, members, Some(init.resolve(ChainMode::ParentFirst)), None)
    }

    /// Fold a fragment into the chain, recording its id on a copied ledger.
    ///
    /// `default_chain` decides the chain mode of an initializer that did not
    /// declare one; the composer passes its policy's choice here.
    pub fn extend_with_fragment(&self, fragment: &Fragment, default_chain: ChainMode) -> Class {
        self.derive(
            Some(fragment.name().to_string()),
            fragment.members().clone(),
            fragment.init().map(|i| i.resolve(default_chain)),
            Some(fragment.id()),
        )
    }

    fn derive(
        &self,
        name: Option<String>,
        members: Members,
        init: Option<ResolvedInit>,
        record: Option<FragmentId>,
    ) -> Class {
        let mut mixed = self.node.mixed.clone();
        if let Some(id) = record {
            mixed.push(id);
        }
        Class {
            node: Arc::new(ClassNode {
                name,
                parent: Some(self.clone()),
                members,
                init,
                mixed,
            }),
        }
    }

    /// Diagnostic name for errors and debugging.
    pub fn display_name(&self) -> &str {
        self.node.name.as_deref().unwrap_or("<anonymous>")
    }

    /// The parent class, if any.
    pub fn parent(&self) -> Option<&Class> {
        self.node.parent.as_ref()
    }

    /// Members declared directly on this class layer.
    pub fn own_members(&self) -> &Members {
        &self.node.members
    }

    /// The ledger of fragments folded into this class's ancestry, in
    /// application order.
    pub fn mixed(&self) -> &[FragmentId] {
        &self.node.mixed
    }

    /// Whether a fragment is already part of this class's ancestry.
    pub fn has_mixed(&self, id: FragmentId) -> bool {
        self.node.mixed.contains(&id)
    }

    /// Whether two handles name the same class node.
    pub fn ptr_eq(&self, other: &Class) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Look up a member, walking from this layer toward the root. Members on
    /// leafward layers shadow same-named members below them.
    pub fn lookup(&self, name: &str) -> Option<&Member> {
        let mut current: &ClassNode = &self.node;
        loop {
            if let Some(member) = current.members.get(name) {
                return Some(member);
            }
            match &current.parent {
                Some(parent) => current = &parent.node,
                None => return None,
            }
        }
    }

    /// Whether `ancestor` appears on this class's chain (including self).
    pub fn derives_from(&self, ancestor: &Class) -> bool {
        let mut current: &ClassNode = &self.node;
        loop {
            if std::ptr::eq(current, Arc::as_ptr(&ancestor.node)) {
                return true;
            }
            match &current.parent {
                Some(parent) => current = &parent.node,
                None => return false,
            }
        }
    }

    /// Create an instance, running the initializer chain.
    ///
    /// Initializers are collected leafward-to-rootward until a Replace layer
    /// cuts the chain, then run in rootward-to-leafward order so every
    /// parent-first body sees a fully initialized ancestor state.
    pub fn instantiate(&self, args: &[Value]) -> Result<Instance, ClassError> {
        let mut inits: Vec<ResolvedInit> = Vec::new();
        let mut current: &ClassNode = &self.node;
        loop {
            if let Some(init) = &current.init {
                inits.push(init.clone());
                if init.mode == ChainMode::Replace {
                    break;
                }
            }
            match &current.parent {
                Some(parent) => current = &parent.node,
                None => break,
            }
        }

        let mut instance = Instance::new(self.clone());
        for init in inits.iter().rev() {
            (init.body)(&mut instance, args)?;
        }
        Ok(instance)
    }
}
