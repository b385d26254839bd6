//! Instances: attribute state plus dynamic dispatch through a class chain.

use crate::{Class, ClassError, Member, Props, Value};

/// A live object classified under a class chain.
#[derive(Debug)]
pub struct Instance {
    class: Class,
    attributes: Props,
}

impl Instance {
    pub(crate) fn new(class: Class) -> Self {
        Instance {
            class,
            attributes: Props::new(),
        }
    }

    /// The class this instance is currently classified under.
    pub fn class(&self) -> &Class {
        &self.class
    }

    /// Reclassify this instance under another class. Attribute state is kept;
    /// subsequent dispatch goes through the new chain. Used by decoration.
    pub fn reclass(&mut self, class: Class) {
        self.class = class;
    }

    /// Invoke a named member through the class chain.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Value, ClassError> {
        let class = self.class.clone();
        let member = class
            .lookup(name)
            .ok_or_else(|| ClassError::MethodNotFound {
                class: class.display_name().to_string(),
                method: name.to_string(),
            })?
            .clone();
        member.invoke(self, args)
    }

    /// Read a value: own attributes first, then class data members.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.attributes.get(name) {
            return Some(value.clone());
        }
        match self.class.lookup(name) {
            Some(Member::Data(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Write an own attribute, shadowing any class data member of that name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Whether this instance's class derives from `class`.
    pub fn is_a(&self, class: &Class) -> bool {
        self.class.derives_from(class)
    }
}
