//! Members: the data-or-method slots carried by fragments and classes.

use crate::{ClassError, Instance, Props, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A dynamically dispatched method body.
///
/// Methods receive the instance they were invoked on plus positional
/// arguments, and may fail with a ClassError.
pub type Method = Arc<dyn Fn(&mut Instance, &[Value]) -> Result<Value, ClassError> + Send + Sync>;

/// Ordered map of named members, as stored on a fragment or a class layer.
pub type Members = BTreeMap<String, Member>;

/// A single named slot on a class or fragment: either plain data or a method.
#[derive(Clone)]
pub enum Member {
    /// A data value, returned as-is on invocation.
    Data(Value),
    /// A callable method.
    Method(Method),
}

impl Member {
    /// Build a data member.
    pub fn data(value: impl Into<Value>) -> Self {
        Member::Data(value.into())
    }

    /// Build a method member from a closure.
    pub fn method<F>(body: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<Value, ClassError> + Send + Sync + 'static,
    {
        Member::Method(Arc::new(body))
    }

    /// Returns true if this is a method member.
    pub fn is_method(&self) -> bool {
        matches!(self, Member::Method(_))
    }

    /// Get the value if this is a data member.
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Member::Data(value) => Some(value),
            Member::Method(_) => None,
        }
    }

    /// Invoke this member on an instance. Data members evaluate to their
    /// value; method members run their body.
    pub fn invoke(&self, instance: &mut Instance, args: &[Value]) -> Result<Value, ClassError> {
        match self {
            Member::Data(value) => Ok(value.clone()),
            Member::Method(body) => body(instance, args),
        }
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Data(value) => f.debug_tuple("Data").field(value).finish(),
            Member::Method(_) => f.write_str("Method(..)"),
        }
    }
}

impl From<Value> for Member {
    fn from(value: Value) -> Self {
        Member::Data(value)
    }
}

/// Turn a props map into a map of data members.
pub fn data_members(props: Props) -> Members {
    props
        .into_iter()
        .map(|(name, value)| (name, Member::Data(value)))
        .collect()
}
