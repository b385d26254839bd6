//! Logging convenience mixin.
//!
//! Mixing `with_logger` into a class gives its instances a `log` method that
//! forwards to a severity-keyed sink. The last argument is treated as the
//! severity when it is one of the recognized tokens, and popped from the
//! message; otherwise everything is logged at the default `log` severity.
//!
//! Base classes can carry the `silent_log` fragment instead, so code may call
//! `log` unconditionally and stay quiet until the logger mixin is added:
//!
//! ```
//! use admix_compose::mix;
//! use admix_core::{Class, Value};
//! use admix_logger::{silent_log, with_tracing_logger};
//!
//! let model = Class::base("Model").extend_with_fragment(
//!     &silent_log(),
//!     admix_core::ChainMode::ParentFirst,
//! );
//! let mut quiet = model.instantiate(&[]).unwrap();
//! quiet.call("log", &[Value::from("nothing happens")]).unwrap();
//!
//! let chatty = mix(&model, [&with_tracing_logger()]).unwrap();
//! let mut cat = chatty.instantiate(&[]).unwrap();
//! cat.call("log", &[Value::from("oh long johnson")]).unwrap();
//! cat.call("log", &[Value::from("cat created"), Value::from("info")])
//!     .unwrap();
//! ```

use admix_compose::Mixin;
use admix_core::{Fragment, Initializer, Value};
use std::fmt;
use std::sync::Arc;

/// Message severities understood by the `log` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Default severity.
    Log,
    Warn,
    Error,
    Info,
}

impl Severity {
    /// Recognize a severity token. Anything else is part of the message.
    pub fn from_token(token: &str) -> Option<Severity> {
        match token {
            "log" => Some(Severity::Log),
            "warn" => Some(Severity::Warn),
            "error" => Some(Severity::Error),
            "info" => Some(Severity::Info),
            _ => None,
        }
    }

    /// The token form of this severity.
    pub fn token(&self) -> &'static str {
        match self {
            Severity::Log => "log",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A console-like sink with one method per severity.
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);

    /// Dispatch on a severity value.
    fn emit(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Log => self.log(message),
            Severity::Warn => self.warn(message),
            Severity::Error => self.error(message),
            Severity::Info => self.info(message),
        }
    }
}

/// Default sink forwarding to `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }
}

/// The logger mixin over an explicit sink.
///
/// The fragment provides the `log` method; its initializer chains
/// parent-first and announces itself with a warning, so enabling the logger
/// on a class is visible the moment instances are created. Hold on to the
/// returned Arc and reuse it: each call builds a fragment with a fresh
/// identity, so only a shared descriptor benefits from de-duplication.
pub fn with_logger(sink: Arc<dyn LogSink>) -> Arc<Mixin> {
    let init_sink = Arc::clone(&sink);
    let fragment = Fragment::build("with_logger")
        .method("log", move |_instance, args| {
            let (severity, message) = split_severity(args);
            sink.emit(severity, &message);
            Ok(Value::Null)
        })
        .init(Initializer::chained(move |_instance, _args| {
            init_sink.warn("Logger enabled");
            Ok(())
        }))
        .finish();
    Mixin::new(fragment)
}

/// The logger mixin over the default `tracing` sink.
pub fn with_tracing_logger() -> Arc<Mixin> {
    with_logger(Arc::new(TracingSink))
}

/// A fragment installing a no-op `log` member, for base classes that should
/// accept `log` calls silently until the logger mixin is mixed in.
pub fn silent_log() -> Arc<Fragment> {
    Fragment::build("silent_log")
        .method("log", |_instance, _args| Ok(Value::Null))
        .finish()
}

/// Split the severity token off the end of a `log` argument list and render
/// the rest as a space-separated message.
fn split_severity(args: &[Value]) -> (Severity, String) {
    let (severity, rest) = match args.split_last() {
        Some((Value::String(token), rest)) => match Severity::from_token(token) {
            Some(severity) => (severity, rest),
            None => (Severity::Log, args),
        },
        _ => (Severity::Log, args),
    };
    let message = rest
        .iter()
        .map(render)
        .collect::<Vec<_>>()
        .join(" ");
    (severity, message)
}

/// Strings render without quotes in log messages.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
