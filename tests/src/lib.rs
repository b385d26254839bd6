//! Shared fixtures for admix integration tests.

pub mod sink;

/// Everything the scenario files need.
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::sink::RecordingSink;
    pub use admix_compose::{
        adopt, decorate, mix, mix_with, redefine, MixEntry, MixError, MixPolicy, Mixin,
        ON_DECORATE,
    };
    pub use admix_core::{
        data_members, props, ChainMode, Class, ClassError, Fragment, Initializer, Instance,
        Member, Members, Value,
    };
    pub use admix_logger::{silent_log, with_logger, LogSink, Severity};
    pub use std::sync::Arc;
}
