//! Shared services
//!
//! The [`ServiceRegistry`] is cleared at the start of every alignment phase
//! and filled by strategies during their `initialize` hooks. The two helpers
//! here are the services the bundled strategies publish.

mod code_mapper;
mod registry;
mod retirement;

pub use code_mapper::{CodeToEntityMapper, CODE_ANNOTATION_PROPERTY};
pub use registry::ServiceRegistry;
pub use retirement::{
    RetirementClassService, RETIREMENT_CLASS_PROPERTY, RETIREMENT_META_PROPERTIES,
    RETIREMENT_STATUS_PROPERTY, RETIREMENT_STATUS_STRING,
};
