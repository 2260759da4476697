//! Bundled presentation strategies

mod merged;
mod retired;

pub use merged::{
    IdentifyMergedConcepts, IDENTIFY_MERGED_CONCEPTS, MERGE, MERGED_INTO_ANNOTATION_PROPERTY,
    MERGE_AXIOM, RETIRED_DUE_TO_MERGE,
};
pub use retired::{
    IdentifyRetiredConcepts, DELETED_DUE_TO_RETIREMENT, IDENTIFY_RETIRED_CONCEPTS, RETIRED,
};

use super::strategy::PresentationStrategy;

/// Look up a bundled strategy by its catalog name
pub fn by_name(name: &str) -> Option<Box<dyn PresentationStrategy>> {
    match name {
        IDENTIFY_MERGED_CONCEPTS => Some(Box::new(IdentifyMergedConcepts::new())),
        IDENTIFY_RETIRED_CONCEPTS => Some(Box::new(IdentifyRetiredConcepts::new())),
        _ => None,
    }
}

/// Every catalog name
pub fn names() -> &'static [&'static str] {
    &[IDENTIFY_MERGED_CONCEPTS, IDENTIFY_RETIRED_CONCEPTS]
}
