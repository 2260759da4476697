//! Bundled alignment strategies

mod match_by_code;
mod match_by_id;

pub use match_by_code::{MatchByCode, MATCH_BY_CODE};
pub use match_by_id::{MatchById, MATCH_BY_ID};

use super::strategy::AlignmentStrategy;

/// Look up a bundled strategy by its catalog name
pub fn by_name(name: &str) -> Option<Box<dyn AlignmentStrategy>> {
    match name {
        MATCH_BY_ID => Some(Box::new(MatchById::new())),
        MATCH_BY_CODE => Some(Box::new(MatchByCode::new())),
        _ => None,
    }
}

/// Every catalog name
pub fn names() -> &'static [&'static str] {
    &[MATCH_BY_CODE, MATCH_BY_ID]
}
