//! Engine State Machine
//!
//! ```text
//! Unstarted --align--> Aligned --diff--> Diffed
//!                       |   ^
//!                       +---+ align (phase 1 repeated)
//! ```
//!
//! - Transitions consume the current state and return the next one
//! - There is no way back from `Diffed`; a new run needs a new engine
//! - Each state owns exactly the results that exist at that point

use std::sync::Arc;

use crate::align::{AlignmentMap, AlignmentReport};
use crate::present::ChangeModel;

use super::errors::{EngineError, EngineResult};

#[derive(Debug, Clone, Default)]
pub enum EngineState {
    /// Nothing has run yet; neither the map nor the change model exists
    #[default]
    Unstarted,

    /// Phase 1 finished; the map is frozen
    Aligned {
        map: Arc<AlignmentMap>,
        report: AlignmentReport,
    },

    /// Phase 2 ran, completely or up to a failing strategy
    Diffed {
        map: Arc<AlignmentMap>,
        report: AlignmentReport,
        changes: ChangeModel,
    },
}

impl EngineState {
    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Unstarted => "Unstarted",
            Self::Aligned { .. } => "Aligned",
            Self::Diffed { .. } => "Diffed",
        }
    }

    pub fn map(&self) -> Option<&Arc<AlignmentMap>> {
        match self {
            Self::Unstarted => None,
            Self::Aligned { map, .. } | Self::Diffed { map, .. } => Some(map),
        }
    }

    pub fn report(&self) -> Option<&AlignmentReport> {
        match self {
            Self::Unstarted => None,
            Self::Aligned { report, .. } | Self::Diffed { report, .. } => Some(report),
        }
    }

    pub fn changes(&self) -> Option<&ChangeModel> {
        match self {
            Self::Diffed { changes, .. } => Some(changes),
            _ => None,
        }
    }

    pub fn changes_mut(&mut self) -> Option<&mut ChangeModel> {
        match self {
            Self::Diffed { changes, .. } => Some(changes),
            _ => None,
        }
    }

    /// Check that phase 1 may start
    pub fn can_align(&self) -> EngineResult<()> {
        match self {
            Self::Unstarted | Self::Aligned { .. } => Ok(()),
            Self::Diffed { .. } => Err(EngineError::illegal_state("run phase 1", self.state_name())),
        }
    }

    /// Check that phase 2 may start
    pub fn can_diff(&self) -> EngineResult<()> {
        match self {
            Self::Aligned { .. } => Ok(()),
            _ => Err(EngineError::illegal_state("run phase 2", self.state_name())),
        }
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// Unstarted | Aligned → Aligned
    pub fn align(self, map: Arc<AlignmentMap>, report: AlignmentReport) -> EngineResult<Self> {
        self.can_align()?;
        Ok(Self::Aligned { map, report })
    }

    /// Aligned → Diffed
    pub fn diff(self, changes: ChangeModel) -> EngineResult<Self> {
        match self {
            Self::Aligned { map, report } => Ok(Self::Diffed {
                map,
                report,
                changes,
            }),
            other => Err(EngineError::illegal_state("run phase 2", other.state_name())),
        }
    }
}
