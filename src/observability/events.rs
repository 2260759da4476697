//! Lifecycle events
//!
//! Every line the engine logs is one of these. Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events of an engine run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Inputs
    /// Run configuration read and validated
    ConfigLoaded,
    /// One ontology version loaded
    OntologyLoaded,

    // Alignment
    /// A strategy's initialize hook failed; the phase aborts
    StrategyInitFailed,
    /// A strategy's run failed; the loop continues without it this round
    StrategyFailed,
    /// A strategy's reset hook failed during cleanup
    StrategyResetFailed,
    /// One convergence round finished
    AlignmentRound,
    /// Every source entity and anonymous individual matched
    AlignmentConverged,
    /// A round made no progress with elements still unmatched
    AlignmentStalled,

    // Presentation
    /// A presentation strategy finished
    PresentationApplied,
    /// A presentation strategy failed; the phase aborts
    PresentationFailed,
    /// A reclassification could not be resolved and was left alone
    ChangeSkipped,

    // Output
    /// One non-equivalent diff reported by `display`
    DiffDisplayed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::OntologyLoaded => "ONTOLOGY_LOADED",

            Event::StrategyInitFailed => "STRATEGY_INIT_FAILED",
            Event::StrategyFailed => "STRATEGY_FAILED",
            Event::StrategyResetFailed => "STRATEGY_RESET_FAILED",
            Event::AlignmentRound => "ALIGNMENT_ROUND",
            Event::AlignmentConverged => "ALIGNMENT_CONVERGED",
            Event::AlignmentStalled => "ALIGNMENT_STALLED",

            Event::PresentationApplied => "PRESENTATION_APPLIED",
            Event::PresentationFailed => "PRESENTATION_FAILED",
            Event::ChangeSkipped => "CHANGE_SKIPPED",

            Event::DiffDisplayed => "DIFF_DISPLAYED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ChangeSkipped | Event::AlignmentRound => Severity::Trace,
            Event::StrategyFailed
            | Event::StrategyResetFailed
            | Event::AlignmentStalled => Severity::Warn,
            Event::StrategyInitFailed | Event::PresentationFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::ConfigLoaded,
            Event::OntologyLoaded,
            Event::StrategyInitFailed,
            Event::StrategyFailed,
            Event::StrategyResetFailed,
            Event::AlignmentRound,
            Event::AlignmentConverged,
            Event::AlignmentStalled,
            Event::PresentationApplied,
            Event::PresentationFailed,
            Event::ChangeSkipped,
            Event::DiffDisplayed,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_failure_severities() {
        assert_eq!(Event::StrategyFailed.severity(), Severity::Warn);
        assert_eq!(Event::PresentationFailed.severity(), Severity::Error);
        assert_eq!(Event::AlignmentConverged.severity(), Severity::Info);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::AlignmentStalled), "ALIGNMENT_STALLED");
    }
}
