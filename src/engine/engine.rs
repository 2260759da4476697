//! The two-phase diff engine

use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use crate::align::{AlignmentContext, AlignmentMap, AlignmentOrchestrator, AlignmentReport, AlignmentStrategy};
use crate::config::Parameters;
use crate::model::Ontology;
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::present::{ChangeModel, PresentationContext, PresentationOrchestrator, PresentationStrategy};
use crate::service::ServiceRegistry;

use super::errors::{EngineError, EngineResult};
use super::state::EngineState;

/// Aligns a source and a target ontology, then classifies their differences.
///
/// ```ignore
/// let mut engine = Engine::new(source, target);
/// engine.set_parameters(parameters);
/// engine.set_alignment_strategies(vec![Box::new(MatchById::new())]);
/// engine.phase1()?;
/// engine.phase2()?;
/// for diff in engine.changes().into_iter().flat_map(|c| c.non_equivalent_diffs()) { .. }
/// ```
pub struct Engine {
    run_id: Uuid,
    source: Arc<Ontology>,
    target: Arc<Ontology>,
    parameters: Parameters,
    alignment: AlignmentOrchestrator,
    presentation: PresentationOrchestrator,
    services: ServiceRegistry,
    state: EngineState,
}

impl Engine {
    pub fn new(source: Ontology, target: Ontology) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            source: Arc::new(source),
            target: Arc::new(target),
            parameters: Parameters::new(),
            alignment: AlignmentOrchestrator::default(),
            presentation: PresentationOrchestrator::default(),
            services: ServiceRegistry::new(),
            state: EngineState::Unstarted,
        }
    }

    /// Load both versions from JSON ontology documents
    pub fn from_files(source: &Path, target: &Path) -> EngineResult<Self> {
        let source = load_logged("source", source)?;
        let target = load_logged("target", target)?;
        Ok(Self::new(source, target))
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn source_ontology(&self) -> &Ontology {
        &self.source
    }

    pub fn target_ontology(&self) -> &Ontology {
        &self.target
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn set_parameters(&mut self, parameters: Parameters) {
        self.parameters = parameters;
    }

    /// Replace the alignment strategies; they are ordered by priority here
    pub fn set_alignment_strategies(&mut self, strategies: Vec<Box<dyn AlignmentStrategy>>) {
        self.alignment = AlignmentOrchestrator::new(strategies);
    }

    pub fn alignment_strategy_names(&self) -> Vec<&str> {
        self.alignment.strategy_names()
    }

    /// Replace the presentation strategies; they are ordered by priority here
    pub fn set_presentation_strategies(&mut self, strategies: Vec<Box<dyn PresentationStrategy>>) {
        self.presentation = PresentationOrchestrator::new(strategies);
    }

    pub fn presentation_strategy_names(&self) -> Vec<&str> {
        self.presentation.strategy_names()
    }

    /// Register a shared service. Phase 1 starts from an empty registry,
    /// so services added before it are dropped.
    pub fn add_service<S: Any>(&mut self, service: S) -> bool {
        self.services.register(service)
    }

    pub fn service<S: Any>(&self) -> Option<&S> {
        self.services.lookup::<S>()
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// The frozen alignment, once phase 1 has run
    pub fn alignment_map(&self) -> Option<&AlignmentMap> {
        self.state.map().map(|m| m.as_ref())
    }

    pub fn alignment_report(&self) -> Option<&AlignmentReport> {
        self.state.report()
    }

    /// The change model, once phase 2 has run
    pub fn changes(&self) -> Option<&ChangeModel> {
        self.state.changes()
    }

    /// Mutable change model for follow-up classification outside the
    /// engine's own strategies
    pub fn changes_mut(&mut self) -> Option<&mut ChangeModel> {
        self.state.changes_mut()
    }

    // =========================================================================
    // PHASES
    // =========================================================================

    /// Alignment: build a fresh map, initialize every strategy, run them to
    /// convergence, then reset them.
    ///
    /// A strategy failing inside the loop is recorded in the report. A
    /// strategy failing to initialize aborts the phase and leaves the
    /// engine state as it was.
    pub fn phase1(&mut self) -> EngineResult<AlignmentReport> {
        self.state.can_align()?;

        let run_id = self.run_id.to_string();
        let strategies = self.alignment.len().to_string();
        let scope = ObservationScope::with_fields(
            "ALIGNMENT_PHASE",
            &[("run_id", run_id.as_str()), ("strategies", strategies.as_str())],
        );

        self.services.clear();
        let mut map = AlignmentMap::new(Arc::clone(&self.source), Arc::clone(&self.target));
        let mut ctx = AlignmentContext::new(&mut map, &self.parameters, &mut self.services);

        if let Err(failure) = self.alignment.initialize(&mut ctx) {
            scope.fail(&failure.to_string());
            return Err(failure.into());
        }
        let mut report = match self.alignment.run(&mut ctx) {
            Ok(report) => report,
            Err(e) => {
                scope.fail(&e.to_string());
                return Err(e.into());
            }
        };
        report.cleanup_failures = self.alignment.cleanup();

        scope.complete_with_fields(&[
            ("outcome", report.outcome.as_str()),
            ("rounds", &report.rounds.to_string()),
            ("failures", &report.failures.len().to_string()),
            ("matched_entities", &map.entity_map().len().to_string()),
        ]);

        let state = std::mem::take(&mut self.state);
        self.state = state.align(Arc::new(map), report.clone())?;
        Ok(report)
    }

    /// Presentation: build the change model from the frozen map and apply
    /// every presentation strategy once.
    ///
    /// Only legal after phase 1. A failing strategy stops the phase; the
    /// engine still moves to `Diffed` and keeps the partial change model.
    pub fn phase2(&mut self) -> EngineResult<()> {
        self.state.can_diff()?;
        let map = match self.state.map() {
            Some(map) => Arc::clone(map),
            None => return Err(EngineError::illegal_state("run phase 2", self.state.state_name())),
        };

        let run_id = self.run_id.to_string();
        let strategies = self.presentation.len().to_string();
        let scope = ObservationScope::with_fields(
            "PRESENTATION_PHASE",
            &[("run_id", run_id.as_str()), ("strategies", strategies.as_str())],
        );

        let mut changes = ChangeModel::from_alignment(Arc::clone(&map));
        let outcome = {
            let mut ctx =
                PresentationContext::new(&map, &mut changes, &self.parameters, &mut self.services);
            match self.presentation.initialize(&mut ctx) {
                Ok(()) => self.presentation.run(&mut ctx),
                Err(failure) => Err(failure),
            }
        };
        let changed = changes.non_equivalent_diffs().count().to_string();

        let state = std::mem::take(&mut self.state);
        self.state = state.diff(changes)?;

        match outcome {
            Ok(()) => {
                scope.complete_with_fields(&[("non_equivalent_diffs", changed.as_str())]);
                Ok(())
            }
            Err(failure) => {
                scope.fail(&failure.to_string());
                Err(failure.into())
            }
        }
    }

    /// Both phases back to back
    pub fn run(&mut self) -> EngineResult<AlignmentReport> {
        let report = self.phase1()?;
        self.phase2()?;
        Ok(report)
    }

    /// Log the heading of every non-equivalent diff. Returns how many
    /// were logged.
    pub fn display(&self) -> EngineResult<usize> {
        let changes = self
            .state
            .changes()
            .ok_or_else(|| EngineError::illegal_state("display changes", self.state.state_name()))?;

        let mut shown = 0;
        for diff in changes.non_equivalent_diffs() {
            log_event_with_fields(
                Event::DiffDisplayed,
                &[
                    ("description", &diff.description()),
                    ("diff_type", diff.diff_type().as_str()),
                    ("matches", &diff.matches().len().to_string()),
                ],
            );
            shown += 1;
        }
        Ok(shown)
    }
}

fn load_logged(side: &str, path: &Path) -> EngineResult<Ontology> {
    let ontology = Ontology::load(path)?;
    log_event_with_fields(
        Event::OntologyLoaded,
        &[
            ("side", side),
            ("path", &path.display().to_string()),
            ("axioms", &ontology.axioms().len().to_string()),
            ("entities", &ontology.signature().len().to_string()),
        ],
    );
    Ok(ontology)
}
