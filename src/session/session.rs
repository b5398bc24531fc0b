use crate::{
    catalog::{
        catalog_model::Catalog,
        normalize::{NormalizeReport, normalize_with_report},
    },
    report::report_model::{GroupView, SessionSnapshot},
    selection::{
        engine::SelectionEngine,
        invariants::check_invariants,
        selection_model::{DEFAULT_POOL_SIZE, SelectionError, SelectionUpdate},
    },
    session::intent::UserIntent,
    source::record_source::RecordSource,
    trace::{logger::TraceLogger, trace::TraceEvent},
};

/// Knobs for building a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub pool_size: usize,
    pub seed: Option<u64>,
    pub verbose: u8,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            seed: None,
            verbose: 0,
        }
    }
}

/// One user's picking session: a loaded catalog, the selection engine over
/// it, and the trace of everything that happened.
///
/// Contract violations from the presentation layer (stale ids) are logged
/// and ignored; they never change state.
pub struct Session {
    engine: SelectionEngine,
    tracer: TraceLogger,
    source: String,
    fingerprint: String,
    normalize_report: NormalizeReport,
    load_error: Option<String>,
    verbose: u8,
    step: u64,
}

impl Session {
    /// Fetch and normalize the catalog, then draw the initial pools.
    ///
    /// A source that cannot be read leaves the session with an empty
    /// catalog and the error recorded; the session stays usable but inert.
    pub fn load(source: &dyn RecordSource, options: &SessionOptions, tracer: TraceLogger) -> Self {
        match source.fetch() {
            Ok(records) => {
                let (catalog, report) = normalize_with_report(&records);
                if options.verbose > 0 {
                    eprintln!(
                        "Loaded {} elements in {} groups from {} ({} records dropped)",
                        catalog.len(),
                        catalog.group_count(),
                        source.location(),
                        report.dropped()
                    );
                }
                Self::from_catalog(source.location(), catalog, report, options, tracer)
            }
            Err(e) => {
                eprintln!("Error: record source unavailable: {}", e);
                let mut session = Self::from_catalog(
                    source.location(),
                    Catalog::empty(),
                    NormalizeReport::default(),
                    options,
                    tracer,
                );
                session.load_error = Some(e.to_string());
                session.tracer.log(
                    &TraceEvent::now(0, "load_failed").with_rejection(e.to_string()),
                );
                session
            }
        }
    }

    pub fn from_catalog(
        source: &str,
        catalog: Catalog,
        normalize_report: NormalizeReport,
        options: &SessionOptions,
        tracer: TraceLogger,
    ) -> Self {
        let fingerprint = catalog.fingerprint();
        let engine = match options.seed {
            Some(seed) => SelectionEngine::with_seed(catalog, options.pool_size, seed),
            None => SelectionEngine::initialize(catalog, options.pool_size),
        };

        let session = Self {
            engine,
            tracer,
            source: source.to_string(),
            fingerprint,
            normalize_report,
            load_error: None,
            verbose: options.verbose,
            step: 0,
        };

        if !session.engine.state().catalog.is_empty() {
            session
                .tracer
                .log(&TraceEvent::now(0, "initialized").with_fingerprint(&session.fingerprint));
        }
        session
    }

    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    pub fn normalize_report(&self) -> &NormalizeReport {
        &self.normalize_report
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.load_error.is_none()
    }

    pub fn output_vector(&self) -> &[String] {
        self.engine.output_vector()
    }

    /// Apply one intent. On error the state is unchanged and the error is
    /// returned for the caller to display.
    pub fn apply(&mut self, intent: &UserIntent) -> Result<SelectionUpdate, SelectionError> {
        self.step += 1;

        let result = self.dispatch(intent);

        match &result {
            Ok(update) => {
                let event = match intent {
                    UserIntent::Select { .. } => TraceEvent::now(self.step, "select"),
                    UserIntent::Deselect { .. } => {
                        TraceEvent::now(self.step, "deselect").with_restored(update.restored)
                    }
                };
                self.tracer.log(&event.with_update(update));
            }
            Err(e) => self.reject(intent, e),
        }

        if self.verbose > 1 {
            for violation in check_invariants(self.engine.state()) {
                eprintln!("Warning: invariant violated after step {}: {:?}", self.step, violation);
            }
        }

        result
    }

    fn dispatch(&mut self, intent: &UserIntent) -> Result<SelectionUpdate, SelectionError> {
        match intent {
            UserIntent::Select { id, group } => {
                let group = match group {
                    Some(g) => g.clone(),
                    None => self
                        .engine
                        .state()
                        .group_offering(id)
                        .map(str::to_string)
                        .ok_or_else(|| SelectionError::NotVisible {
                            id: id.clone(),
                            group: "<any>".to_string(),
                        })?,
                };
                self.engine.select(id, &group)
            }
            UserIntent::Deselect { id } => self.engine.deselect(id),
        }
    }

    fn reject(&self, intent: &UserIntent, error: &SelectionError) {
        if self.verbose > 0 {
            eprintln!("Ignored: {}", error);
        }

        let (event, group) = match intent {
            UserIntent::Select { group, .. } => ("select_rejected", group.as_deref()),
            UserIntent::Deselect { .. } => ("deselect_rejected", None),
        };
        self.tracer.log(
            &TraceEvent::now(self.step, event)
                .with_element(error.id(), group)
                .with_rejection(error),
        );
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.engine.state();

        let groups = state
            .pools
            .iter()
            .map(|pool| GroupView {
                group: pool.group.clone(),
                catalog_size: state.catalog.group(&pool.group).map_or(0, |g| g.len()),
                offered: pool.elements().to_vec(),
            })
            .collect();

        SessionSnapshot {
            source: self.source.clone(),
            catalog_fingerprint: self.fingerprint.clone(),
            load_error: self.load_error.clone(),
            pool_size: self.engine.pool_size(),
            groups,
            selected: state.selected.clone(),
            output: state.output.clone(),
        }
    }
}
