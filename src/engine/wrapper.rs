//! Bound analyzer instances and their evaluation order.

use super::error::ExecError;
use super::request::{AnalyzerRequest, FilterMode};
use crate::analyzer::{Analyzer, Catalog};

/// An analyzer with its arguments bound, plus its place in the row.
#[derive(Debug, Clone)]
pub struct AnalyzerWrapper {
    pub analyzer: Box<dyn Analyzer>,
    pub mode: FilterMode,
    /// Output label, e.g. `my-race-is(Zerg)`.
    pub display_name: String,
    /// Unique per request, e.g. `my-race-is_3`.
    pub name: String,
    /// Index in the sorted wrapper list.
    pub pos: usize,
    /// Set once the analyzer no longer needs any input for the current replay.
    pub removed: bool,
}

impl AnalyzerWrapper {
    pub fn is_filter(&self) -> bool {
        self.mode.is_filter()
    }

    /// Fresh copy for a new replay: cloned analyzer, `removed` cleared.
    pub fn fresh(&self) -> Self {
        Self {
            removed: false,
            ..self.clone()
        }
    }
}

/// Instantiate and bind every request, then order the result: filters first
/// so rejections happen as early as possible, then by analyzer name. The
/// sort is stable, so equal keys keep request order.
///
/// Unknown names and bad arguments are reported and the request dropped.
pub fn build_wrappers(
    requests: &[AnalyzerRequest],
    catalog: &Catalog,
) -> (Vec<AnalyzerWrapper>, Vec<ExecError>) {
    let mut wrappers = Vec::with_capacity(requests.len());
    let mut errors = Vec::new();

    for (i, request) in requests.iter().enumerate() {
        let mut analyzer = match catalog.instantiate(&request.name) {
            Some(a) => a,
            None => {
                errors.push(ExecError::UnknownAnalyzer(request.name.clone()));
                continue;
            }
        };
        if let Err(source) = analyzer.set_arguments(&request.args) {
            errors.push(ExecError::InvalidArguments {
                analyzer: request.name.clone(),
                source,
            });
            continue;
        }
        wrappers.push(AnalyzerWrapper {
            name: format!("{}_{}", analyzer.name(), i),
            display_name: request.display_name(),
            mode: request.mode,
            pos: 0,
            removed: false,
            analyzer,
        });
    }

    wrappers.sort_by(|a, b| {
        b.is_filter()
            .cmp(&a.is_filter())
            .then_with(|| a.analyzer.name().cmp(b.analyzer.name()))
    });
    for (pos, wrapper) in wrappers.iter_mut().enumerate() {
        wrapper.pos = pos;
    }

    (wrappers, errors)
}
