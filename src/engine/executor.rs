//! Runs bound analyzers over a set of replays.

use std::any::Any;
use std::fs;
use std::io::ErrorKind;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use super::copy;
use super::error::{ExecError, Phase};
use super::paths::filter_replay_paths;
use super::request::AnalyzerRequest;
use super::wrapper::{build_wrappers, AnalyzerWrapper};
use crate::analyzer::{AnalyzerContext, AnalyzerError, Catalog};
use crate::output::{NoOutput, Output};
use crate::replay::{Replay, ReplayDecoder, ScrepJsonDecoder};

/// Collects the inputs of a run and validates them into an [`Executor`].
pub struct ExecutorBuilder<'a> {
    replay_paths: Vec<PathBuf>,
    requests: Vec<AnalyzerRequest>,
    context: AnalyzerContext,
    output: Box<dyn Output + 'a>,
    copy_to: Option<PathBuf>,
    catalog: &'a Catalog,
    decoder: Box<dyn ReplayDecoder + 'a>,
    progress: ProgressBar,
}

impl<'a> ExecutorBuilder<'a> {
    /// Start a run over `replay_paths` with the builtin catalog, the screp
    /// JSON decoder and no output.
    pub fn new<I, P>(replay_paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            replay_paths: replay_paths.into_iter().map(Into::into).collect(),
            requests: Vec::new(),
            context: AnalyzerContext::default(),
            output: Box::new(NoOutput),
            copy_to: None,
            catalog: Catalog::builtin(),
            decoder: Box::new(ScrepJsonDecoder::new()),
            progress: ProgressBar::hidden(),
        }
    }

    pub fn requests(mut self, requests: impl IntoIterator<Item = AnalyzerRequest>) -> Self {
        self.requests.extend(requests);
        self
    }

    pub fn context(mut self, context: AnalyzerContext) -> Self {
        self.context = context;
        self
    }

    pub fn output(mut self, output: Box<dyn Output + 'a>) -> Self {
        self.output = output;
        self
    }

    /// Copy every accepted replay into `dir`. An empty path disables copying.
    pub fn copy_to(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.copy_to = if dir.as_os_str().is_empty() {
            None
        } else {
            Some(dir)
        };
        self
    }

    pub fn catalog(mut self, catalog: &'a Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn decoder(mut self, decoder: Box<dyn ReplayDecoder + 'a>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Bar ticked once per replay. Hidden unless set.
    pub fn progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Validate everything and produce the executor.
    ///
    /// Never fails: an unusable copy directory disables copying, bad paths
    /// are dropped and bad requests are dropped. Each of those is returned
    /// as a setup error.
    pub fn build(self) -> (Executor<'a>, Vec<ExecError>) {
        let mut errors = Vec::new();

        let copy_to = match self.copy_to {
            Some(dir) => match check_copy_dir(&dir) {
                Ok(()) => Some(dir),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
            None => None,
        };

        let (replay_paths, path_errors) =
            filter_replay_paths(&self.replay_paths, self.decoder.as_ref());
        errors.extend(path_errors);

        let (wrappers, wrapper_errors) = build_wrappers(&self.requests, self.catalog);
        errors.extend(wrapper_errors);

        debug!(
            replays = replay_paths.len(),
            analyzers = wrappers.len(),
            setup_errors = errors.len(),
            "executor ready"
        );

        let executor = Executor {
            replay_paths,
            wrappers,
            context: self.context,
            output: self.output,
            copy_to,
            decoder: self.decoder,
            progress: self.progress,
        };
        (executor, errors)
    }
}

fn check_copy_dir(dir: &Path) -> Result<(), ExecError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ExecError::CopyDirUnusable {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(ExecError::CopyDirMissing(dir.to_path_buf()))
        }
        Err(e) => Err(ExecError::CopyDirUnusable {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

/// A validated run: sorted wrappers, filtered paths and the output sink.
pub struct Executor<'a> {
    replay_paths: Vec<PathBuf>,
    wrappers: Vec<AnalyzerWrapper>,
    context: AnalyzerContext,
    output: Box<dyn Output + 'a>,
    copy_to: Option<PathBuf>,
    decoder: Box<dyn ReplayDecoder + 'a>,
    progress: ProgressBar,
}

impl<'a> Executor<'a> {
    /// Replays that survived path filtering, in processing order.
    pub fn replay_paths(&self) -> &[PathBuf] {
        &self.replay_paths
    }

    /// Bound wrappers in evaluation order.
    pub fn wrappers(&self) -> &[AnalyzerWrapper] {
        &self.wrappers
    }

    /// Display names of the output columns, in row order.
    pub fn columns(&self) -> Vec<&str> {
        self.wrappers
            .iter()
            .filter(|w| !w.is_filter())
            .map(|w| w.display_name.as_str())
            .collect()
    }

    /// Run every replay through the wrappers, streaming rows to the output.
    pub fn execute(&mut self) -> Vec<ExecError> {
        self.run(false).1
    }

    /// Like [`execute`](Self::execute), also returning the accepted rows.
    /// Rows hold the output columns only, matching [`columns`](Self::columns).
    pub fn execute_with_results(&mut self) -> (Vec<Vec<String>>, Vec<ExecError>) {
        self.run(true)
    }

    fn run(&mut self, keep_rows: bool) -> (Vec<Vec<String>>, Vec<ExecError>) {
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut matched = 0usize;
        let mut errors: Vec<ExecError> = Vec::new();

        if let Err(e) = self.output.pre(&self.wrappers) {
            errors.push(e.into());
        }

        if self.wrappers.is_empty() {
            warn!(
                replays = self.replay_paths.len(),
                "no analyzers to run; skipping all replays"
            );
        } else {
            let mask: Vec<bool> = self.wrappers.iter().map(|w| !w.is_filter()).collect();
            self.progress.set_length(self.replay_paths.len() as u64);

            for path in &self.replay_paths {
                if let Some(name) = path.file_name() {
                    self.progress.set_message(name.to_string_lossy().into_owned());
                }
                if let Some(row) = self.process_replay(path, &mut errors) {
                    matched += 1;
                    if let Err(e) = self.output.replay_results(&row) {
                        errors.push(e.into());
                    }
                    if let Some(dir) = &self.copy_to {
                        copy_replay(path, dir, &mut errors);
                    }
                    if keep_rows {
                        rows.push(
                            row.into_iter()
                                .zip(&mask)
                                .filter(|(_, keep)| **keep)
                                .map(|(value, _)| value)
                                .collect(),
                        );
                    }
                }
                self.progress.inc(1);
            }
            self.progress.finish_and_clear();
        }

        if let Err(e) = self.output.post() {
            errors.push(e.into());
        }

        info!(
            replays = self.replay_paths.len(),
            matched,
            errors = errors.len(),
            "run finished"
        );
        (rows, errors)
    }

    /// Decode and evaluate one replay. `None` means it was rejected or could
    /// not be read.
    fn process_replay(&self, path: &Path, errors: &mut Vec<ExecError>) -> Option<Vec<String>> {
        debug!(replay = %path.display(), "reading replay");
        let mut replay = match self.decoder.parse_file(path) {
            Ok(replay) => replay,
            Err(e) => {
                errors.push(e.into());
                return None;
            }
        };

        let decoder = self.decoder.as_ref();
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| decoder.compute(&mut replay))) {
            errors.push(ExecError::ComputePanic {
                replay: path.to_path_buf(),
                message: panic_message(payload.as_ref()),
            });
            return None;
        }

        let mut wrappers: Vec<AnalyzerWrapper> =
            self.wrappers.iter().map(AnalyzerWrapper::fresh).collect();
        evaluate(&mut wrappers, &replay, &self.context, path, errors)
    }
}

fn copy_replay(path: &Path, dir: &Path, errors: &mut Vec<ExecError>) {
    let dest = copy::destination(path, dir);
    match copy::copy_file(path, &dest) {
        Ok(()) => debug!(replay = %path.display(), dest = %dest.display(), "copied replay"),
        Err(source) => errors.push(ExecError::Copy {
            replay: path.to_path_buf(),
            dest,
            source,
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run the metadata phase, then stream commands, over fresh wrappers.
///
/// Returns the full row, filter cells included, or `None` as soon as a
/// filter rejects the replay.
fn evaluate(
    wrappers: &mut [AnalyzerWrapper],
    replay: &Replay,
    ctx: &AnalyzerContext,
    path: &Path,
    errors: &mut Vec<ExecError>,
) -> Option<Vec<String>> {
    let mut row = vec![String::new(); wrappers.len()];
    let mut active = wrappers.len();

    for (wrapper, cell) in wrappers.iter_mut().zip(row.iter_mut()) {
        let outcome = wrapper.analyzer.start_reading_replay(replay, ctx, path);
        if settle(wrapper, outcome, cell, Phase::Metadata, path, errors) {
            return None;
        }
        if wrapper.removed {
            active -= 1;
        }
    }

    for command in &replay.commands {
        if active == 0 {
            break;
        }
        for (wrapper, cell) in wrappers.iter_mut().zip(row.iter_mut()) {
            if wrapper.removed {
                continue;
            }
            let outcome = wrapper.analyzer.process_command(command);
            if settle(wrapper, outcome, cell, Phase::Commands, path, errors) {
                return None;
            }
            if wrapper.removed {
                active -= 1;
            }
        }
    }

    // Commands ran out before these finished; take what they have.
    for (wrapper, cell) in wrappers.iter().zip(row.iter_mut()) {
        if wrapper.removed {
            continue;
        }
        *cell = wrapper.analyzer.is_done().0.to_string();
        if wrapper.mode.rejects(cell) {
            debug!(replay = %path.display(), filter = %wrapper.display_name, "replay rejected at end of stream");
            return None;
        }
    }

    Some(row)
}

/// Record the outcome of one analyzer call. Returns true when the replay is
/// rejected.
fn settle(
    wrapper: &mut AnalyzerWrapper,
    outcome: Result<bool, AnalyzerError>,
    cell: &mut String,
    phase: Phase,
    path: &Path,
    errors: &mut Vec<ExecError>,
) -> bool {
    match outcome {
        Ok(false) => return false,
        Ok(true) => *cell = wrapper.analyzer.is_done().0.to_string(),
        Err(source) => {
            errors.push(ExecError::Analyzer {
                replay: path.to_path_buf(),
                analyzer: wrapper.display_name.clone(),
                phase,
                source,
            });
            cell.clear();
        }
    }
    wrapper.removed = true;

    let rejected = wrapper.mode.rejects(cell);
    if rejected {
        debug!(replay = %path.display(), filter = %wrapper.display_name, "replay rejected");
    }
    rejected
}
