//! The execution engine.
//!
//! Requests are bound into [`AnalyzerWrapper`]s, replay paths are validated,
//! and the [`Executor`] runs every wrapper over every replay, streaming
//! accepted rows to an [`Output`](crate::output::Output).

pub mod copy;
pub mod error;
pub mod executor;
pub mod paths;
pub mod request;
pub mod wrapper;

pub use error::{ExecError, Phase};
pub use executor::{Executor, ExecutorBuilder};
pub use paths::{collect_replay_dir, filter_replay_paths};
pub use request::{AnalyzerRequest, FilterMode, RequestError};
pub use wrapper::{build_wrappers, AnalyzerWrapper};
