//! Replay model, decoding and derived statistics.
//!
//! Analyzers never read files themselves: a [`ReplayDecoder`] turns a path
//! into a [`Replay`], the engine asks the decoder to fill in derived stats,
//! and analyzers then read the header and command stream.

mod compute;
mod decoder;
mod model;

pub use compute::compute_derived_stats;
pub use decoder::{DecodeError, ReplayDecoder, ScrepJsonDecoder};
pub use model::{
    Command, CommandKind, Computed, Frame, Header, Player, PlayerDesc, Race, Replay, FRAME_MILLIS,
};
