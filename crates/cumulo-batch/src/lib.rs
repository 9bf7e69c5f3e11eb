#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod chunk;
mod dispatcher;
mod outcome;

pub use chunk::chunked;
pub use dispatcher::Dispatcher;
pub use outcome::{BatchSummary, Outcome};

/// Tracing target for batch dispatch operations.
pub const TRACING_TARGET: &str = "cumulo_batch";
