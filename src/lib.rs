// askcat - selection-to-answer AI pipeline
//
// Core flow: caller -> orchestrator -> bounded expiring cache -> (on miss)
// debounced dispatch -> backoff retry -> provider -> network, with the
// result cached and routed to a caller-supplied sink.

pub mod cache;
pub mod cli;
pub mod config;
pub mod delivery;
pub mod error;
pub mod orchestrator;
pub mod providers;
pub mod utils;
