//! Utility functions and helpers for the askcat pipeline.
//!
//! This module provides cross-cutting concerns like structured logging,
//! secret sanitization, retry with exponential backoff, and trailing-edge
//! debouncing.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization with security filters.
//! - `retry`: Bounded retry with deterministic exponential backoff.
//! - `debounce`: Coalescing of rapid repeated invocations.

pub mod debounce;
pub mod logging;
pub mod retry;
