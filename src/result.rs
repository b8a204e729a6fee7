//! Error handling and result types for Shipwright.
//!
//! A unified `Result<T>` alias over `color_eyre`, giving every fallible
//! function in the crate consistent, context-chainable error reporting.
//! Returning `Err` from `main` is what produces the process's non-zero
//! exit status; every graceful no-op path returns `Ok(())` instead.

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout Shipwright.
///
/// Use `.wrap_err()` to add context as errors propagate toward `main`.
pub type Result<T> = EyreResult<T>;
