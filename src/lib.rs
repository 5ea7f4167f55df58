//! # Gas Blend Models
//!
//! Partial-pressure and continuous gas blending for scuba cylinders, built
//! as [`twine_core::Model`] implementations.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Gas mixtures, cylinders, equations of state, unit systems,
//!   and dive-planning metrics used by the models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because hosts need them
//! to describe cylinders and mixtures, but their APIs are not stable.
//! Breaking changes may occur as needed.
//!
//! Model-specific code lives in each model's internal `core` module and is
//! not part of the public API.
//!
//! ## Logging
//!
//! Solvers emit [`tracing`] events at `debug` and `trace` level.
//! The crate never installs a subscriber.

pub mod models;
pub mod support;
