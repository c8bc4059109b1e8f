//! pstat core library.
//!
//! The formula engine ([`formula`]) is pure and stateless. Around it sit the
//! request model shared by the CLI and batch mode, chart state, rendering and
//! the CLI itself.

pub mod app;
pub mod batch;
pub mod chart;
pub mod cli;
pub mod exit_codes;
pub mod formula;
pub mod logging;
pub mod output;
pub mod request;
pub mod series;

pub use chart::{ChartHandle, ChartId, ChartRegistry};
pub use exit_codes::ExitCode;
pub use request::{evaluate, CalculationRequest};
