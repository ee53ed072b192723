//! Time-stepping engine for the iso3dfd stencil.
//!
//! Provides the [`IterationDriver`] that advances a wavefield pair with a
//! chosen kernel, an independent sequential [`ReferenceEngine`] with the
//! [`verify`] comparison, [`PerfReport`] throughput metrics, and the
//! [`Session`] that strings them together into a benchmark run:
//!
//! ```text
//! RunConfig ─validate─▶ Session::run
//!   1. allocate prev / next / vel, apply InitialCondition
//!   2. warm-up steps
//!   3. timed steps            ─▶ PerfReport
//!   4. reference run + verify ─▶ VerifyReport
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod init;
pub mod metrics;
pub mod reference;
pub mod session;
pub mod verify;

pub use config::{ConfigError, RunConfig};
pub use driver::{DriverError, IterationDriver};
pub use init::{InitialCondition, SourceSpec};
pub use metrics::PerfReport;
pub use reference::ReferenceEngine;
pub use session::{RunError, RunReport, Session};
pub use verify::{verify, Mismatch, VerifyError, VerifyReport};
