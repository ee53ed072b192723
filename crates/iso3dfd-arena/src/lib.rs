//! Padded field storage for the iso3dfd stencil engine.
//!
//! Every field lives in a dense [`FieldBuffer`] shaped by a shared
//! [`PaddedLayout`](iso3dfd_core::PaddedLayout). The two wavefield buffers
//! are owned by a [`WavefieldPair`] that alternates their roles each step:
//!
//! ```text
//! WavefieldPair
//! ├── prev: FieldBuffer  ←── current on even step counts
//! ├── next: FieldBuffer  ←── current on odd step counts
//! └── steps: u64         ←── advanced by publish()
//! ```
//!
//! Callers never reason about parity directly: [`WavefieldPair::wavefield`]
//! hands out [`FieldHandle`]s naming the current and previous time level,
//! and a handle becomes stale as soon as another step is published.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod error;
pub mod handle;
pub mod pingpong;
pub mod stats;

pub use buffer::FieldBuffer;
pub use error::ArenaError;
pub use handle::{BufferSlot, FieldHandle, Wavefield};
pub use pingpong::{StepGuard, WavefieldPair};
pub use stats::FieldStats;
