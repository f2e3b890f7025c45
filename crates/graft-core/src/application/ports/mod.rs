//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `graft-adapters` and the CLI
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `VersionControlClient`: Sparse checkout plumbing
//!   - `Prompter`: Interactive questions
//!   - `ProgressReporter`: Stage progress display
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, ProgressReporter, Prompter, VCS_METADATA_DIR, VersionControlClient};

#[cfg(test)]
pub use output::{MockFilesystem, MockProgressReporter, MockPrompter, MockVersionControlClient};
