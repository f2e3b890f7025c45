//! Application layer for Graft.
//!
//! This layer contains:
//! - **Services**: the scaffolding pipeline (guard, wizard, acquisition,
//!   merge) and the `ScaffoldService` orchestrator
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! catalog rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    AcquisitionResult, AcquisitionStep, DirectoryGuard, MetadataMerge, ScaffoldFailure,
    ScaffoldOutcome, ScaffoldReport, ScaffoldRequest, ScaffoldService, ScaffoldStage,
    SelectionRequest, SelectionWizard, TemplateAcquisition,
};

pub use ports::{Filesystem, ProgressReporter, Prompter, VersionControlClient};

pub use error::ApplicationError;
