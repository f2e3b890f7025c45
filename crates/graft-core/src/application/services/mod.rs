//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases. `ScaffoldService` sequences the other four.

pub mod acquisition;
pub mod directory_guard;
pub mod metadata_merge;
pub mod scaffold_service;
pub mod selection_wizard;

pub use acquisition::{AcquisitionResult, AcquisitionStep, DEFAULT_REMOTE, TemplateAcquisition};
pub use directory_guard::DirectoryGuard;
pub use metadata_merge::MetadataMerge;
pub use scaffold_service::{
    ScaffoldFailure, ScaffoldOutcome, ScaffoldReport, ScaffoldRequest, ScaffoldService,
    ScaffoldStage,
};
pub use selection_wizard::{SelectionRequest, SelectionWizard};
