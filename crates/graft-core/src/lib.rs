//! Graft Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Graft
//! project scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            graft-cli (CLI)              │
//! │   (prompts, spinners, config, logging)  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  ScaffoldService → DirectoryGuard →     │
//! │  SelectionWizard → TemplateAcquisition  │
//! │  → MetadataMerge                        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ Filesystem, VersionControlClient,       │
//! │ Prompter, ProgressReporter              │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     graft-adapters (Infrastructure)     │
//! │  LocalFilesystem, GitCli, catalog I/O   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ Catalog, Selection, PackageDescriptor   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use graft_core::application::{ScaffoldRequest, ScaffoldService};
//!
//! // Adapters are injected by the caller (see graft-adapters / graft-cli).
//! let service = ScaffoldService::new(catalog, filesystem, vcs, prompter, reporter);
//! let request = ScaffoldRequest::new("demo", ".").with_framework("react");
//! let outcome = service.scaffold(&request).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AcquisitionResult, ScaffoldFailure, ScaffoldOutcome, ScaffoldReport, ScaffoldRequest,
        ScaffoldService, ScaffoldStage,
        ports::{Filesystem, ProgressReporter, Prompter, VersionControlClient},
    };
    pub use crate::domain::{
        Catalog, PackageDescriptor, ProjectMetadata, Selection, TemplateEntry, UiEntry, UiPlugin,
    };
    pub use crate::error::{GraftError, GraftResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
