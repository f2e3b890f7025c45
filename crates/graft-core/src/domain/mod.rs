// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Graft.
//!
//! This module contains pure scaffolding rules: the catalogs, the selection a
//! user ends up with, and the package descriptor merge. All I/O (filesystem,
//! `git`, prompts) is handled via ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable catalogs**: loaded once, shared by reference
//!
pub mod entities;
pub mod error;

mod validation;

pub use entities::{
    catalog::{Catalog, LATEST_VERSION, TemplateEntry, UiEntry, UiPlugin},
    descriptor::{DESCRIPTOR_FILE, PackageDescriptor},
    selection::{DEFAULT_BRANCH, DEFAULT_VERSION, ProjectMetadata, Selection},
};

pub use error::{DomainError, ErrorCategory};

pub use validation::DomainValidator;
