//! Infrastructure adapters for Graft.
//!
//! This crate implements the ports defined in `graft-core::application::ports`
//! that touch the machine: disk and the `git` binary. It also carries the
//! built-in catalog and the TOML catalog loader.

pub mod builtin_catalog;
pub mod catalog_loader;
pub mod filesystem;
pub mod vcs;

// Re-export commonly used adapters
pub use catalog_loader::{CatalogLoader, load_catalog};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use vcs::GitCli;
