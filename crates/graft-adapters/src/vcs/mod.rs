//! Version-control adapters.

mod git;

pub use git::{DEFAULT_GIT_BINARY, GitCli};
