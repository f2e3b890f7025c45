//! Directory Safety Guard - decides whether the target directory may be used.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{Filesystem, Prompter, VCS_METADATA_DIR},
    error::GraftResult,
};

/// Checks the target directory and, with consent, clears it.
pub struct DirectoryGuard<'a> {
    filesystem: &'a dyn Filesystem,
    prompter: &'a dyn Prompter,
}

impl<'a> DirectoryGuard<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, prompter: &'a dyn Prompter) -> Self {
        Self {
            filesystem,
            prompter,
        }
    }

    /// Returns `true` when scaffolding may proceed into `target_dir`.
    ///
    /// Absent or empty directories pass without a prompt; a lone `.git` entry
    /// counts as empty. Otherwise the user is asked (default: no) whether the
    /// contents may be erased. On consent every entry except `.git` is
    /// removed. No backup is taken.
    #[instrument(skip_all, fields(target = %target_dir.display()))]
    pub fn ensure_writable(&self, target_dir: &Path) -> GraftResult<bool> {
        if !self.filesystem.exists(target_dir) {
            debug!("Target directory does not exist");
            return Ok(true);
        }

        let entries = self.filesystem.list_dir(target_dir)?;
        if is_effectively_empty(&entries) {
            debug!("Target directory is empty");
            return Ok(true);
        }

        let question = format!(
            "Target directory \"{}\" is not empty. Remove existing files and continue?",
            target_dir.display()
        );
        if !self.prompter.confirm(&question, false)? {
            info!("Overwrite declined");
            return Ok(false);
        }

        let mut removed = 0usize;
        for entry in entries.iter().filter(|e| e.as_str() != VCS_METADATA_DIR) {
            self.filesystem.remove_all(&target_dir.join(entry))?;
            removed += 1;
        }
        warn!(removed, "Cleared existing directory contents");

        Ok(true)
    }
}

fn is_effectively_empty(entries: &[String]) -> bool {
    match entries {
        [] => true,
        [only] => only.as_str() == VCS_METADATA_DIR,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFilesystem, MockPrompter};
    use std::path::PathBuf;

    fn target() -> PathBuf {
        PathBuf::from("/work/demo")
    }

    #[test]
    fn absent_directory_passes_without_prompt() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        let prompter = MockPrompter::new();

        let guard = DirectoryGuard::new(&fs, &prompter);
        assert!(guard.ensure_writable(&target()).unwrap());
    }

    #[test]
    fn empty_directory_passes_without_prompt() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_list_dir().returning(|_| Ok(vec![]));
        let prompter = MockPrompter::new();

        let guard = DirectoryGuard::new(&fs, &prompter);
        assert!(guard.ensure_writable(&target()).unwrap());
    }

    #[test]
    fn git_only_directory_counts_as_empty() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_list_dir()
            .returning(|_| Ok(vec![".git".to_string()]));
        let prompter = MockPrompter::new();

        let guard = DirectoryGuard::new(&fs, &prompter);
        assert!(guard.ensure_writable(&target()).unwrap());
    }

    #[test]
    fn declining_leaves_directory_untouched() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_list_dir()
            .returning(|_| Ok(vec!["src".to_string()]));
        fs.expect_remove_all().never();

        let mut prompter = MockPrompter::new();
        prompter
            .expect_confirm()
            .withf(|prompt, default| prompt.contains("is not empty") && !*default)
            .times(1)
            .returning(|_, _| Ok(false));

        let guard = DirectoryGuard::new(&fs, &prompter);
        assert!(!guard.ensure_writable(&target()).unwrap());
    }

    #[test]
    fn confirming_clears_everything_but_git() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_list_dir().returning(|_| {
            Ok(vec![
                ".git".to_string(),
                "README.md".to_string(),
                "src".to_string(),
            ])
        });
        fs.expect_remove_all()
            .withf(|p| p == Path::new("/work/demo/README.md"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_remove_all()
            .withf(|p| p == Path::new("/work/demo/src"))
            .times(1)
            .returning(|_| Ok(()));

        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().returning(|_, _| Ok(true));

        let guard = DirectoryGuard::new(&fs, &prompter);
        assert!(guard.ensure_writable(&target()).unwrap());
    }

    #[test]
    fn prompt_failure_propagates() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_list_dir()
            .returning(|_| Ok(vec!["src".to_string()]));
        fs.expect_remove_all().never();

        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().returning(|_, _| {
            Err(crate::application::ApplicationError::PromptFailed {
                reason: "interrupted".into(),
            }
            .into())
        });

        let guard = DirectoryGuard::new(&fs, &prompter);
        assert!(guard.ensure_writable(&target()).is_err());
    }
}
