//! End-to-end scaffolding runs over the in-memory filesystem with a scripted
//! version-control client standing in for `git`.

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use graft_adapters::{MemoryFilesystem, builtin_catalog::builtin_catalog};
use graft_core::{
    application::{
        ApplicationError, ScaffoldOutcome, ScaffoldRequest, ScaffoldService, ScaffoldStage,
        ports::{Filesystem, ProgressReporter, Prompter, VersionControlClient},
    },
    domain::{Catalog, PackageDescriptor, TemplateEntry, UiEntry, UiPlugin},
    error::{GraftError, GraftResult},
};

// ── Fakes ────────────────────────────────────────────────────────────────────

/// Pretends to be a remote holding `{subpath: {relative file: content}}`.
#[derive(Clone)]
struct ScriptedVcs {
    fs: MemoryFilesystem,
    remote: Arc<BTreeMap<String, Vec<(String, String)>>>,
    sparse: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
    fail_pull: bool,
}

impl ScriptedVcs {
    fn new(fs: &MemoryFilesystem, remote: BTreeMap<String, Vec<(String, String)>>) -> Self {
        Self {
            fs: fs.clone(),
            remote: Arc::new(remote),
            sparse: Arc::default(),
            calls: Arc::default(),
            fail_pull: false,
        }
    }

    fn failing_pull(mut self) -> Self {
        self.fail_pull = true;
        self
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl VersionControlClient for ScriptedVcs {
    fn ensure_available(&self) -> GraftResult<()> {
        Ok(())
    }

    fn init(&self, workdir: &Path) -> GraftResult<()> {
        self.record("init");
        self.fs.create_dir_all(&workdir.join(".git"))
    }

    fn add_remote(&self, _workdir: &Path, name: &str, _url: &str) -> GraftResult<()> {
        self.record(&format!("remote {name}"));
        Ok(())
    }

    fn enable_sparse_checkout(&self, _workdir: &Path) -> GraftResult<()> {
        self.record("sparse");
        Ok(())
    }

    fn set_sparse_path(&self, _workdir: &Path, path: &str) -> GraftResult<()> {
        self.record(&format!("sparse-path {path}"));
        self.sparse.lock().unwrap().push(path.to_string());
        Ok(())
    }

    fn pull(&self, workdir: &Path, remote: &str, branch: &str) -> GraftResult<()> {
        self.record(&format!("pull {remote} {branch}"));
        if self.fail_pull {
            return Err(ApplicationError::VcsCommandFailed {
                command: format!("git pull {remote} {branch}"),
                reason: "fatal: could not read from remote repository".into(),
            }
            .into());
        }

        for subpath in self.sparse.lock().unwrap().iter() {
            for (file, content) in self.remote.get(subpath).into_iter().flatten() {
                self.fs
                    .seed_file(workdir.join(subpath).join(file), content)?;
            }
        }
        Ok(())
    }

    fn remove_metadata(&self, workdir: &Path) -> GraftResult<()> {
        self.record("remove-metadata");
        self.fs.remove_all(&workdir.join(".git"))
    }
}

/// Answers prompts from a script.
struct ScriptedPrompter {
    selections: Mutex<VecDeque<usize>>,
    confirm: bool,
    inputs: BTreeMap<&'static str, &'static str>,
}

impl ScriptedPrompter {
    fn new(selections: impl IntoIterator<Item = usize>) -> Self {
        Self {
            selections: Mutex::new(selections.into_iter().collect()),
            confirm: true,
            inputs: BTreeMap::new(),
        }
    }

    fn declining(mut self) -> Self {
        self.confirm = false;
        self
    }

    fn answering(mut self, prompt: &'static str, answer: &'static str) -> Self {
        self.inputs.insert(prompt, answer);
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, prompt: &str, _choices: &[String]) -> GraftResult<usize> {
        self.selections
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| {
                ApplicationError::PromptFailed {
                    reason: format!("unexpected prompt: {prompt}"),
                }
                .into()
            })
    }

    fn confirm(&self, _prompt: &str, _default: bool) -> GraftResult<bool> {
        Ok(self.confirm)
    }

    fn input(&self, prompt: &str, default: &str) -> GraftResult<String> {
        Ok(self
            .inputs
            .get(prompt)
            .copied()
            .unwrap_or(default)
            .to_string())
    }
}

#[derive(Clone, Default)]
struct RecordingReporter(Arc<Mutex<Vec<String>>>);

impl ProgressReporter for RecordingReporter {
    fn stage_started(&self, stage: ScaffoldStage) {
        self.0.lock().unwrap().push(format!("start {stage:?}"));
    }

    fn stage_succeeded(&self, stage: ScaffoldStage) {
        self.0.lock().unwrap().push(format!("ok {stage:?}"));
    }

    fn stage_failed(&self, stage: ScaffoldStage) {
        self.0.lock().unwrap().push(format!("fail {stage:?}"));
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

const TEMPLATE_DESCRIPTOR: &str = r#"{
  "name": "template",
  "version": "0.0.0",
  "private": true,
  "scripts": { "dev": "vite" },
  "dependencies": { "react": "^18.2.0" }
}"#;

fn remote() -> BTreeMap<String, Vec<(String, String)>> {
    let files = |extra: &[(&str, &str)]| {
        let mut files = vec![
            ("package.json".to_string(), TEMPLATE_DESCRIPTOR.to_string()),
            (".gitignore".to_string(), "node_modules\n".to_string()),
            ("src/main.jsx".to_string(), "render()".to_string()),
        ];
        files.extend(extra.iter().map(|(p, c)| (p.to_string(), c.to_string())));
        files
    };

    BTreeMap::from([
        ("basic-none".to_string(), files(&[])),
        ("basic-antd".to_string(), files(&[])),
        ("basic-mui".to_string(), files(&[("src/theme.js", "theme")])),
        (
            "admin-none".to_string(),
            vec![("README.md".to_string(), "no descriptor".to_string())],
        ),
    ])
}

fn service(
    catalog: Catalog,
    fs: &MemoryFilesystem,
    vcs: &ScriptedVcs,
    prompter: ScriptedPrompter,
    reporter: &RecordingReporter,
) -> ScaffoldService {
    ScaffoldService::new(
        catalog,
        Box::new(fs.clone()),
        Box::new(vcs.clone()),
        Box::new(prompter),
        Box::new(reporter.clone()),
    )
}

fn descriptor(fs: &MemoryFilesystem, dir: &Path) -> PackageDescriptor {
    let source = fs.read_file(&dir.join("package.json")).unwrap();
    PackageDescriptor::parse(&source).unwrap()
}

fn base() -> PathBuf {
    PathBuf::from("/work")
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn creates_project_into_empty_directory() {
    let fs = MemoryFilesystem::new();
    let vcs = ScriptedVcs::new(&fs, remote());
    let reporter = RecordingReporter::default();
    // react, basic, antd
    let prompter = ScriptedPrompter::new([1, 0, 1])
        .answering("Author", "ada")
        .answering("Description", "demo app");

    let outcome = service(builtin_catalog().unwrap(), &fs, &vcs, prompter, &reporter)
        .scaffold(&ScaffoldRequest::new("demo", base()))
        .unwrap();

    let ScaffoldOutcome::Created(report) = outcome else {
        panic!("expected a created project, got {outcome:?}");
    };
    let dir = base().join("demo");
    assert_eq!(report.project_dir, dir);
    assert_eq!(report.selection.template_subpath(), "basic-antd");

    // Flattened, dotfiles included, subdirectory gone.
    assert!(fs.exists(&dir.join(".gitignore")));
    assert!(fs.exists(&dir.join("src/main.jsx")));
    assert!(!fs.exists(&dir.join("basic-antd")));
    // Fresh history.
    assert!(fs.exists(&dir.join(".git")));

    let merged = descriptor(&fs, &dir);
    let field = |key| merged.get(key).and_then(|v| v.as_str());
    assert_eq!(field("name"), Some("demo"));
    assert_eq!(field("author"), Some("ada"));
    assert_eq!(field("version"), Some("1.0.0"));
    assert_eq!(field("description"), Some("demo app"));
    assert_eq!(merged.get("private").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(merged.dependency("react"), Some("^18.2.0"));
    assert_eq!(merged.dependency("antd"), Some("^5.12.0"));

    assert_eq!(
        vcs.calls(),
        [
            "init",
            "remote origin",
            "sparse",
            "sparse-path basic-antd",
            "pull origin main",
            "remove-metadata",
            "init",
        ]
    );
    assert_eq!(
        *reporter.0.lock().unwrap(),
        [
            "start Acquisition",
            "ok Acquisition",
            "start MetadataMerge",
            "ok MetadataMerge",
        ]
    );
}

#[test]
fn declining_overwrite_cancels_without_touching_anything() {
    let fs = MemoryFilesystem::new();
    fs.seed_file("/work/demo/notes.txt", "keep me").unwrap();
    let vcs = ScriptedVcs::new(&fs, remote());
    let reporter = RecordingReporter::default();
    let prompter = ScriptedPrompter::new([]).declining();

    let outcome = service(builtin_catalog().unwrap(), &fs, &vcs, prompter, &reporter)
        .scaffold(&ScaffoldRequest::new("demo", base()))
        .unwrap();

    assert_eq!(
        outcome,
        ScaffoldOutcome::Cancelled {
            target_dir: base().join("demo")
        }
    );
    assert_eq!(fs.list_files(), [PathBuf::from("/work/demo/notes.txt")]);
    assert!(vcs.calls().is_empty());
    assert!(reporter.0.lock().unwrap().is_empty());
}

#[test]
fn confirming_overwrite_replaces_old_contents() {
    let fs = MemoryFilesystem::new();
    fs.seed_file("/work/demo/notes.txt", "old").unwrap();
    let vcs = ScriptedVcs::new(&fs, remote());
    let prompter = ScriptedPrompter::new([0]);

    let request = ScaffoldRequest::new("demo", base())
        .with_framework("react")
        .with_template("basic");
    service(
        builtin_catalog().unwrap(),
        &fs,
        &vcs,
        prompter,
        &RecordingReporter::default(),
    )
    .scaffold(&request)
    .unwrap();

    assert!(!fs.exists(Path::new("/work/demo/notes.txt")));
    assert!(fs.exists(Path::new("/work/demo/package.json")));
}

#[test]
fn failed_pull_leaves_no_directory_behind() {
    let fs = MemoryFilesystem::new();
    let vcs = ScriptedVcs::new(&fs, remote()).failing_pull();
    let reporter = RecordingReporter::default();
    let prompter = ScriptedPrompter::new([1, 0, 0]);

    let err = service(builtin_catalog().unwrap(), &fs, &vcs, prompter, &reporter)
        .scaffold(&ScaffoldRequest::new("demo", base()))
        .unwrap_err();

    assert_eq!(err.stage, ScaffoldStage::Acquisition);
    assert!(matches!(
        err.error,
        GraftError::Application(ApplicationError::AcquisitionFailed { .. })
    ));
    assert!(!fs.exists(Path::new("/work/demo")));
    assert_eq!(
        *reporter.0.lock().unwrap(),
        ["start Acquisition", "fail Acquisition"]
    );
}

#[test]
fn unpinned_plugin_is_written_as_latest() {
    let fs = MemoryFilesystem::new();
    let vcs = ScriptedVcs::new(&fs, remote());
    // mui
    let prompter = ScriptedPrompter::new([2]);

    let request = ScaffoldRequest::new("demo", base())
        .with_framework("react")
        .with_template("basic");
    service(
        builtin_catalog().unwrap(),
        &fs,
        &vcs,
        prompter,
        &RecordingReporter::default(),
    )
    .scaffold(&request)
    .unwrap();

    let merged = descriptor(&fs, &base().join("demo"));
    assert_eq!(merged.dependency("@mui/material"), Some("^5.15.0"));
    assert_eq!(merged.dependency("@emotion/react"), Some("latest"));
    assert_eq!(merged.dependency("@emotion/styled"), Some("latest"));
    assert!(fs.exists(Path::new("/work/demo/src/theme.js")));
}

#[test]
fn missing_descriptor_fails_merge_but_keeps_project() {
    let fs = MemoryFilesystem::new();
    let vcs = ScriptedVcs::new(&fs, remote());
    let reporter = RecordingReporter::default();
    let prompter = ScriptedPrompter::new([0]);

    let request = ScaffoldRequest::new("demo", base())
        .with_framework("react")
        .with_template("admin");
    let err = service(builtin_catalog().unwrap(), &fs, &vcs, prompter, &reporter)
        .scaffold(&request)
        .unwrap_err();

    assert_eq!(err.stage, ScaffoldStage::MetadataMerge);
    assert!(matches!(
        err.error,
        GraftError::Application(ApplicationError::DescriptorRead { .. })
    ));
    assert!(fs.exists(Path::new("/work/demo/README.md")));
}

#[test]
fn requested_branch_is_pulled() {
    let fs = MemoryFilesystem::new();
    let vcs = ScriptedVcs::new(&fs, remote());
    let prompter = ScriptedPrompter::new([0]);

    let request = ScaffoldRequest::new("demo", base())
        .with_framework("react")
        .with_template("basic")
        .with_branch("v2");
    service(
        builtin_catalog().unwrap(),
        &fs,
        &vcs,
        prompter,
        &RecordingReporter::default(),
    )
    .scaffold(&request)
    .unwrap();

    assert!(vcs.calls().contains(&"pull origin v2".to_string()));
}

#[test]
fn framework_without_templates_is_a_warning() {
    let catalog = Catalog::new(
        "https://example.com/t.git",
        vec!["react".into(), "solid".into()],
        vec![TemplateEntry::new("basic", "react")],
        vec![UiEntry::new("none").with_plugin(UiPlugin::new("x"))],
    )
    .unwrap();
    let fs = MemoryFilesystem::new();
    let vcs = ScriptedVcs::new(&fs, remote());

    let request = ScaffoldRequest::new("demo", base()).with_framework("solid");
    let err = service(
        catalog,
        &fs,
        &vcs,
        ScriptedPrompter::new([]),
        &RecordingReporter::default(),
    )
    .scaffold(&request)
    .unwrap_err();

    assert_eq!(err.stage, ScaffoldStage::Preflight);
    assert!(err.error.is_warning());
    assert!(fs.list_files().is_empty());
}
