//! `graft init`: scaffold a new project from the template repository.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use graft_adapters::{GitCli, LocalFilesystem, load_catalog};
use graft_core::application::{
    ScaffoldOutcome, ScaffoldReport, ScaffoldRequest, ScaffoldService,
};

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    progress::SpinnerReporter,
    prompt::terminal_prompter,
};

/// Run the scaffold pipeline with the real adapters.
#[instrument(skip_all, fields(name = %args.name))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let base_dir = match args.dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir()
            .with_cli_context(|| "Failed to read the current directory")?,
    };

    let catalog = load_catalog(config.catalog_path(), config.catalog.remote_url.as_deref())?;
    let request = build_request(args, base_dir);

    let service = ScaffoldService::new(
        catalog,
        Box::new(LocalFilesystem::new()),
        Box::new(GitCli::with_binary(config.vcs.binary.as_str())),
        terminal_prompter(),
        Box::new(SpinnerReporter::new(global.quiet)),
    );

    match service.scaffold(&request)? {
        ScaffoldOutcome::Created(report) => {
            print_report(&report, &output)?;
            Ok(())
        }
        ScaffoldOutcome::Cancelled { target_dir } => {
            info!(target = %target_dir.display(), "Existing directory kept");
            Err(CliError::Cancelled)
        }
    }
}

fn build_request(args: InitArgs, base_dir: PathBuf) -> ScaffoldRequest {
    let mut request = ScaffoldRequest::new(args.name, base_dir);
    if let Some(framework) = args.framework {
        request = request.with_framework(framework);
    }
    if let Some(template) = args.template {
        request = request.with_template(template);
    }
    if let Some(branch) = args.branch {
        request = request.with_branch(branch);
    }
    request
}

fn print_report(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    let selection = &report.selection;

    output.success(&format!(
        "Project created at {}",
        report.project_dir.display()
    ))?;
    output.field("framework", &selection.framework)?;
    output.field("template", &selection.template.name)?;
    output.field("ui", &selection.ui.name)?;
    output.field("branch", selection.branch())?;

    output.print("")?;
    output.header("Next steps:")?;
    let cwd = std::env::current_dir().ok();
    output.print(&format!(
        "  cd {}",
        cd_target(&report.project_dir, cwd.as_deref())
    ))?;
    output.print("  npm install")?;
    output.print("  npm run dev")?;

    Ok(())
}

/// `project_dir` as the user would type it from `cwd`: relative when it sits
/// below `cwd`, otherwise as given.
fn cd_target(project_dir: &Path, cwd: Option<&Path>) -> String {
    cwd.and_then(|cwd| project_dir.strip_prefix(cwd).ok())
        .filter(|rel| !rel.as_os_str().is_empty())
        .unwrap_or(project_dir)
        .display()
        .to_string()
}
