use serde::Serialize;
use verse_core::ExecutionOutcome;
use verse_session::RunOutcome;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RunArgs;
use crate::commands::shared::{open_project, read_source, report_notices};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct RunResponse {
    project_id: String,
    success: bool,
    output: String,
    saved: bool,
    save_error: Option<String>,
}

/// Handle `cverse run`.
///
/// Prints the report, then fails if either the execution or the save did.
pub async fn handle(args: &RunArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let code = args.source.as_deref().map(read_source).transpose()?;
    open_project(ctx, &args.id).await?;
    if let Some(code) = code {
        ctx.session.edit_current(code)?;
    }

    let file = ctx.session.selected_file().unwrap_or_default();
    let progress = Progress::spinner(&format!("Running {file}..."));
    let outcome = ctx.session.run().await;
    progress.finish_clear();

    let RunOutcome::Completed(report) = outcome? else {
        anyhow::bail!("project {} is busy", args.id);
    };
    report_notices(ctx, flags);

    let save_error = report.save_error.as_ref().map(ToString::to_string);
    output(
        &RunResponse {
            project_id: args.id.clone(),
            success: report.execution.is_success(),
            output: report.execution.display_text().to_string(),
            saved: save_error.is_none(),
            save_error: save_error.clone(),
        },
        flags.format,
    )?;

    if let ExecutionOutcome::Failed { reason } = &report.execution.outcome {
        anyhow::bail!("execution failed: {reason}");
    }
    if let Some(error) = save_error {
        anyhow::bail!("code ran but was not saved: {error}");
    }
    Ok(())
}
