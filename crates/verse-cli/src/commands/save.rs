use serde::Serialize;
use verse_session::SaveOutcome;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SaveArgs;
use crate::commands::shared::{open_project, read_source, report_notices};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct SaveResponse {
    project_id: String,
    saved: bool,
}

/// Handle `cverse save`.
pub async fn handle(args: &SaveArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let code = read_source(&args.source)?;
    open_project(ctx, &args.id).await?;
    ctx.session.edit_current(code)?;

    let progress = Progress::spinner("Saving...");
    let outcome = ctx.session.save().await;
    match &outcome {
        Ok(_) => progress.finish_clear(),
        Err(_) => progress.finish_err("Save failed"),
    }
    let saved = outcome? == SaveOutcome::Saved;
    report_notices(ctx, flags);

    output(
        &SaveResponse {
            project_id: args.id.clone(),
            saved,
        },
        flags.format,
    )
}
