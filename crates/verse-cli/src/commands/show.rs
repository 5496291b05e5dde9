use serde::Serialize;
use verse_core::Language;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ShowArgs;
use crate::commands::shared::open_project;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ShowResponse {
    id: String,
    name: String,
    language: Language,
    description: String,
    file: Option<String>,
    code: String,
}

/// Handle `cverse show`.
pub async fn handle(args: &ShowArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = open_project(ctx, &args.id).await?;

    output(
        &ShowResponse {
            id: project.id,
            name: project.name,
            language: project.language,
            description: project.description,
            file: ctx.session.selected_file(),
            code: ctx.session.current_content().unwrap_or_default(),
        },
        flags.format,
    )
}
