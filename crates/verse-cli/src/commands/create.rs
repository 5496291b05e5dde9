use serde::Serialize;
use verse_config::VerseConfig;
use verse_core::Language;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CreateArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CreateResponse {
    project_id: String,
    name: String,
    language: Language,
}

/// Handle `cverse create`.
pub async fn handle(
    args: &CreateArgs,
    ctx: &AppContext,
    config: &VerseConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let language = args.language.unwrap_or(config.general.default_language);
    let project_id = ctx
        .dashboard
        .create_project(&args.name, language, &args.description)
        .await?;

    output(
        &CreateResponse {
            project_id,
            name: args.name.trim().to_string(),
            language,
        },
        flags.format,
    )
}
