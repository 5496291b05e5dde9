use verse_config::VerseConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

pub mod create;
pub mod delete;
pub mod projects;
pub mod run;
pub mod save;
pub mod shared;
pub mod show;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    config: &VerseConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Projects => projects::handle(ctx, flags).await,
        Commands::Create(args) => create::handle(&args, ctx, config, flags).await,
        Commands::Show(args) => show::handle(&args, ctx, flags).await,
        Commands::Run(args) => run::handle(&args, ctx, flags).await,
        Commands::Save(args) => save::handle(&args, ctx, flags).await,
        Commands::Delete(args) => delete::handle(&args, ctx, flags).await,
    }
}
