use std::io;

use anyhow::Context;
use serde::Serialize;
use verse_session::DeleteOutcome;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DeleteArgs;
use crate::commands::shared::confirm;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum DeleteStatus {
    Deleted,
    AlreadyGone,
    Declined,
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    project_id: String,
    status: DeleteStatus,
}

/// Handle `cverse delete`.
pub async fn handle(args: &DeleteArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.dashboard.request_delete(&args.id);

    if !args.yes {
        if !ui::prefs().interactive {
            ctx.dashboard.decline_delete();
            anyhow::bail!("refusing to delete {} without confirmation; pass --yes", args.id);
        }
        let confirmed = confirm(
            &format!("Delete project {}?", args.id),
            &mut io::stdin().lock(),
            &mut io::stderr(),
        )
        .context("failed to read confirmation")?;
        if !confirmed {
            ctx.dashboard.decline_delete();
            return output(
                &DeleteResponse {
                    project_id: args.id.clone(),
                    status: DeleteStatus::Declined,
                },
                flags.format,
            );
        }
    }

    let status = match ctx.dashboard.confirm_delete().await? {
        Some(DeleteOutcome::Deleted { .. }) => DeleteStatus::Deleted,
        Some(DeleteOutcome::AlreadyGone { .. }) => DeleteStatus::AlreadyGone,
        None => anyhow::bail!("no delete was pending for {}", args.id),
    };

    output(
        &DeleteResponse {
            project_id: args.id.clone(),
            status,
        },
        flags.format,
    )
}
