use std::io::{self, BufRead, Read, Write};
use std::path::Path;

use anyhow::Context;
use verse_core::Project;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;

/// Load `project_id` into the session and return the fetched record.
pub async fn open_project(ctx: &AppContext, project_id: &str) -> anyhow::Result<Project> {
    ctx.session
        .open(project_id)
        .await
        .with_context(|| format!("failed to open project {project_id}"))?;
    ctx.session
        .project()
        .with_context(|| format!("project {project_id} was closed while loading"))
}

/// Read code from `path`, or from stdin when `path` is `-`.
pub fn read_source(path: &Path) -> anyhow::Result<String> {
    read_source_from(path, io::stdin().lock())
}

fn read_source_from(path: &Path, stdin: impl Read) -> anyhow::Result<String> {
    if path == Path::new("-") {
        return io::read_to_string(stdin).context("failed to read source from stdin");
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source file {}", path.display()))
}

/// Ask a yes/no question; anything but `y`/`yes` is a no.
pub fn confirm(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

/// Print the session's success notices to stderr; failures surface as errors.
pub fn report_notices(ctx: &AppContext, flags: &GlobalFlags) {
    for notice in ctx.session.take_notices() {
        if notice.is_error() {
            tracing::debug!(message = %notice.message(), "session notice");
        } else if !flags.quiet && flags.format == OutputFormat::Text {
            eprintln!("{}", notice.message());
        }
    }
}
