//! `deckpub publish`

use std::path::{Path, PathBuf};

use anyhow::Result;
use is_terminal::IsTerminal;

use deckpub::domain::ports::{PublishEventSink, SessionEnv};
use deckpub::infrastructure::events::{ConsoleEventSink, Icons, JsonEventSink};
use deckpub::presentation::{create_publish_use_case, PlanArgs};
use deckpub::AliasOutcome;

use super::plan::print_plan;
use super::{load_context, supports_unicode};

pub fn cmd_publish(
    args: &PlanArgs,
    config_path: Option<&Path>,
    dry_run: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let ctx = load_context(args, config_path, json)?;

    // The only place the agent socket is read from the environment
    let env = SessionEnv::with_agent_socket(std::env::var_os("SSH_AUTH_SOCK").map(PathBuf::from));
    let use_case = create_publish_use_case(&ctx.config, &ctx.target, env)?;

    if dry_run {
        let steps = use_case.plan(&ctx.plan);
        print_plan(&ctx, &steps, json);
        return Ok(());
    }

    // Piped output stays ASCII
    let icons = Icons::for_terminal(std::io::stdout().is_terminal() && supports_unicode());
    let sink: Box<dyn PublishEventSink> = if json {
        Box::new(JsonEventSink::stdout())
    } else {
        Box::new(ConsoleEventSink::stdout(icons, verbose > 0))
    };

    let report = use_case.execute_with_events(&ctx.plan, sink.as_ref())?;

    if !json {
        let verb = match report.alias {
            AliasOutcome::Created => "created",
            AliasOutcome::Replaced => "repointed",
        };
        println!(
            "  {} {} {} -> {}",
            icons.success, verb, report.latest_alias, report.versioned_folder
        );
    }
    Ok(())
}
