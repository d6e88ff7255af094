//! `deckpub plan`

use std::path::Path;

use anyhow::Result;

use deckpub::domain::ports::SessionEnv;
use deckpub::presentation::{create_publish_use_case, PlanArgs};
use deckpub::PlannedStep;

use super::{emit_json, load_context, CommandContext};

pub fn cmd_plan(args: &PlanArgs, config_path: Option<&Path>, json: bool) -> Result<()> {
    let ctx = load_context(args, config_path, json)?;
    let use_case = create_publish_use_case(&ctx.config, &ctx.target, SessionEnv::default())?;
    let steps = use_case.plan(&ctx.plan);

    print_plan(&ctx, &steps, json);
    Ok(())
}

/// Print derived paths and planned commands (also used by `publish --dry-run`)
pub fn print_plan(ctx: &CommandContext, steps: &[PlannedStep], json: bool) {
    let plan = &ctx.plan;

    if json {
        emit_json(&serde_json::json!({
            "event": "plan",
            "target": ctx.target.host(),
            "transport": ctx.config.target.transport.as_str(),
            "config": ctx.config_path.as_ref().map(|p| p.display().to_string()),
            "instance": plan.instance().as_str(),
            "source": plan.local_source().display().to_string(),
            "versioned_folder": plan.versioned_folder(),
            "latest_alias": plan.latest_alias(),
            "archive": plan.archive_path(),
            "steps": steps,
        }));
        return;
    }

    let config = ctx
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(built-in defaults)".to_string());

    println!("Target:    {} ({})", ctx.target.host(), ctx.config.target.transport);
    println!("Config:    {}", config);
    println!("Instance:  {}", plan.instance());
    println!("Source:    {}", plan.local_source().display());
    println!("Folder:    {}", plan.versioned_folder());
    println!("Latest:    {}", plan.latest_alias());
    println!("Archive:   {}", plan.archive_path());
    println!();
    println!("Steps:");
    for (i, step) in steps.iter().enumerate() {
        println!("  {}. {} [{}]", i + 1, step.description, step.stage);
        println!("     {}", step.command);
    }
}
