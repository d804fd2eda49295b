mod config;
mod start;
mod task;

use crate::state::Context;

/// LongevityBionix — daily human-aging research priority bot
#[poise::command(
    slash_command,
    subcommands("start::start", "task::task", "config::config")
)]
pub async fn longevity(_ctx: Context<'_>) -> Result<(), anyhow::Error> {
    Ok(())
}
