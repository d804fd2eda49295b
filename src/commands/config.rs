use crate::pipeline::Strategy;
use crate::state::Context;

/// Configure pipeline parameters (admin only)
#[poise::command(slash_command, guild_only)]
pub async fn config(
    ctx: Context<'_>,
    #[description = "strategy | max_results | support_limit"] param: Option<String>,
    #[description = "New value"] value: Option<String>,
) -> Result<(), anyhow::Error> {
    let user_id = ctx.author().id.get();
    if !ctx.data().is_admin(user_id) {
        ctx.say("This command is admin-only.").await?;
        return Ok(());
    }

    match (param.as_deref(), value.as_deref()) {
        // Show current config
        (None, _) => {
            let cfg = ctx.data().pipeline_config.read().await;
            ctx.say(format!(
                "**Pipeline configuration:**\n\
                 `strategy`: {}\n\
                 `max_results`: {}\n\
                 `support_limit`: {}",
                cfg.strategy.as_str(),
                cfg.max_results,
                cfg.support_limit
            ))
            .await?;
        }
        // Set a parameter
        (Some(key), Some(val)) => {
            let mut cfg = ctx.data().pipeline_config.write().await;
            match key {
                "strategy" => match Strategy::parse(val) {
                    Some(s) => {
                        cfg.strategy = s;
                        ctx.say(format!("`strategy` set to {}", s.as_str())).await?;
                    }
                    None => {
                        ctx.say("Valid strategies: `directions`, `first-relevant`")
                            .await?;
                    }
                },
                "max_results" => match val.parse::<usize>() {
                    Ok(n) if n > 0 => {
                        cfg.max_results = n;
                        ctx.say(format!("`max_results` set to {}", n)).await?;
                    }
                    _ => {
                        ctx.say("`max_results` must be a positive integer").await?;
                    }
                },
                "support_limit" => match val.parse::<usize>() {
                    Ok(n) => {
                        cfg.support_limit = n;
                        ctx.say(format!("`support_limit` set to {}", n)).await?;
                    }
                    Err(_) => {
                        ctx.say("`support_limit` must be an integer").await?;
                    }
                },
                _ => {
                    ctx.say(format!(
                        "Unknown param `{}`. Valid: `strategy`, `max_results`, `support_limit`",
                        key
                    ))
                    .await?;
                }
            }
        }
        (Some(_), None) => {
            ctx.say("Provide both `param` and `value`. Example: `/longevity config strategy first-relevant`")
                .await?;
        }
    }

    Ok(())
}
