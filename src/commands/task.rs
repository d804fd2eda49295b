use crate::state::Context;
use tracing::info;

const NOTHING_FOUND: &str = "Не удалось найти релевантную статью по долголетию человека.";

/// Run one research-priority pipeline pass and post the answer
#[poise::command(slash_command, guild_only)]
pub async fn task(ctx: Context<'_>) -> Result<(), anyhow::Error> {
    // Acknowledge immediately so the user isn't staring at a loading spinner
    let user_mention = format!("<@{}>", ctx.author().id);
    ctx.say(format!(
        "Принято — ищу приоритетную задачу дня. Отвечу здесь, {}",
        user_mention
    ))
    .await?;

    let cfg = ctx.data().pipeline_config.read().await.clone();
    info!(
        user = ctx.author().name,
        strategy = cfg.strategy.as_str(),
        "Task run started"
    );

    match ctx.data().engine.run(&cfg).await? {
        Some(answer) => {
            info!(answer_len = answer.len(), "Task run complete");
            send_chunked(&ctx, &answer).await
        }
        None => {
            info!("Task run found nothing relevant");
            ctx.say(NOTHING_FOUND).await?;
            Ok(())
        }
    }
}

/// Send a message in Discord-safe chunks (max 1990 chars).
/// Uses ctx.say() for all chunks — poise routes follow-ups through the
/// interaction webhook, which doesn't require Send Messages channel permission.
async fn send_chunked(ctx: &Context<'_>, text: &str) -> Result<(), anyhow::Error> {
    let mut remaining = text;
    while !remaining.is_empty() {
        let limit = floor_char_boundary(remaining, 1990);
        let split_at = if limit < remaining.len() {
            remaining[..limit]
                .rfind('\n')
                .or_else(|| remaining[..limit].rfind(' '))
                .map(|i| i + 1)
                .unwrap_or(limit)
        } else {
            limit
        };
        let chunk = &remaining[..split_at];
        remaining = &remaining[split_at..];

        ctx.say(chunk).await?;
    }
    Ok(())
}

/// Largest index at most `max` that lands on a char boundary. The answer text
/// is Cyrillic, so a byte-offset split would panic mid-character.
fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut i = max;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_char_boundary_ascii() {
        assert_eq!(floor_char_boundary("hello", 3), 3);
        assert_eq!(floor_char_boundary("hello", 10), 5);
    }

    #[test]
    fn test_floor_char_boundary_cyrillic() {
        // Each Cyrillic char is 2 bytes; 3 falls mid-character.
        let s = "статья";
        let i = floor_char_boundary(s, 3);
        assert!(s.is_char_boundary(i));
        assert_eq!(i, 2);
    }
}
