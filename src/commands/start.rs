use crate::state::Context;

/// Greeting and usage hint
#[poise::command(slash_command, guild_only)]
pub async fn start(ctx: Context<'_>) -> Result<(), anyhow::Error> {
    ctx.say(
        "👋 Привет! Я LongevityBionixBot.\n\
         Я ищу лучшие научные задачи по продлению жизни и замедлению старения у людей.\n\
         Введи /longevity task, чтобы получить приоритетный вопрос дня!",
    )
    .await?;
    Ok(())
}
