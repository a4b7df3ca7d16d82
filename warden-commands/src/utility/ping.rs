use std::time::{Duration, Instant};

use warden_core::{Context, Error};

use crate::CommandMeta;

pub const META: CommandMeta = CommandMeta {
    name: "ping",
    desc: "Check that the bot is alive and how fast it answers.",
    category: "utility",
    usage: "!ping",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let started = Instant::now();
    let reply = ctx.say("Pong!").await?;

    let content = pong_message(ctx.ping().await, started.elapsed());
    reply
        .edit(ctx, poise::CreateReply::default().content(content))
        .await?;
    Ok(())
}

/// Shard heartbeat is zero until the first heartbeat ack arrives.
fn pong_message(heartbeat: Duration, round_trip: Duration) -> String {
    if heartbeat.is_zero() {
        format!("Pong! (reply {}ms)", round_trip.as_millis())
    } else {
        format!(
            "Pong! (reply {}ms, gateway {}ms)",
            round_trip.as_millis(),
            heartbeat.as_millis()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::pong_message;

    #[test]
    fn gateway_latency_is_shown_once_known() {
        assert_eq!(
            pong_message(Duration::ZERO, Duration::from_millis(80)),
            "Pong! (reply 80ms)"
        );
        assert_eq!(
            pong_message(Duration::from_millis(42), Duration::from_millis(80)),
            "Pong! (reply 80ms, gateway 42ms)"
        );
    }
}
