mod config;
mod events;

use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;
use sqlx::postgres::PgPoolOptions;

use warden_commands::moderation::SerenityGateway;
use warden_core::{Data, Error};
use warden_database::impls::redis_warnings::RedisWarningStore;
use warden_database::impls::warnings::PgWarningStore;
use warden_database::{CacheService, Database, MIGRATOR};
use warden_engine::{
    EscalationEngine, EscalationPolicy, MemoryWarningStore, ModerationGateway, WarningStore,
};

use crate::config::{BotConfig, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    dotenvy::dotenv().ok();
    let config = BotConfig::from_env()?;

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    info!("PostgreSQL connection established.");

    let cache = build_cache(&config).await;
    let db = Database::new(db_pool, cache);

    if config.auto_run_migrations {
        MIGRATOR.run(db.pool()).await?;
        info!("Database migrations applied.");
    } else {
        info!("Auto migrations disabled (set AUTO_RUN_MIGRATIONS=true to run at startup).");
    }

    let store = select_store(config.warning_store, &db);
    let policy = EscalationPolicy::new(config.max_warnings, config.gateway_timeout);
    info!(
        max_warnings = policy.max_warnings,
        gateway_timeout_seconds = policy.gateway_timeout.as_secs(),
        "Warning escalation configured."
    );

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let guild_id = config.guild_id;
    let welcome_enabled = config.welcome_enabled;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: warden_commands::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(warden_utils::COMMAND_PREFIX.to_string()),
                mention_as_prefix: false,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            let db = db.clone();
            let store = store.clone();
            Box::pin(async move {
                info!("Warden is on duty.");

                poise::builtins::register_in_guild(
                    ctx,
                    &framework.options().commands,
                    serenity::GuildId::new(guild_id),
                )
                .await?;

                let gateway: Arc<dyn ModerationGateway> =
                    Arc::new(SerenityGateway::new(ctx.http.clone()));
                let engine = Arc::new(EscalationEngine::new(store, gateway.clone(), policy));

                Ok(Data {
                    db,
                    engine,
                    gateway,
                    welcome_enabled,
                })
            })
        })
        .build();

    info!("Warden is connecting...");

    let mut client = serenity::ClientBuilder::new(&config.token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

async fn build_cache(config: &BotConfig) -> CacheService {
    let prefix = config.redis_key_prefix.clone();

    if !config.redis_enabled {
        info!("Redis cache disabled (set REDIS_ENABLED=true to enable).");
        return CacheService::disabled(prefix);
    }

    let Some(redis_url) = config.redis_url.as_deref() else {
        warn!(key_prefix = %prefix, "REDIS_ENABLED=true but REDIS_URL is missing; continuing with DB-only mode.");
        return CacheService::disabled(prefix);
    };

    let cache = match CacheService::redis(redis_url, prefix.clone()) {
        Ok(cache) => cache,
        Err(err) => {
            warn!(?err, key_prefix = %prefix, "Failed to initialize Redis cache; continuing with DB-only mode.");
            return CacheService::disabled(prefix);
        }
    };

    if let Err(err) = cache.ping().await {
        warn!(?err, key_prefix = %prefix, "Redis ping failed; continuing with DB-only mode.");
        return CacheService::disabled(prefix);
    }

    info!(key_prefix = %prefix, "Redis cache enabled.");
    cache
}

fn select_store(backend: StoreBackend, db: &Database) -> Arc<dyn WarningStore> {
    match backend {
        StoreBackend::Postgres => {
            info!("Warnings stored in PostgreSQL.");
            Arc::new(PgWarningStore::new(db.clone()))
        }
        StoreBackend::Redis => match RedisWarningStore::from_cache(db.cache()) {
            Some(store) => {
                info!("Warnings stored in Redis.");
                Arc::new(store)
            }
            None => {
                warn!("WARNING_STORE=redis but Redis is unavailable; storing warnings in PostgreSQL.");
                Arc::new(PgWarningStore::new(db.clone()))
            }
        },
        StoreBackend::Memory => {
            warn!("Warnings stored in memory; they will be lost on restart.");
            Arc::new(MemoryWarningStore::new())
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, command = %ctx.command().qualified_name, "command error");

            let embed = serenity::CreateEmbed::new()
                .title("Command Error")
                .description("Something went wrong while running this command.")
                .color(warden_utils::embed::DEFAULT_EMBED_COLOR);

            let _ = ctx
                .send(poise::CreateReply::default().ephemeral(true).embed(embed))
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = format!(
                "Usage: `{}{}`",
                warden_utils::COMMAND_PREFIX,
                ctx.command().qualified_name
            );
            let description = match input {
                Some(input) => format!("Invalid argument: `{input}`\n{usage}"),
                None => format!("Missing required argument.\n{usage}"),
            };

            let _ = ctx.say(description).await;
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            debug!("unknown command invocation");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}

async fn handle_event(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::GuildMemberAddition { new_member } = event {
        events::welcome::handle_member_join_welcome(data, new_member).await;
    }

    Ok(())
}
