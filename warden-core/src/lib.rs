use std::fmt;
use std::sync::Arc;

use warden_database::Database;
use warden_engine::{EscalationEngine, ModerationGateway};

pub type Error = anyhow::Error;

#[derive(Clone)]
pub struct Data {
    pub db: Database,
    pub engine: Arc<EscalationEngine>,
    pub gateway: Arc<dyn ModerationGateway>,
    pub welcome_enabled: bool,
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("db", &self.db)
            .field("welcome_enabled", &self.welcome_enabled)
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
