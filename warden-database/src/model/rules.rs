use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRules {
    pub guild_id: u64,
    pub rules: String,
    pub updated_by: u64,
    pub updated_at: u64,
}
