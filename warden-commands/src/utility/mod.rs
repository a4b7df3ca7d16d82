pub mod help;
pub mod ping;
pub mod roll;
pub mod rules;
pub mod start;
