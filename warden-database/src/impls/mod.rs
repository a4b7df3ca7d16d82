pub mod redis_warnings;
pub mod rules;
pub mod warnings;
