pub mod ask;
pub mod config_init;
pub mod serve;
