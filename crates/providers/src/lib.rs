//! Model provider clients for Hemolink.
//!
//! All clients implement `hemolink_core::ModelClient`.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatClient;
