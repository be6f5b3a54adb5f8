//! Tencent Hunyuan chat-completion client.
//!
//! Wraps the `ChatCompletions` action of the Hunyuan large-language-model
//! API behind a typed client. Requests are authenticated with the
//! TC3-HMAC-SHA256 request-signing scheme implemented in [`auth`].

pub mod auth;
pub mod client;
pub mod models;

pub use auth::TencentAuth;
pub use client::HunyuanClient;
pub use client::HunyuanError;
