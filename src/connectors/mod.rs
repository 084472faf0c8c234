//! External Service Connectors
//!
//! Adapters for the services the bot talks to: the Render deploy API and the
//! Telegram Bot API. Each connector is a trait with a reqwest client behind
//! it, so the reconciler and the command handlers can be exercised against
//! in-memory mocks.

pub mod errors;
pub mod http;
pub mod render_service;
pub mod telegram;

pub use errors::ConnectorError;
pub use http::build_http_client;
pub use render_service::{RenderDeployClient, Remediator};
pub use telegram::{TelegramClient, TelegramConnector};
