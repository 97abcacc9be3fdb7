//! slashgate HTTP gateway
//!
//! Exposes the slash command endpoint and a health check over axum.

pub mod endpoint;
pub mod server;

pub use server::{router, serve, start_server, GatewayState, HEALTH_PATH};
