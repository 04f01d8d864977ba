//! Remote workflow integration.
//!
//! [`WebhookGateway`] implements the core `RemoteGateway` port by POSTing JSON
//! to one configured webhook URL per operation.

pub mod webhook_gateway;

pub use webhook_gateway::WebhookGateway;
