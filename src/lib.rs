pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logger;
pub mod models;

pub use client::{AiClient, DataUrl, PageIllustration};
pub use config::{ClientConfig, Credentials, CredentialsConfig, GatewayConfig, ProviderEndpoints};
pub use error::{IllustraError, Result};
pub use gateway::{Gateway, GatewayResponse, ImageClient, SummaryClient};
pub use models::*;
pub use tokio_util::sync::CancellationToken;
