pub mod config;
pub mod env;
pub mod gateway;
pub mod repositories;

pub use config::{ApiEndpoints, ClientConfig};
pub use gateway::ApiGatewayClient;
pub use repositories::{
    HttpAuthRepository, HttpNotificationRepository, HttpUserRepository, InMemoryTokenStore,
    SqliteTokenStore,
};
