pub mod api_client;

pub use api_client::{classify_failure, ApiGatewayClient, ApiGatewayClientBuilder};
