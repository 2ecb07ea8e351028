pub mod api_client;
pub mod metrics;
pub mod query_cache;
pub mod resources;

pub use api_client::{ApiClient, ApiError};
pub use query_cache::QueryCache;
pub use resources::ResourceService;
