pub mod handlers;
pub mod server;

pub use handlers::{ApiError, ExpiriesResponse, HealthResponse, StrikesResponse};
pub use server::ApiServer;
