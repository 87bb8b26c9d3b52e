pub mod auth;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod rate_limit;

pub use auth::AdminGuard;
pub use gateway::{GatewayState, build_router};
pub use rate_limit::GatewayRateLimiter;
