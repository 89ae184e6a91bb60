pub mod scoring;
pub mod user_service;

pub use scoring::score_of;
pub use user_service::{
    storage_key, UserService, DEFAULT_CACHE_DURATION, IN_FLIGHT_POLL_INTERVAL,
};
