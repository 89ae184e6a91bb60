//! HTTP client adapters.

pub mod mock;
pub mod reqwest_client;
pub mod retry;

pub use mock::{MockHttpClient, MockReply, RecordedCall, RequestMethod};
pub use reqwest_client::{ReqwestHttpClient, ReqwestHttpClientConfig};
pub use retry::{RetryPolicy, RetryingHttpClient};
