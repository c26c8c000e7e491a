mod http_api_client;
mod system_clock;

pub use http_api_client::HttpApiClient;
pub use system_clock::SystemClock;
