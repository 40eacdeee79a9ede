//! HTTP layer for the YAVIQ optimization service

mod client;
pub mod envelope;
mod request;
mod response;
mod transport;

pub use client::{EnvelopeClient, YaviqClient};
pub use request::{
    DecodeRequest, EncodeRequest, HistoryMessage, OptimizeRequest, OptimizeRunOptions,
    OptimizeRunRequest,
};
pub use response::{DecodeResult, EncodeResult, OptimizeResult, RunResult};
pub use transport::{HttpTransport, RawResponse, Transport};

/// Fixed backend routes, relative to the configured endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Optimize,
    ConvertToToon,
    ConvertFromToon,
    OptimizeRun,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Optimize => "/v1/optimize",
            Route::ConvertToToon => "/v1/convert-to-toon",
            Route::ConvertFromToon => "/v1/convert-from-toon",
            Route::OptimizeRun => "/v1/optimize-run",
        }
    }

    /// Full URL for this route under `endpoint`, trailing slashes stripped
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", endpoint.trim_end_matches('/'), self.path())
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_url_strips_trailing_slash() {
        assert_eq!(
            Route::Optimize.url("https://api.yaviq.local/"),
            "https://api.yaviq.local/v1/optimize"
        );
        assert_eq!(
            Route::ConvertFromToon.url("http://localhost:8080"),
            "http://localhost:8080/v1/convert-from-toon"
        );
    }
}
