//! Envelope client and the high-level YAVIQ client built on it

use super::envelope;
use super::request::{
    DecodeRequest, EncodeRequest, HistoryMessage, OptimizeRequest, OptimizeRunOptions,
    OptimizeRunRequest,
};
use super::response::{DecodeResult, EncodeResult, OptimizeResult, RunResult};
use super::transport::{HttpTransport, Transport};
use super::Route;
use crate::config::{Config, API_KEY_ENV, DEFAULT_ENDPOINT, ENDPOINT_ENV};
use crate::error::ClientError;
use crate::optimization::{estimate_tokens, Mode, SavingsEstimate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

const SDK_USER_ID: &str = "sdk_user";
const DEFAULT_RAG_CHUNK_LIMIT: u32 = 10;

/// Issues one authenticated POST per call and turns the reply into either the
/// unwrapped payload or a classified error. Holds no per-call state.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeClient<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> EnvelopeClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// POST `body` to `route` under `endpoint`.
    ///
    /// An empty `api_key` fails with a validation error before the transport
    /// is touched. Failures are never retried.
    pub async fn post<B>(
        &self,
        route: Route,
        body: &B,
        api_key: &str,
        endpoint: &str,
    ) -> Result<Value, ClientError>
    where
        B: Serialize + ?Sized,
    {
        if api_key.is_empty() {
            return Err(ClientError::validation("API key is required"));
        }

        let body = serde_json::to_value(body).map_err(|e| {
            ClientError::validation(format!("Failed to serialize request body: {}", e))
        })?;
        let url = route.url(endpoint);

        debug!(%url, "Sending request");
        let response = self.transport.post_json(&url, api_key, &body).await?;
        debug!(%url, status = response.status, "Received response");

        envelope::interpret(response).map_err(|e| {
            debug!(%url, kind = %e.kind(), status = ?e.status(), "Request failed");
            e
        })
    }
}

/// Client for the YAVIQ optimization service
pub struct YaviqClient<T = HttpTransport> {
    envelope: EnvelopeClient<T>,
    api_key: String,
    endpoint: String,
    telemetry: bool,
}

impl YaviqClient<HttpTransport> {
    /// Create a client over HTTP. Missing values are read from
    /// `YAVIQ_API_KEY` / `YAVIQ_ENDPOINT`, the endpoint falling back to
    /// [`DEFAULT_ENDPOINT`].
    pub fn new(api_key: Option<String>, endpoint: Option<String>) -> Result<Self, ClientError> {
        let api_key = first_non_empty(api_key, std::env::var(API_KEY_ENV).ok()).unwrap_or_default();
        let endpoint = first_non_empty(endpoint, std::env::var(ENDPOINT_ENV).ok())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Self::with_transport(api_key, endpoint, HttpTransport::new())
    }

    /// Create a client over HTTP from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::from_config_with_transport(config, HttpTransport::new())
    }
}

impl<T: Transport> YaviqClient<T> {
    pub fn with_transport(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        transport: T,
    ) -> Result<Self, ClientError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ClientError::validation(
                "API key is required. Set YAVIQ_API_KEY environment variable or pass an API key.",
            ));
        }

        Ok(Self {
            envelope: EnvelopeClient::new(transport),
            api_key,
            endpoint: endpoint.into(),
            telemetry: false,
        })
    }

    /// Create a client from loaded configuration over any transport
    pub fn from_config_with_transport(config: &Config, transport: T) -> Result<Self, ClientError> {
        let client = Self::with_transport(
            config.api_key.clone().unwrap_or_default(),
            config.endpoint.clone(),
            transport,
        )?;
        Ok(client.with_telemetry(config.telemetry))
    }

    /// Emit an info event with the savings of each optimize call
    pub fn with_telemetry(mut self, enabled: bool) -> Self {
        self.telemetry = enabled;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        self.envelope.transport()
    }

    /// Raw call: POST `body` to `route` and return the unwrapped payload
    pub async fn post<B>(&self, route: Route, body: &B) -> Result<Value, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.envelope
            .post(route, body, &self.api_key, &self.endpoint)
            .await
    }

    async fn post_typed<B, R>(&self, route: Route, body: &B, context: &str) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload = self.post(route, body).await?;
        serde_json::from_value(payload)
            .map_err(|e| ClientError::parse_failure(format!("{} failed: {}", context, e)))
    }

    /// Reduce the token count of `input` while keeping its meaning
    pub async fn optimize(
        &self,
        input: &str,
        mode: &str,
        format: &str,
        model: Option<&str>,
    ) -> Result<OptimizeResult, ClientError> {
        require_input(input, "Input is required")?;

        let request = OptimizeRequest {
            input: input.to_string(),
            format: format.to_string(),
            mode: Mode::normalize(mode),
            model: model.map(str::to_string),
        };
        let result: OptimizeResult = self
            .post_typed(Route::Optimize, &request, "Optimize")
            .await?;

        if self.telemetry {
            info!(
                tokens_saved = result.tokens_saved,
                compression = result.compression,
                "optimize"
            );
        }

        Ok(result)
    }

    /// Optimize the input, run it through the model and optimize the answer,
    /// all in one backend call
    pub async fn optimize_and_run(
        &self,
        options: OptimizeRunOptions,
    ) -> Result<RunResult, ClientError> {
        require_input(&options.input, "Input is required")?;

        let request = OptimizeRunRequest {
            user_id: SDK_USER_ID.to_string(),
            input: options.input,
            format: options.format,
            mode: Mode::normalize(&options.mode),
            model: options.model,
            use_rag: options.use_rag,
            use_history: options.use_history,
            history: options.history,
            rag_chunk_limit: options.rag_chunk_limit,
            debug: options.debug,
        };
        let result: RunResult = self
            .post_typed(Route::OptimizeRun, &request, "Optimize and run")
            .await?;

        if self.telemetry {
            info!(
                tokens_used = %result.metrics["total_tokens_used"],
                savings = %result.metrics["final_total_savings_percent"],
                "optimize_and_run"
            );
        }

        Ok(result)
    }

    /// Optimize documents for retrieval-augmented generation
    pub async fn optimize_rag(
        &self,
        docs: &[&str],
        mode: &str,
        chunk_limit: Option<u32>,
        debug: bool,
    ) -> Result<RunResult, ClientError> {
        let input = docs.join("\n\n");
        require_input(&input, "Documents are required")?;

        let options = OptimizeRunOptions::new(input)
            .with_mode(mode)
            .with_rag(Some(chunk_limit.unwrap_or(DEFAULT_RAG_CHUNK_LIMIT)))
            .with_debug(debug);
        self.optimize_and_run(options).await
    }

    /// Compress prior conversation turns alongside the current input
    pub async fn compress_history(
        &self,
        messages: Vec<HistoryMessage>,
        current_input: &str,
        mode: &str,
        debug: bool,
    ) -> Result<RunResult, ClientError> {
        if messages.is_empty() {
            return Err(ClientError::validation(
                "Messages array is required and must not be empty",
            ));
        }
        require_input(current_input, "Current input is required")?;

        let options = OptimizeRunOptions::new(current_input)
            .with_mode(mode)
            .with_history(messages)
            .with_debug(debug);
        self.optimize_and_run(options).await
    }

    /// Compare input and optimized token counts via one optimize call
    pub async fn estimate_savings(
        &self,
        input: &str,
        mode: &str,
        format: &str,
    ) -> Result<SavingsEstimate, ClientError> {
        require_input(input, "Input is required")?;

        let result = self.optimize(input, mode, format, None).await?;
        Ok(SavingsEstimate::from_counts(
            input,
            &result.optimized,
            result.original_tokens,
            result.optimized_tokens,
        ))
    }

    /// Encode structured text (JSON, YAML, CSV) into the compact representation
    pub async fn encode_structured(
        &self,
        input: &str,
        format: &str,
    ) -> Result<EncodeResult, ClientError> {
        require_input(input, "Input is required")?;

        let request = EncodeRequest {
            input: input.to_string(),
            format: format.to_string(),
        };
        self.post_typed(Route::ConvertToToon, &request, "Convert to TOON")
            .await
    }

    /// Encode and return only the compact text
    pub async fn to_toon(&self, input: &str, format: &str) -> Result<String, ClientError> {
        Ok(self.encode_structured(input, format).await?.toon)
    }

    /// Encode with the format auto-detected unless a hint is given
    pub async fn convert(
        &self,
        input: &str,
        format: Option<&str>,
    ) -> Result<EncodeResult, ClientError> {
        self.encode_structured(input, format.unwrap_or("auto")).await
    }

    /// Decode the compact representation back into JSON
    pub async fn decode_structured(&self, toon: &str) -> Result<Value, ClientError> {
        require_input(toon, "TOON input is required")?;

        let request = DecodeRequest {
            toon: toon.to_string(),
        };
        let result: DecodeResult = self
            .post_typed(Route::ConvertFromToon, &request, "Convert from TOON")
            .await?;
        Ok(result.json)
    }

    pub async fn from_toon(&self, toon: &str) -> Result<Value, ClientError> {
        self.decode_structured(toon).await
    }

    /// Local heuristic token count; makes no network call
    pub fn count_tokens(&self, text: &str) -> u64 {
        estimate_tokens(text)
    }
}

/// Explicit value unless empty, then the environment value unless empty
fn first_non_empty(explicit: Option<String>, env: Option<String>) -> Option<String> {
    explicit
        .filter(|v| !v.is_empty())
        .or_else(|| env.filter(|v| !v.is_empty()))
}

fn require_input(input: &str, message: &str) -> Result<(), ClientError> {
    if input.is_empty() {
        Err(ClientError::validation(message))
    } else {
        Ok(())
    }
}
