// API client module: talks to the master service that counts letters and
// numbers in a piece of text. It is intentionally small and synchronous:
// one blocking request at a time, each failure absorbed into the returned
// `ProcessingResult` instead of propagating as an error type.

use crate::transport::{HttpTransport, Method, Outcome, Timeouts, Transport};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Named timeout tiers. The health probe gets a short budget, a processing
/// request gets a longer one since the master may be chewing on a big file.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutPolicy {
    pub health: Timeouts,
    pub processing: Timeouts,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        TimeoutPolicy {
            health: Timeouts::new(5, 10),
            processing: Timeouts::new(10, 30),
        }
    }
}

/// Result of one processing request, returned by value to every caller.
///
/// `success` is true only when the transport succeeded, the status was 200
/// and the payload parsed; in that case `error_message` is empty. On any
/// failure exactly one `error_message` names the first thing that went
/// wrong, and `raw_response` keeps whatever body was received (empty when
/// no response arrived at all) for diagnostic display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingResult {
    pub success: bool,
    pub letters_count: u64,
    pub numbers_count: u64,
    pub total_characters: u64,
    pub processing_time_ms: f64,
    pub error_message: String,
    pub raw_response: String,
}

impl ProcessingResult {
    fn failure(message: String) -> Self {
        ProcessingResult {
            error_message: message,
            ..ProcessingResult::default()
        }
    }
}

/// Callbacks around each request so the binary can log with its own
/// machinery. Defaults are no-ops; the core itself never logs.
pub trait RequestObserver {
    fn on_request_start(&self, _endpoint: &str) {}
    fn on_request_complete(&self, _endpoint: &str, _result: &ProcessingResult) {}
    /// The health probe has no `ProcessingResult`; its verdict arrives here
    /// so every `on_request_start` still gets a matching completion.
    fn on_health_checked(&self, _healthy: bool) {}
}

struct NoopObserver;
impl RequestObserver for NoopObserver {}

/// Payload of `POST /process`. Serialized as `{"text": "..."}`.
#[derive(Serialize, Debug)]
struct ProcessRequest<'a> {
    text: &'a str,
}

/// Typed view of a 200 response body, extracted field by field. Fields that
/// were missing or had the wrong JSON type fall back to their default and
/// get their name recorded in `defaulted`, so callers can tell a clean
/// parse from one with gaps.
#[derive(Debug)]
struct ParsedPayload {
    success: bool,
    letters_count: u64,
    numbers_count: u64,
    total_characters: u64,
    processing_time_ms: f64,
    error_message: String,
    defaulted: Vec<&'static str>,
}

fn parse_payload(body: &str) -> Result<ParsedPayload, String> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| e.to_string())?;
    let object = value
        .as_object()
        .ok_or_else(|| "response is not a JSON object".to_string())?;

    let mut defaulted = Vec::new();
    let success = match object.get("success").and_then(|v| v.as_bool()) {
        Some(v) => v,
        None => {
            defaulted.push("success");
            false
        }
    };
    let letters_count = count_field(object, "letters_count", &mut defaulted);
    let numbers_count = count_field(object, "numbers_count", &mut defaulted);
    let total_characters = count_field(object, "total_characters", &mut defaulted);
    let processing_time_ms = match object.get("processing_time_ms").and_then(|v| v.as_f64()) {
        Some(v) => v,
        None => {
            defaulted.push("processing_time_ms");
            0.0
        }
    };
    let error_message = match object.get("error_message").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => {
            defaulted.push("error_message");
            String::new()
        }
    };

    Ok(ParsedPayload {
        success,
        letters_count,
        numbers_count,
        total_characters,
        processing_time_ms,
        error_message,
        defaulted,
    })
}

fn count_field(
    object: &serde_json::Map<String, serde_json::Value>,
    name: &'static str,
    defaulted: &mut Vec<&'static str>,
) -> u64 {
    match object.get(name).and_then(|v| v.as_u64()) {
        Some(v) => v,
        None => {
            defaulted.push(name);
            0
        }
    }
}

/// Client for the master text-analysis service. Holds the endpoint address,
/// the timeout policy and the injected transport/observer.
pub struct MasterClient {
    host: String,
    port: u16,
    base_url: String,
    timeouts: TimeoutPolicy,
    transport: Box<dyn Transport>,
    observer: Box<dyn RequestObserver>,
}

impl MasterClient {
    /// Create a client pointed at `host:port` with the production transport
    /// and no observer.
    pub fn new(host: &str, port: u16) -> Self {
        MasterClient {
            host: host.to_string(),
            port,
            base_url: compose_url(host, port),
            timeouts: TimeoutPolicy::default(),
            transport: Box::new(HttpTransport),
            observer: Box::new(NoopObserver),
        }
    }

    /// Swap the transport, mainly for tests.
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Install request callbacks (the binary wires tracing through here).
    pub fn with_observer(mut self, observer: Box<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Point the client at a new master address. Idempotent; takes effect
    /// on the next call.
    pub fn configure(&mut self, host: &str, port: u16) {
        self.host = host.to_string();
        self.port = port;
        self.base_url = compose_url(&self.host, self.port);
    }

    /// Current composed base URL, for display.
    pub fn get_endpoint_url(&self) -> &str {
        &self.base_url
    }

    /// Send `text` to the master for analysis.
    pub fn process_text(&self, text: &str) -> ProcessingResult {
        let payload = match serde_json::to_string(&ProcessRequest { text }) {
            Ok(p) => p,
            Err(e) => return ProcessingResult::failure(format!("request encode error: {e}")),
        };
        self.post_process(&payload)
    }

    /// Read a whole file and send its content for analysis. A file that
    /// cannot be read is reported locally; the network is never touched.
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> ProcessingResult {
        match std::fs::read_to_string(path) {
            Ok(content) => self.process_text(&content),
            Err(e) => ProcessingResult::failure(format!("file read error: {e}")),
        }
    }

    /// Liveness probe: true iff `GET /health` answered with status 200.
    /// Every other outcome (no response, any other status) is false.
    pub fn check_health(&self) -> bool {
        self.observer.on_request_start("/health");
        let url = format!("{}/health", self.base_url);
        let outcome = self
            .transport
            .perform(Method::Get, &url, None, None, self.timeouts.health);
        let healthy = matches!(outcome, Outcome::Response { status: 200, .. });
        self.observer.on_health_checked(healthy);
        healthy
    }

    fn post_process(&self, payload: &str) -> ProcessingResult {
        self.observer.on_request_start("/process");
        let url = format!("{}/process", self.base_url);

        let started = Instant::now();
        let outcome = self.transport.perform(
            Method::Post,
            &url,
            Some(payload),
            Some("application/json"),
            self.timeouts.processing,
        );
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let result = match outcome {
            Outcome::NoResponse => ProcessingResult::failure("connection failure".to_string()),
            Outcome::Response { status, body } if status != 200 => ProcessingResult {
                error_message: format!("HTTP error {status}"),
                raw_response: body,
                processing_time_ms: elapsed_ms,
                ..ProcessingResult::default()
            },
            Outcome::Response { body, .. } => match parse_payload(&body) {
                Ok(parsed) => translate_payload(parsed, elapsed_ms, body),
                Err(detail) => ProcessingResult {
                    error_message: format!("response parse error: {detail}"),
                    raw_response: body,
                    processing_time_ms: elapsed_ms,
                    ..ProcessingResult::default()
                },
            },
        };
        self.observer.on_request_complete("/process", &result);
        result
    }
}

fn compose_url(host: &str, port: u16) -> String {
    format!("http://{host}:{port}")
}

/// Fold a parsed payload into the caller-facing result. The server's
/// `success` field is authoritative; the client-measured latency is only a
/// fallback for when the server omitted its own figure.
fn translate_payload(parsed: ParsedPayload, elapsed_ms: f64, body: String) -> ProcessingResult {
    let processing_time_ms = if parsed.defaulted.contains(&"processing_time_ms") {
        elapsed_ms
    } else {
        parsed.processing_time_ms
    };
    let error_message = if parsed.success {
        String::new()
    } else if parsed.error_message.is_empty() {
        "server reported failure without detail".to_string()
    } else {
        parsed.error_message
    };
    ProcessingResult {
        success: parsed.success,
        letters_count: parsed.letters_count,
        numbers_count: parsed.numbers_count,
        total_characters: parsed.total_characters,
        processing_time_ms,
        error_message,
        raw_response: body,
    }
}
