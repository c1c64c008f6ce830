// Transport module: a single-shot HTTP executor behind a small trait so the
// client logic in `api` can be tested without a live server. Each call
// builds a fresh blocking reqwest client, sends one request and drops the
// connection. No pooling, no retries, no state between calls.

use std::time::Duration;

/// HTTP method for a single transport call. Only the two verbs the master
/// service exposes are needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Connect/read timeout pair for one call. The tiers themselves (health vs
/// processing) are policy owned by the caller, see `TimeoutPolicy` in `api`.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub connect: Duration,
    pub read: Duration,
}

impl Timeouts {
    pub const fn new(connect_secs: u64, read_secs: u64) -> Self {
        Timeouts {
            connect: Duration::from_secs(connect_secs),
            read: Duration::from_secs(read_secs),
        }
    }
}

/// Raw result of one transport attempt.
///
/// Any received response, 2xx or not, lands in `Response`. Everything that
/// prevented a response (refused connection, DNS failure, timeout) collapses
/// into `NoResponse`; callers get no finer distinction than that.
#[derive(Debug, Clone)]
pub enum Outcome {
    Response { status: u16, body: String },
    NoResponse,
}

/// One HTTP call per invocation. Implementations must be stateless across
/// calls; the production impl is `HttpTransport`.
pub trait Transport {
    fn perform(
        &self,
        method: Method,
        url: &str,
        body: Option<&str>,
        content_type: Option<&str>,
        timeouts: Timeouts,
    ) -> Outcome;
}

/// Production transport backed by `reqwest::blocking`.
pub struct HttpTransport;

impl Transport for HttpTransport {
    fn perform(
        &self,
        method: Method,
        url: &str,
        body: Option<&str>,
        content_type: Option<&str>,
        timeouts: Timeouts,
    ) -> Outcome {
        // A fresh client per call: the connection is opened and released
        // within this function, matching the one-shot model.
        let client = match reqwest::blocking::Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.read)
            .build()
        {
            Ok(c) => c,
            Err(_) => return Outcome::NoResponse,
        };

        let mut request = match method {
            Method::Get => client.get(url),
            Method::Post => client.post(url),
        };
        if let Some(ct) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, ct);
        }
        if let Some(data) = body {
            request = request.body(data.to_string());
        }

        match request.send() {
            Ok(response) => {
                let status = response.status().as_u16();
                // A response only counts once the full body arrived; a read
                // timeout or a connection dropped mid-body is still a
                // network-layer failure.
                match response.text() {
                    Ok(body) => Outcome::Response { status, body },
                    Err(_) => Outcome::NoResponse,
                }
            }
            Err(_) => Outcome::NoResponse,
        }
    }
}
