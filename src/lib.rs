// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive client.
//
// Module responsibilities:
// - `transport`: Executes a single HTTP call with explicit connect/read
//   timeouts and reports a raw outcome (status + body, or no response).
// - `api`: Owns the wire contract with the master service: builds the
//   request payload, classifies transport outcomes and parses responses
//   into `ProcessingResult` values.
// - `ui`: Implements the terminal-based menu flows and delegates requests
//   to `api`.
//
// Keeping this separation makes it easy to test the client logic against a
// fake transport and to replace the UI in the future.
pub mod api;
pub mod transport;
pub mod ui;
