//! Execution requester.
//!
//! Submits an execution to the platform and retrieves its tabular result.
//!
//! ```text
//! ┌────────────────┐  POST executions   ┌──────────┐
//! │ExecutionClient │ ─────────────────▶ │ platform │
//! │                │ ◀───────────────── │          │
//! │                │  tabularDataResult │          │
//! │                │  GET (202 → retry) │          │
//! │                │ ─────────────────▶ │          │
//! └────────────────┘ ◀── rows / 204 ─── └──────────┘
//! ```
//!
//! The network is reached through the [`Transport`] trait so the requester
//! can be driven by [`HttpTransport`] or by a scripted transport in tests.

pub mod client;
pub mod error;
pub mod protocol;
pub mod test_utils;
pub mod transport;

pub use client::ExecutionClient;
pub use error::{ExecutionError, ExecutionResult};
pub use protocol::{DataResult, ExecutionOptions, Header, HeaderType};
pub use transport::{HttpTransport, Transport, TransportResponse};
