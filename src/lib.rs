//! # mdexec
//!
//! Compiles declarative bucket descriptions into platform execution
//! configurations and fetches their tabular results.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            MetadataObject (bucket description)           │
//! │        (measures, categories, filters, chart type)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [compile] ◄── [generate]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 ExecutionConfiguration                   │
//! │       (columns, definitions, where, orderBy)             │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [execution]
//! ┌─────────────────────────────────────────────────────────┐
//! │           DataResult (headers + raw rows)                │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [reshape]
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Chart-ready matrices                    │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod compile;
pub mod config;
pub mod execution;
pub mod generate;
pub mod logging;
pub mod model;
pub mod reshape;

pub use compile::{compile, compile_json, CompileError, CompileResult};
pub use execution::{DataResult, ExecutionClient, ExecutionError, ExecutionOptions};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::compile::{compile, compile_json, CompileError};
    pub use crate::config::Settings;
    pub use crate::execution::{
        DataResult, ExecutionClient, ExecutionError, ExecutionOptions, Header, HeaderType,
        HttpTransport, Transport,
    };
    pub use crate::model::{
        ExecutionConfiguration, MetadataObject, MetricDefinition, OrderBy, SortDirection,
    };
    pub use crate::reshape::chord_matrix;
}
