//! Async requester for report executions.

use serde_json::Value;

use super::error::{ExecutionError, ExecutionResult};
use super::protocol::{
    executions_path, tabular_values, DataResult, ExecutionOptions, ExecutionRequest,
    ExecutionResponse, ExecutionResultEnvelope, Header, HeaderType,
};
use super::transport::{HttpTransport, Transport};
use crate::config::{PollSettings, Settings};
use crate::model::ExecutionConfiguration;

/// Runs executions against the platform and collects tabular results.
///
/// Each call is a create-execution POST followed by a GET of the result
/// handle, repeated while the platform answers `202 Accepted`.
///
/// # Example
///
/// ```ignore
/// use mdexec::execution::ExecutionClient;
///
/// let client = ExecutionClient::from_settings(&settings)?;
/// let config = mdexec::compile(&md_obj)?;
/// let result = client.execute("myProject", &config).await?;
/// ```
pub struct ExecutionClient<T: Transport> {
    transport: T,
    poll: PollSettings,
}

impl ExecutionClient<HttpTransport> {
    /// Build a client talking HTTP to the configured platform.
    pub fn from_settings(settings: &Settings) -> ExecutionResult<Self> {
        let transport = HttpTransport::from_settings(&settings.platform)?;
        Ok(Self::new(transport).with_poll(settings.poll.clone()))
    }
}

impl<T: Transport> ExecutionClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            poll: PollSettings::default(),
        }
    }

    pub fn with_poll(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute `columns` (attribute display form or metric identifiers) in a project.
    ///
    /// # Errors
    ///
    /// - [`ExecutionError::ExecutionFailed`] when the create request is rejected.
    /// - [`ExecutionError::DataResultFailed`] when the result retrieval is rejected.
    /// - [`ExecutionError::PollTimeout`] when the result never becomes ready.
    pub async fn get_data(
        &self,
        project_id: &str,
        columns: &[String],
        options: ExecutionOptions,
    ) -> ExecutionResult<DataResult> {
        let request = ExecutionRequest::new(columns.to_vec(), options);
        let body = serde_json::to_value(&request).map_err(ExecutionError::SerializeFailed)?;
        let path = executions_path(project_id);

        tracing::info!(project = project_id, columns = columns.len(), "creating execution");
        let response = self.transport.post_json(&path, &body).await?;
        if !response.is_success() {
            tracing::warn!(project = project_id, status = response.status, "execution rejected");
            return Err(ExecutionError::ExecutionFailed {
                status: response.status,
            });
        }

        let envelope = serde_json::from_str::<ExecutionResponse>(&response.body)
            .map_err(ExecutionError::DeserializeFailed)?
            .execution_result;
        let handle = envelope
            .tabular_data_result
            .clone()
            .ok_or(ExecutionError::MissingResultHandle)?;
        let headers = build_headers(columns, &envelope);

        let (raw_data, is_empty) = self.fetch_tabular(&handle).await?;
        Ok(DataResult {
            headers,
            raw_data,
            is_empty,
        })
    }

    /// Execute a compiled configuration, passing its definitions, where
    /// clause and ordering through.
    pub async fn execute(
        &self,
        project_id: &str,
        config: &ExecutionConfiguration,
    ) -> ExecutionResult<DataResult> {
        let definition = &config.execution;
        let mut options = ExecutionOptions::default()
            .with_definitions(definition.definitions.clone())
            .with_order_by(definition.order_by.clone());
        if let Some(where_clause) = &definition.where_clause {
            options = options.with_where(where_clause.clone());
        }
        self.get_data(project_id, &config.columns, options).await
    }

    /// Poll the tabular result handle until it is ready.
    ///
    /// Returns the rows and whether the platform reported an empty result.
    async fn fetch_tabular(&self, handle: &str) -> ExecutionResult<(Vec<Value>, bool)> {
        let max_attempts = self.poll.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let response = self.transport.get(handle).await?;
            match response.status {
                202 => {
                    tracing::debug!(attempt, handle, "data result not ready");
                    if attempt < max_attempts {
                        tokio::time::sleep(self.poll.interval()).await;
                    }
                }
                204 => return Ok((Vec::new(), true)),
                _ if response.is_success() => {
                    let values = tabular_values(&response.body).unwrap_or_default();
                    tracing::debug!(rows = values.len(), "data result received");
                    return Ok((values, false));
                }
                status => {
                    tracing::warn!(status, handle, "data result rejected");
                    return Err(ExecutionError::DataResultFailed { status });
                }
            }
        }

        Err(ExecutionError::PollTimeout {
            attempts: max_attempts,
        })
    }
}

/// Headers from the response when provided, otherwise from its column
/// metadata paired with the requested identifiers.
fn build_headers(columns: &[String], envelope: &ExecutionResultEnvelope) -> Vec<Header> {
    if let Some(headers) = &envelope.headers {
        return headers.clone();
    }

    columns
        .iter()
        .zip(&envelope.columns)
        .map(|(id, column)| {
            let meta = column.meta();
            Header {
                id: id.clone(),
                uri: meta.and_then(|m| m.uri.clone()),
                header_type: column.header_type().unwrap_or(HeaderType::Metric),
                title: meta.and_then(|m| m.title.clone()).unwrap_or_default(),
            }
        })
        .collect()
}
