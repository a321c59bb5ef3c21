//! Athena query execution: submit, poll to a terminal state, fetch rows.

use std::time::Duration;

use aws_sdk_athena::types::{QueryExecutionContext, QueryExecutionState, ResultConfiguration};
use shared::{AnalyticsQuery, Config, Error, Result};
use tracing::info;

const POLL_INTERVAL: Duration = Duration::from_millis(500);
const MAX_POLLS: u32 = 20;

/// Runs one analytics query to completion and returns the result rows
/// with the column-header row stripped.
pub async fn run_query(
    athena: &aws_sdk_athena::Client,
    config: &Config,
    query: AnalyticsQuery,
) -> Result<Vec<Vec<String>>> {
    let context = QueryExecutionContext::builder()
        .database(&config.athena_database)
        .build();
    let results = ResultConfiguration::builder()
        .output_location(&config.athena_output_location)
        .build();

    let started = athena
        .start_query_execution()
        .query_string(&query.sql)
        .query_execution_context(context)
        .result_configuration(results)
        .set_execution_parameters(Some(query.parameters))
        .send()
        .await
        .map_err(|e| Error::Query(e.to_string()))?;

    let execution_id = started
        .query_execution_id()
        .ok_or_else(|| Error::Query("query engine returned no execution id".to_string()))?
        .to_string();
    info!("Submitted analytics query {}", execution_id);

    wait_for_completion(athena, &execution_id).await?;
    fetch_rows(athena, &execution_id).await
}

/// Polls the execution until it reaches a terminal state. Bounded: after
/// `MAX_POLLS` attempts the query is reported as failed rather than
/// fetching results that may not exist yet.
async fn wait_for_completion(athena: &aws_sdk_athena::Client, execution_id: &str) -> Result<()> {
    for _ in 0..MAX_POLLS {
        tokio::time::sleep(POLL_INTERVAL).await;

        let response = athena
            .get_query_execution()
            .query_execution_id(execution_id)
            .send()
            .await
            .map_err(|e| Error::Query(e.to_string()))?;
        let status = response
            .query_execution()
            .and_then(|execution| execution.status())
            .ok_or_else(|| Error::Query(format!("no status reported for {execution_id}")))?;

        match status.state() {
            Some(QueryExecutionState::Succeeded) => return Ok(()),
            Some(state @ (QueryExecutionState::Failed | QueryExecutionState::Cancelled)) => {
                let reason = status
                    .state_change_reason()
                    .unwrap_or("no reason reported");
                return Err(Error::Query(format!(
                    "query {execution_id} {}: {reason}",
                    state.as_str().to_lowercase()
                )));
            }
            // Queued or Running: keep polling.
            _ => {}
        }
    }

    Err(Error::Query(format!(
        "query {execution_id} did not complete within {}s",
        POLL_INTERVAL.as_secs_f64() * f64::from(MAX_POLLS)
    )))
}

async fn fetch_rows(
    athena: &aws_sdk_athena::Client,
    execution_id: &str,
) -> Result<Vec<Vec<String>>> {
    let response = athena
        .get_query_results()
        .query_execution_id(execution_id)
        .send()
        .await
        .map_err(|e| Error::Query(e.to_string()))?;

    let rows = response
        .result_set()
        .map(|result_set| result_set.rows())
        .unwrap_or_default();

    // The first row echoes the column names.
    Ok(rows
        .iter()
        .skip(1)
        .map(|row| {
            row.data()
                .iter()
                .map(|datum| datum.var_char_value().unwrap_or_default().to_string())
                .collect()
        })
        .collect())
}
