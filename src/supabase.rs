use indicatif::ProgressBar;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use tracing::info;

use crate::error::LoadError;

pub const BATCH_SIZE: usize = 500;
const URL_ENV: &str = "SUPABASE_URL";
const KEY_ENV: &str = "SUPABASE_KEY";

/// PostgREST client for the hosted tables. Every write is a merge-on-conflict
/// upsert, so re-running a failed load is safe.
pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, key: &str) -> Result<Self, LoadError> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(key)?);
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", key))?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "prefer",
            HeaderValue::from_static("return=representation,resolution=merge-duplicates"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_env() -> Result<Self, LoadError> {
        let url = std::env::var(URL_ENV).map_err(|_| LoadError::MissingEnv(URL_ENV))?;
        let key = std::env::var(KEY_ENV).map_err(|_| LoadError::MissingEnv(KEY_ENV))?;
        Self::new(&url, &key)
    }

    fn endpoint(&self, table: &str, on_conflict: &str) -> String {
        format!("{}/rest/v1/{}?on_conflict={}", self.base_url, table, on_conflict)
    }

    /// Upsert `rows` in batches of [`BATCH_SIZE`]. Returns the number of rows
    /// the server echoed back. The first non-2xx response aborts the run.
    pub async fn upsert<T: Serialize>(
        &self,
        table: &str,
        on_conflict: &str,
        rows: &[T],
        pb: &ProgressBar,
    ) -> Result<usize, LoadError> {
        let url = self.endpoint(table, on_conflict);
        let mut total = 0;

        for (i, batch) in rows.chunks(BATCH_SIZE).enumerate() {
            let response = self.client.post(&url).json(batch).send().await?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(LoadError::Sink {
                    table: table.to_string(),
                    status: status.as_u16(),
                    body,
                });
            }

            let inserted = count_rows(&body)?;
            total += inserted;
            info!("{} batch {}: upserted {} rows", table, i + 1, inserted);
            pb.inc(batch.len() as u64);
        }

        Ok(total)
    }
}

/// Rows in a `return=representation` body; an empty body counts as zero.
fn count_rows(body: &str) -> Result<usize, LoadError> {
    if body.trim().is_empty() {
        return Ok(0);
    }
    let rows: Vec<serde_json::Value> = serde_json::from_str(body)?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_format() {
        let c = SupabaseClient::new("https://example.supabase.co/", "key").unwrap();
        assert_eq!(
            c.endpoint("sdr_reports", "control_number"),
            "https://example.supabase.co/rest/v1/sdr_reports?on_conflict=control_number"
        );
    }

    #[test]
    fn rejects_key_with_newline() {
        let err = SupabaseClient::new("https://example.supabase.co", "bad\nkey").err().unwrap();
        assert!(matches!(err, LoadError::Header(_)));
    }

    #[test]
    fn counts_returned_rows() {
        assert_eq!(count_rows("").unwrap(), 0);
        assert_eq!(count_rows("[]").unwrap(), 0);
        assert_eq!(count_rows(r#"[{"tail_number":"N1"},{"tail_number":"N2"}]"#).unwrap(), 2);
        assert!(count_rows("not json").is_err());
    }
}
