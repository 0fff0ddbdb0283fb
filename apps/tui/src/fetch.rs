use heatmap_core::Dataset;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Decode(#[from] heatmap_core::Error),
}

pub type FetchResult = Result<Dataset, FetchError>;

pub fn build_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// One GET, decoded as the temperature document. No retry, no timeout.
pub async fn fetch_dataset(client: &reqwest::Client, url: &str) -> FetchResult {
    tracing::debug!(url, "fetching dataset");
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    let dataset = Dataset::from_slice(&body)?;
    tracing::info!(records = dataset.len(), "dataset fetched");
    Ok(dataset)
}

/// Runs the fetch on the runtime and hands the result back to the event loop.
pub fn spawn_fetch(
    client: reqwest::Client,
    url: String,
    results: UnboundedSender<FetchResult>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = fetch_dataset(&client, &url).await;
        if results.send(result).is_err() {
            tracing::debug!("event loop gone before fetch completed");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn unreachable_url_reports_an_error() {
        let client = build_client().unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_fetch(client, "http://127.0.0.1:9/global-temperature.json".to_string(), tx)
            .await
            .unwrap();
        let result = rx.recv().await.unwrap();
        assert!(matches!(result, Err(FetchError::Http(_))));
    }

    #[tokio::test]
    async fn invalid_url_is_rejected() {
        let client = build_client().unwrap();
        assert!(fetch_dataset(&client, "not a url").await.is_err());
    }
}
