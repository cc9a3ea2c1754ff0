//! OpenAI embedding provider adapter.
//!
//! Calls the `/embeddings` endpoint of any OpenAI-compatible API. The
//! configured model is tried first, then each fallback model. A "model not
//! found" response moves on to the next model; any other failure aborts.

use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{EmbeddingConfig, StateVector};
use crate::domain::ports::EmbeddingProvider;
use crate::infrastructure::openai::{OpenAiClient, OpenAiError};

/// Batches in flight at once; results keep input order.
const MAX_CONCURRENT_BATCHES: usize = 4;

/// OpenAI embedding provider with a model fallback chain.
pub struct OpenAiEmbeddingProvider {
    client: OpenAiClient,
    models: Vec<String>,
    batch_size: usize,
    /// Model that last answered; every later call reuses it so the vector
    /// dimension stays fixed for the process.
    active_model: Mutex<Option<String>>,
}

impl OpenAiEmbeddingProvider {
    pub fn new(client: OpenAiClient, config: &EmbeddingConfig) -> Self {
        Self {
            client,
            models: model_chain(&config.model, &config.fallback_models),
            batch_size: config.batch_size.max(1),
            active_model: Mutex::new(None),
        }
    }

    /// Models in the order they will be tried.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// The model that produced the most recent embeddings, if any.
    pub fn active_model(&self) -> Option<String> {
        self.active_model.lock().ok().and_then(|guard| guard.clone())
    }

    fn candidates(&self) -> Vec<String> {
        match self.active_model() {
            Some(model) => vec![model],
            None => self.models.clone(),
        }
    }

    async fn embed_with_model(
        &self,
        model: &str,
        texts: &[String],
    ) -> Result<Vec<Vec<f64>>, OpenAiError> {
        let requests: Vec<_> = texts
            .chunks(self.batch_size)
            .map(|chunk| self.embed_batch(model, chunk))
            .collect();
        let batches: Vec<Vec<Vec<f64>>> = stream::iter(requests)
            .buffered(MAX_CONCURRENT_BATCHES)
            .try_collect()
            .await?;
        Ok(batches.into_iter().flatten().collect())
    }

    async fn embed_batch(
        &self,
        model: &str,
        chunk: &[String],
    ) -> Result<Vec<Vec<f64>>, OpenAiError> {
        let request = EmbeddingsRequest {
            model,
            input: chunk,
        };
        let response: EmbeddingsResponse = self.client.post_json("embeddings", &request).await?;

        if response.data.len() != chunk.len() {
            return Err(OpenAiError::MalformedResponse(format!(
                "expected {} embeddings, got {}",
                chunk.len(),
                response.data.len()
            )));
        }

        let mut data = response.data;
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

/// Configured model first, then each fallback not equal to it.
pub fn model_chain(model: &str, fallbacks: &[String]) -> Vec<String> {
    let mut chain = vec![model.to_string()];
    for fallback in fallbacks {
        if !chain.contains(fallback) {
            chain.push(fallback.clone());
        }
    }
    chain
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn embed(&self, texts: &[String]) -> DomainResult<Vec<StateVector>> {
        let texts: Vec<String> = texts
            .iter()
            .filter(|t| !t.trim().is_empty())
            .cloned()
            .collect();
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut last_error = None;
        for model in self.candidates() {
            match self.embed_with_model(&model, &texts).await {
                Ok(vectors) => {
                    if let Ok(mut active) = self.active_model.lock() {
                        if active.as_deref() != Some(model.as_str()) {
                            info!(model = %model, "embedding model selected");
                            *active = Some(model);
                        }
                    }
                    return Ok(vectors.into_iter().map(StateVector::new).collect());
                }
                Err(err) if err.is_not_found() => {
                    warn!(model = %model, "embedding model not found, trying next fallback");
                    last_error = Some(err);
                }
                Err(err) => return Err(DomainError::EmbeddingUnavailable(err.to_string())),
            }
        }

        Err(DomainError::EmbeddingUnavailable(match last_error {
            Some(err) => format!("no embedding model available: {err}"),
            None => "no embedding model configured".to_string(),
        }))
    }
}

// -- OpenAI API request/response types --

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f64>,
    index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::openai::RetryPolicy;
    use mockito::Matcher;
    use serde_json::json;

    fn provider(server: &mockito::Server, config: EmbeddingConfig) -> OpenAiEmbeddingProvider {
        let client = OpenAiClient::new(
            server.url(),
            Some("test-key".to_string()),
            5,
            RetryPolicy::new(2, 1, 5),
        )
        .unwrap();
        OpenAiEmbeddingProvider::new(client, &config)
    }

    fn config(model: &str, fallbacks: &[&str]) -> EmbeddingConfig {
        EmbeddingConfig {
            model: model.to_string(),
            fallback_models: fallbacks.iter().map(|m| m.to_string()).collect(),
            ..EmbeddingConfig::default()
        }
    }

    #[test]
    fn test_model_chain_dedupes() {
        let chain = model_chain("b", &["a".into(), "b".into(), "c".into()]);
        assert_eq!(chain, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_embed_orders_by_index() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/embeddings")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({"model": "primary"})))
            .with_status(200)
            .with_body(
                json!({"data": [
                    {"embedding": [0.0, 1.0], "index": 1},
                    {"embedding": [1.0, 0.0], "index": 0}
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let provider = provider(&server, config("primary", &[]));
        let vectors = provider
            .embed(&["first".to_string(), "second".to_string()])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(vectors[0].as_slice(), &[1.0, 0.0]);
        assert_eq!(vectors[1].as_slice(), &[0.0, 1.0]);
        assert_eq!(provider.active_model().as_deref(), Some("primary"));
    }

    #[tokio::test]
    async fn test_not_found_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let missing = server
            .mock("POST", "/embeddings")
            .match_body(Matcher::PartialJson(json!({"model": "missing"})))
            .with_status(404)
            .with_body(r#"{"error": {"message": "model not found"}}"#)
            .create_async()
            .await;
        let fallback = server
            .mock("POST", "/embeddings")
            .match_body(Matcher::PartialJson(json!({"model": "fallback"})))
            .with_status(200)
            .with_body(json!({"data": [{"embedding": [0.5], "index": 0}]}).to_string())
            .create_async()
            .await;

        let provider = provider(&server, config("missing", &["fallback"]));
        let vector = provider.embed_one("hello").await.unwrap();

        missing.assert_async().await;
        fallback.assert_async().await;
        assert_eq!(vector.as_slice(), &[0.5]);
        assert_eq!(provider.active_model().as_deref(), Some("fallback"));
    }

    #[tokio::test]
    async fn test_all_models_missing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/embeddings")
            .with_status(404)
            .with_body("not found")
            .expect(2)
            .create_async()
            .await;

        let provider = provider(&server, config("a", &["b"]));
        let err = provider.embed(&["x".to_string()]).await.unwrap_err();
        assert!(matches!(err, DomainError::EmbeddingUnavailable(_)));
    }

    #[tokio::test]
    async fn test_auth_failure_aborts_chain() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/embeddings")
            .with_status(401)
            .expect(1)
            .create_async()
            .await;

        let provider = provider(&server, config("a", &["b", "c"]));
        let err = provider.embed(&["x".to_string()]).await.unwrap_err();
        mock.assert_async().await;
        assert!(matches!(err, DomainError::EmbeddingUnavailable(_)));
    }

    #[tokio::test]
    async fn test_blank_input_skips_request() {
        let server = mockito::Server::new_async().await;
        let provider = provider(&server, config("a", &[]));
        let vectors = provider
            .embed(&["   ".to_string(), String::new()])
            .await
            .unwrap();
        assert!(vectors.is_empty());
    }

    #[tokio::test]
    async fn test_batches_are_chunked() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/embeddings")
            .with_status(200)
            .with_body(json!({"data": [{"embedding": [1.0], "index": 0}]}).to_string())
            .expect(3)
            .create_async()
            .await;

        let provider = provider(
            &server,
            EmbeddingConfig {
                batch_size: 1,
                ..config("a", &[])
            },
        );
        let texts: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let vectors = provider.embed(&texts).await.unwrap();
        mock.assert_async().await;
        assert_eq!(vectors.len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_batches_keep_input_order() {
        let mut server = mockito::Server::new_async().await;
        let mut mocks = Vec::new();
        for (i, text) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            mocks.push(
                server
                    .mock("POST", "/embeddings")
                    .match_body(Matcher::PartialJson(json!({"input": [text]})))
                    .with_status(200)
                    .with_body(
                        json!({"data": [{"embedding": [i as f64], "index": 0}]}).to_string(),
                    )
                    .create_async()
                    .await,
            );
        }

        let provider = provider(
            &server,
            EmbeddingConfig {
                batch_size: 1,
                ..config("a", &[])
            },
        );
        let texts: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        let vectors = provider.embed(&texts).await.unwrap();

        for mock in &mocks {
            mock.assert_async().await;
        }
        let firsts: Vec<f64> = vectors.iter().map(|v| v.as_slice()[0]).collect();
        assert_eq!(firsts, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }
}
