// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::SearchError;

/// Turns query text into an embedding vector.
///
/// Implementations block; run them through a [`SearchWorker`](crate::SearchWorker)
/// to keep them off the render loop.
pub trait EmbeddingService: Send + Sync {
    /// Embeds `text`.
    fn embed(&self, text: &str) -> Result<Vec<f32>, SearchError>;
}

impl<F> EmbeddingService for F
where
    F: Fn(&str) -> Result<Vec<f32>, SearchError> + Send + Sync,
{
    fn embed(&self, text: &str) -> Result<Vec<f32>, SearchError> {
        self(text)
    }
}

#[cfg(feature = "http")]
pub use http::{DEFAULT_EMBED_TIMEOUT, HttpEmbeddingClient};

#[cfg(feature = "http")]
mod http {
    use core::time::Duration;

    use serde::{Deserialize, Serialize};

    use super::EmbeddingService;
    use crate::SearchError;

    /// Default total timeout for one embedding request.
    pub const DEFAULT_EMBED_TIMEOUT: Duration = Duration::from_secs(8);

    #[derive(Serialize)]
    struct EmbedRequest<'a> {
        text: &'a str,
    }

    #[derive(Deserialize)]
    struct EmbedResponse {
        embedding: Vec<f32>,
    }

    /// Embedding service reached over HTTP.
    ///
    /// Sends `POST <endpoint>` with `{"text": ...}` and expects
    /// `{"embedding": [...]}` back.
    #[derive(Clone, Debug)]
    pub struct HttpEmbeddingClient {
        agent: ureq::Agent,
        endpoint: String,
    }

    impl HttpEmbeddingClient {
        /// Creates a client whose requests fail after `timeout` in total.
        #[must_use]
        pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
            Self {
                agent: understory_media_catalog::agent_with_timeout(timeout),
                endpoint: endpoint.into(),
            }
        }

        /// The endpoint requests are sent to.
        #[must_use]
        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }
    }

    impl EmbeddingService for HttpEmbeddingClient {
        fn embed(&self, text: &str) -> Result<Vec<f32>, SearchError> {
            let mut response = self
                .agent
                .post(&self.endpoint)
                .send_json(EmbedRequest { text })?;
            let body = response.body_mut().read_to_string()?;
            let parsed: EmbedResponse = serde_json::from_str(&body)?;
            if parsed.embedding.is_empty() {
                return Err(SearchError::EmptyEmbedding);
            }
            Ok(parsed.embedding)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::{EmbedRequest, EmbedResponse};

        #[test]
        fn wire_shapes() {
            let body = serde_json::to_string(&EmbedRequest { text: "red car" }).unwrap();
            assert_eq!(body, r#"{"text":"red car"}"#);
            let parsed: EmbedResponse =
                serde_json::from_str(r#"{"embedding":[0.5,-1.0],"model":"x"}"#).unwrap();
            assert_eq!(parsed.embedding, vec![0.5, -1.0]);
        }
    }
}
