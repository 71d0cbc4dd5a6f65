use reqwest::Client;
use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};

#[derive(Serialize)]
struct QueryRequest {
    query: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    answer: String,
}

/// HTTP client for the MOSDAC answer service.
#[derive(Clone)]
pub struct AnswerClient {
    client: Client,
    base_url: String,
}

impl AnswerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one question, return the markdown answer text.
    pub async fn ask(&self, question: &str) -> Result<String> {
        let url = format!("{}/query", self.base_url);

        let request = QueryRequest {
            query: question.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "answer service returned status: {}",
                response.status()
            ));
        }

        let body: QueryResponse = response.json().await?;
        Ok(body.answer)
    }
}
