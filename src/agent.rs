//! Client side of the remote image generation agent.
//!
//! The agent is an opaque external service: one JSON request carrying the
//! prompt, the agent id and a session token; one JSON response carrying
//! artifact URLs and optional metadata.

use crate::config::{AGENT_ID, HTTP_TIMEOUT, SESSION_PREFIX, USER_AGENT};
use crate::error::GenerationError;
use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};

/// One generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentRequest {
    pub message: String,
    pub agent_id: String,
    pub session_id: String,
}

impl AgentRequest {
    /// Builds a request for the gallery's agent with a fresh session token.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            message: prompt.into(),
            agent_id: AGENT_ID.to_string(),
            session_id: format!("{}{}", SESSION_PREFIX, Utc::now().timestamp_millis()),
        }
    }
}

/// Raw agent response. Every part is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentResult {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub response: Option<AgentResponse>,
    #[serde(default)]
    pub module_outputs: Option<ModuleOutputs>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleOutputs {
    #[serde(default)]
    pub artifact_files: Option<Vec<ArtifactFile>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtifactFile {
    #[serde(default)]
    pub file_url: Option<String>,
}

/// Metadata the agent may attach to a generated image.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerationMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub enhanced_prompt: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl AgentResult {
    /// URL of the first artifact, if it carries a non-blank one.
    pub fn image_url(&self) -> Option<&str> {
        self.module_outputs
            .as_ref()?
            .artifact_files
            .as_ref()?
            .first()?
            .file_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Result metadata; anything that does not parse counts as absent.
    pub fn metadata(&self) -> GenerationMetadata {
        self.response
            .as_ref()
            .and_then(|response| response.result.clone())
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default()
    }

    /// The agent's own failure report, if it flagged the call as unsuccessful.
    pub fn failure(&self) -> Option<String> {
        match self.success {
            Some(false) => Some(
                self.error
                    .clone()
                    .unwrap_or_else(|| "Failed to generate image".to_string()),
            ),
            _ => None,
        }
    }
}

/// A service that turns prompts into images.
#[async_trait]
pub trait GenerationAgent: Send + Sync {
    async fn call(&self, request: &AgentRequest) -> Result<AgentResult, GenerationError>;
}

/// Agent reached over HTTP with a JSON POST.
pub struct HttpAgent {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpAgent {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }
}

#[async_trait]
impl GenerationAgent for HttpAgent {
    async fn call(&self, request: &AgentRequest) -> Result<AgentResult, GenerationError> {
        debug!("POST {} (session {})", self.endpoint, request.session_id);

        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Agent(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_carries_agent_and_session() {
        let request = AgentRequest::new("bamboo forest shrine");
        assert_eq!(request.agent_id, AGENT_ID);
        assert!(request.session_id.starts_with(SESSION_PREFIX));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["message"], "bamboo forest shrine");
    }

    #[test]
    fn extracts_url_and_metadata() {
        let raw = r#"{
            "success": true,
            "response": { "result": { "title": "Shrine", "category": "Temples" } },
            "module_outputs": { "artifact_files": [ { "file_url": "https://x/img.png" } ] }
        }"#;
        let result: AgentResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.image_url(), Some("https://x/img.png"));
        assert_eq!(
            result.metadata(),
            GenerationMetadata {
                title: Some("Shrine".into()),
                enhanced_prompt: None,
                category: Some("Temples".into()),
            }
        );
        assert_eq!(result.failure(), None);
    }

    #[test]
    fn missing_or_blank_artifacts_have_no_url() {
        for raw in [
            r#"{}"#,
            r#"{"module_outputs": {}}"#,
            r#"{"module_outputs": {"artifact_files": null}}"#,
            r#"{"module_outputs": {"artifact_files": []}}"#,
            r#"{"module_outputs": {"artifact_files": [{"file_url": ""}]}}"#,
        ] {
            let result: AgentResult = serde_json::from_str(raw).unwrap();
            assert_eq!(result.image_url(), None, "{}", raw);
        }
    }

    #[test]
    fn non_object_result_means_no_metadata() {
        let raw = r#"{"response": {"result": "plain text answer"}}"#;
        let result: AgentResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.metadata(), GenerationMetadata::default());
    }

    #[test]
    fn unsuccessful_result_reports_failure() {
        let raw = r#"{"success": false, "error": "quota exceeded"}"#;
        let result: AgentResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.failure().as_deref(), Some("quota exceeded"));
    }
}
