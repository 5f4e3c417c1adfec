//! Service for generating images through the remote agent.
//!
//! Guards against overlapping requests and turns agent responses into
//! gallery-ready drafts. Nothing reaches the gallery until a draft is saved.

use crate::agent::{AgentRequest, AgentResult, GenerationAgent};
use crate::config::DEFAULT_TITLE;
use crate::error::{GenerationError, Result, ValidationError};
use crate::models::{Category, Image};
use crate::state::{Gallery, lock};
use log::{error, info, warn};
use std::sync::{Arc, Mutex};

/// Service for managing image generation.
#[derive(Clone)]
pub struct GenerationService {
    agent: Arc<dyn GenerationAgent>,
    gallery: Arc<Mutex<Gallery>>,
    /// Session id of the outstanding request, if any.
    in_flight: Arc<Mutex<Option<String>>>,
}

/// Releases the in-flight slot when the request ends, however it ends.
struct InFlightGuard {
    slot: Arc<Mutex<Option<String>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        *lock(&self.slot) = None;
    }
}

impl GenerationService {
    pub fn new(agent: Arc<dyn GenerationAgent>, gallery: Arc<Mutex<Gallery>>) -> Self {
        Self {
            agent,
            gallery,
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_generating(&self) -> bool {
        lock(&self.in_flight).is_some()
    }

    /// Asks the agent for an image and returns it as an unsaved draft.
    ///
    /// Returns an error if:
    /// - The prompt is blank
    /// - Another generation is still outstanding
    /// - The agent fails or produces no image
    pub async fn generate(&self, prompt: &str, hint: Category) -> Result<Image> {
        if prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt.into());
        }

        let request = AgentRequest::new(prompt);
        let _guard = self.begin(&request.session_id)?;

        info!(
            "Generating {} image (session {}): {}",
            hint, request.session_id, prompt
        );

        let result = self.agent.call(&request).await.map_err(|e| {
            error!("Error generating image: {}", e);
            e
        })?;

        let draft = draft_from_result(prompt, hint, &result).map_err(|e| {
            error!("Error generating image: {}", e);
            e
        })?;

        info!("Generated \"{}\" at {}", draft.title, draft.image_url);
        Ok(draft)
    }

    /// Adds a generated draft to the gallery and returns its id.
    pub fn save(&self, draft: Image) -> String {
        let id = draft.id.clone();
        lock(&self.gallery).add_image(draft);
        id
    }

    /// Claims the single in-flight slot.
    fn begin(&self, session_id: &str) -> std::result::Result<InFlightGuard, GenerationError> {
        let mut slot = lock(&self.in_flight);
        if let Some(ref outstanding) = *slot {
            warn!("Generation already in progress (session {})", outstanding);
            return Err(GenerationError::InFlight);
        }
        *slot = Some(session_id.to_string());

        Ok(InFlightGuard {
            slot: self.in_flight.clone(),
        })
    }
}

/// Builds a draft image from a successful agent response.
///
/// Missing metadata falls back to the default title, the user prompt and
/// the requested category.
pub fn draft_from_result(
    prompt: &str,
    hint: Category,
    result: &AgentResult,
) -> std::result::Result<Image, GenerationError> {
    if let Some(message) = result.failure() {
        return Err(GenerationError::Agent(message));
    }

    let image_url = result.image_url().ok_or(GenerationError::NoImageProduced)?;
    let metadata = result.metadata();

    let title = metadata
        .title
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let enhanced_prompt = metadata
        .enhanced_prompt
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| prompt.to_string());
    let category = metadata
        .category
        .and_then(|category| category.parse::<Category>().ok())
        .unwrap_or(hint);

    Ok(Image::new(image_url, title, enhanced_prompt, category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentResponse, ArtifactFile, ModuleOutputs};
    use async_trait::async_trait;

    fn result_with(url: Option<&str>, metadata: serde_json::Value) -> AgentResult {
        AgentResult {
            success: Some(true),
            error: None,
            response: Some(AgentResponse {
                result: Some(metadata),
            }),
            module_outputs: Some(ModuleOutputs {
                artifact_files: Some(vec![ArtifactFile {
                    file_url: url.map(str::to_string),
                }]),
            }),
        }
    }

    #[test]
    fn metadata_fallbacks() {
        let result = result_with(
            Some("https://x/a.png"),
            serde_json::json!({"category": "Forest"}),
        );
        let draft = draft_from_result("misty lake", Category::Coastal, &result).unwrap();
        assert_eq!(draft.title, DEFAULT_TITLE);
        assert_eq!(draft.enhanced_prompt, "misty lake");
        assert_eq!(draft.category, Category::Coastal);
        assert!(!draft.is_favorite);
    }

    #[test]
    fn missing_url_is_no_image() {
        let result = result_with(None, serde_json::json!({"title": "X"}));
        let err = draft_from_result("p", Category::Other, &result).unwrap_err();
        assert!(matches!(err, GenerationError::NoImageProduced));
    }

    /// Agent that never answers until released.
    struct PendingAgent {
        release: async_std::channel::Receiver<()>,
    }

    #[async_trait]
    impl GenerationAgent for PendingAgent {
        async fn call(
            &self,
            _request: &AgentRequest,
        ) -> std::result::Result<AgentResult, GenerationError> {
            let _ = self.release.recv().await;
            Ok(result_with(Some("https://x/a.png"), serde_json::json!({})))
        }
    }

    #[test]
    fn second_request_is_rejected_while_one_is_outstanding() {
        let (release, receiver) = async_std::channel::bounded(1);
        let service = GenerationService::new(
            Arc::new(PendingAgent { release: receiver }),
            Arc::new(Mutex::new(Gallery::in_memory())),
        );

        async_std::task::block_on(async {
            let first = {
                let service = service.clone();
                async_std::task::spawn(async move {
                    service.generate("first", Category::Temples).await
                })
            };

            while !service.is_generating() {
                async_std::task::yield_now().await;
            }

            let err = service.generate("second", Category::Temples).await.unwrap_err();
            assert!(matches!(
                err,
                crate::error::AppError::Generation(GenerationError::InFlight)
            ));

            release.send(()).await.unwrap();
            assert!(first.await.is_ok());
            assert!(!service.is_generating());
        });
    }
}
