use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The generic message surfaced to clients whenever the upstream model fails.
/// The real failure detail only ever goes to the server log.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "The Technical Hub encountered an error rendering your vision. Please try again.";

/// Bound on a single upstream call so a hung model resolves to a failure instead
/// of an indefinitely held connection.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("upstream response carried no image payload")]
    NoImagePayload,
    #[error("source image is not valid base64")]
    BadSourceImage,
}

#[derive(Debug, PartialEq, Eq)]
#[derive(Clone)]
pub struct EncodedImage {
    pub mime_type: String,
    /// Base64-encoded image bytes, as returned by the model.
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Thin proxy over the Gemini generateContent endpoint. Knows nothing about
/// credits; the generation gate sequences the two.
#[derive(Debug)]
#[derive(Clone)]
pub struct GeminiImageClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiImageClient {

    pub fn new(api_key: &str, model: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .expect("Error building the upstream HTTP client");
        GeminiImageClient {
            http,
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Text-to-image, or image-to-image when a base64 canvas snapshot is supplied.
    pub async fn generate(&self, prompt: &str, source_image: Option<&str>) -> Result<EncodedImage, GenerationError> {
        let mut parts = vec![Part {
            text: Some(build_prompt(prompt)),
            inline_data: None,
        }];

        if let Some(source_image) = source_image {
            parts.push(Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: Some("image/png".to_string()),
                    data: normalize_source_image(source_image)?,
                }),
            });
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            },
        };

        let url = format!("{}/models/{}:generateContent?key={}", API_BASE, self.model, self.api_key);
        let response = self.http.post(&url)
            .json(&request)
            .send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::UpstreamStatus { status, body });
        }

        let response: GenerateContentResponse = response.json().await?;
        extract_image(response)
    }
}

/// The "brand envelope": fixed styling instructions wrapped around every user
/// prompt so vague requests still come back editorial-grade.
fn build_prompt(prompt: &str) -> String {
    format!(
        "You are the Nail Check Technical AI. \
        Your style is: Architectural, Luxury, High-Gloss, and Elite. \
        Instructions: \
        - If the user prompt is vague, apply high-end textures like 3D chrome, jelly finishes, or structural sculpting. \
        - Maintain a 'Vogue' editorial photography aesthetic. \
        - Focus strictly on the nail plate and technical execution. \
        - Avoid messy, amateur, or 'craft-style' art. \
        User Request: {}",
        prompt
    )
}

/// Clients send the canvas either as bare base64 or as a data URL; the upstream
/// API only accepts the bare payload. Rejects garbage early so a doomed request
/// never reaches the model.
fn normalize_source_image(raw: &str) -> Result<String, GenerationError> {
    let data = match raw.split_once(',') {
        Some((_, data)) => data,
        None => raw,
    };
    if BASE64.decode(data).is_err() {
        return Err(GenerationError::BadSourceImage);
    }
    Ok(data.to_string())
}

/// A candidate may interleave text and image parts; the first inlineData part is
/// the render. No image part at all (safety rejection, quota, transient fault)
/// is the upstream failure case.
fn extract_image(response: GenerateContentResponse) -> Result<EncodedImage, GenerationError> {
    let image = response.candidates.into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .find_map(|part| part.inline_data);

    match image {
        Some(inline) => Ok(EncodedImage {
            mime_type: inline.mime_type.unwrap_or_else(|| "image/png".to_string()),
            data: inline.data,
        }),
        None => Err(GenerationError::NoImagePayload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_the_user_request() {
        let prompt = build_prompt("spikey black chrome, long");
        assert!(prompt.contains("User Request: spikey black chrome, long"));
        assert!(prompt.contains("Nail Check Technical AI"));
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        let normalized = normalize_source_image("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(normalized, "aGVsbG8=");
    }

    #[test]
    fn bare_base64_passes_through() {
        let normalized = normalize_source_image("aGVsbG8=").unwrap();
        assert_eq!(normalized, "aGVsbG8=");
    }

    #[test]
    fn invalid_base64_is_rejected() {
        assert!(matches!(
            normalize_source_image("not base64 at all!!"),
            Err(GenerationError::BadSourceImage)
        ));
    }

    #[test]
    fn image_part_is_extracted_from_a_mixed_candidate() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "Here is your render."},
                        {"inlineData": {"mimeType": "image/jpeg", "data": "aW1hZ2U="}}
                    ]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let image = extract_image(response).unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "aW1hZ2U=");
    }

    #[test]
    fn missing_mime_type_defaults_to_png() {
        let raw = r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": "aW1hZ2U="}}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_image(response).unwrap().mime_type, "image/png");
    }

    #[test]
    fn text_only_response_is_a_failure() {
        let raw = r#"{"candidates": [{"content": {"parts": [{"text": "I cannot render that."}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(extract_image(response), Err(GenerationError::NoImagePayload)));
    }

    #[test]
    fn empty_response_is_a_failure() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(extract_image(response), Err(GenerationError::NoImagePayload)));
    }
}
