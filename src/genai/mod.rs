//! Generative-language client layer

mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Errors from the generative-language client
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    #[error("no API key configured; set GEMINI_API_KEY or add api_key to the config file")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("model endpoint returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("model reply contained no text")]
    EmptyReply,
    #[error("model reply was not the expected JSON: {0}")]
    MalformedReply(String),
}

/// Trait for the generative-language backend, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Send a prompt and return the model's raw reply text
    async fn generate(&self, prompt: &str) -> Result<String, GenAiError>;
}

pub type SharedTextModel = Arc<dyn TextModel>;

/// Parse a model reply into a typed value.
///
/// Replies are requested as JSON, but models still occasionally fence the
/// object in markdown or prefix it with prose, so a failed strict parse
/// falls back to the first balanced JSON object in the text.
pub fn parse_reply<T: DeserializeOwned>(text: &str) -> Result<T, GenAiError> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(strict_err) => match extract_first_json_object(text) {
            Some(snippet) => serde_json::from_str(snippet)
                .map_err(|e| GenAiError::MalformedReply(e.to_string())),
            None => Err(GenAiError::MalformedReply(strict_err.to_string())),
        },
    }
}

/// Find the first balanced `{ ... }` object, ignoring braces inside strings
fn extract_first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        score: f64,
        note: String,
    }

    mod parse_reply_fn {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_parses_clean_json() {
            let reply: Sample = parse_reply(r#"{"score": 91.5, "note": "ok"}"#).unwrap();
            assert_eq!(
                reply,
                Sample {
                    score: 91.5,
                    note: "ok".to_string()
                }
            );
        }

        #[test]
        fn test_parses_fenced_json() {
            let text = "```json\n{\"score\": 2.0, \"note\": \"fenced\"}\n```";
            let reply: Sample = parse_reply(text).unwrap();
            assert_eq!(reply.note, "fenced");
        }

        #[test]
        fn test_parses_json_after_prose_prefix() {
            let text = "Here is the result: {\"score\": 1.0, \"note\": \"hi\"} Hope it helps!";
            let reply: Sample = parse_reply(text).unwrap();
            assert_eq!(reply.score, 1.0);
        }

        #[test]
        fn test_rejects_reply_without_json() {
            let err = parse_reply::<Sample>("I cannot answer that.").unwrap_err();
            assert!(matches!(err, GenAiError::MalformedReply(_)));
        }

        #[test]
        fn test_rejects_json_with_wrong_shape() {
            let err = parse_reply::<Sample>(r#"{"unexpected": true}"#).unwrap_err();
            assert!(matches!(err, GenAiError::MalformedReply(_)));
        }
    }

    mod extract_first_json_object_fn {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_handles_nested_objects() {
            let text = "x {\"a\": {\"b\": 1}} y";
            assert_eq!(extract_first_json_object(text), Some("{\"a\": {\"b\": 1}}"));
        }

        #[test]
        fn test_ignores_braces_inside_strings() {
            let text = r#"{"a": "close } brace", "b": 2}"#;
            assert_eq!(extract_first_json_object(text), Some(text));
        }

        #[test]
        fn test_handles_escaped_quotes() {
            let text = r#"{"a": "quote \" and } brace"}"#;
            assert_eq!(extract_first_json_object(text), Some(text));
        }

        #[test]
        fn test_unbalanced_object_yields_none() {
            assert_eq!(extract_first_json_object("{\"a\": 1"), None);
        }

        #[test]
        fn test_no_object_yields_none() {
            assert_eq!(extract_first_json_object("plain text"), None);
        }
    }
}
