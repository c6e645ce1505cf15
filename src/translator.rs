//! Translation provider client and the auto-translation policy.
//!
//! The provider is an injected capability behind the `Translator` trait so
//! the save path can be tested without network access. The HTTP
//! implementation speaks the LibreTranslate JSON protocol and retries
//! transient failures with bounded backoff.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::i18n::Language;
use crate::model::{Faq, Field};
use crate::retry::{with_retry_if, RetryConfig};

/// External translation capability.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate English source text into the target language.
    async fn translate(&self, text: &str, target: Language) -> Result<String>;
}

/// Translation request in the provider's JSON protocol
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// HTTP client for a LibreTranslate-compatible provider.
pub struct HttpTranslator {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    retry: RetryConfig,
}

impl HttpTranslator {
    /// Build a client with a bounded per-request timeout.
    ///
    /// The timeout keeps a slow provider from hanging the save path; the
    /// retry schedule covers transient failures on top of it.
    pub fn new(api_url: String, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build translation HTTP client")?;

        Ok(Self {
            client,
            api_url,
            api_key,
            retry: RetryConfig::translation(),
        })
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        // Translating into the source language is the identity
        if target.is_canonical() {
            return Ok(text.to_string());
        }

        let request = TranslateRequest {
            q: text,
            source: Language::canonical().code(),
            target: target.code(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        with_retry_if(
            &self.retry,
            &format!("Translation to {}", target.name()),
            || async {
                let response = self
                    .client
                    .post(&self.api_url)
                    .json(&request)
                    .send()
                    .await
                    .context("Failed to send request to translation provider")?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
                    anyhow::bail!("Translation provider error ({}): {}", status, body);
                }

                let parsed: TranslateResponse = response
                    .json()
                    .await
                    .context("Failed to parse translation provider response")?;

                Ok(parsed.translated_text)
            },
            is_retryable_error,
        )
        .await
    }
}

/// Determine if an error is retryable (5xx errors, 429 rate limit, network errors)
/// Other 4xx client errors should not be retried
fn is_retryable_error(error: &anyhow::Error) -> bool {
    let error_str = error.to_string();

    // Check if it's a provider error with a status code
    // Error format: "Translation provider error (400 Bad Request): ..."
    if error_str.contains("Translation provider error") {
        if let Some(start) = error_str.find('(') {
            if let Some(end) = error_str[start..].find(')') {
                let status_str = &error_str[start + 1..start + end];
                let status_num = status_str.split_whitespace().next().unwrap_or("");
                if let Ok(status) = status_num.parse::<u16>() {
                    // Retry 429 (rate limit) and 5xx errors
                    return status == 429 || status >= 500;
                }
            }
        }
    }

    // Retry network errors, timeouts, and other transient failures
    true
}

/// Fill every translation-target field of a record from its English source,
/// overwriting variants that are already present.
///
/// Used by explicit re-translation requests. A provider failure is logged
/// and the English source text is stored for that field, so no target field
/// is ever left null or partially translated. Failures never propagate to
/// the save path.
pub async fn fill_translations(translator: &dyn Translator, faq: &mut Faq) {
    for language in Language::translation_targets() {
        for field in Field::ALL {
            fill_field(translator, faq, field, language).await;
        }
    }
}

/// Fill only the translation-target fields that are absent or empty,
/// leaving editor-supplied variants untouched.
///
/// Used at create time; failure handling matches [`fill_translations`].
pub async fn fill_missing_translations(translator: &dyn Translator, faq: &mut Faq) {
    for language in Language::translation_targets() {
        for field in Field::ALL {
            let present = faq
                .variant_text(field, language)
                .map(|text| !text.is_empty())
                .unwrap_or(false);
            if !present {
                fill_field(translator, faq, field, language).await;
            }
        }
    }
}

async fn fill_field(translator: &dyn Translator, faq: &mut Faq, field: Field, language: Language) {
    let source = faq.english_text(field).to_string();
    let text = match translator.translate(&source, language).await {
        Ok(translated) => translated,
        Err(e) => {
            warn!(
                "Translation of {} to {} failed for FAQ {}: {:#}; keeping English text",
                field.name(),
                language.name(),
                faq.id,
                e
            );
            source
        }
    };
    faq.set_variant_text(field, language, text);
}
