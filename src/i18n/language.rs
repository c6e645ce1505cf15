//! Language type: Flexible, validated language representation.
//!
//! This module provides the `Language` type used throughout the service to
//! select FAQ content variants and to address the translation provider. A
//! `Language` can only be constructed for codes the registry knows about.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};

/// A validated language.
///
/// This type represents a language that has been validated against the
/// registry. It ensures that only supported, enabled languages can be
/// constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "hi", "bn")
    code: &'static str,
}

impl Language {
    /// English, the canonical source language.
    pub const ENGLISH: Language = Language { code: "en" };

    /// Hindi translation target.
    pub const HINDI: Language = Language { code: "hi" };

    /// Bengali translation target.
    pub const BENGALI: Language = Language { code: "bn" };

    /// Create a Language from a language code string.
    ///
    /// # Arguments
    /// * `code` - The ISO 639-1 language code (e.g., "en", "hi")
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err` if the code is not found or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language {
                code: config.code, // Use the static str from the registry
            }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Get the canonical (source) language.
    ///
    /// This is the language all FAQ content is authored in, and from which
    /// all translations are derived.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// Get the enabled languages that receive automatic translations.
    pub fn translation_targets() -> Vec<Language> {
        LanguageRegistry::get()
            .list_translation_targets()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// Get every enabled language, canonical included.
    pub fn all_enabled() -> Vec<Language> {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the language code is not found in the registry. This should
    /// never happen if the Language was constructed properly (via `from_code`
    /// or constants).
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the language.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the canonical language.
    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_english_constant() {
        let english = Language::ENGLISH;
        assert_eq!(english.code(), "en");
        assert_eq!(english.name(), "English");
        assert!(english.is_canonical());
    }

    #[test]
    fn test_hindi_constant() {
        let hindi = Language::HINDI;
        assert_eq!(hindi.code(), "hi");
        assert_eq!(hindi.name(), "Hindi");
        assert!(!hindi.is_canonical());
    }

    #[test]
    fn test_bengali_constant() {
        let bengali = Language::BENGALI;
        assert_eq!(bengali.code(), "bn");
        assert_eq!(bengali.name(), "Bengali");
        assert!(!bengali.is_canonical());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_english() {
        let language = Language::from_code("en").expect("Should succeed");
        assert_eq!(language.code(), "en");
        assert_eq!(language.name(), "English");
    }

    #[test]
    fn test_from_code_hindi() {
        let language = Language::from_code("hi").expect("Should succeed");
        assert_eq!(language.code(), "hi");
        assert_eq!(language.native_name(), "हिन्दी");
    }

    #[test]
    fn test_from_code_bengali() {
        let language = Language::from_code("bn").expect("Should succeed");
        assert_eq!(language.code(), "bn");
        assert_eq!(language.native_name(), "বাংলা");
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("fr");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_empty() {
        let result = Language::from_code("");
        assert!(result.is_err());
    }

    // ==================== canonical / targets Tests ====================

    #[test]
    fn test_canonical_returns_english() {
        let canonical = Language::canonical();
        assert_eq!(canonical.code(), "en");
        assert!(canonical.is_canonical());
    }

    #[test]
    fn test_translation_targets() {
        let targets = Language::translation_targets();
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&Language::HINDI));
        assert!(targets.contains(&Language::BENGALI));
        assert!(!targets.contains(&Language::ENGLISH));
    }

    #[test]
    fn test_all_enabled_includes_canonical() {
        let all = Language::all_enabled();
        assert_eq!(all.len(), 3);
        assert!(all.contains(&Language::ENGLISH));
        assert!(all.contains(&Language::HINDI));
        assert!(all.contains(&Language::BENGALI));
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_language_equality() {
        let lang1 = Language::HINDI;
        let lang2 = Language::from_code("hi").unwrap();
        assert_eq!(lang1, lang2);
        assert_ne!(Language::ENGLISH, Language::BENGALI);
    }

    #[test]
    fn test_language_copy() {
        let lang1 = Language::BENGALI;
        let lang2 = lang1; // Copy
        assert_eq!(lang1, lang2); // Both still valid
    }

    #[test]
    fn test_language_debug() {
        let lang = Language::HINDI;
        let debug = format!("{:?}", lang);
        assert!(debug.contains("hi"));
    }
}
