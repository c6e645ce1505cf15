//! Internationalization (i18n) module for multi-language FAQ content.
//!
//! This module centralizes every language-related decision in the service.
//! The FAQ content model stores English source text plus optional Hindi and
//! Bengali variants; everything that needs to know which languages exist,
//! which one is the translation source, and which ones are translation
//! targets goes through here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported languages and their metadata
//! - `language`: Validated `Language` type constructed against the registry
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{Language, LanguageRegistry};
//!
//! // Get canonical language (English)
//! let canonical = Language::canonical();
//!
//! // Create language from a request parameter
//! let hindi = Language::from_code("hi")?;
//!
//! // Languages that receive automatic translations
//! let targets = Language::translation_targets();
//! ```

mod language;
mod registry;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
