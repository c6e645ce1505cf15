//! FAQ content model.
//!
//! A `Faq` holds English source text plus optional Hindi and Bengali
//! variants. Variant access goes through an explicit `(Field, Language)`
//! mapping instead of any name-based field lookup, so adding a language is
//! a compile-time change.

use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// Content fields every FAQ record carries in each language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Question,
    Answer,
}

impl Field {
    /// All content fields, in the order they appear in the record.
    pub const ALL: [Field; 2] = [Field::Question, Field::Answer];

    /// Stable name used in cache keys and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Question => "question",
            Field::Answer => "answer",
        }
    }
}

/// A stored FAQ record with all language variants and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub id: i64,

    /// English source text (always present)
    pub question: String,
    pub answer: String,

    /// Hindi variants
    pub question_hi: Option<String>,
    pub answer_hi: Option<String>,

    /// Bengali variants
    pub question_bn: Option<String>,
    pub answer_bn: Option<String>,

    /// RFC 3339; immutable once set
    pub created_at: String,
    /// RFC 3339; refreshed on every mutation
    pub updated_at: String,

    pub is_active: bool,
    pub display_order: i64,
}

impl Faq {
    /// English source text for a content field.
    pub fn english_text(&self, field: Field) -> &str {
        match field {
            Field::Question => &self.question,
            Field::Answer => &self.answer,
        }
    }

    /// Language variant for a content field, if one is stored.
    ///
    /// The canonical language always resolves to the English source text.
    pub fn variant_text(&self, field: Field, language: Language) -> Option<&str> {
        match (field, language.code()) {
            (Field::Question, "en") => Some(&self.question),
            (Field::Answer, "en") => Some(&self.answer),
            (Field::Question, "hi") => self.question_hi.as_deref(),
            (Field::Answer, "hi") => self.answer_hi.as_deref(),
            (Field::Question, "bn") => self.question_bn.as_deref(),
            (Field::Answer, "bn") => self.answer_bn.as_deref(),
            _ => None,
        }
    }

    /// Store a translated variant for a content field.
    ///
    /// The canonical language has no variant slot; writes to it are ignored.
    pub fn set_variant_text(&mut self, field: Field, language: Language, text: String) {
        match (field, language.code()) {
            (Field::Question, "hi") => self.question_hi = Some(text),
            (Field::Answer, "hi") => self.answer_hi = Some(text),
            (Field::Question, "bn") => self.question_bn = Some(text),
            (Field::Answer, "bn") => self.answer_bn = Some(text),
            _ => {}
        }
    }
}

/// Payload for creating a FAQ record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFaq {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub question_hi: Option<String>,
    #[serde(default)]
    pub answer_hi: Option<String>,
    #[serde(default)]
    pub question_bn: Option<String>,
    #[serde(default)]
    pub answer_bn: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i64,
}

fn default_active() -> bool {
    true
}

/// Partial update for a FAQ record; only supplied fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaqPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub question_hi: Option<String>,
    pub answer_hi: Option<String>,
    pub question_bn: Option<String>,
    pub answer_bn: Option<String>,
    pub is_active: Option<bool>,
    pub display_order: Option<i64>,
}

impl FaqPatch {
    /// True when the patch touches nothing.
    pub fn is_empty(&self) -> bool {
        self.question.is_none()
            && self.answer.is_none()
            && self.question_hi.is_none()
            && self.answer_hi.is_none()
            && self.question_bn.is_none()
            && self.answer_bn.is_none()
            && self.is_active.is_none()
            && self.display_order.is_none()
    }
}

/// A FAQ resolved into a single requested language for the public API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedFaq {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub display_order: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_faq() -> Faq {
        Faq {
            id: 7,
            question: "What is X?".to_string(),
            answer: "X is a thing.".to_string(),
            question_hi: Some("X क्या है?".to_string()),
            answer_hi: None,
            question_bn: Some("X কী?".to_string()),
            answer_bn: Some("".to_string()),
            created_at: "2024-01-15T10:30:00+00:00".to_string(),
            updated_at: "2024-01-15T10:30:00+00:00".to_string(),
            is_active: true,
            display_order: 0,
        }
    }

    // ==================== Field Tests ====================

    #[test]
    fn test_field_names() {
        assert_eq!(Field::Question.name(), "question");
        assert_eq!(Field::Answer.name(), "answer");
    }

    #[test]
    fn test_field_all_covers_both() {
        assert_eq!(Field::ALL.len(), 2);
        assert!(Field::ALL.contains(&Field::Question));
        assert!(Field::ALL.contains(&Field::Answer));
    }

    // ==================== Accessor Tests ====================

    #[test]
    fn test_english_text() {
        let faq = sample_faq();
        assert_eq!(faq.english_text(Field::Question), "What is X?");
        assert_eq!(faq.english_text(Field::Answer), "X is a thing.");
    }

    #[test]
    fn test_variant_text_canonical_is_english() {
        let faq = sample_faq();
        assert_eq!(
            faq.variant_text(Field::Question, Language::ENGLISH),
            Some("What is X?")
        );
        assert_eq!(
            faq.variant_text(Field::Answer, Language::ENGLISH),
            Some("X is a thing.")
        );
    }

    #[test]
    fn test_variant_text_present() {
        let faq = sample_faq();
        assert_eq!(
            faq.variant_text(Field::Question, Language::HINDI),
            Some("X क्या है?")
        );
        assert_eq!(
            faq.variant_text(Field::Question, Language::BENGALI),
            Some("X কী?")
        );
    }

    #[test]
    fn test_variant_text_missing() {
        let faq = sample_faq();
        assert_eq!(faq.variant_text(Field::Answer, Language::HINDI), None);
    }

    #[test]
    fn test_variant_text_empty_string_is_preserved() {
        // An empty stored variant is returned as-is here; treating it as
        // absent is the resolver's job.
        let faq = sample_faq();
        assert_eq!(faq.variant_text(Field::Answer, Language::BENGALI), Some(""));
    }

    #[test]
    fn test_set_variant_text() {
        let mut faq = sample_faq();
        faq.set_variant_text(Field::Answer, Language::HINDI, "उत्तर".to_string());
        assert_eq!(faq.answer_hi.as_deref(), Some("उत्तर"));

        faq.set_variant_text(Field::Question, Language::BENGALI, "প্রশ্ন".to_string());
        assert_eq!(faq.question_bn.as_deref(), Some("প্রশ্ন"));
    }

    #[test]
    fn test_set_variant_text_canonical_is_ignored() {
        let mut faq = sample_faq();
        faq.set_variant_text(Field::Question, Language::ENGLISH, "overwritten".to_string());
        assert_eq!(faq.question, "What is X?");
    }

    // ==================== Request Type Tests ====================

    #[test]
    fn test_new_faq_deserializes_with_defaults() {
        let json = r#"{"question": "Q?", "answer": "A."}"#;
        let new_faq: NewFaq = serde_json::from_str(json).expect("deserialize");

        assert_eq!(new_faq.question, "Q?");
        assert_eq!(new_faq.answer, "A.");
        assert!(new_faq.question_hi.is_none());
        assert!(new_faq.is_active);
        assert_eq!(new_faq.display_order, 0);
    }

    #[test]
    fn test_faq_patch_is_empty() {
        assert!(FaqPatch::default().is_empty());

        let patch = FaqPatch {
            display_order: Some(5),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_faq_serde_roundtrip() {
        let faq = sample_faq();
        let json = serde_json::to_string(&faq).expect("serialize");
        let restored: Faq = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(restored.id, faq.id);
        assert_eq!(restored.question_hi, faq.question_hi);
        assert_eq!(restored.answer_bn, faq.answer_bn);
        assert_eq!(restored.is_active, faq.is_active);
    }
}
