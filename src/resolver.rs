//! Translation resolution with time-bounded memoization.
//!
//! Given a FAQ record, a content field, and a requested language, the
//! resolver returns the best available text: the stored variant when it is
//! non-empty, the English source otherwise. Results are memoized per
//! `(record, field, language)` for a fixed TTL, and every mutation of a
//! record proactively evicts all of its keys so readers never see stale
//! content after a confirmed write.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::cache::FaqCache;
use crate::i18n::Language;
use crate::model::{Faq, Field};

/// Default memoization window: one hour from insertion.
pub const DEFAULT_RESOLVE_TTL: Duration = Duration::from_secs(3600);

/// Cache key for one resolved field of one record in one language.
///
/// Derived from the identifier alone (not the record contents), so eviction
/// works for records that no longer exist.
pub fn cache_key(faq_id: i64, field: Field, language: Language) -> String {
    format!("faq_{}_{}_{}", faq_id, field.name(), language.code())
}

/// Resolves FAQ content fields into a requested language, memoizing results
/// in an injected cache.
#[derive(Clone)]
pub struct TranslationResolver {
    cache: Arc<dyn FaqCache>,
    ttl: Duration,
}

impl TranslationResolver {
    pub fn new(cache: Arc<dyn FaqCache>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Return the best available text for `field` in `language`.
    ///
    /// A non-empty cached value is returned without touching the record.
    /// Empty cached values count as misses: a legitimately empty field is
    /// recomputed on every call rather than pinned forever.
    ///
    /// Cache failures degrade to direct field access and never fail the
    /// read.
    pub async fn resolve(&self, faq: &Faq, field: Field, language: Language) -> String {
        let key = cache_key(faq.id, field, language);

        match self.cache.get(&key).await {
            Ok(Some(cached)) if !cached.is_empty() => return cached,
            Ok(_) => {}
            Err(e) => warn!("Cache read failed for {}: {}", key, e),
        }

        let text = self.lookup(faq, field, language).to_string();

        // Cache writes happen only on a miss; TTL is fixed from insertion.
        if let Err(e) = self.cache.set(&key, &text, self.ttl).await {
            warn!("Cache write failed for {}: {}", key, e);
        }

        text
    }

    /// Direct field selection, no cache involved: the stored variant when
    /// non-empty, the English source otherwise.
    fn lookup<'a>(&self, faq: &'a Faq, field: Field, language: Language) -> &'a str {
        if language.is_canonical() {
            return faq.english_text(field);
        }
        match faq.variant_text(field, language) {
            Some(text) if !text.is_empty() => text,
            _ => faq.english_text(field),
        }
    }

    /// Evict every cached `(field × language)` entry for a record.
    ///
    /// Called before updates and deletes persist. Eviction failures are
    /// logged and never block the mutation.
    pub async fn invalidate(&self, faq_id: i64) {
        for field in Field::ALL {
            for language in Language::all_enabled() {
                let key = cache_key(faq_id, field, language);
                if let Err(e) = self.cache.delete(&key).await {
                    warn!("Cache eviction failed for {}: {}", key, e);
                }
            }
        }
    }
}
