//! FAQ service: composes the store, the translation resolver, and the
//! translation provider, and owns the ordering contract between them.
//!
//! Translation policy: non-English fields are populated when a record is
//! first created and when re-translation is explicitly requested — never as
//! a side effect of other edits. Cache eviction for a record is issued
//! before its update or delete persists.

use std::sync::Arc;

use tracing::{debug, info};

use crate::db::FaqStore;
use crate::errors::AppError;
use crate::i18n::Language;
use crate::model::{Faq, FaqPatch, Field, NewFaq, ResolvedFaq};
use crate::resolver::TranslationResolver;
use crate::translator::{fill_missing_translations, fill_translations, Translator};

pub struct FaqService {
    store: FaqStore,
    resolver: TranslationResolver,
    translator: Arc<dyn Translator>,
}

impl FaqService {
    pub fn new(
        store: FaqStore,
        resolver: TranslationResolver,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            store,
            resolver,
            translator,
        }
    }

    /// Create a record, auto-translating empty non-English fields first.
    ///
    /// Variants supplied by the caller are kept; only missing ones are
    /// requested from the provider. Provider failures fall back to English
    /// text and never fail the create.
    pub async fn create(&self, mut new_faq: NewFaq) -> Result<Faq, AppError> {
        if new_faq.question.trim().is_empty() {
            return Err(AppError::Validation("question must not be empty".into()));
        }
        if new_faq.answer.trim().is_empty() {
            return Err(AppError::Validation("answer must not be empty".into()));
        }

        // Stage the record so the shared fill logic can run before insert;
        // the id is assigned by the store afterwards.
        let mut staged = Faq {
            id: 0,
            question: new_faq.question.clone(),
            answer: new_faq.answer.clone(),
            question_hi: new_faq.question_hi.clone(),
            answer_hi: new_faq.answer_hi.clone(),
            question_bn: new_faq.question_bn.clone(),
            answer_bn: new_faq.answer_bn.clone(),
            created_at: String::new(),
            updated_at: String::new(),
            is_active: new_faq.is_active,
            display_order: new_faq.display_order,
        };

        fill_missing_translations(self.translator.as_ref(), &mut staged).await;

        new_faq.question_hi = staged.question_hi;
        new_faq.answer_hi = staged.answer_hi;
        new_faq.question_bn = staged.question_bn;
        new_faq.answer_bn = staged.answer_bn;

        let created = self.store.create(&new_faq).await?;
        info!("Created FAQ {}", created.id);
        Ok(created)
    }

    /// Apply a partial update. Evicts the record's cached resolutions
    /// before persisting; never triggers translation, whatever changed.
    pub async fn update(&self, id: i64, patch: FaqPatch) -> Result<Faq, AppError> {
        if let Some(question) = &patch.question {
            if question.trim().is_empty() {
                return Err(AppError::Validation("question must not be empty".into()));
            }
        }
        if let Some(answer) = &patch.answer {
            if answer.trim().is_empty() {
                return Err(AppError::Validation("answer must not be empty".into()));
            }
        }

        // Evict before the write lands so no reader re-caches the old
        // content after the update is confirmed.
        self.resolver.invalidate(id).await;

        let updated = self
            .store
            .update(id, &patch)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("FAQ {} not found", id)))?;

        debug!("Updated FAQ {}", id);
        Ok(updated)
    }

    /// Re-run translation of all non-English fields from the current
    /// English source. The explicit half of the translation policy.
    pub async fn retranslate(&self, id: i64) -> Result<Faq, AppError> {
        let mut faq = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("FAQ {} not found", id)))?;

        fill_translations(self.translator.as_ref(), &mut faq).await;

        self.resolver.invalidate(id).await;
        self.store.replace_translations(&faq).await?;

        info!("Re-translated FAQ {}", id);
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("FAQ {} not found", id)))
    }

    /// Delete a record. Eviction runs first and derives keys from the id
    /// alone, so it also covers rows that are already gone.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.resolver.invalidate(id).await;

        if !self.store.delete(id).await? {
            return Err(AppError::NotFound(format!("FAQ {} not found", id)));
        }
        info!("Deleted FAQ {}", id);
        Ok(())
    }

    /// Fetch one record, full (admin view).
    pub async fn get(&self, id: i64) -> Result<Faq, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("FAQ {} not found", id)))
    }

    /// List records, full (admin view), including inactive ones.
    pub async fn list_all(&self) -> Result<Vec<Faq>, AppError> {
        self.store.list(false).await
    }

    /// Fetch one active record resolved into the requested language.
    pub async fn get_resolved(&self, id: i64, language: Language) -> Result<ResolvedFaq, AppError> {
        let faq = self
            .store
            .get(id)
            .await?
            .filter(|faq| faq.is_active)
            .ok_or_else(|| AppError::NotFound(format!("FAQ {} not found", id)))?;

        Ok(self.resolve_one(&faq, language).await)
    }

    /// List active records resolved into the requested language.
    pub async fn list_resolved(&self, language: Language) -> Result<Vec<ResolvedFaq>, AppError> {
        let faqs = self.store.list(true).await?;
        let mut resolved = Vec::with_capacity(faqs.len());
        for faq in &faqs {
            resolved.push(self.resolve_one(faq, language).await);
        }
        Ok(resolved)
    }

    async fn resolve_one(&self, faq: &Faq, language: Language) -> ResolvedFaq {
        ResolvedFaq {
            id: faq.id,
            question: self.resolver.resolve(faq, Field::Question, language).await,
            answer: self.resolver.resolve(faq, Field::Answer, language).await,
            display_order: faq.display_order,
        }
    }
}
