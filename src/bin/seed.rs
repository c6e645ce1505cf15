//! Seed binary - bulk-loads FAQ records from a JSON file into the database
//!
//! Usage:
//!   cargo run --bin seed                      # Load data/faqs.json
//!   cargo run --bin seed -- path/to/faqs.json # Load a specific file
//!
//! The input is a JSON array of records with `question` and `answer`
//! (English, required) and optional `question_hi`/`answer_hi`/
//! `question_bn`/`answer_bn`/`is_active`/`display_order`.
//!
//! Seeding inserts records as-is and does not call the translation
//! provider; run the admin retranslate endpoint afterwards if variants
//! should be filled.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use faq_service::config::Config;
use faq_service::db::{init_database, FaqStore};
use faq_service::model::NewFaq;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("seed=info".parse()?),
        )
        .init();

    let input_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/faqs.json".to_string());

    info!("Seeding FAQ records from {}", input_path);

    let config = Config::from_env()?;

    let content = fs::read_to_string(&input_path)
        .with_context(|| format!("Failed to read {}", input_path))?;
    let records: Vec<NewFaq> =
        serde_json::from_str(&content).context("Failed to parse FAQ seed file")?;

    if records.is_empty() {
        info!("Seed file contains no records, nothing to do");
        return Ok(());
    }

    let pool = init_database(Path::new(&config.database_path)).await?;
    let store = FaqStore::new(pool);

    let mut inserted = 0usize;
    for record in &records {
        if record.question.trim().is_empty() || record.answer.trim().is_empty() {
            anyhow::bail!(
                "Seed record {} has an empty question or answer",
                inserted + 1
            );
        }
        let faq = store.create(record).await?;
        info!("Inserted FAQ {}: {}", faq.id, truncate(&faq.question, 60));
        inserted += 1;
    }

    info!("Seeded {} FAQ records into {}", inserted, config.database_path);
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max_chars).collect();
        format!("{}…", prefix)
    }
}
