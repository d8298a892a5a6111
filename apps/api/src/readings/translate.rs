//! Translation of stored readings, with a per-language cache on the
//! record so each language is generated at most once.

use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{GenerationError, LlmClient, MessageBlock};
use crate::models::reading::ReadingRow;
use crate::readings::assembler::{assemble, ReadingSections};
use crate::readings::prompts::TRANSLATE_PROMPT_TEMPLATE;
use crate::storage::ReadingStore;

pub async fn translate_reading(
    llm: &LlmClient,
    store: &dyn ReadingStore,
    owner_id: Uuid,
    id: Uuid,
    target_language: &str,
) -> Result<ReadingSections, AppError> {
    let language = target_language.trim();
    if language.is_empty() {
        return Err(AppError::Validation(
            "targetLanguage: must not be empty".to_string(),
        ));
    }

    let row = store.get(owner_id, id).await?;

    if let Some(cached) = cached_translation(&row, language) {
        info!("Translation cache hit for reading {id} ({language})");
        return Ok(cached);
    }

    let sections = ReadingSections::from_row(&row);
    if sections.is_empty() {
        return Err(AppError::Validation(
            "reading has no sections to translate".to_string(),
        ));
    }

    let sections_json = serde_json::to_string_pretty(&sections).map_err(anyhow::Error::from)?;
    let prompt = TRANSLATE_PROMPT_TEMPLATE
        .replace("{target_language}", language)
        .replace("{sections_json}", &sections_json);

    info!("Translating reading {id} into {language}");
    let raw: Value = llm
        .call_json(&[MessageBlock::text(&prompt)], JSON_ONLY_SYSTEM)
        .await?;

    let translated = assemble(&raw);
    if translated.is_empty() {
        return Err(AppError::Generation(GenerationError::EmptyContent));
    }

    store
        .cache_translation(owner_id, id, language, &translated)
        .await?;

    Ok(translated)
}

fn cached_translation(row: &ReadingRow, language: &str) -> Option<ReadingSections> {
    let cached = row.translations.as_ref()?.get(language)?;
    let sections = assemble(cached);
    if sections.is_empty() {
        None
    } else {
        Some(sections)
    }
}
