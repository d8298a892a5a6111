//! Destiny reading generation — orchestrates the full flow.
//!
//! Flow: validate -> render prompt -> one generation call (palm photo
//! attached as an image block) -> assemble sections -> optionally persist.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{GenerationError, LlmClient, MessageBlock};
use crate::readings::assembler::{assemble, ReadingSections};
use crate::readings::prompts::{render_destiny_prompt, DESTINY_READING_SYSTEM};
use crate::readings::schema::{validate, ReadingRequest};
use crate::storage::{NewReading, ReadingStore};

/// Request body for reading generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReadingRequest {
    pub owner_id: Uuid,
    #[serde(flatten)]
    pub reading: ReadingRequest,
    /// When set, the assembled result is persisted to the owner's history.
    #[serde(default)]
    pub save: bool,
}

/// Successful generation payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReading {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_id: Option<Uuid>,
    pub sections: ReadingSections,
}

/// Runs the generation flow. Validation failures fail fast before any
/// external call; a response with no usable sections surfaces as
/// `EmptyContent` rather than an empty success.
pub async fn generate_reading(
    llm: &LlmClient,
    store: &dyn ReadingStore,
    request: GenerateReadingRequest,
) -> Result<GeneratedReading, AppError> {
    let validated = validate(&request.reading)?;

    let prompt = render_destiny_prompt(&validated);
    let blocks = [
        MessageBlock::image(&validated.palm_image.media_type, &validated.palm_image.data),
        MessageBlock::text(&prompt),
    ];

    info!("Generating destiny reading for owner {}", request.owner_id);
    let raw: Value = llm.call_json(&blocks, DESTINY_READING_SYSTEM).await?;

    let sections = assemble(&raw);
    if sections.is_empty() {
        return Err(AppError::Generation(GenerationError::EmptyContent));
    }

    let reading_id = if request.save {
        let row = store
            .save(
                request.owner_id,
                NewReading {
                    birth_date: validated.birth_date,
                    birth_time: validated.birth_time.format("%H:%M").to_string(),
                    birth_place: validated.birth_place.clone(),
                    sections: sections.clone(),
                },
            )
            .await?;
        info!("Stored reading {} for owner {}", row.id, request.owner_id);
        Some(row.id)
    } else {
        None
    };

    Ok(GeneratedReading {
        reading_id,
        sections,
    })
}
