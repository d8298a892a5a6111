//! Personalized daily horoscope: zodiac lookup plus one templated
//! generation call. Results are returned to the caller and never
//! persisted.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::{ActionResult, AppError};
use crate::horoscope::prompts::{DAILY_HOROSCOPE_PROMPT_TEMPLATE, DAILY_HOROSCOPE_SYSTEM};
use crate::horoscope::zodiac::ZodiacSign;
use crate::llm_client::{GenerationError, LlmClient, MessageBlock};
use crate::readings::schema::{parse_birth_date, parse_birth_time};
use crate::state::AppState;

pub mod prompts;
pub mod zodiac;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyHoroscopeRequest {
    pub owner_id: Uuid,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub birth_time: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyHoroscope {
    pub zodiac_sign: String,
    pub horoscope: String,
}

#[derive(Debug, Deserialize)]
struct HoroscopeOutput {
    horoscope: String,
}

pub async fn daily_horoscope(
    llm: &LlmClient,
    request: DailyHoroscopeRequest,
) -> Result<DailyHoroscope, AppError> {
    let birth_date = parse_birth_date(&request.birth_date)?;
    let birth_time = parse_birth_time(&request.birth_time)?;
    let sign = ZodiacSign::for_date(birth_date);

    let prompt = DAILY_HOROSCOPE_PROMPT_TEMPLATE
        .replace("{birth_date}", &birth_date.format("%Y-%m-%d").to_string())
        .replace("{birth_time}", &birth_time.format("%H:%M").to_string())
        .replace("{zodiac_sign}", &sign.to_string());

    info!("Generating daily horoscope ({sign}) for owner {}", request.owner_id);
    let output: HoroscopeOutput = llm
        .call_json(&[MessageBlock::text(&prompt)], DAILY_HOROSCOPE_SYSTEM)
        .await?;

    if output.horoscope.trim().is_empty() {
        return Err(AppError::Generation(GenerationError::EmptyContent));
    }

    Ok(DailyHoroscope {
        zodiac_sign: sign.to_string(),
        horoscope: output.horoscope,
    })
}

/// POST /api/v1/horoscope/daily
pub async fn handle_daily_horoscope(
    State(state): State<AppState>,
    Json(request): Json<DailyHoroscopeRequest>,
) -> Json<ActionResult<DailyHoroscope>> {
    match daily_horoscope(&state.llm, request).await {
        Ok(horoscope) => Json(ActionResult::ok(horoscope)),
        Err(err) => {
            error!("Daily horoscope generation failed: {err}");
            Json(ActionResult::from_error(&err))
        }
    }
}
