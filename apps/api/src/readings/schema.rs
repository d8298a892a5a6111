//! Intake validation for reading requests.
//!
//! Checks run in field-declaration order and fail fast with a
//! `ValidationError` naming the first offending field, before any external
//! call is made.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::errors::AppError;

/// Image types the generation service accepts for palm photos.
pub const SUPPORTED_IMAGE_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// A reading request as received from the client. Fields default to empty
/// so the validator (not serde) reports which one is missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingRequest {
    /// ISO 8601 date, `YYYY-MM-DD`.
    #[serde(default)]
    pub birth_date: String,
    /// 24-hour clock, `HH:MM`.
    #[serde(default)]
    pub birth_time: String,
    /// Free-text location, e.g. "Mumbai, India".
    #[serde(default)]
    pub birth_place: String,
    /// Data URI: `data:<mimetype>;base64,<encoded_data>`.
    #[serde(default)]
    pub palm_image: String,
}

/// The palm photo split out of its data URI, ready to attach as an image
/// block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PalmImage {
    pub media_type: String,
    pub data: String,
}

/// A request that passed validation, with typed fields.
#[derive(Debug, Clone)]
pub struct ValidatedReading {
    pub birth_date: NaiveDate,
    pub birth_time: NaiveTime,
    pub birth_place: String,
    pub palm_image: PalmImage,
}

pub fn validate(request: &ReadingRequest) -> Result<ValidatedReading, AppError> {
    let birth_date = parse_birth_date(&request.birth_date)?;
    let birth_time = parse_birth_time(&request.birth_time)?;

    let birth_place = request.birth_place.trim();
    if birth_place.is_empty() {
        return Err(invalid("birthPlace", "must not be empty"));
    }

    let palm_image = parse_palm_image(&request.palm_image)?;

    Ok(ValidatedReading {
        birth_date,
        birth_time,
        birth_place: birth_place.to_string(),
        palm_image,
    })
}

/// Shared with the horoscope flow, which takes the same two birth fields.
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| invalid("birthDate", "must be an ISO 8601 date (YYYY-MM-DD)"))
}

pub fn parse_birth_time(raw: &str) -> Result<NaiveTime, AppError> {
    let raw = raw.trim();
    // %H accepts single-digit hours; the contract is a strict HH:MM.
    if raw.len() != 5 {
        return Err(invalid("birthTime", "must be a 24-hour time (HH:MM)"));
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| invalid("birthTime", "must be a 24-hour time (HH:MM)"))
}

fn parse_palm_image(raw: &str) -> Result<PalmImage, AppError> {
    let raw = raw.trim();
    let Some((media_type, payload)) = raw
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
    else {
        return Err(invalid(
            "palmImage",
            "must be a data URI (data:<mimetype>;base64,<encoded_data>)",
        ));
    };

    if !SUPPORTED_IMAGE_TYPES.contains(&media_type) {
        return Err(invalid(
            "palmImage",
            &format!("unsupported image type '{media_type}'"),
        ));
    }

    if payload.is_empty() || BASE64.decode(payload).is_err() {
        return Err(invalid("palmImage", "payload is not valid base64"));
    }

    Ok(PalmImage {
        media_type: media_type.to_string(),
        data: payload.to_string(),
    })
}

fn invalid(field: &str, reason: &str) -> AppError {
    AppError::Validation(format!("{field}: {reason}"))
}
