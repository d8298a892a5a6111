// LLM prompt constants for the daily horoscope flow.

/// System prompt for daily horoscopes — enforces JSON-only output.
pub const DAILY_HOROSCOPE_SYSTEM: &str =
    "You are an astrologer providing personalized daily horoscopes. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Daily horoscope prompt template.
/// Replace: `{birth_date}`, `{birth_time}`, `{zodiac_sign}`.
pub const DAILY_HOROSCOPE_PROMPT_TEMPLATE: &str = r#"Generate a personalized daily horoscope for a {zodiac_sign}, born on {birth_date} at {birth_time}.

The horoscope should be relevant to the sign, consider current astrological transits, and focus on positive guidance and actionable advice. Keep it concise and easy to understand.

Return a JSON object with this EXACT schema:
{
  "horoscope": "..."
}"#;
