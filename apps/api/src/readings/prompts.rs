// All LLM prompt constants for the readings module.
// Templates are static content: rendering is placeholder substitution only,
// never conditional on input values.

use crate::readings::schema::ValidatedReading;

/// System prompt for destiny readings — enforces JSON-only output.
pub const DESTINY_READING_SYSTEM: &str =
    "You are a master practitioner of Vedic astrology and palmistry, \
    producing integrated destiny readings. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Destiny reading prompt template.
/// Replace: `{birth_date}`, `{birth_time}`, `{birth_place}`.
/// The palm photo is attached to the same message as an image block.
pub const DESTINY_READING_PROMPT_TEMPLATE: &str = r#"Analyze this individual's destiny and life path by combining Vedic astrology (birth chart interpretation from the birth details below) with palmistry (hand features and line analysis from the attached palm photo). Blend both systems into one cohesive narrative rather than treating them separately, and include approximate timelines (ages, decades, or dasha periods) for major life events wherever applicable.

Birth date: {birth_date}
Birth time: {birth_time}
Birth place: {birth_place}

The user's palm photo is attached.

Return a JSON object with this EXACT schema (no extra fields); each value is the narrative text for that section:
{
  "foundationalOverview": "...",
  "careerAndWealth": "...",
  "healthAndVitality": "...",
  "loveAndRelationships": "...",
  "personalityAndInnerGrowth": "...",
  "lifePathAndTimeline": "...",
  "guidanceAndRemedies": "..."
}

Section requirements:

1. foundationalOverview:
   - Open with the overall life theme revealed by the Ascendant and the dominant hand shape or mount formation.
   - Correlate personality traits from the Ascendant, Sun, and Moon signs with the hand type (Earth, Air, Fire, Water).
   - Note where planetary strengths align or contrast with the corresponding mounts and lines.

2. careerAndWealth:
   - Integrate the 10th, 2nd, and 11th houses with the Fate Line, Sun Line, and Money Triangle.
   - Map dashas or yogas onto Fate Line markings: phases of growth, recognition, or redirection.
   - Identify the decades or life phases of prosperity or career shift supported by both systems, and name any Raja or Dhana Yoga echoed in the mounts of Jupiter, Apollo, or Mercury.

3. healthAndVitality:
   - Combine the Lagna and 6th house with the Life Line's quality, length, and markings.
   - Align malefic transits or dashas (Saturn, Rahu, Ketu, Mars) with dips, breaks, or forks in the Life Line.
   - Estimate ages of stress, recovery, or renewal.

4. loveAndRelationships:
   - Read the 7th and 5th houses alongside the Heart Line and Marriage lines.
   - Relate Venus and Jupiter placements to the emotional expression shown in the Heart Line, and the Mount of Venus to attraction style and attachment depth.
   - Give approximate life stages for love developments, marriage, or emotional turning points.

5. personalityAndInnerGrowth:
   - Merge the psychological profile from the Sun, Moon, and Ascendant with the tendencies shown by the Head and Heart Lines.
   - Name the dominant planetary energy and where it shows in the hand.
   - Interpret spiritual maturity through the Navamsa chart and any rising influence lines or Mystic Cross markings.

6. lifePathAndTimeline:
   - Give an integrated chronological summary aligning dasha transitions with visible palm milestones.
   - Divide life into key phases (early growth, professional rise, transformation, maturity) as told by both systems.
   - Call out the pivotal points where destiny indicators and free-will indicators strongly interact.

7. guidanceAndRemedies:
   - Offer balanced recommendations from both traditions: planetary remedies (mantras, gemstones, charity) and personal alignment practices (mudras, meditation, mindfulness).
   - Close with how awareness of both cosmic and personal energies can harmonize direction, relationships, and fulfillment."#;

/// Renders the destiny prompt for a validated request. Deterministic:
/// identical input produces a byte-identical prompt.
pub fn render_destiny_prompt(reading: &ValidatedReading) -> String {
    DESTINY_READING_PROMPT_TEMPLATE
        .replace("{birth_date}", &reading.birth_date.format("%Y-%m-%d").to_string())
        .replace("{birth_time}", &reading.birth_time.format("%H:%M").to_string())
        .replace("{birth_place}", &reading.birth_place)
}

/// Translation prompt template.
/// Replace: `{target_language}`, `{sections_json}`.
pub const TRANSLATE_PROMPT_TEMPLATE: &str = r#"Translate every string value in the following JSON object into {target_language}.

Rules:
- Keep every key EXACTLY as it is — translate values only.
- Preserve paragraph breaks inside values.
- Do not add, drop, or reorder keys.

Return the translated JSON object only.

{sections_json}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readings::schema::{validate, ReadingRequest};

    fn validated() -> ValidatedReading {
        validate(&ReadingRequest {
            birth_date: "1990-05-15".to_string(),
            birth_time: "08:30".to_string(),
            birth_place: "Mumbai, India".to_string(),
            palm_image: "data:image/png;base64,aGVsbG8=".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let reading = validated();
        assert_eq!(render_destiny_prompt(&reading), render_destiny_prompt(&reading));
    }

    #[test]
    fn test_all_placeholders_are_substituted() {
        let prompt = render_destiny_prompt(&validated());
        assert!(prompt.contains("Birth date: 1990-05-15"));
        assert!(prompt.contains("Birth time: 08:30"));
        assert!(prompt.contains("Birth place: Mumbai, India"));
        assert!(!prompt.contains("{birth_date}"));
        assert!(!prompt.contains("{birth_time}"));
        assert!(!prompt.contains("{birth_place}"));
    }

    #[test]
    fn test_prompt_declares_all_seven_section_keys() {
        let prompt = render_destiny_prompt(&validated());
        for key in crate::readings::assembler::SECTION_KEYS {
            assert!(prompt.contains(key), "missing section key {key}");
        }
    }
}
