//! Result Assembler — maps the raw generation response onto the declared
//! section schema. A pure field-by-field projection: undeclared keys are
//! dropped, and a section is either a non-empty string or entirely absent,
//! never null or empty.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::reading::ReadingRow;

/// The declared section schema, in display order.
pub const SECTION_KEYS: &[&str] = &[
    "foundationalOverview",
    "careerAndWealth",
    "healthAndVitality",
    "loveAndRelationships",
    "personalityAndInnerGrowth",
    "lifePathAndTimeline",
    "guidanceAndRemedies",
];

/// One assembled reading: the named narrative sections. Absent sections are
/// skipped during serialization so the UI can skip rendering them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSections {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foundational_overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_and_wealth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_and_vitality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub love_and_relationships: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_and_inner_growth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_path_and_timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance_and_remedies: Option<String>,
}

impl ReadingSections {
    pub fn is_empty(&self) -> bool {
        self.foundational_overview.is_none()
            && self.career_and_wealth.is_none()
            && self.health_and_vitality.is_none()
            && self.love_and_relationships.is_none()
            && self.personality_and_inner_growth.is_none()
            && self.life_path_and_timeline.is_none()
            && self.guidance_and_remedies.is_none()
    }

    /// The sections as stored on a reading record.
    pub fn from_row(row: &ReadingRow) -> Self {
        Self {
            foundational_overview: row.foundational_overview.clone(),
            career_and_wealth: row.career_and_wealth.clone(),
            health_and_vitality: row.health_and_vitality.clone(),
            love_and_relationships: row.love_and_relationships.clone(),
            personality_and_inner_growth: row.personality_and_inner_growth.clone(),
            life_path_and_timeline: row.life_path_and_timeline.clone(),
            guidance_and_remedies: row.guidance_and_remedies.clone(),
        }
    }
}

/// Projects a raw response object onto the declared schema. Tolerates any
/// input shape: a non-object yields an empty result.
pub fn assemble(raw: &Value) -> ReadingSections {
    let Some(map) = raw.as_object() else {
        return ReadingSections::default();
    };
    ReadingSections {
        foundational_overview: section(map, "foundationalOverview"),
        career_and_wealth: section(map, "careerAndWealth"),
        health_and_vitality: section(map, "healthAndVitality"),
        love_and_relationships: section(map, "loveAndRelationships"),
        personality_and_inner_growth: section(map, "personalityAndInnerGrowth"),
        life_path_and_timeline: section(map, "lifePathAndTimeline"),
        guidance_and_remedies: section(map, "guidanceAndRemedies"),
    }
}

fn section(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
