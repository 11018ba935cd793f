//! Pluggable schedule generation.
//!
//! The dashboard can obtain a schedule two ways: the deterministic local
//! synthesizer, or an AI chat-completion call. Both sit behind the
//! [`ScheduleGenerator`] trait so the HTTP layer does not care which one
//! produced the result. The local synthesizer doubles as the fallback
//! implementation when the `openai` feature is disabled.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::AreaStatement;
use crate::services::schedule::{synthesize_schedule, NO_QUANTITY, PHASES};

/// One task of a generated schedule, in the AI response shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTask {
    #[serde(default)]
    pub sl_no: u32,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub duration_days: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One bar of the gantt timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GanttTask {
    #[serde(default)]
    pub task_id: String,
    #[serde(default)]
    pub task_name: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub section: String,
}

/// A complete generated schedule: metadata, task list, and gantt timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    #[serde(default)]
    pub project_metadata: Value,
    #[serde(default)]
    pub schedule: Vec<GeneratedTask>,
    #[serde(default)]
    pub gantt: Vec<GanttTask>,
}

/// Errors from a single generation request. No retry happens anywhere: a
/// failed request is terminal for that attempt and the caller's review state
/// survives for a manual retry.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Schedule generation request failed: {0}")]
    Request(String),
    #[error("Chat-completions API error: {status} {body}")]
    Api { status: u16, body: String },
    #[error("No JSON object found in the model response.\n\nRaw response:\n{raw}")]
    NoJsonObject { raw: String },
    #[error("Failed to parse schedule JSON from the model response: {message}\n\nRaw response:\n{raw}")]
    Parse { message: String, raw: String },
}

/// A source of generated schedules.
#[async_trait]
pub trait ScheduleGenerator: Send + Sync {
    async fn generate(&self, statement: &AreaStatement) -> Result<ScheduleResult, GenerateError>;
}

/// Deterministic generator backed by
/// [`crate::services::schedule::synthesize_schedule`], referenced to the
/// current UTC date.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSynthesizer;

#[async_trait]
impl ScheduleGenerator for LocalSynthesizer {
    async fn generate(&self, statement: &AreaStatement) -> Result<ScheduleResult, GenerateError> {
        let today = Utc::now().date_naive();
        let sections = synthesize_schedule(statement, today);

        let mut schedule = Vec::new();
        let mut gantt = Vec::new();
        for section in sections.sections() {
            for task in &section.tasks {
                schedule.push(GeneratedTask {
                    sl_no: task.serial,
                    section: section.name.clone(),
                    description: task.description.clone(),
                    quantity: task.quantity.clone(),
                    unit: if task.quantity == NO_QUANTITY {
                        String::new()
                    } else {
                        "Sq.m".to_string()
                    },
                    start_date: task.start_date.to_string(),
                    end_date: task.end_date.to_string(),
                    duration_days: task.duration.trim_end_matches(" days").parse().unwrap_or(0),
                    notes: None,
                });
                gantt.push(GanttTask {
                    task_id: format!("T{}", task.serial),
                    task_name: task.description.clone(),
                    start: task.start_date.to_string(),
                    end: task.end_date.to_string(),
                    section: section.name.clone(),
                });
            }
        }

        Ok(ScheduleResult {
            project_metadata: json!({
                "source": "local-synthesizer",
                "generated_on": today.to_string(),
                "site_area_sqm": statement
                    .number_at(&["site_details", "actual_site_area", "sqm"]),
            }),
            schedule,
            gantt,
        })
    }
}

/// Extract the first top-level JSON object from free-form model output.
///
/// Markdown code fences (with or without a `json` language tag) are stripped
/// first; the result is the substring from the first `{` to the last `}`.
pub fn extract_first_json_object(text: &str) -> Option<String> {
    let mut cleaned = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("```") {
        cleaned.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
        // Boundary-safe: the text after a fence may start mid multibyte
        // character, so never byte-index it directly.
        if rest.get(..4).map_or(false, |tag| tag.eq_ignore_ascii_case("json")) {
            rest = &rest[4..];
        }
    }
    cleaned.push_str(rest);

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }
    Some(cleaned[start..=end].to_string())
}

/// Parse raw model output into a [`ScheduleResult`].
pub fn parse_generated(content: &str) -> Result<ScheduleResult, GenerateError> {
    let object = extract_first_json_object(content).ok_or_else(|| GenerateError::NoJsonObject {
        raw: content.to_string(),
    })?;
    serde_json::from_str(&object).map_err(|e| GenerateError::Parse {
        message: e.to_string(),
        raw: content.to_string(),
    })
}

/// Build the construction-planning prompt carrying the full statement.
pub fn build_prompt(statement: &AreaStatement) -> String {
    let input = serde_json::to_string_pretty(statement.fields()).unwrap_or_default();
    let phases: Vec<String> = PHASES
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {}", i + 1, p.name))
        .collect();

    format!(
        "You are a construction planning assistant. Given a valid area statement JSON \
(see below), generate a detailed construction schedule as a JSON array, grouped by \
standard construction phases.\n\n\
Input:\n{input}\n\n\
Construction Phases (in order):\n{phases}\n\n\
For each task, include:\n\
- sl_no (number)\n\
- section (phase name)\n\
- description (task description)\n\
- quantity (with unit, e.g. \"45.0 Cu.m\")\n\
- unit (e.g. \"Cu.m\", \"Sq.m\", \"Nos\", \"Rmt\")\n\
- start_date (YYYY-MM-DD)\n\
- end_date (YYYY-MM-DD)\n\
- duration_days (integer)\n\
- (optional) notes (for critical path or special remarks)\n\n\
Sequencing:\n\
- Use logical construction sequencing and standard daily productivity.\n\
- Dates should be sequential and not overlap unless parallel execution is realistic.\n\
- Ensure all phases are covered.\n\n\
Output Format:\n\
Return a single JSON object:\n\
{{\n\
  \"project_metadata\": {{ ... }},\n\
  \"schedule\": [ ... ],\n\
  \"gantt\": [ {{ \"task_id\": \"T1\", \"task_name\": \"...\", \"start\": \"YYYY-MM-DD\", \
\"end\": \"YYYY-MM-DD\", \"section\": \"...\" }} ]\n\
}}\n\
Do not include explanations, markdown, or any text outside the JSON.\n\
If the input is missing required fields, return a JSON error message.",
        input = input,
        phases = phases.join("\n"),
    )
}
