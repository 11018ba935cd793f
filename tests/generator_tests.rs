//! Tests for the schedule generator interface and response parsing.

mod support;

use asd_rust::services::generator::{
    build_prompt, extract_first_json_object, parse_generated, GenerateError, LocalSynthesizer,
    ScheduleGenerator,
};
use support::sample_statement;

#[test]
fn fenced_response_extracts_unwrapped_object() {
    let body = "```json\n{\"schedule\": []}\n```";
    assert_eq!(
        extract_first_json_object(body).as_deref(),
        Some("{\"schedule\": []}")
    );
}

#[test]
fn unfenced_prose_around_object_is_stripped() {
    let body = "Here is your schedule:\n{\"schedule\": [], \"gantt\": []}\nEnjoy!";
    assert_eq!(
        extract_first_json_object(body).as_deref(),
        Some("{\"schedule\": [], \"gantt\": []}")
    );
}

#[test]
fn fence_followed_by_multibyte_prose_is_handled() {
    // Chat-completion output regularly carries non-ASCII text right after a
    // fence; extraction must still find the object, never panic.
    let body = "```日本語の注記\n{\"schedule\": []}\n```";
    assert_eq!(
        extract_first_json_object(body).as_deref(),
        Some("{\"schedule\": []}")
    );
    assert!(extract_first_json_object("```éé").is_none());
}

#[test]
fn response_without_an_object_fails_with_parse_error() {
    let err = parse_generated("I cannot produce a schedule.").unwrap_err();
    match err {
        GenerateError::NoJsonObject { raw } => {
            assert!(raw.contains("cannot produce"));
        }
        other => panic!("expected NoJsonObject, got {other:?}"),
    }
}

#[test]
fn malformed_object_keeps_raw_response_for_debugging() {
    let body = "```json\n{\"schedule\": [oops]}\n```";
    let err = parse_generated(body).unwrap_err();
    match err {
        GenerateError::Parse { raw, .. } => assert!(raw.contains("oops")),
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn parsed_result_fills_missing_sections_with_defaults() {
    let result = parse_generated("{\"schedule\": []}").unwrap();
    assert!(result.schedule.is_empty());
    assert!(result.gantt.is_empty());
    assert!(result.project_metadata.is_null());
}

#[test]
fn parsed_result_reads_tasks_and_gantt() {
    let body = r#"{
        "project_metadata": {"project": "Sample Towers"},
        "schedule": [{
            "sl_no": 1,
            "section": "Excavation",
            "description": "Excavation for Footings",
            "quantity": "45.0 Cu.m",
            "unit": "Cu.m",
            "start_date": "2026-09-01",
            "end_date": "2026-09-03",
            "duration_days": 2
        }],
        "gantt": [{
            "task_id": "T1",
            "task_name": "Excavation for Footings",
            "start": "2026-09-01",
            "end": "2026-09-03",
            "section": "Excavation"
        }]
    }"#;

    let result = parse_generated(body).unwrap();
    assert_eq!(result.schedule.len(), 1);
    assert_eq!(result.schedule[0].section, "Excavation");
    assert_eq!(result.schedule[0].duration_days, 2);
    assert_eq!(result.gantt[0].task_id, "T1");
    assert_eq!(result.project_metadata["project"], "Sample Towers");
}

#[test]
fn prompt_embeds_statement_and_phase_list() {
    let prompt = build_prompt(&sample_statement());
    assert!(prompt.contains("\"actual_site_area\""));
    assert!(prompt.contains("1. Site Clearance & Layout"));
    assert!(prompt.contains("19. Final Finishing / Handing Over"));
    assert!(prompt.contains("Return a single JSON object"));
}

#[tokio::test]
async fn local_synthesizer_implements_the_generator_interface() {
    let generator = LocalSynthesizer;
    let result = generator.generate(&sample_statement()).await.unwrap();

    assert_eq!(result.schedule.len(), 19);
    assert_eq!(result.gantt.len(), 19);

    let serials: Vec<u32> = result.schedule.iter().map(|t| t.sl_no).collect();
    assert_eq!(serials, (1..=19).collect::<Vec<u32>>());
    assert_eq!(result.schedule[0].quantity, "1000 sqm");
    assert_eq!(result.gantt[0].task_id, "T1");
    assert_eq!(result.gantt[0].section, "Site Clearance & Layout");
    assert_eq!(
        result.project_metadata["source"],
        "local-synthesizer"
    );
}
