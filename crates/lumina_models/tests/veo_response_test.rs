//! Operation payload interpretation for both Veo backends.

use lumina_interface::OperationStatus;
use lumina_models::{clip_from_response, operation_status, parse_gcs_uri};
use serde_json::json;

#[test]
fn test_ai_studio_done_operation_yields_clip() {
    let operation = json!({
        "name": "models/veo-2.0-generate-001/operations/abc123",
        "done": true,
        "response": {
            "generateVideoResponse": {
                "generatedSamples": [
                    { "video": { "uri": "https://generativelanguage.googleapis.com/v1beta/files/f1:download?alt=media" } }
                ]
            }
        }
    });

    match operation_status(&operation) {
        OperationStatus::Done(clip) => {
            assert!(clip.uri.contains("files/f1"));
            assert_eq!(clip.mime_type, None);
        }
        other => panic!("expected Done, got {:?}", other),
    }
}

#[test]
fn test_vertex_done_operation_yields_gcs_clip() {
    let operation = json!({
        "name": "projects/p/locations/us-central1/publishers/google/models/veo/operations/9",
        "done": true,
        "response": {
            "@type": "type.googleapis.com/cloud.ai.large_models.vision.GenerateVideoResponse",
            "videos": [{ "gcsUri": "gs://lumina-videos/video_1a2b3c4d/sample_0.mp4", "mimeType": "video/mp4" }]
        }
    });

    let OperationStatus::Done(clip) = operation_status(&operation) else {
        panic!("expected Done");
    };
    assert_eq!(
        parse_gcs_uri(&clip.uri),
        Some(("lumina-videos", "video_1a2b3c4d/sample_0.mp4"))
    );
}

#[test]
fn test_pending_without_done_flag() {
    assert_eq!(
        operation_status(&json!({ "name": "operations/1" })),
        OperationStatus::Pending
    );
}

#[test]
fn test_error_takes_precedence_over_done() {
    let operation = json!({
        "done": true,
        "error": { "code": 8, "message": "quota exhausted" },
        "response": { "videos": [{ "gcsUri": "gs://b/x.mp4" }] }
    });
    assert_eq!(
        operation_status(&operation),
        OperationStatus::Error("code 8: quota exhausted".to_string())
    );
}

#[test]
fn test_filtered_video_reports_reasons() {
    let operation = json!({
        "done": true,
        "response": {
            "generateVideoResponse": {
                "raiMediaFilteredCount": 1,
                "raiMediaFilteredReasons": ["unsafe content"]
            }
        }
    });
    match operation_status(&operation) {
        OperationStatus::Error(message) => assert!(message.contains("unsafe content")),
        other => panic!("expected Error, got {:?}", other),
    }
}

#[test]
fn test_done_without_video_is_an_error() {
    let status = operation_status(&json!({ "done": true, "response": {} }));
    assert!(matches!(status, OperationStatus::Error(_)));
    assert_eq!(clip_from_response(&json!({})), None);
}

#[test]
fn test_parse_gcs_uri_rejects_incomplete_uris() {
    assert_eq!(parse_gcs_uri("gs://bucket"), None);
    assert_eq!(parse_gcs_uri("gs://bucket/"), None);
    assert_eq!(parse_gcs_uri("gs:///object"), None);
}
