use lumina_interface::{PreflightReport, VideoBackend, VideoBackendMode};
use std::time::Duration;

#[test]
fn test_ai_studio_chains_extensions() {
    let backend = VideoBackend::ai_studio();
    assert_eq!(backend.mode(), &VideoBackendMode::AiStudio);
    assert!(backend.supports_extension());
    assert_eq!(backend.effective_extensions(5), 5);
    assert_eq!(backend.total_duration(5), Duration::from_secs(48));
}

#[test]
fn test_vertex_ignores_requested_extensions() {
    let backend = VideoBackend::vertex_ai();
    assert_eq!(backend.mode().to_string(), "vertex_ai");
    assert_eq!(backend.effective_extensions(5), 0);
    assert_eq!(backend.total_duration(0), Duration::from_secs(8));
}

#[test]
fn test_report_is_valid_until_a_check_fails() {
    let mut report = PreflightReport::new("ai_studio");
    assert!(report.valid());

    report.pass("Configuration", "VEO_API_KEY set");
    assert!(report.valid());

    report.fail("API access", "HTTP 403");
    assert!(!report.valid());
    let failures: Vec<&str> = report.failures().map(|check| check.name().as_str()).collect();
    assert_eq!(failures, vec!["API access"]);

    let text = report.to_string();
    assert!(text.contains("[  ok] Configuration: VEO_API_KEY set"));
    assert!(text.contains("[FAIL] API access: HTTP 403"));
    assert!(text.ends_with("Result: invalid"));
}

#[test]
fn test_merged_reports_keep_check_order() {
    let mut text = PreflightReport::new("gemini");
    text.pass("Configuration", "GEMINI_API_KEY set");
    let mut veo = PreflightReport::new("vertex_ai");
    veo.fail("Configuration", "missing VERTEX_PROJECT");

    text.merge(veo);
    assert_eq!(text.checks().len(), 2);
    assert!(!text.valid());
    assert_eq!(text.checks()[1].message(), "missing VERTEX_PROJECT");
}
