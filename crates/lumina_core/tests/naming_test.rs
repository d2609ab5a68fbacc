//! Tests for artifact naming and pill documents.

use chrono::{TimeZone, Utc};
use lumina_core::{
    ArtifactKind, CallToAction, PillContent, derive_key, extract_title, file_stem, output_name,
};

#[test]
fn test_extract_title_uses_first_level_one_heading() {
    let markdown = "Intro line\n## Not a title\n# Golpes no WhatsApp  \n# Second";
    assert_eq!(extract_title(markdown), Some("Golpes no WhatsApp".to_string()));
}

#[test]
fn test_extract_title_missing() {
    assert_eq!(extract_title("## Only sections\ntext"), None);
    assert_eq!(extract_title(""), None);
}

#[test]
fn test_output_name_falls_back_when_slug_empty() {
    assert_eq!(
        output_name(ArtifactKind::Script, Some("Senhas Fortes"), "topico_senhas"),
        "roteiro_senhas_fortes.md"
    );
    assert_eq!(
        output_name(ArtifactKind::Script, None, "topico_senhas"),
        "roteiro_topico_senhas.md"
    );
    assert_eq!(output_name(ArtifactKind::Insight, Some("???"), "7"), "topico_7.md");
}

#[test]
fn test_expected_pill_key_matches_insight_title() {
    let insight = "# Proteção contra Golpes\n\nConteúdo";
    let title = extract_title(insight);
    let key = output_name(
        ArtifactKind::Pill,
        title.as_deref(),
        &derive_key(file_stem("topico_golpes.md")),
    );
    assert_eq!(key, "pilula_protecao_contra_golpes.json");
}

#[test]
fn test_artifact_kind_round_trips_through_str() {
    use strum::IntoEnumIterator;
    for kind in ArtifactKind::iter() {
        assert_eq!(kind.as_str().parse::<ArtifactKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), kind.as_str());
    }
}

#[test]
fn test_pill_document_json_shape() {
    let content = PillContent::new(
        "Cuidado com links",
        "Nunca clique em links estranhos. Confirme com quem enviou.",
        CallToAction::question("Você já recebeu um link suspeito?"),
        Some(vec![0x89, 0x50, 0x4e, 0x47]),
        "pilula_links.png",
    );
    let created = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let doc = content.to_document("pilula_links", "topico_links.md", created);
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(json["id"], "pilula_links");
    assert_eq!(json["source_insight"], "topico_links.md");
    assert_eq!(json["infographic_filename"], "pilula_links.png");
    assert_eq!(json["call_to_action"]["type"], "question");
    assert_eq!(json["accessibility"]["target_audience"][0], "elderly");
    assert_eq!(json["accessibility"]["design_principles"][3], "literal_images");
    assert_eq!(json["created_at"], "2025-01-02T03:04:05Z");
}

#[test]
fn test_pill_document_without_infographic() {
    let content = PillContent::new(
        "Senhas",
        "Use senhas longas.",
        CallToAction::question("Sua senha é forte?"),
        None,
        "pilula_senhas.png",
    );
    let doc = content.to_document("pilula_senhas", "topico_senhas.md", Utc::now());
    assert_eq!(doc.infographic_filename(), &None);
}
