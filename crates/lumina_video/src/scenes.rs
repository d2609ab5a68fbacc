//! Scene extraction from generated video scripts.
//!
//! A script is a sequence of sections headed `Cena N` or `Scene N` (also
//! `Cenário N`), optionally as a markdown heading or in bold. Each section
//! carries labelled fields; only the visual description is kept.

use lumina_core::{ScenePrompt, truncate_chars};
use regex::Regex;
use std::sync::LazyLock;

/// Characters of raw script used when no scene can be extracted.
pub const FALLBACK_SCENE_CHARS: usize = 1_000;

static SCENE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:#{1,6}\s*)?(?:\*\*|__)?\s*(?:scene|cena|cen[aá]rio)\s+(\d+)\b")
        .expect("valid scene header regex")
});

static ANY_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#{1,6}\s").expect("valid heading regex"));

static VISUAL_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:[-*•]\s*)?(?:\*\*|__)?\s*(?:descri[çc][ãa]o\s+visual|visual\s+description|visual)\b[^:]*:\s*(?:\*\*|__)?(.*)$",
    )
    .expect("valid visual field regex")
});

static OTHER_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:[-*•]\s*)?(?:\*\*|__)?\s*(?:locu[çc][ãa]o|narra[çc][ãa]o|narration|voice[- ]?over|[áa]udio|som|sound|m[úu]sica|music|texto\s+na\s+tela|on[- ]screen\s+text|dura[çc][ãa]o|duration|transi[çc][ãa]o|transition)\b[^:]*:",
    )
    .expect("valid field regex")
});

#[derive(Default)]
struct Section {
    visual: Vec<String>,
    in_visual: bool,
}

impl Section {
    fn feed(&mut self, line: &str) {
        if let Some(caps) = VISUAL_FIELD.captures(line) {
            self.in_visual = true;
            self.visual.push(caps[1].to_string());
        } else if OTHER_FIELD.is_match(line) {
            self.in_visual = false;
        } else if self.in_visual {
            self.visual.push(line.to_string());
        }
    }

    fn description(&self) -> String {
        clean_markup(&self.visual.join(" "))
    }
}

/// Remove emphasis and bracket markers, list bullets and extra whitespace.
fn clean_markup(text: &str) -> String {
    text.split_whitespace()
        .filter(|word| !matches!(*word, "-" | "•"))
        .map(|word| word.replace(['*', '[', ']'], ""))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract the ordered scene prompts of a script.
///
/// Sections without a visual description are dropped and the remaining
/// scenes are numbered from 1 in document order. A script with no usable
/// section yields exactly one scene holding its first
/// [`FALLBACK_SCENE_CHARS`] characters, so the result is never empty.
///
/// # Examples
///
/// ```
/// use lumina_video::parse_scenes;
///
/// let script = "## Cena 1\n- Descrição visual: [Idosa] ao celular.\n- Locução: Cuidado!\n";
/// let scenes = parse_scenes(script);
/// assert_eq!(scenes.len(), 1);
/// assert_eq!(scenes[0].text(), "Idosa ao celular.");
///
/// let free_form = parse_scenes("Um vídeo sobre senhas.");
/// assert_eq!(free_form[0].text(), "Um vídeo sobre senhas.");
/// ```
pub fn parse_scenes(script: &str) -> Vec<ScenePrompt> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;

    for line in script.lines() {
        if SCENE_HEADER.is_match(line) {
            sections.extend(current.take());
            current = Some(Section::default());
        } else if ANY_HEADING.is_match(line) {
            sections.extend(current.take());
        } else if let Some(section) = current.as_mut() {
            section.feed(line);
        }
    }
    sections.extend(current);

    let scenes: Vec<ScenePrompt> = sections
        .iter()
        .map(Section::description)
        .filter(|text| !text.is_empty())
        .enumerate()
        .map(|(i, text)| ScenePrompt::new(i + 1, text))
        .collect();

    if scenes.is_empty() {
        tracing::debug!("No scene sections found; using script prefix");
        return vec![ScenePrompt::new(
            1,
            truncate_chars(script.trim(), FALLBACK_SCENE_CHARS),
        )];
    }
    scenes
}
