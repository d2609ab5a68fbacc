//! Deterministic naming of artifacts from their content.
//!
//! Outputs are named from the title of the content they were derived from,
//! so the expected name of an artifact can be computed before generating it.

use crate::ArtifactKind;
use regex::Regex;
use std::sync::LazyLock;

/// Key of the consolidated insight document. Never treated as a source.
pub const CONSOLIDATED_INSIGHTS_KEY: &str = "consolidado_insights.md";

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").expect("Valid title regex"));

/// Derive a canonical identifier from a title or filename.
///
/// Diacritics are folded to their base letter, punctuation is dropped, runs
/// of whitespace, hyphens and underscores become a single underscore, and
/// the result is lowercased and trimmed of underscores. Empty input yields
/// an empty string.
///
/// # Examples
///
/// ```
/// use lumina_core::derive_key;
///
/// assert_eq!(derive_key("Proteção contra Golpes"), "protecao_contra_golpes");
/// assert_eq!(derive_key("  WhatsApp: 5 dicas -- rápidas! "), "whatsapp_5_dicas_rapidas");
/// assert_eq!(derive_key(""), "");
/// ```
pub fn derive_key(title: &str) -> String {
    let mut key = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.to_lowercase().chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
            continue;
        }
        let folded = fold_diacritic(c);
        let kept: Vec<char> = match folded {
            Some(replacement) => replacement.chars().collect(),
            None if c.is_alphanumeric() => vec![c],
            None => Vec::new(),
        };
        if kept.is_empty() {
            continue;
        }
        if pending_separator && !key.is_empty() {
            key.push('_');
        }
        pending_separator = false;
        key.extend(kept);
    }

    key
}

/// Map an accented lowercase letter to its unaccented spelling.
fn fold_diacritic(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'ç' | 'ć' | 'č' => "c",
        'ď' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'ī' => "i",
        'ł' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'ř' => "r",
        'ś' | 'š' => "s",
        'ť' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        'æ' => "ae",
        'œ' => "oe",
        'ß' => "ss",
        _ => return None,
    };
    Some(folded)
}

/// Extract the title from the first level-one markdown heading.
///
/// Only lines starting with exactly `# ` count; `## Section` is not a title.
pub fn extract_title(markdown: &str) -> Option<String> {
    TITLE_RE
        .captures(markdown)
        .map(|caps| caps[1].trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Name an artifact from its title, falling back when the title is missing
/// or slugs to nothing.
///
/// # Examples
///
/// ```
/// use lumina_core::{ArtifactKind, output_name};
///
/// assert_eq!(
///     output_name(ArtifactKind::Insight, Some("Golpes no Pix"), "3"),
///     "topico_golpes_no_pix.md"
/// );
/// assert_eq!(output_name(ArtifactKind::Insight, Some("!!!"), "3"), "topico_3.md");
/// assert_eq!(output_name(ArtifactKind::Pill, None, "senhas"), "pilula_senhas.json");
/// ```
pub fn output_name(kind: ArtifactKind, title: Option<&str>, fallback: &str) -> String {
    let slug = title.map(derive_key).unwrap_or_default();
    let stem = if slug.is_empty() { fallback } else { &slug };
    format!("{}_{}{}", kind.prefix(), stem, kind.extension())
}

/// Strip any directory prefix and the final extension from a key.
///
/// # Examples
///
/// ```
/// use lumina_core::file_stem;
///
/// assert_eq!(file_stem("insights/topico_pix.md"), "topico_pix");
/// assert_eq!(file_stem("README"), "README");
/// ```
pub fn file_stem(key: &str) -> &str {
    let name = key.rsplit('/').next().unwrap_or(key);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_is_deterministic() {
        let title = "Segurança no Celular - Parte 2";
        assert_eq!(derive_key(title), derive_key(title));
        assert_eq!(derive_key(title), "seguranca_no_celular_parte_2");
    }

    #[test]
    fn test_derive_key_collapses_separators() {
        assert_eq!(derive_key("a - _ b"), "a_b");
        assert_eq!(derive_key("__já__"), "ja");
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("ação", 2), "aç");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
