//! Knowledge pill packages.

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Kind of call-to-action attached to a pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum CallToActionKind {
    /// A reflective question addressed to the reader
    #[display("question")]
    Question,
}

/// Call-to-action closing a pill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct CallToAction {
    /// Kind of call-to-action
    #[serde(rename = "type")]
    kind: CallToActionKind,
    /// Text shown to the reader
    text: String,
}

impl CallToAction {
    /// A question call-to-action.
    pub fn question(text: impl Into<String>) -> Self {
        Self {
            kind: CallToActionKind::Question,
            text: text.into(),
        }
    }
}

/// Fixed accessibility tags attached to every pill.
///
/// # Examples
///
/// ```
/// use lumina_core::AccessibilityMetadata;
///
/// let meta = AccessibilityMetadata::default();
/// assert_eq!(meta.target_audience(), &vec!["elderly".to_string(), "neurodivergent".to_string()]);
/// assert_eq!(meta.design_principles().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct AccessibilityMetadata {
    /// Audiences the pill is written for
    target_audience: Vec<String>,
    /// Visual design principles of the infographic
    design_principles: Vec<String>,
}

impl Default for AccessibilityMetadata {
    fn default() -> Self {
        Self {
            target_audience: ["elderly", "neurodivergent"].map(String::from).to_vec(),
            design_principles: ["large_icons", "high_contrast", "soft_colors", "literal_images"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Generated content of a successful pill.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PillContent {
    /// Generated display title
    title: String,
    /// Two to four sentence explanation
    short_text: String,
    /// Closing call-to-action
    call_to_action: CallToAction,
    /// PNG bytes of the infographic, when one was produced
    infographic: Option<Vec<u8>>,
    /// Key the infographic is stored under
    infographic_key: String,
    /// Accessibility tags
    accessibility: AccessibilityMetadata,
}

impl PillContent {
    /// Assemble pill content with the standard accessibility tags.
    pub fn new(
        title: impl Into<String>,
        short_text: impl Into<String>,
        call_to_action: CallToAction,
        infographic: Option<Vec<u8>>,
        infographic_key: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            short_text: short_text.into(),
            call_to_action,
            infographic,
            infographic_key: infographic_key.into(),
            accessibility: AccessibilityMetadata::default(),
        }
    }

    /// Serializable document describing this pill.
    pub fn to_document(
        &self,
        id: impl Into<String>,
        source_insight: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> PillDocument {
        PillDocument {
            id: id.into(),
            source_insight: source_insight.into(),
            title: self.title.clone(),
            short_text: self.short_text.clone(),
            infographic_filename: self
                .infographic
                .as_ref()
                .map(|_| self.infographic_key.clone()),
            call_to_action: self.call_to_action.clone(),
            accessibility: self.accessibility.clone(),
            created_at,
        }
    }
}

/// JSON document persisted for each pill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into))]
pub struct PillDocument {
    /// Pill identifier, the key without extension
    id: String,
    /// Key of the insight the pill was derived from
    source_insight: String,
    /// Display title
    title: String,
    /// Explanation text
    short_text: String,
    /// Infographic key, absent when no image was produced
    #[builder(default)]
    infographic_filename: Option<String>,
    /// Closing call-to-action
    call_to_action: CallToAction,
    /// Accessibility tags
    #[builder(default)]
    accessibility: AccessibilityMetadata,
    /// Creation time in UTC
    created_at: DateTime<Utc>,
}

impl PillDocument {
    /// Creates a new builder for `PillDocument`.
    pub fn builder() -> PillDocumentBuilder {
        PillDocumentBuilder::default()
    }
}
