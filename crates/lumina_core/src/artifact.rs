//! Artifact kinds and their naming conventions.

/// Kind of artifact the pipeline persists.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum ArtifactKind {
    /// Markdown insight derived from a scraped page
    #[display("insight")]
    Insight,
    /// Markdown multi-scene video script
    #[display("script")]
    Script,
    /// JSON knowledge pill package
    #[display("pill")]
    Pill,
    /// PNG infographic attached to a pill
    #[display("infographic")]
    Infographic,
    /// MP4 video assembled from a script
    #[display("video")]
    Video,
}

impl ArtifactKind {
    /// Key prefix used when naming artifacts of this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Insight => "topico",
            ArtifactKind::Script => "roteiro",
            ArtifactKind::Pill | ArtifactKind::Infographic => "pilula",
            ArtifactKind::Video => "video",
        }
    }

    /// File extension, including the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Insight | ArtifactKind::Script => ".md",
            ArtifactKind::Pill => ".json",
            ArtifactKind::Infographic => ".png",
            ArtifactKind::Video => ".mp4",
        }
    }

    /// MIME type sent to the object store.
    pub fn content_type(&self) -> &'static str {
        match self {
            ArtifactKind::Insight | ArtifactKind::Script => "text/markdown; charset=utf-8",
            ArtifactKind::Pill => "application/json",
            ArtifactKind::Infographic => "image/png",
            ArtifactKind::Video => "video/mp4",
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Insight => "insight",
            ArtifactKind::Script => "script",
            ArtifactKind::Pill => "pill",
            ArtifactKind::Infographic => "infographic",
            ArtifactKind::Video => "video",
        }
    }
}

impl std::str::FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insight" => Ok(ArtifactKind::Insight),
            "script" => Ok(ArtifactKind::Script),
            "pill" => Ok(ArtifactKind::Pill),
            "infographic" => Ok(ArtifactKind::Infographic),
            "video" => Ok(ArtifactKind::Video),
            _ => Err(format!("Unknown artifact kind: {}", s)),
        }
    }
}
