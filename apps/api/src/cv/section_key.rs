use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The closed vocabulary of CV sections the renderer knows how to lay out.
///
/// `Certifications` is the canonical key; the longer `"certifications or courses"`
/// spelling produced by the structuring prompt is accepted as an alias and
/// normalizes to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKey {
    Header,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Volunteer,
    Achievements,
    Publications,
    Interests,
    References,
    Patents,
    Research,
    Custom,
}

/// Order used when a document does not declare one.
pub const DEFAULT_SECTION_ORDER: [SectionKey; 15] = [
    SectionKey::Header,
    SectionKey::Summary,
    SectionKey::Experience,
    SectionKey::Education,
    SectionKey::Skills,
    SectionKey::Projects,
    SectionKey::Certifications,
    SectionKey::Languages,
    SectionKey::Volunteer,
    SectionKey::Achievements,
    SectionKey::Publications,
    SectionKey::Interests,
    SectionKey::Patents,
    SectionKey::Research,
    SectionKey::Custom,
];

pub const CERTIFICATIONS_ALIAS: &str = "certifications or courses";

impl SectionKey {
    pub const ALL: [SectionKey; 16] = [
        SectionKey::Header,
        SectionKey::Summary,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Projects,
        SectionKey::Certifications,
        SectionKey::Languages,
        SectionKey::Volunteer,
        SectionKey::Achievements,
        SectionKey::Publications,
        SectionKey::Interests,
        SectionKey::References,
        SectionKey::Patents,
        SectionKey::Research,
        SectionKey::Custom,
    ];

    /// Parses a key as it appears in `section_order` or the `sections` map.
    /// Unknown keys return `None`; callers skip them.
    pub fn parse(raw: &str) -> Option<Self> {
        let key = raw.trim().to_lowercase();
        if key == CERTIFICATIONS_ALIAS {
            return Some(SectionKey::Certifications);
        }
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Header => "header",
            SectionKey::Summary => "summary",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
            SectionKey::Projects => "projects",
            SectionKey::Certifications => "certifications",
            SectionKey::Languages => "languages",
            SectionKey::Volunteer => "volunteer",
            SectionKey::Achievements => "achievements",
            SectionKey::Publications => "publications",
            SectionKey::Interests => "interests",
            SectionKey::References => "references",
            SectionKey::Patents => "patents",
            SectionKey::Research => "research",
            SectionKey::Custom => "custom",
        }
    }

    /// Heading used when the document leaves `section_title` blank.
    pub fn default_title(self) -> &'static str {
        match self {
            SectionKey::Header => "",
            SectionKey::Summary => "Summary",
            SectionKey::Experience => "Professional Experience",
            SectionKey::Education => "Education",
            SectionKey::Skills => "Skills",
            SectionKey::Projects => "Projects",
            SectionKey::Certifications => "Certifications",
            SectionKey::Languages => "Languages",
            SectionKey::Volunteer => "Volunteer Experience",
            SectionKey::Achievements => "Awards & Achievements",
            SectionKey::Publications => "Publications",
            SectionKey::Interests => "Interests",
            SectionKey::References => "References",
            SectionKey::Patents => "Patents",
            SectionKey::Research => "Research",
            SectionKey::Custom => "Additional Information",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SectionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SectionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        SectionKey::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown section key '{raw}'")))
    }
}
