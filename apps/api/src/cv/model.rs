//! The canonical in-memory CV: typed sections decoded leniently from the
//! structuring step's JSON.
//!
//! Decoding never fails on content shape. A malformed item is dropped from its
//! list; a malformed section decodes to its empty default. Text is stored raw,
//! escaping belongs to the renderer.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::cv::lenient;
use crate::cv::section_key::SectionKey;

pub const DEFAULT_DATE_FORMAT: &str = "MMM YYYY";

// ────────────────────────────────────────────────────────────────────────────
// Shared field types
// ────────────────────────────────────────────────────────────────────────────

/// A start/end pair. `is_current` overrides any stored end with "Present".
///
/// Accepts either an object or a plain string (taken as the start date), and
/// serializes back to a plain string when only a start is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
    pub is_current: bool,
}

#[derive(Deserialize)]
struct DateRangeFields {
    #[serde(default, deserialize_with = "lenient::text")]
    start: String,
    #[serde(default, deserialize_with = "lenient::text")]
    end: String,
    #[serde(default, alias = "current", deserialize_with = "lenient::flag")]
    is_current: bool,
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Some(start) = lenient::value_to_text(&value) {
            return Ok(DateRange {
                start,
                ..DateRange::default()
            });
        }
        let fields: DateRangeFields =
            serde_json::from_value(value).map_err(serde::de::Error::custom)?;
        Ok(DateRange {
            start: fields.start,
            end: fields.end,
            is_current: fields.is_current,
        })
    }
}

impl Serialize for DateRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.end.is_empty() && !self.is_current {
            return serializer.serialize_str(&self.start);
        }
        #[derive(Serialize)]
        struct Full<'a> {
            start: &'a str,
            end: &'a str,
            is_current: bool,
        }
        Full {
            start: &self.start,
            end: &self.end,
            is_current: self.is_current,
        }
        .serialize(serializer)
    }
}

impl DateRange {
    pub fn is_blank(&self) -> bool {
        self.start.trim().is_empty() && self.end.trim().is_empty() && !self.is_current
    }
}

/// One contact channel: the text shown and the hyperlink target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactChannel {
    pub value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub link: String,
}

#[derive(Deserialize)]
struct ContactChannelFields {
    #[serde(default, deserialize_with = "lenient::text")]
    value: String,
    #[serde(default, alias = "url", deserialize_with = "lenient::text")]
    link: String,
}

impl<'de> Deserialize<'de> for ContactChannel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Some(text) = lenient::value_to_text(&value) {
            return Ok(ContactChannel {
                value: text,
                link: String::new(),
            });
        }
        let fields: ContactChannelFields =
            serde_json::from_value(value).map_err(serde::de::Error::custom)?;
        Ok(ContactChannel {
            value: fields.value,
            link: fields.link,
        })
    }
}

/// A malformed channel is dropped rather than failing the whole header.
fn channel<'de, D>(deserializer: D) -> Result<Option<ContactChannel>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default, deserialize_with = "channel", skip_serializing_if = "Option::is_none")]
    pub email: Option<ContactChannel>,
    #[serde(default, deserialize_with = "channel", skip_serializing_if = "Option::is_none")]
    pub phone: Option<ContactChannel>,
    #[serde(
        default,
        alias = "website",
        deserialize_with = "channel",
        skip_serializing_if = "Option::is_none"
    )]
    pub portfolio: Option<ContactChannel>,
    #[serde(default, deserialize_with = "channel", skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<ContactChannel>,
    #[serde(default, deserialize_with = "channel", skip_serializing_if = "Option::is_none")]
    pub github: Option<ContactChannel>,
    #[serde(default, deserialize_with = "channel", skip_serializing_if = "Option::is_none")]
    pub location: Option<ContactChannel>,
}

// ────────────────────────────────────────────────────────────────────────────
// Section shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderSection {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(default, alias = "contact", deserialize_with = "lenient::or_default")]
    pub contact_info: ContactInfo,
}

impl HeaderSection {
    /// Top-level `location` wins over `contact_info.location`.
    pub fn resolved_location(&self) -> &str {
        if !self.location.trim().is_empty() {
            return &self.location;
        }
        self.contact_info
            .location
            .as_ref()
            .map(|c| c.value.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarySection {
    #[serde(default, alias = "title", deserialize_with = "lenient::text")]
    pub section_title: String,
    #[serde(default, alias = "text", deserialize_with = "lenient::text")]
    pub content: String,
}

/// A heading plus an ordered list of structured items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct ListSection<T> {
    #[serde(default, alias = "title", deserialize_with = "lenient::text")]
    pub section_title: String,
    #[serde(default, alias = "entries", deserialize_with = "lenient::items")]
    pub items: Vec<T>,
}

impl<T> Default for ListSection<T> {
    fn default() -> Self {
        Self {
            section_title: String::new(),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterestsSection {
    #[serde(default, alias = "title", deserialize_with = "lenient::text")]
    pub section_title: String,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillsSection {
    #[serde(default, alias = "title", deserialize_with = "lenient::text")]
    pub section_title: String,
    #[serde(default, alias = "items", deserialize_with = "lenient::items")]
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillCategory {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, alias = "skills", deserialize_with = "lenient::text_list")]
    pub items: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub proficiency: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Item shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceItem {
    #[serde(default, alias = "role", deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, alias = "organization", deserialize_with = "lenient::text")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: String,
    #[serde(default, alias = "date")]
    pub dates: DateRange,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, alias = "highlights", deserialize_with = "lenient::text_list")]
    pub achievements: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationItem {
    #[serde(default, alias = "title", deserialize_with = "lenient::text")]
    pub degree: String,
    #[serde(default, alias = "school", deserialize_with = "lenient::text")]
    pub institution: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: String,
    #[serde(default, alias = "date")]
    pub dates: DateRange,
    #[serde(default, deserialize_with = "lenient::text")]
    pub gpa: String,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub honors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectItem {
    #[serde(default, alias = "name", deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, alias = "date")]
    pub dates: DateRange,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub technologies: Vec<String>,
    #[serde(default, alias = "achievements", deserialize_with = "lenient::text_list")]
    pub key_contributions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificationItem {
    #[serde(default, alias = "name", deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, alias = "issuer", deserialize_with = "lenient::text")]
    pub institution: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: String,
    #[serde(default, alias = "dates")]
    pub date: DateRange,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageItem {
    #[serde(default, alias = "language", deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, alias = "level", deserialize_with = "lenient::text")]
    pub proficiency: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolunteerItem {
    #[serde(default, alias = "role", deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, alias = "company", deserialize_with = "lenient::text")]
    pub organization: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(default, alias = "date")]
    pub dates: DateRange,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AchievementItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub organization: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, alias = "dates")]
    pub date: DateRange,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicationItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, alias = "venue", deserialize_with = "lenient::text")]
    pub publisher: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: String,
    #[serde(default, alias = "dates")]
    pub date: DateRange,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub phone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatentItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub number: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: String,
    #[serde(default, alias = "dates")]
    pub date: DateRange,
}

/// Titled free-text entry, shared by `research` and `custom`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, alias = "content", deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: String,
    #[serde(default, alias = "dates")]
    pub date: DateRange,
}

// ────────────────────────────────────────────────────────────────────────────
// SectionData
// ────────────────────────────────────────────────────────────────────────────

/// One section's content, shaped by its kind.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SectionData {
    Header(HeaderSection),
    Summary(SummarySection),
    Experience(ListSection<ExperienceItem>),
    Education(ListSection<EducationItem>),
    Skills(SkillsSection),
    Projects(ListSection<ProjectItem>),
    Certifications(ListSection<CertificationItem>),
    Languages(ListSection<LanguageItem>),
    Volunteer(ListSection<VolunteerItem>),
    Achievements(ListSection<AchievementItem>),
    Publications(ListSection<PublicationItem>),
    Interests(InterestsSection),
    References(ListSection<ReferenceItem>),
    Patents(ListSection<PatentItem>),
    Research(ListSection<EntryItem>),
    Custom(ListSection<EntryItem>),
}

impl SectionData {
    /// Decodes raw JSON into the shape fixed for `key`. A value that does not
    /// fit the shape yields the kind's empty section.
    pub fn decode(key: SectionKey, value: Value) -> SectionData {
        fn shaped<T: DeserializeOwned + Default>(key: SectionKey, value: Value) -> T {
            serde_json::from_value(value).unwrap_or_else(|e| {
                debug!("Section '{key}' is malformed, treating as empty: {e}");
                T::default()
            })
        }

        match key {
            SectionKey::Header => SectionData::Header(shaped(key, value)),
            SectionKey::Summary => SectionData::Summary(shaped(key, value)),
            SectionKey::Experience => SectionData::Experience(shaped(key, value)),
            SectionKey::Education => SectionData::Education(shaped(key, value)),
            SectionKey::Skills => SectionData::Skills(shaped(key, value)),
            SectionKey::Projects => SectionData::Projects(shaped(key, value)),
            SectionKey::Certifications => SectionData::Certifications(shaped(key, value)),
            SectionKey::Languages => SectionData::Languages(shaped(key, value)),
            SectionKey::Volunteer => SectionData::Volunteer(shaped(key, value)),
            SectionKey::Achievements => SectionData::Achievements(shaped(key, value)),
            SectionKey::Publications => SectionData::Publications(shaped(key, value)),
            SectionKey::Interests => SectionData::Interests(shaped(key, value)),
            SectionKey::References => SectionData::References(shaped(key, value)),
            SectionKey::Patents => SectionData::Patents(shaped(key, value)),
            SectionKey::Research => SectionData::Research(shaped(key, value)),
            SectionKey::Custom => SectionData::Custom(shaped(key, value)),
        }
    }

    pub fn key(&self) -> SectionKey {
        match self {
            SectionData::Header(_) => SectionKey::Header,
            SectionData::Summary(_) => SectionKey::Summary,
            SectionData::Experience(_) => SectionKey::Experience,
            SectionData::Education(_) => SectionKey::Education,
            SectionData::Skills(_) => SectionKey::Skills,
            SectionData::Projects(_) => SectionKey::Projects,
            SectionData::Certifications(_) => SectionKey::Certifications,
            SectionData::Languages(_) => SectionKey::Languages,
            SectionData::Volunteer(_) => SectionKey::Volunteer,
            SectionData::Achievements(_) => SectionKey::Achievements,
            SectionData::Publications(_) => SectionKey::Publications,
            SectionData::Interests(_) => SectionKey::Interests,
            SectionData::References(_) => SectionKey::References,
            SectionData::Patents(_) => SectionKey::Patents,
            SectionData::Research(_) => SectionKey::Research,
            SectionData::Custom(_) => SectionKey::Custom,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering options
// ────────────────────────────────────────────────────────────────────────────

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

/// Document-wide formatting switches (`rendering_rules` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderingOptions {
    #[serde(
        default = "default_date_format",
        alias = "dateFormat",
        deserialize_with = "lenient::text"
    )]
    pub date_format: String,
    #[serde(
        default = "default_hide_empty",
        alias = "hideEmptySections",
        deserialize_with = "lenient::flag_or_true"
    )]
    pub hide_empty_sections: bool,
    #[serde(
        default,
        alias = "maxItemsPerSection",
        deserialize_with = "lenient::limit"
    )]
    pub max_items_per_section: Option<usize>,
    #[serde(
        default,
        alias = "truncateDescriptionsAt",
        deserialize_with = "lenient::limit"
    )]
    pub truncate_descriptions_at: Option<usize>,
}

fn default_hide_empty() -> bool {
    true
}

impl Default for RenderingOptions {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            hide_empty_sections: true,
            max_items_per_section: None,
            truncate_descriptions_at: None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CvDocument
// ────────────────────────────────────────────────────────────────────────────

/// The root document handed to the renderer. Immutable for one render call.
///
/// `section_order` keeps the raw keys as supplied: unknown keys stay in the list
/// and are skipped at render time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "CvEnvelope", into = "CvEnvelope")]
pub struct CvDocument {
    pub section_order: Vec<String>,
    pub sections: BTreeMap<SectionKey, SectionData>,
    pub options: RenderingOptions,
}

impl CvDocument {
    pub fn section(&self, key: SectionKey) -> Option<&SectionData> {
        self.sections.get(&key)
    }

    /// Inserts (or replaces) a section under the key its shape belongs to.
    pub fn insert(&mut self, data: SectionData) {
        self.sections.insert(data.key(), data);
    }

    /// Builds a document from a raw `sections` object. Unknown keys are
    /// ignored; when a key and its alias both appear, the canonical one wins.
    pub fn from_parts(
        section_order: Vec<String>,
        raw_sections: serde_json::Map<String, Value>,
        options: RenderingOptions,
    ) -> Self {
        let mut sections = BTreeMap::new();
        let (canonical, aliased): (Vec<_>, Vec<_>) = raw_sections
            .into_iter()
            .partition(|(name, _)| SectionKey::parse(name).is_some_and(|k| k.as_str() == name.as_str()));

        for (name, value) in canonical.into_iter().chain(aliased) {
            match SectionKey::parse(&name) {
                Some(key) => {
                    sections
                        .entry(key)
                        .or_insert_with(|| SectionData::decode(key, value));
                }
                None => debug!("Ignoring unrecognized section '{name}'"),
            }
        }

        Self {
            section_order,
            sections,
            options,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Metadata {
    #[serde(default, deserialize_with = "lenient::text_list")]
    section_order: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CvTemplate {
    #[serde(default, deserialize_with = "lenient::or_default")]
    metadata: Metadata,
    #[serde(default, deserialize_with = "lenient::or_default")]
    sections: serde_json::Map<String, Value>,
    #[serde(
        default,
        alias = "renderingOptions",
        alias = "rendering_options",
        deserialize_with = "lenient::or_default"
    )]
    rendering_rules: RenderingOptions,
}

/// Wire form: `{"cv_template": {...}}`, or the template object on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum CvEnvelope {
    Wrapped { cv_template: CvTemplate },
    Bare(CvTemplate),
}

impl From<CvEnvelope> for CvDocument {
    fn from(envelope: CvEnvelope) -> Self {
        let template = match envelope {
            CvEnvelope::Wrapped { cv_template } => cv_template,
            CvEnvelope::Bare(template) => template,
        };
        CvDocument::from_parts(
            template.metadata.section_order,
            template.sections,
            template.rendering_rules,
        )
    }
}

impl From<CvDocument> for CvEnvelope {
    fn from(doc: CvDocument) -> Self {
        let sections = doc
            .sections
            .iter()
            .filter_map(|(key, data)| {
                serde_json::to_value(data)
                    .ok()
                    .map(|v| (key.as_str().to_string(), v))
            })
            .collect();

        CvEnvelope::Wrapped {
            cv_template: CvTemplate {
                metadata: Metadata {
                    section_order: doc.section_order,
                },
                sections,
                rendering_rules: doc.options,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "cv_template": {
                "metadata": {"section_order": ["header", "experience", "certifications or courses"]},
                "sections": {
                    "header": {
                        "name": "A. Smith",
                        "title": "Engineer",
                        "contact_info": {
                            "email": {"value": "a@example.com", "link": "mailto:a@example.com"},
                            "location": {"value": "Paris, France"}
                        }
                    },
                    "experience": {
                        "section_title": "Experience",
                        "items": [
                            {"title": "Engineer", "company": "Acme",
                             "dates": {"start": "2020-01-01", "end": "", "is_current": true},
                             "achievements": ["Shipped X"]},
                            42,
                            {"title": "Intern", "company": "Initech", "dates": "2018"}
                        ]
                    },
                    "certifications or courses": {
                        "section_title": "Certs",
                        "items": [{"title": "CKA", "institution": "CNCF", "date": {"start": "2021-05"}}]
                    },
                    "hobbies": {"items": ["chess"]}
                },
                "rendering_rules": {
                    "date_format": "MMM YYYY",
                    "hide_empty_sections": true,
                    "max_items_per_section": "No limit for now",
                    "truncate_descriptions_at": "No limit for now"
                }
            }
        })
    }

    #[test]
    fn test_envelope_decodes_typed_sections() {
        let doc: CvDocument = serde_json::from_value(sample()).unwrap();
        assert_eq!(doc.section_order.len(), 3);
        assert_eq!(doc.options.max_items_per_section, None);

        let Some(SectionData::Header(header)) = doc.section(SectionKey::Header) else {
            panic!("header missing");
        };
        assert_eq!(header.name, "A. Smith");
        assert_eq!(header.resolved_location(), "Paris, France");
    }

    #[test]
    fn test_malformed_item_is_dropped_but_siblings_survive() {
        let doc: CvDocument = serde_json::from_value(sample()).unwrap();
        let Some(SectionData::Experience(exp)) = doc.section(SectionKey::Experience) else {
            panic!("experience missing");
        };
        assert_eq!(exp.items.len(), 2);
        assert!(exp.items[0].dates.is_current);
        assert_eq!(exp.items[1].dates.start, "2018");
    }

    #[test]
    fn test_alias_key_normalizes_and_unknown_sections_are_ignored() {
        let doc: CvDocument = serde_json::from_value(sample()).unwrap();
        assert!(doc.section(SectionKey::Certifications).is_some());
        assert_eq!(doc.sections.len(), 3);
    }

    #[test]
    fn test_canonical_key_wins_over_alias() {
        let doc: CvDocument = serde_json::from_value(json!({
            "sections": {
                "certifications or courses": {"items": [{"title": "Alias"}]},
                "certifications": {"items": [{"title": "Canonical"}]}
            }
        }))
        .unwrap();
        let Some(SectionData::Certifications(certs)) = doc.section(SectionKey::Certifications)
        else {
            panic!("certifications missing");
        };
        assert_eq!(certs.items[0].title, "Canonical");
    }

    #[test]
    fn test_malformed_section_decodes_as_empty() {
        let doc: CvDocument = serde_json::from_value(json!({
            "sections": {"experience": {"section_title": "Work", "items": "not a list"}}
        }))
        .unwrap();
        let Some(SectionData::Experience(exp)) = doc.section(SectionKey::Experience) else {
            panic!("experience missing");
        };
        assert!(exp.items.is_empty());
        assert!(exp.section_title.is_empty());
    }

    #[test]
    fn test_bare_template_and_defaults() {
        let doc: CvDocument =
            serde_json::from_value(json!({"sections": {"summary": {"content": "Hi"}}})).unwrap();
        assert!(doc.section_order.is_empty());
        assert_eq!(doc.options, RenderingOptions::default());
        assert!(doc.section(SectionKey::Summary).is_some());
    }

    #[test]
    fn test_camel_case_rendering_options() {
        let doc: CvDocument = serde_json::from_value(json!({
            "rendering_rules": {"dateFormat": "YYYY-MM", "hideEmptySections": false, "maxItemsPerSection": 2}
        }))
        .unwrap();
        assert_eq!(doc.options.date_format, "YYYY-MM");
        assert!(!doc.options.hide_empty_sections);
        assert_eq!(doc.options.max_items_per_section, Some(2));
    }

    #[test]
    fn test_serializes_back_to_wrapped_form() {
        let doc: CvDocument = serde_json::from_value(sample()).unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        let sections = &value["cv_template"]["sections"];
        assert!(sections.get("certifications").is_some());
        assert_eq!(sections["experience"]["items"][1]["dates"], json!("2018"));
        assert_eq!(
            sections["experience"]["items"][0]["dates"]["is_current"],
            json!(true)
        );

        let again: CvDocument = serde_json::from_value(value).unwrap();
        assert_eq!(again.sections.len(), doc.sections.len());
    }
}
