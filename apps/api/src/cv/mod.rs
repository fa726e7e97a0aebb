// CV schema model: the typed document the renderer consumes.
// Produced by the structuring step (or a user edit), never mutated during a render.

pub mod lenient;
pub mod model;
pub mod section_key;

pub use model::{
    AchievementItem, CertificationItem, ContactChannel, ContactInfo, CvDocument, DateRange,
    EducationItem, EntryItem, ExperienceItem, HeaderSection, InterestsSection, LanguageItem,
    ListSection, PatentItem, ProjectItem, PublicationItem, ReferenceItem, RenderingOptions,
    SectionData, SkillCategory, SkillsSection, SummarySection, VolunteerItem,
};
pub use section_key::{SectionKey, DEFAULT_SECTION_ORDER};
