//! Section renderer registry.
//!
//! One pure function per section kind, selected by an exhaustive match on
//! [`SectionData`]. Each renderer:
//! 1. drops items with no meaningful field, keeping input order,
//! 2. caps the list at `max_items_per_section`,
//! 3. escapes every leaf field before composing it with markup separators,
//! 4. returns `None` for an empty section when `hide_empty_sections` is set,
//!    or a bare heading when it is not.
//!
//! Missing optional fields render as empty macro arguments; they never drop
//! the item.

use crate::cv::{
    AchievementItem, CertificationItem, ContactChannel, EducationItem, EntryItem, ExperienceItem,
    HeaderSection, InterestsSection, LanguageItem, ListSection, PatentItem, ProjectItem,
    PublicationItem, ReferenceItem, RenderingOptions, SectionData, SectionKey, SkillCategory,
    SkillsSection, SummarySection, VolunteerItem,
};
use crate::render::dates::format_range;
use crate::render::escape::{escape_text, escape_truncated, escape_url};

/// Separator between tags in a single line (skills, interests).
pub const TAG_SEPARATOR: &str = " $|$ ";

/// Renders one section. `None` means "emit nothing for this section".
pub fn render_section(data: &SectionData, options: &RenderingOptions) -> Option<String> {
    match data {
        SectionData::Header(header) => render_header(header),
        SectionData::Summary(summary) => render_summary(summary, options),
        SectionData::Experience(s) => render_list(SectionKey::Experience, s, options, experience_item),
        SectionData::Education(s) => render_list(SectionKey::Education, s, options, education_item),
        SectionData::Skills(skills) => render_skills(skills, options),
        SectionData::Projects(s) => render_list(SectionKey::Projects, s, options, project_item),
        SectionData::Certifications(s) => {
            render_list(SectionKey::Certifications, s, options, certification_item)
        }
        SectionData::Languages(s) => render_list(SectionKey::Languages, s, options, language_item),
        SectionData::Volunteer(s) => render_list(SectionKey::Volunteer, s, options, volunteer_item),
        SectionData::Achievements(s) => {
            render_list(SectionKey::Achievements, s, options, achievement_item)
        }
        SectionData::Publications(s) => {
            render_list(SectionKey::Publications, s, options, publication_item)
        }
        SectionData::Interests(interests) => render_interests(interests, options),
        SectionData::References(s) => render_list(SectionKey::References, s, options, reference_item),
        SectionData::Patents(s) => render_list(SectionKey::Patents, s, options, patent_item),
        SectionData::Research(s) => render_list(SectionKey::Research, s, options, research_item),
        SectionData::Custom(s) => render_list(SectionKey::Custom, s, options, custom_item),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Emptiness
// ────────────────────────────────────────────────────────────────────────────

fn is_filled(text: &str) -> bool {
    !text.trim().is_empty()
}

fn any_filled(texts: &[&str]) -> bool {
    texts.iter().any(|t| is_filled(t))
}

fn any_entry(lists: &[&[String]]) -> bool {
    lists.iter().any(|list| list.iter().any(|e| is_filled(e)))
}

/// An item is kept when at least one of its fields carries text.
trait Meaningful {
    fn has_content(&self) -> bool;
}

impl Meaningful for ExperienceItem {
    fn has_content(&self) -> bool {
        any_filled(&[&self.title, &self.company, &self.location, &self.url, &self.description])
            || !self.dates.is_blank()
            || any_entry(&[&self.achievements, &self.technologies])
    }
}

impl Meaningful for EducationItem {
    fn has_content(&self) -> bool {
        any_filled(&[&self.degree, &self.institution, &self.location, &self.url, &self.gpa])
            || !self.dates.is_blank()
            || any_entry(&[&self.honors])
    }
}

impl Meaningful for ProjectItem {
    fn has_content(&self) -> bool {
        any_filled(&[&self.title, &self.url, &self.description])
            || !self.dates.is_blank()
            || any_entry(&[&self.technologies, &self.key_contributions])
    }
}

impl Meaningful for CertificationItem {
    fn has_content(&self) -> bool {
        any_filled(&[&self.title, &self.institution, &self.url]) || !self.date.is_blank()
    }
}

impl Meaningful for LanguageItem {
    fn has_content(&self) -> bool {
        any_filled(&[&self.name, &self.proficiency])
    }
}

impl Meaningful for VolunteerItem {
    fn has_content(&self) -> bool {
        any_filled(&[&self.title, &self.organization, &self.location, &self.description])
            || !self.dates.is_blank()
            || any_entry(&[&self.achievements])
    }
}

impl Meaningful for AchievementItem {
    fn has_content(&self) -> bool {
        any_filled(&[&self.title, &self.organization, &self.description]) || !self.date.is_blank()
    }
}

impl Meaningful for PublicationItem {
    fn has_content(&self) -> bool {
        any_filled(&[&self.title, &self.publisher, &self.url]) || !self.date.is_blank()
    }
}

impl Meaningful for ReferenceItem {
    fn has_content(&self) -> bool {
        any_filled(&[&self.name, &self.title, &self.company, &self.email, &self.phone])
    }
}

impl Meaningful for PatentItem {
    fn has_content(&self) -> bool {
        any_filled(&[&self.title, &self.number, &self.url]) || !self.date.is_blank()
    }
}

impl Meaningful for EntryItem {
    fn has_content(&self) -> bool {
        any_filled(&[&self.title, &self.description, &self.url]) || !self.date.is_blank()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Markup helpers
// ────────────────────────────────────────────────────────────────────────────

fn section_title(raw: &str, key: SectionKey) -> String {
    if is_filled(raw) {
        escape_text(raw.trim())
    } else {
        escape_text(key.default_title())
    }
}

fn heading(title: &str) -> String {
    format!("\\section{{{title}}}")
}

fn wrap_section(title: &str, body: &str) -> String {
    format!(
        "{}\n  \\resumeSubHeadingListStart\n{body}\n  \\resumeSubHeadingListEnd",
        heading(title)
    )
}

/// Heading-only output for an empty section, or nothing when empties are hidden.
fn empty_section(title: &str, options: &RenderingOptions) -> Option<String> {
    if options.hide_empty_sections {
        None
    } else {
        Some(heading(title))
    }
}

fn item_cap(options: &RenderingOptions) -> usize {
    options.max_items_per_section.unwrap_or(usize::MAX)
}

/// `\resumeSubheading` with four already-escaped arguments.
fn subheading(top_left: &str, top_right: &str, bottom_left: &str, bottom_right: &str) -> String {
    format!(
        "    \\resumeSubheading\n      {{{top_left}}}{{{top_right}}}\n      {{{bottom_left}}}{{{bottom_right}}}"
    )
}

/// Wraps escaped text in a hyperlink when a target is present. Without
/// visible text the link shows the URL itself, minus its scheme.
fn linked(escaped_text: &str, url: &str) -> String {
    if !is_filled(url) {
        return escaped_text.to_string();
    }
    if escaped_text.is_empty() {
        return format!(
            "\\href{{{}}}{{{}}}",
            escape_url(url),
            escape_text(strip_scheme(url))
        );
    }
    format!("\\href{{{}}}{{{escaped_text}}}", escape_url(url))
}

/// Escaped, non-blank entries in input order.
fn escaped_entries(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| is_filled(e))
        .map(|e| escape_text(e.trim()))
        .collect()
}

/// Bullet block from escaped bullet bodies. Empty input yields no block.
fn bullet_block(bullets: &[String]) -> Option<String> {
    if bullets.is_empty() {
        return None;
    }
    let items: Vec<String> = bullets
        .iter()
        .map(|b| format!("        \\resumeItem{{{b}}}"))
        .collect();
    Some(format!(
        "      \\resumeItemListStart\n{}\n      \\resumeItemListEnd",
        items.join("\n")
    ))
}

fn with_bullets(entry: String, bullets: &[String]) -> String {
    match bullet_block(bullets) {
        Some(block) => format!("{entry}\n{block}"),
        None => entry,
    }
}

fn render_list<T: Meaningful>(
    key: SectionKey,
    section: &ListSection<T>,
    options: &RenderingOptions,
    render_item: fn(&T, &RenderingOptions) -> String,
) -> Option<String> {
    let title = section_title(&section.section_title, key);
    let entries: Vec<String> = section
        .items
        .iter()
        .filter(|item| item.has_content())
        .take(item_cap(options))
        .map(|item| render_item(item, options))
        .collect();

    if entries.is_empty() {
        return empty_section(&title, options);
    }
    Some(wrap_section(&title, &entries.join("\n\n")))
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

fn has_scheme(url: &str) -> bool {
    url.contains("://") || url.starts_with("mailto:") || url.starts_with("tel:")
}

fn with_https(url: &str) -> String {
    let url = url.trim();
    if has_scheme(url) {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn strip_scheme(url: &str) -> &str {
    let url = url.trim();
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

fn filled_channel(channel: &Option<ContactChannel>) -> Option<&ContactChannel> {
    channel.as_ref().filter(|c| is_filled(&c.value))
}

fn contact_link(target: &str, icon: &str, shown: &str) -> String {
    format!(
        "\\href{{{}}}{{\\raisebox{{-0.2\\height}}{icon}\\ \\underline{{{}}}}}",
        escape_url(target),
        escape_text(shown)
    )
}

fn render_contacts(header: &HeaderSection) -> Vec<String> {
    let info = &header.contact_info;
    let mut parts = Vec::new();

    if let Some(phone) = filled_channel(&info.phone) {
        let target = if is_filled(&phone.link) {
            phone.link.trim().to_string()
        } else {
            format!("tel:{}", phone.value.split_whitespace().collect::<String>())
        };
        parts.push(format!(
            "\\href{{{}}}{{\\raisebox{{-0.1\\height}}\\faPhone\\ {}}}",
            escape_url(&target),
            escape_text(phone.value.trim())
        ));
    }
    if let Some(email) = filled_channel(&info.email) {
        let target = if is_filled(&email.link) {
            email.link.trim().to_string()
        } else {
            format!("mailto:{}", email.value.trim())
        };
        parts.push(contact_link(&target, "\\faEnvelope", email.value.trim()));
    }
    if let Some(linkedin) = filled_channel(&info.linkedin) {
        let target = if is_filled(&linkedin.link) {
            with_https(&linkedin.link)
        } else {
            with_https(&linkedin.value)
        };
        parts.push(contact_link(&target, "\\faLinkedin", linkedin.value.trim()));
    }
    if let Some(portfolio) = filled_channel(&info.portfolio) {
        let target = if is_filled(&portfolio.link) {
            with_https(&portfolio.link)
        } else {
            with_https(&portfolio.value)
        };
        parts.push(contact_link(&target, "\\faGlobe", strip_scheme(&portfolio.value)));
    }
    if let Some(github) = filled_channel(&info.github) {
        let target = if is_filled(&github.link) {
            with_https(&github.link)
        } else {
            with_https(&github.value)
        };
        parts.push(contact_link(&target, "\\faGithub", github.value.trim()));
    }

    parts
}

/// Title block. Never carries a section heading; empty when name, title,
/// location and every contact are blank.
fn render_header(header: &HeaderSection) -> Option<String> {
    let contacts = render_contacts(header);
    if !any_filled(&[&header.name, &header.title, header.resolved_location()])
        && contacts.is_empty()
    {
        return None;
    }

    let mut lines = Vec::new();
    if is_filled(&header.name) {
        lines.push(format!(
            "{{\\Huge \\scshape {}}}",
            escape_text(header.name.trim())
        ));
    }
    if is_filled(&header.title) {
        lines.push(format!("{{\\Large {}}}", escape_text(header.title.trim())));
    }
    let location = header.resolved_location();
    if is_filled(location) {
        lines.push(escape_text(location.trim()));
    }
    if !contacts.is_empty() {
        lines.push(format!("\\small {}", contacts.join(" ~ ")));
    }

    Some(format!(
        "\\begin{{center}}\n    {}\n    \\vspace{{-8pt}}\n\\end{{center}}",
        lines.join(" \\\\ \\vspace{1pt}\n    ")
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Paragraph and tag sections
// ────────────────────────────────────────────────────────────────────────────

fn render_summary(summary: &SummarySection, options: &RenderingOptions) -> Option<String> {
    let title = section_title(&summary.section_title, SectionKey::Summary);
    if !is_filled(&summary.content) {
        return empty_section(&title, options);
    }
    let content = escape_truncated(&summary.content, options.truncate_descriptions_at);
    Some(wrap_section(
        &title,
        &format!("    \\resumeParagraph{{{content}}}"),
    ))
}

fn render_interests(interests: &InterestsSection, options: &RenderingOptions) -> Option<String> {
    let title = section_title(&interests.section_title, SectionKey::Interests);
    let entries: Vec<String> = escaped_entries(&interests.items)
        .into_iter()
        .take(item_cap(options))
        .collect();
    if entries.is_empty() {
        return empty_section(&title, options);
    }
    Some(wrap_section(
        &title,
        &format!("    \\resumeParagraph{{{}}}", entries.join(TAG_SEPARATOR)),
    ))
}

fn skill_category(category: &SkillCategory) -> Option<String> {
    let skills = escaped_entries(&category.items);
    if skills.is_empty() {
        return None;
    }
    Some(subheading(
        &escape_text(category.name.trim()),
        &escape_text(category.proficiency.trim()),
        &skills.join(TAG_SEPARATOR),
        "",
    ))
}

fn render_skills(skills: &SkillsSection, options: &RenderingOptions) -> Option<String> {
    let title = section_title(&skills.section_title, SectionKey::Skills);
    let entries: Vec<String> = skills
        .categories
        .iter()
        .filter_map(skill_category)
        .take(item_cap(options))
        .collect();
    if entries.is_empty() {
        return empty_section(&title, options);
    }
    Some(wrap_section(&title, &entries.join("\n")))
}

// ────────────────────────────────────────────────────────────────────────────
// Item renderers
// ────────────────────────────────────────────────────────────────────────────

fn experience_item(item: &ExperienceItem, options: &RenderingOptions) -> String {
    let entry = subheading(
        &linked(&escape_text(item.company.trim()), &item.url),
        &format_range(&item.dates, &options.date_format),
        &escape_text(item.title.trim()),
        &escape_text(item.location.trim()),
    );

    let mut bullets = Vec::new();
    if is_filled(&item.description) {
        bullets.push(escape_truncated(&item.description, options.truncate_descriptions_at));
    }
    bullets.extend(escaped_entries(&item.achievements));
    bullets.extend(escaped_entries(&item.technologies));
    with_bullets(entry, &bullets)
}

fn education_item(item: &EducationItem, options: &RenderingOptions) -> String {
    let mut degree = escape_text(item.degree.trim());
    if is_filled(&item.gpa) {
        let gpa = format!("GPA: {}", escape_text(item.gpa.trim()));
        degree = if degree.is_empty() {
            gpa
        } else {
            format!("{degree}, {gpa}")
        };
    }

    let entry = subheading(
        &linked(&escape_text(item.institution.trim()), &item.url),
        &format_range(&item.dates, &options.date_format),
        &degree,
        &escape_text(item.location.trim()),
    );
    with_bullets(entry, &escaped_entries(&item.honors))
}

fn project_item(item: &ProjectItem, options: &RenderingOptions) -> String {
    let mut out = format!(
        "    \\projectEntry{{{}}}{{{}}}",
        linked(&escape_text(item.title.trim()), &item.url),
        format_range(&item.dates, &options.date_format)
    );
    if is_filled(&item.description) {
        out.push_str(&format!(
            "\n    \\resumeParagraph{{{}}}",
            escape_truncated(&item.description, options.truncate_descriptions_at)
        ));
    }

    let mut bullets = escaped_entries(&item.key_contributions);
    bullets.extend(escaped_entries(&item.technologies));
    with_bullets(out, &bullets)
}

fn certification_item(item: &CertificationItem, options: &RenderingOptions) -> String {
    subheading(
        &linked(&escape_text(item.title.trim()), &item.url),
        &format_range(&item.date, &options.date_format),
        &escape_text(item.institution.trim()),
        "",
    )
}

fn language_item(item: &LanguageItem, _options: &RenderingOptions) -> String {
    subheading(
        &escape_text(item.name.trim()),
        "",
        &escape_text(item.proficiency.trim()),
        "",
    )
}

fn volunteer_item(item: &VolunteerItem, options: &RenderingOptions) -> String {
    let entry = subheading(
        &escape_text(item.organization.trim()),
        &format_range(&item.dates, &options.date_format),
        &escape_text(item.title.trim()),
        &escape_text(item.location.trim()),
    );

    let mut bullets = Vec::new();
    if is_filled(&item.description) {
        bullets.push(escape_truncated(&item.description, options.truncate_descriptions_at));
    }
    bullets.extend(escaped_entries(&item.achievements));
    with_bullets(entry, &bullets)
}

fn achievement_item(item: &AchievementItem, options: &RenderingOptions) -> String {
    let (headline, issuer) = if is_filled(&item.title) {
        (item.title.trim(), item.organization.trim())
    } else {
        (item.organization.trim(), "")
    };
    subheading(
        &escape_text(headline),
        &format_range(&item.date, &options.date_format),
        &escape_truncated(&item.description, options.truncate_descriptions_at),
        &escape_text(issuer),
    )
}

fn publication_item(item: &PublicationItem, options: &RenderingOptions) -> String {
    subheading(
        &linked(&escape_text(item.title.trim()), &item.url),
        &format_range(&item.date, &options.date_format),
        &escape_text(item.publisher.trim()),
        "",
    )
}

fn reference_item(item: &ReferenceItem, _options: &RenderingOptions) -> String {
    let affiliation: Vec<String> = [&item.title, &item.company]
        .into_iter()
        .filter(|s| is_filled(s))
        .map(|s| escape_text(s.trim()))
        .collect();
    subheading(
        &escape_text(item.name.trim()),
        &escape_text(item.email.trim()),
        &affiliation.join(", "),
        &escape_text(item.phone.trim()),
    )
}

fn patent_item(item: &PatentItem, options: &RenderingOptions) -> String {
    let number = if is_filled(&item.number) {
        format!("Patent Number: {}", escape_text(item.number.trim()))
    } else {
        String::new()
    };
    subheading(
        &linked(&escape_text(item.title.trim()), &item.url),
        &format_range(&item.date, &options.date_format),
        &number,
        "",
    )
}

fn research_item(item: &EntryItem, options: &RenderingOptions) -> String {
    let mut parts = Vec::new();
    let date = format_range(&item.date, &options.date_format);
    if is_filled(&item.title) || !date.is_empty() {
        parts.push(format!(
            "    \\projectEntry{{{}}}{{{date}}}",
            linked(&escape_text(item.title.trim()), &item.url)
        ));
    }
    if is_filled(&item.description) {
        parts.push(format!(
            "    \\resumeParagraph{{{}}}",
            escape_truncated(&item.description, options.truncate_descriptions_at)
        ));
    }
    if parts.is_empty() {
        // Only a URL: show it as the entry.
        parts.push(format!(
            "    \\projectEntry{{{}}}{{}}",
            linked("", &item.url)
        ));
    }
    parts.join("\n")
}

fn custom_item(item: &EntryItem, options: &RenderingOptions) -> String {
    subheading(
        &linked(&escape_text(item.title.trim()), &item.url),
        &format_range(&item.date, &options.date_format),
        &escape_truncated(&item.description, options.truncate_descriptions_at),
        "",
    )
}
