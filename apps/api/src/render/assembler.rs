//! Document assembly: resolves the section order, renders each listed section
//! through the registry and wraps the result in the static preamble.
//!
//! Pure and deterministic. The same `CvDocument` always yields byte-identical
//! output, and no input content can make this fail.

use std::collections::HashSet;

use tracing::debug;

use crate::cv::{CvDocument, SectionKey, DEFAULT_SECTION_ORDER};
use crate::render::preamble::{POSTAMBLE, PREAMBLE};
use crate::render::sections::render_section;

/// Section keys to render, in order.
///
/// Unknown keys are skipped and a repeated key keeps only its first position.
/// When no known key is left, the default order applies.
pub fn resolve_order(doc: &CvDocument) -> Vec<SectionKey> {
    let mut seen = HashSet::new();
    let mut order = Vec::with_capacity(doc.section_order.len());
    for raw in &doc.section_order {
        match SectionKey::parse(raw) {
            Some(key) => {
                if seen.insert(key) {
                    order.push(key);
                }
            }
            None if raw.trim().is_empty() => {}
            None => debug!("Skipping unknown section key '{raw}' in section order"),
        }
    }

    if order.is_empty() {
        return DEFAULT_SECTION_ORDER.to_vec();
    }
    order
}

/// Renders a complete LaTeX source file for `doc`.
pub fn render(doc: &CvDocument) -> String {
    let order = resolve_order(doc);

    // Header comes first whenever it is listed.
    let keys = order
        .iter()
        .filter(|k| **k == SectionKey::Header)
        .chain(order.iter().filter(|k| **k != SectionKey::Header));

    let fragments: Vec<String> = keys
        .filter_map(|key| doc.section(*key))
        .filter_map(|data| render_section(data, &doc.options))
        .collect();

    let body = fragments.join("\n\n");
    debug!(
        sections = fragments.len(),
        bytes = body.len(),
        "Rendered CV body"
    );

    let mut out = String::with_capacity(PREAMBLE.len() + body.len() + POSTAMBLE.len() + 2);
    out.push_str(PREAMBLE);
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&body);
        out.push_str("\n\n");
    }
    out.push_str(POSTAMBLE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> CvDocument {
        serde_json::from_value(value).unwrap()
    }

    fn body(latex: &str) -> &str {
        latex
            .strip_prefix(PREAMBLE)
            .and_then(|rest| rest.strip_suffix(POSTAMBLE))
            .unwrap()
    }

    fn scenario() -> CvDocument {
        doc(json!({
            "cv_template": {
                "metadata": {"section_order": ["header", "experience", "interests"]},
                "sections": {
                    "header": {"name": "A. Smith", "title": ""},
                    "interests": {"section_title": "Interests", "items": []},
                    "experience": {
                        "section_title": "Experience",
                        "items": [{
                            "title": "Engineer",
                            "company": "Acme",
                            "dates": {"start": "2020-01-01", "end": "", "is_current": true},
                            "achievements": ["Shipped X"]
                        }]
                    },
                    "education": {"section_title": "Education", "items": []}
                },
                "rendering_rules": {"date_format": "YYYY-MM", "hide_empty_sections": true}
            }
        }))
    }

    #[test]
    fn test_scenario_header_then_experience() {
        let latex = render(&scenario());
        let body = body(&latex);

        let header = body.find("A. Smith").unwrap();
        let experience = body.find("\\section{Experience}").unwrap();
        assert!(header < experience);

        assert!(body.contains("{Acme}{2020-01 -- Present}"));
        assert!(body.contains("{Engineer}{}"));
        assert_eq!(body.matches("\\resumeItem{").count(), 1);
        assert!(body.contains("\\resumeItem{Shipped X}"));
        assert!(!body.contains("Education"));
        assert!(!body.contains("Interests"));
        assert!(!body.contains("\\Large"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let doc = scenario();
        assert_eq!(render(&doc), render(&doc));
    }

    #[test]
    fn test_order_follows_section_order() {
        let doc = doc(json!({
            "metadata": {"section_order": ["skills", "summary"]},
            "sections": {
                "summary": {"content": "Builds things"},
                "skills": {"categories": [{"name": "Lang", "items": ["Rust"]}]}
            }
        }));
        let latex = render(&doc);
        let skills = latex.find("\\section{Skills}").unwrap();
        let summary = latex.find("\\section{Summary}").unwrap();
        assert!(skills < summary);
    }

    #[test]
    fn test_unlisted_sections_are_not_rendered() {
        let doc = doc(json!({
            "metadata": {"section_order": ["summary"]},
            "sections": {
                "summary": {"content": "Builds things"},
                "interests": {"items": ["Chess"]}
            }
        }));
        assert!(!render(&doc).contains("Chess"));
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let doc = doc(json!({
            "metadata": {"section_order": ["hobbies", "summary", "Summary"]},
            "sections": {"summary": {"content": "Builds things"}}
        }));
        let latex = render(&doc);
        assert_eq!(latex.matches("\\section{Summary}").count(), 1);
        assert!(!latex.contains("hobbies"));
    }

    #[test]
    fn test_order_of_only_unknown_keys_matches_empty_order() {
        let sections = json!({"summary": {"content": "Builds things"}});
        let unknown_only = doc(json!({
            "metadata": {"section_order": ["hobbies"]},
            "sections": sections.clone()
        }));
        let empty = doc(json!({
            "metadata": {"section_order": []},
            "sections": sections
        }));
        let latex = render(&unknown_only);
        assert_eq!(latex, render(&empty));
        assert!(latex.contains("Builds things"));
    }

    #[test]
    fn test_empty_order_uses_default_order() {
        let doc = doc(json!({
            "sections": {
                "education": {"items": [{"degree": "BSc", "institution": "Uni"}]},
                "summary": {"content": "Builds things"},
                "references": {"items": [{"name": "J. Doe"}]}
            }
        }));
        let latex = render(&doc);
        let summary = latex.find("\\section{Summary}").unwrap();
        let education = latex.find("\\section{Education}").unwrap();
        assert!(summary < education);
        assert!(!latex.contains("J. Doe"));
    }

    #[test]
    fn test_header_moves_to_top_when_listed_late() {
        let doc = doc(json!({
            "metadata": {"section_order": ["summary", "header"]},
            "sections": {
                "summary": {"content": "Builds things"},
                "header": {"name": "A. Smith"}
            }
        }));
        let latex = render(&doc);
        assert!(latex.find("A. Smith").unwrap() < latex.find("\\section{Summary}").unwrap());
    }

    #[test]
    fn test_empty_sections_shown_as_headings_when_not_hidden() {
        let doc = doc(json!({
            "metadata": {"section_order": ["education"]},
            "sections": {"education": {"section_title": "Education", "items": []}},
            "rendering_rules": {"hide_empty_sections": false}
        }));
        assert!(body(&render(&doc)).contains("\\section{Education}"));
    }

    #[test]
    fn test_empty_document_is_still_a_valid_frame() {
        let latex = render(&CvDocument::default());
        assert!(latex.starts_with("\\documentclass"));
        assert!(latex.ends_with("\\end{document}\n"));
        assert_eq!(body(&latex), "");
    }

    #[test]
    fn test_partial_items_render_without_error() {
        let doc = doc(json!({
            "metadata": {"section_order": ["projects", "education"]},
            "sections": {
                "projects": {"items": [{"title": "Solo"}]},
                "education": {"items": [{"institution": "Uni"}, {}]}
            }
        }));
        let latex = render(&doc);
        assert!(latex.contains("\\projectEntry{Solo}{}"));
        assert_eq!(latex.matches("{Uni}").count(), 1);
    }

    #[test]
    fn test_special_characters_in_every_kind_are_escaped() {
        let doc = doc(json!({
            "metadata": {"section_order": ["header", "summary", "custom"]},
            "sections": {
                "header": {"name": "R&D_Person"},
                "summary": {"content": "100% #1 {best}"},
                "custom": {"items": [{"title": "$5 ~ deal", "description": "a^b"}]}
            }
        }));
        let latex = render(&doc);
        assert!(latex.contains(r"R\&D\_Person"));
        assert!(latex.contains(r"100\% \#1 \{best\}"));
        assert!(latex.contains(r"\$5 \textasciitilde{} deal"));
        assert!(latex.contains(r"a\textasciicircum{}b"));
    }
}
