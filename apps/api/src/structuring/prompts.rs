// Prompts for turning extracted CV text into the sectioned JSON document.

pub const STRUCTURE_CV_SYSTEM: &str = "You are a precise CV parser. \
    You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Never invent facts that are not present in the CV text.";

/// Skeleton the model fills in. Field names here are the ones the decoder reads.
const CV_TEMPLATE_SKELETON: &str = r#"{
  "cv_template": {
    "metadata": {
      "section_order": ["header", "summary", "experience", "education", "skills", "projects", "certifications", "languages", "volunteer", "achievements", "publications", "interests", "references", "patents", "research", "custom"]
    },
    "sections": {
      "header": {
        "name": "Full Name",
        "title": "Professional Title",
        "contact_info": {
          "email": {"value": "Email", "link": "mailto:Email"},
          "phone": {"value": "Phone", "link": "tel:Phone"},
          "portfolio": {"value": "Portfolio URL", "link": "Portfolio URL"},
          "linkedin": {"value": "LinkedIn handle or URL", "link": "LinkedIn URL"},
          "github": {"value": "GitHub handle or URL", "link": "GitHub URL"},
          "location": {"value": "City, Country"}
        }
      },
      "summary": {"section_title": "Summary", "content": "Professional summary"},
      "experience": {
        "section_title": "Professional Experience",
        "items": [{
          "title": "Job Title", "company": "Company", "url": "Company URL", "location": "City, Country",
          "dates": {"start": "YYYY-MM-DD", "end": "YYYY-MM-DD", "is_current": false},
          "description": "Optional one-line role description",
          "achievements": ["Achievement"], "technologies": ["Technology"]
        }]
      },
      "education": {
        "section_title": "Education",
        "items": [{
          "degree": "Degree", "institution": "Institution", "url": "Institution URL", "location": "City, Country",
          "dates": {"start": "YYYY-MM-DD", "end": "YYYY-MM-DD"}, "gpa": "GPA", "honors": ["Honor"]
        }]
      },
      "skills": {
        "section_title": "Skills",
        "categories": [{"name": "Category", "items": ["Skill"], "description": "", "proficiency": "expert"}]
      },
      "projects": {
        "section_title": "Projects",
        "items": [{
          "title": "Project", "url": "Project URL", "description": "Description",
          "dates": {"start": "YYYY-MM-DD", "end": "YYYY-MM-DD"},
          "technologies": ["Technology"], "key_contributions": ["Contribution"]
        }]
      },
      "certifications": {
        "section_title": "Certifications",
        "items": [{"title": "Certification", "institution": "Issuer", "url": "URL", "date": {"start": "YYYY-MM-DD", "end": ""}}]
      },
      "languages": {"section_title": "Languages", "items": [{"name": "Language", "proficiency": "Level"}]},
      "volunteer": {
        "section_title": "Volunteer Experience",
        "items": [{
          "title": "Role", "organization": "Organization", "location": "City, Country",
          "dates": {"start": "YYYY-MM-DD", "end": "YYYY-MM-DD"}, "achievements": ["Achievement"]
        }]
      },
      "achievements": {
        "section_title": "Awards & Achievements",
        "items": [{"title": "Award", "organization": "Organization", "description": "Description", "date": "YYYY-MM-DD"}]
      },
      "publications": {
        "section_title": "Publications",
        "items": [{"title": "Title", "publisher": "Venue", "url": "URL", "date": "YYYY-MM-DD"}]
      },
      "interests": {"section_title": "Interests", "items": ["Interest"]},
      "references": {
        "section_title": "References",
        "items": [{"name": "Name", "title": "Title", "company": "Company", "email": "Email", "phone": "Phone"}]
      },
      "patents": {
        "section_title": "Patents",
        "items": [{"title": "Patent", "number": "Number", "url": "URL", "date": "YYYY-MM-DD"}]
      },
      "research": {
        "section_title": "Research",
        "items": [{"title": "Title", "description": "Description", "url": "URL", "date": "YYYY-MM-DD"}]
      },
      "custom": {
        "section_title": "Additional Information",
        "items": [{"title": "Title", "description": "Description", "url": "URL", "date": "YYYY-MM-DD"}]
      }
    },
    "rendering_rules": {
      "date_format": "MMM YYYY",
      "hide_empty_sections": true,
      "max_items_per_section": 0,
      "truncate_descriptions_at": 0
    }
  }
}"#;

/// Builds the user prompt for one CV.
pub fn structure_cv_prompt(cv_text: &str) -> String {
    format!(
        "Fill the JSON template below using only the CV text that follows it.\n\
         \n\
         Rules:\n\
         - Keep every key exactly as written; do not add or rename keys.\n\
         - Leave a field as an empty string or empty list when the CV does not mention it.\n\
         - Write dates as YYYY-MM-DD (use 01 for an unknown day). Mark ongoing roles with is_current: true.\n\
         - Write section_title values in the language of the CV.\n\
         - Put anything that fits no standard section into \"custom\" with a descriptive section_title.\n\
         - Keep section_order as given unless the CV clearly orders its sections differently.\n\
         \n\
         TEMPLATE:\n{CV_TEMPLATE_SKELETON}\n\
         \n\
         CV TEXT:\n{cv_text}"
    )
}
