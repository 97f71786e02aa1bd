//! Section splitter: finds labeled resume sections ("Experience:", "Skills: …") so each
//! extractor runs over the slice of text it understands.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Summary,
    Experience,
    Skills,
    Education,
    Projects,
    Certifications,
}

/// Heading labels (lower-case) and the section each one opens.
const HEADINGS: &[(&str, SectionKind)] = &[
    ("summary", SectionKind::Summary),
    ("profile", SectionKind::Summary),
    ("objective", SectionKind::Summary),
    ("about", SectionKind::Summary),
    ("experience", SectionKind::Experience),
    ("work experience", SectionKind::Experience),
    ("professional experience", SectionKind::Experience),
    ("employment", SectionKind::Experience),
    ("employment history", SectionKind::Experience),
    ("work history", SectionKind::Experience),
    ("skills", SectionKind::Skills),
    ("technical skills", SectionKind::Skills),
    ("core competencies", SectionKind::Skills),
    ("technologies", SectionKind::Skills),
    ("tools", SectionKind::Skills),
    ("education", SectionKind::Education),
    ("projects", SectionKind::Projects),
    ("personal projects", SectionKind::Projects),
    ("certifications", SectionKind::Certifications),
    ("certificates", SectionKind::Certifications),
];

/// A labeled block of resume text. `body` holds the inline text after the heading's colon
/// followed by every line up to the next heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub body: String,
}

/// Splits resume text into labeled sections. Text before the first heading is not returned.
pub fn split_sections(text: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some((kind, inline)) = parse_heading(trimmed) {
            sections.push(Section {
                kind,
                body: inline.to_string(),
            });
            continue;
        }

        if let Some(current) = sections.last_mut() {
            if trimmed.is_empty() {
                continue;
            }
            if !current.body.is_empty() {
                current.body.push('\n');
            }
            current.body.push_str(trimmed);
        }
    }

    sections
}

/// Concatenated body of every section of `kind`, or `None` when the resume has none.
pub fn section_text(text: &str, kind: SectionKind) -> Option<String> {
    let bodies: Vec<String> = split_sections(text)
        .into_iter()
        .filter(|s| s.kind == kind)
        .map(|s| s.body)
        .collect();

    if bodies.is_empty() {
        None
    } else {
        Some(bodies.join("\n"))
    }
}

/// Recognizes `Heading:` / `Heading: inline text` / bare `HEADING` lines.
fn parse_heading(line: &str) -> Option<(SectionKind, &str)> {
    let (label, inline) = match line.split_once(':') {
        Some((label, rest)) => (label.trim(), rest.trim()),
        None => (line, ""),
    };

    if label.is_empty() {
        return None;
    }

    let normalized = label.to_lowercase();
    HEADINGS
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, kind)| (*kind, inline))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = r#"
        Jane Smith
        Email: jane@example.com
        Experience:
        - Worked at Stripe as a Backend Engineer from 2019 to 2022

        - Worked at Shopify as an Intern from 2018 to 2019
        Skills: Rust, Go, PostgreSQL
        EDUCATION
        B.Sc. Computer Science, 2018
    "#;

    #[test]
    fn test_preamble_is_not_a_section() {
        let sections = split_sections(RESUME);
        assert_eq!(sections[0].kind, SectionKind::Experience);
        assert!(sections.iter().all(|s| !s.body.contains("Jane Smith")));
    }

    #[test]
    fn test_multiline_section_body_skips_blank_lines() {
        let experience = section_text(RESUME, SectionKind::Experience).unwrap();
        assert_eq!(
            experience,
            "- Worked at Stripe as a Backend Engineer from 2019 to 2022\n\
             - Worked at Shopify as an Intern from 2018 to 2019"
        );
    }

    #[test]
    fn test_inline_section_body() {
        let skills = section_text(RESUME, SectionKind::Skills).unwrap();
        assert_eq!(skills, "Rust, Go, PostgreSQL");
    }

    #[test]
    fn test_bare_uppercase_heading() {
        let education = section_text(RESUME, SectionKind::Education).unwrap();
        assert!(education.contains("Computer Science"));
    }

    #[test]
    fn test_contact_labels_are_not_headings() {
        assert!(parse_heading("Email: jane@example.com").is_none());
        assert!(parse_heading("Phone: +1 555 0100").is_none());
    }

    #[test]
    fn test_missing_section_is_none() {
        assert!(section_text(RESUME, SectionKind::Projects).is_none());
        assert!(split_sections("").is_empty());
    }

    #[test]
    fn test_repeated_sections_are_concatenated() {
        let text = "Skills: Rust\nProjects: CLI tool\nTechnical Skills: Kafka";
        assert_eq!(
            section_text(text, SectionKind::Skills).unwrap(),
            "Rust\nKafka"
        );
    }
}
