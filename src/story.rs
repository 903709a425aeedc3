//! Paginated story text
//!
//! Sections come from a def-style script: `[section]` headers followed by one
//! text fragment per line. Section keys are case-normalized; `;` starts a
//! comment line. The map is immutable once parsed.

use std::collections::HashMap;

use thiserror::Error;

/// Errors from loading or looking up story text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoryError {
    /// Requested section is not in the script
    #[error("section \"{0}\" not found in the story script")]
    MissingSection(String),

    /// Text fragment before the first `[section]` header
    #[error("line {line}: text outside any [section] header")]
    TextOutsideSection {
        /// 1-based line number in the script
        line: usize,
    },

    /// `[]` header with nothing inside
    #[error("line {line}: empty section name")]
    EmptySectionName {
        /// 1-based line number in the script
        line: usize,
    },

    /// Section exists but holds no text parts
    #[error("section \"{0}\" has no text parts")]
    EmptySection(String),
}

/// All story sections, keyed by lower-cased section name
#[derive(Debug, Clone, Default)]
pub struct StoryText {
    sections: HashMap<String, Vec<String>>,
}

impl StoryText {
    /// Parse a def-style script into section → fragment lists
    pub fn parse(src: &str) -> Result<Self, StoryError> {
        let mut sections: HashMap<String, Vec<String>> = HashMap::new();
        let mut current: Option<String> = None;

        for (index, raw) in src.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = name.trim().to_lowercase();
                if name.is_empty() {
                    return Err(StoryError::EmptySectionName { line: index + 1 });
                }
                sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            match &current {
                Some(name) => sections
                    .entry(name.clone())
                    .or_default()
                    .push(line.to_string()),
                None => return Err(StoryError::TextOutsideSection { line: index + 1 }),
            }
        }

        Ok(Self { sections })
    }

    /// Look up a section's parts; the key is case-normalized
    pub fn section(&self, key: &str) -> Result<&[String], StoryError> {
        let key = key.to_lowercase();
        match self.sections.get(&key) {
            Some(parts) if !parts.is_empty() => Ok(parts),
            Some(_) => Err(StoryError::EmptySection(key)),
            None => Err(StoryError::MissingSection(key)),
        }
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "\
; demo story
[Intro]
Once upon a time.
A hero set out.

[outro]
The dust settled.
";

    #[test]
    fn test_parse_sections_and_order() {
        let story = StoryText::parse(SCRIPT).unwrap();
        assert_eq!(story.section_count(), 2);
        let intro = story.section("intro").unwrap();
        assert_eq!(intro, ["Once upon a time.", "A hero set out."]);
    }

    #[test]
    fn test_keys_are_case_normalized() {
        let story = StoryText::parse(SCRIPT).unwrap();
        assert!(story.section("INTRO").is_ok());
        assert!(story.section("Outro").is_ok());
    }

    #[test]
    fn test_missing_section() {
        let story = StoryText::parse(SCRIPT).unwrap();
        assert_eq!(
            story.section("chapter9"),
            Err(StoryError::MissingSection("chapter9".into()))
        );
    }

    #[test]
    fn test_text_outside_section_rejected() {
        let err = StoryText::parse("stray text\n[intro]\nhi\n").unwrap_err();
        assert_eq!(err, StoryError::TextOutsideSection { line: 1 });
    }

    #[test]
    fn test_empty_section_name_rejected() {
        let err = StoryText::parse("[ ]\nhi\n").unwrap_err();
        assert_eq!(err, StoryError::EmptySectionName { line: 1 });
    }

    #[test]
    fn test_empty_section_lookup() {
        let story = StoryText::parse("[intro]\n").unwrap();
        assert_eq!(
            story.section("intro"),
            Err(StoryError::EmptySection("intro".into()))
        );
    }
}
