//! Markdown description overlay.
//!
//! ```text
//! ## grounding
//! Take a breath before you begin.
//!
//! ## landmark1
//! Recall a moment when ...
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use drawaloud_model::Prompt;

use crate::error::{CatalogError, Result};

/// Split Markdown into `prompt id -> description`, joining the non-blank lines
/// of each `## ` section with single spaces.
pub fn parse_descriptions(markdown: &str) -> BTreeMap<String, String> {
    let mut descriptions = BTreeMap::new();
    for section in markdown.split("## ").skip(1) {
        let mut lines = section.lines();
        let Some(key) = lines.next().map(str::trim).filter(|key| !key.is_empty()) else {
            continue;
        };
        let text = lines
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        descriptions.insert(key.to_string(), text);
    }
    descriptions
}

pub fn load_descriptions(path: &Path) -> Result<BTreeMap<String, String>> {
    let text = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    Ok(parse_descriptions(&text))
}

/// Replace prompt descriptions with the Markdown ones where a section exists.
/// Prompts without a section keep their own description, or their title
/// when that is empty too.
pub fn apply_descriptions(prompts: &mut [Prompt], descriptions: &BTreeMap<String, String>) {
    for prompt in prompts {
        match descriptions.get(&prompt.id) {
            Some(text) if !text.is_empty() => prompt.description = text.clone(),
            _ if prompt.description.is_empty() => prompt.description = prompt.title.clone(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKDOWN: &str = "# Prompts\n\n## grounding\nPause.\n\nBreathe slowly.\n\n## optimal\n  Picture the state you wish for.  \n";

    #[test]
    fn parses_sections() {
        let descriptions = parse_descriptions(MARKDOWN);
        assert_eq!(descriptions.len(), 2);
        assert_eq!(descriptions["grounding"], "Pause. Breathe slowly.");
        assert_eq!(descriptions["optimal"], "Picture the state you wish for.");
    }

    #[test]
    fn applies_with_title_fallback() {
        let mut prompts = vec![
            Prompt::new("grounding", "Grounding"),
            Prompt::new("landmark1", "First Landmark"),
            Prompt::new("landmark2", "Second Landmark").with_description("Keep me"),
        ];
        apply_descriptions(&mut prompts, &parse_descriptions(MARKDOWN));
        assert_eq!(prompts[0].description, "Pause. Breathe slowly.");
        assert_eq!(prompts[1].description, "First Landmark");
        assert_eq!(prompts[2].description, "Keep me");
    }
}
