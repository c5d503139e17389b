use drawaloud_model::{Prompt, PromptCatalog};

/// The four-stage health-landmark exercise, used when no catalog file is
/// configured.
pub fn builtin_catalog() -> PromptCatalog {
    let prompts = vec![
        Prompt::new("grounding", "Grounding (pause, no drawing)")
            .with_allow_draw(false)
            .with_snomed_code("28770003"),
        Prompt::new("landmark1", "First Health Landmark - Recall Feeling")
            .with_snomed_code("225444004"),
        Prompt::new("landmark2", "Second Health Landmark - Current Feeling")
            .with_snomed_code("289908002"),
        Prompt::new("optimal", "Optimal State - What I Wish For").with_snomed_code("225358003"),
    ];
    let catalog = PromptCatalog::new(prompts);
    debug_assert!(catalog.is_ok(), "builtin catalog ids are unique");
    catalog.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_four_coded_stages() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.iter().all(|prompt| prompt.snomed_code.is_some()));
        assert!(!catalog.get(0).unwrap().allow_draw);
    }
}
