//! Loading a catalog together with its Markdown descriptions.

use std::fs;

use drawaloud_catalog::{apply_descriptions, load_catalog, load_descriptions};
use drawaloud_model::PromptCatalog;

#[test]
fn catalog_with_description_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("prompts.json");
    let descriptions_path = dir.path().join("prompts.md");
    fs::write(
        &catalog_path,
        r#"[
  {"id": "grounding", "label": "Grounding", "allowDraw": false, "snomed": "28770003"},
  {"id": "optimal", "title": "Optimal State", "image": "media/optimal.png"}
]"#,
    )
    .unwrap();
    fs::write(
        &descriptions_path,
        "## grounding\nSit comfortably.\nNotice your breathing.\n",
    )
    .unwrap();

    let catalog = load_catalog(&catalog_path).unwrap();
    let descriptions = load_descriptions(&descriptions_path).unwrap();
    let mut prompts = catalog.into_prompts();
    apply_descriptions(&mut prompts, &descriptions);
    let catalog = PromptCatalog::new(prompts).unwrap();

    let grounding = catalog.by_id("grounding").unwrap();
    assert_eq!(grounding.description, "Sit comfortably. Notice your breathing.");
    assert_eq!(grounding.snomed_code.as_deref(), Some("28770003"));
    let optimal = catalog.by_id("optimal").unwrap();
    assert_eq!(optimal.description, "Optimal State");
    assert_eq!(optimal.image_ref.as_deref(), Some("media/optimal.png"));
}
