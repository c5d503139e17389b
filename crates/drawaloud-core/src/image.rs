/// A rasterized drawing offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageImage {
    pub file_name: String,
    pub png: Vec<u8>,
}

/// Download name for the drawing of the prompt at `index` (zero-based).
pub fn stage_image_name(index: usize) -> String {
    format!("stage-{}.png", index + 1)
}
