use actix_web::web::Bytes;
use serde::Serialize;

pub const IMAGE_CONTENT_TYPE: &str = "image/png";

const QUALITY_DESCRIPTORS: &str =
    "highly detailed, digital art, vibrant colors, professional quality";

#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationPayload {
    pub prompt: String,
    pub num_steps: u32,
    pub guidance: f32,
}

impl ImageGenerationPayload {
    pub fn new(style: &str, prompt: &str) -> Self {
        Self {
            prompt: build_prompt(style, prompt),
            num_steps: 20,
            guidance: 7.5,
        }
    }
}

pub fn build_prompt(style: &str, prompt: &str) -> String {
    format!("{} artwork of: {}, {}", style, prompt, QUALITY_DESCRIPTORS)
}

/// Raw image body forwarded from the image model.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub status: u16,
    pub bytes: Bytes,
    pub content_type: &'static str,
}
