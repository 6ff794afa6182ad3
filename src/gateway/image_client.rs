use crate::{
    config::{Credentials, ProviderEndpoints},
    error::Result,
    logger::Timer,
    models::{ImageGenerationPayload, ImagePayload, IMAGE_CONTENT_TYPE},
};
use reqwest::Client;

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    endpoints: ProviderEndpoints,
}

impl ImageClient {
    pub fn new(client: Client, endpoints: &ProviderEndpoints) -> Self {
        Self {
            client,
            endpoints: endpoints.clone(),
        }
    }

    /// The upstream body is forwarded untouched, error bodies included.
    pub async fn generate(
        &self,
        style: &str,
        prompt: &str,
        credentials: &Credentials,
    ) -> Result<ImagePayload> {
        let payload = ImageGenerationPayload::new(style, prompt);
        log::info!("Generating illustration in style: {}", style);
        log::debug!("Image prompt: {}", payload.prompt);

        let _timer = Timer::new("image generation");
        let response = self
            .client
            .post(self.endpoints.image_url(&credentials.account_id))
            .bearer_auth(&credentials.api_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        if status >= 400 {
            log::warn!("Image model answered with status {}", status);
        }

        Ok(ImagePayload {
            status,
            bytes,
            content_type: IMAGE_CONTENT_TYPE,
        })
    }
}
