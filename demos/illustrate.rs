use illustra::{AiClient, CancellationToken, ClientConfig};
use std::{env, fs};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    illustra::logger::init()?;

    let page = env::args().nth(1).unwrap_or_else(|| {
        "The castle stood on a cliff above a restless sea, its towers lost in cloud.".to_string()
    });
    let style = env::var("ILLUSTRATION_STYLE").ok();

    let client = AiClient::new(ClientConfig::from_env())?;
    log::info!("Using gateway at {}", client.endpoint());

    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let summary = client.summarize_text(&page, &token).await;
    log::info!("📝 Summary: {}", summary);

    let illustration = client.process_page(&page, style.as_deref(), &token).await?;
    let filename = format!("page_{}.png", chrono::Utc::now().timestamp());
    fs::write(&filename, illustration.image_url.to_bytes()?)?;
    log::info!("💾 Illustration saved to: {}", filename);

    Ok(())
}
