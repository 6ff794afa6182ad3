use actix_web::{middleware, web, App, HttpServer};
use illustra::{gateway::handler, logger, Gateway, GatewayConfig};

const MAX_BODY_BYTES: usize = 1 << 20;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(logger::LoggerConfig::from_env())?;
    if env_loaded {
        log::info!("✅ .env file loaded");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = GatewayConfig::from_env();
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), &config);
    logger::log_config_info(&config);

    let bind = config.bind_address();
    let path = config.endpoint_path.clone();
    let gateway = match Gateway::new(config) {
        Ok(gateway) => web::Data::new(gateway),
        Err(e) => {
            log::error!("❌ Failed to initialize gateway: {}", e);
            return Err(e.into());
        }
    };

    HttpServer::new(move || {
        App::new()
            .app_data(gateway.clone())
            .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
            .wrap(middleware::Logger::new("%r %s %b %Dms"))
            .service(handler::resource(&path))
    })
    .bind(bind)?
    .run()
    .await?;

    log::info!("👋 Gateway stopped");
    Ok(())
}
