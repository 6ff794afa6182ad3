use crate::{
    error::IllustraError,
    gateway::{Gateway, GatewayResponse},
};
use actix_web::{
    http::{header, StatusCode},
    web, HttpResponse, Resource,
};
use uuid::Uuid;

/// POST-only resource; every other method answers 405.
pub fn resource(path: &str) -> Resource {
    web::resource(path)
        .route(web::post().to(illustrate))
        .default_service(web::to(method_not_allowed))
}

async fn method_not_allowed() -> Result<HttpResponse, IllustraError> {
    Err(IllustraError::MethodNotAllowed)
}

async fn illustrate(
    gateway: web::Data<Gateway>,
    body: web::Bytes,
) -> Result<HttpResponse, IllustraError> {
    let request_id = Uuid::new_v4();
    log::debug!("[req:{}] {} byte request body", request_id, body.len());

    match gateway.handle(&body).await {
        Ok(response) => {
            log::info!(
                "[req:{}] answered with status {}",
                request_id,
                response.status()
            );
            Ok(into_http(response))
        }
        Err(e) => {
            match &e {
                IllustraError::BadRequest(msg) => log::warn!("[req:{}] {}", request_id, msg),
                other => log::error!("[req:{}] request failed: {}", request_id, other),
            }
            Err(e)
        }
    }
}

fn into_http(response: GatewayResponse) -> HttpResponse {
    let status = StatusCode::from_u16(response.status()).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut builder = HttpResponse::build(status);
    builder.insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"));

    match response {
        GatewayResponse::Summary(reply) => builder.json(reply.envelope),
        GatewayResponse::Image(image) => builder
            .insert_header((header::CONTENT_TYPE, image.content_type))
            .body(image.bytes),
    }
}
