//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use geo_ingest::Trace;
#[cfg(debug_assertions)]
use geo_ingest::doc::ApiDoc;
use geo_ingest::domain::FeatureService;
use geo_ingest::inbound::http::features;
use geo_ingest::inbound::http::health::{HealthState, healthz, readyz};
use geo_ingest::inbound::http::state::HttpState;
use geo_ingest::outbound::persistence::DieselFeatureRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build handler state backed by the PostGIS repository.
fn build_http_state(config: &ServerConfig) -> HttpState {
    let repository = Arc::new(DieselFeatureRepository::new(config.db_pool.clone()));
    let service = Arc::new(FeatureService::with_buffer_radius(
        repository,
        config.buffer_radius,
    ));
    HttpState::from_service(service)
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(features::json_config())
        .app_data(features::query_config())
        .wrap(Trace)
        .configure(features::configure)
        .service(healthz)
        .service(readyz);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Marks `health_state` ready once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(config.bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use geo_ingest::outbound::persistence::{DbPool, PoolConfig};
    use serde_json::{Value, json};

    use super::*;

    async fn unreachable_pool() -> DbPool {
        let config = PoolConfig::new("postgres://postgres@127.0.0.1:1/geo_ingest")
            .with_max_size(1)
            .with_connection_timeout(Duration::from_millis(300));
        DbPool::new(config).await.expect("pool builds lazily")
    }

    #[actix_web::test]
    async fn create_reports_unreachable_store_instead_of_inventing_ids() {
        let config = ServerConfig::new(
            SocketAddr::from(([127, 0, 0, 1], 0)),
            unreachable_pool().await,
        );
        let app = actix_test::init_service(build_app(
            web::Data::new(HealthState::new()),
            web::Data::new(build_http_state(&config)),
        ))
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/features")
            .set_json(json!({"name": "Site A", "lat": 45.5017, "lon": -73.5673}))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "service_unavailable");
        assert!(body.get("id").is_none());
    }
}
