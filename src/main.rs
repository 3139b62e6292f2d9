// AirWatch API v0.1
use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod data;
mod errors;
mod helpers;
mod routes;
mod services;

use config::AppConfig;
use data::store::FixtureStore;

/// AirWatch API — OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AirWatch API",
        version = "0.1.0",
        description = "Air-quality dashboard API for the Delhi-NCR monitoring network. \
            Serves current AQI readings with health-impact classification, trend and \
            seasonal analysis, pollution-source breakdowns, daily forecasts, and \
            policy-effectiveness summaries from CSV-backed station fixtures.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Overview", description = "Current AQI, stations, sources, and alerts"),
        (name = "Sources", description = "Pollution source analysis"),
        (name = "Forecasts", description = "Daily AQI forecasts"),
        (name = "Policies", description = "Intervention policies and effectiveness"),
    ),
    paths(
        routes::health::health_check,
        routes::overview::current_aqi,
        routes::overview::stations,
        routes::overview::source_breakdown,
        routes::overview::source_distribution,
        routes::overview::dashboard_overview,
        routes::overview::real_time_alerts,
        routes::overview::health_recommendations,
        routes::sources::list_sources,
        routes::sources::impact_distribution,
        routes::forecasts::weekly_forecast,
        routes::policies::list_policies,
        routes::policies::effectiveness_data,
        routes::policies::metrics,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            routes::overview::CurrentAqiResponse,
            routes::overview::StationStatus,
            routes::overview::SourceBreakdownEntry,
            routes::overview::SourceDistributionEntry,
            routes::overview::DashboardOverviewResponse,
            routes::overview::AlertBlock,
            routes::overview::MonitoringCoverage,
            routes::overview::Alert,
            routes::overview::AlertsResponse,
            routes::overview::HealthRecommendation,
            routes::overview::HealthRecommendationsResponse,
            routes::sources::SourceDetail,
            routes::sources::ImpactSlice,
            routes::sources::ImpactSummary,
            routes::sources::ImpactDistributionResponse,
            routes::forecasts::DailyForecast,
            routes::policies::PolicyResponse,
            routes::policies::EffectivenessEntry,
            routes::policies::PolicyMetrics,
            services::dashboard::DashboardData,
            services::dashboard::Pollutants,
            services::dashboard::WeatherConditions,
            services::dashboard::StationInfo,
            services::dashboard::SourceContribution,
            services::dashboard::SourceSummary,
            services::health_impact::HealthImpact,
            services::health_impact::AqiCategory,
            services::health_impact::HealthRisk,
            services::trend::TrendResult,
            services::trend::Trend,
            services::seasonal::SeasonalContext,
            services::seasonal::ImpactLevel,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airwatch_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    let store = FixtureStore::new(&config.data_dir);

    // Log what the fixture directory holds at startup so a misconfigured
    // DATA_DIR is obvious before the first request arrives.
    if !store.is_reachable() {
        tracing::warn!(
            "Fixture directory {} does not exist; all feeds will be empty",
            store.data_dir().display()
        );
    }
    log_fixture_count("AQI readings", store.readings().map(|r| r.len()));
    log_fixture_count("pollution sources", store.pollution_sources().map(|r| r.len()));
    log_fixture_count("forecasts", store.forecasts().map(|r| r.len()));
    log_fixture_count("policies", store.policies().map(|r| r.len()));

    // CORS — read-only API, restrict methods to GET
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    let overview_routes = Router::new()
        .route(
            "/api/v1/overview/current-aqi",
            get(routes::overview::current_aqi),
        )
        .route("/api/v1/overview/stations", get(routes::overview::stations))
        .route(
            "/api/v1/overview/source-breakdown",
            get(routes::overview::source_breakdown),
        )
        .route(
            "/api/v1/overview/source-distribution",
            get(routes::overview::source_distribution),
        )
        .route(
            "/api/v1/overview/dashboard",
            get(routes::overview::dashboard_overview),
        )
        .route(
            "/api/v1/overview/alerts",
            get(routes::overview::real_time_alerts),
        )
        .route(
            "/api/v1/overview/health-recommendations",
            get(routes::overview::health_recommendations),
        );

    let source_routes = Router::new()
        .route("/api/v1/sources", get(routes::sources::list_sources))
        .route(
            "/api/v1/sources/impact-distribution",
            get(routes::sources::impact_distribution),
        );

    let forecast_routes = Router::new().route(
        "/api/v1/forecasts/weekly",
        get(routes::forecasts::weekly_forecast),
    );

    let policy_routes = Router::new()
        .route("/api/v1/policies", get(routes::policies::list_policies))
        .route(
            "/api/v1/policies/effectiveness",
            get(routes::policies::effectiveness_data),
        )
        .route("/api/v1/policies/metrics", get(routes::policies::metrics));

    let health_routes = Router::new().route("/api/v1/health", get(routes::health::health_check));

    let app = Router::new()
        .merge(health_routes)
        .merge(overview_routes)
        .merge(source_routes)
        .merge(forecast_routes)
        .merge(policy_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(store);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}

fn log_fixture_count(name: &str, result: Result<usize, data::store::DataError>) {
    match result {
        Ok(count) => tracing::info!("Loaded {} {} from fixtures", count, name),
        Err(e) => tracing::error!("Failed to read {} fixture: {}", name, e),
    }
}
