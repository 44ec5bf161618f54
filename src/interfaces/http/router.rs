//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AdminService, AuthSessionService};
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{
    auth_middleware, require_roles, AuthState, ADMIN_MANAGERS, SUPER_ADMIN_ONLY,
};
use crate::interfaces::http::modules::{admins, auth, health, metrics, request_id};
use crate::shared::SharedClock;

/// Everything the router needs to serve requests
#[derive(Clone)]
pub struct ApiContext {
    pub sessions: Arc<AuthSessionService>,
    pub admins: Arc<AdminService>,
    pub clock: SharedClock,
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
    /// `None` when no Prometheus recorder is installed; `/metrics` is then
    /// not routed.
    pub metrics: Option<PrometheusHandle>,
    /// Empty allows any origin
    pub cors_origins: Vec<String>,
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::refresh_token,
        auth::logout,
        auth::get_current_user,
        // Admins
        admins::list_admins,
        admins::create_admin,
        admins::update_admin,
        admins::delete_admin,
        admins::activate_admin,
        admins::deactivate_admin,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RefreshRequest,
            auth::RefreshTokenRequest,
            auth::RefreshTokenResponse,
            auth::LogoutResponse,
            auth::AdminUserDto,
            admins::CreateAdminRequest,
            admins::UpdateAdminRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Admin sessions: login, access token refresh, logout"),
        (name = "Admins", description = "Admin account management"),
    ),
    info(
        title = "Billboard Advertising Management API",
        version = "1.0.0",
        description = "Administrative REST API for billboard inventory, clients and bookings",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(parsed))
}

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let middleware_state = AuthState {
        issuer: ctx.sessions.issuer().clone(),
        clock: ctx.clock.clone(),
    };

    let auth_state = auth::AuthHandlerState {
        sessions: ctx.sessions.clone(),
    };

    // Auth routes: login / refresh / logout are public, /me is not
    let auth_public_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/refresh-token", post(auth::refresh_token))
        .route("/logout", post(auth::logout));
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ));
    let auth_routes = auth_public_routes
        .merge(auth_protected_routes)
        .with_state(auth_state);

    // Admin routes: role allow-list per method, then bearer auth around all
    let admin_state = admins::AdminHandlerState {
        admins: ctx.admins.clone(),
    };
    let managers = || middleware::from_fn_with_state(ADMIN_MANAGERS, require_roles);
    let super_only = || middleware::from_fn_with_state(SUPER_ADMIN_ONLY, require_roles);
    let admin_routes = Router::new()
        .route("/", get(admins::list_admins).route_layer(managers()))
        .route("/", post(admins::create_admin).route_layer(super_only()))
        .route(
            "/{id}",
            patch(admins::update_admin).route_layer(super_only()),
        )
        .route(
            "/{id}",
            axum::routing::delete(admins::delete_admin).route_layer(managers()),
        )
        .route(
            "/{id}/activate",
            post(admins::activate_admin).route_layer(super_only()),
        )
        .route(
            "/{id}/deactivate",
            post(admins::deactivate_admin).route_layer(super_only()),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(admin_state);

    let health_state = health::HealthState {
        db: ctx.db.clone(),
        started_at: ctx.started_at.clone(),
    };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check).with_state(health_state))
        // Auth
        .nest("/api/v1/auth", auth_routes)
        // Admins
        .nest("/api/v1/admins", admin_routes);

    if let Some(handle) = ctx.metrics {
        router = router.route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(metrics::MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors_layer(&ctx.cors_origins))
        .layer(TraceLayer::new_for_http())
}
