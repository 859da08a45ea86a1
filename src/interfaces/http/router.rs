//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AccountService, ProfileService};
use crate::config::{AppConfig, Environment};
use crate::domain::{
    AreaSummary, CommentView, CourseDetail, CourseProfessor, CourseSummary, ProfessorCourse,
    ProfessorDetail, ProfessorRating, ProfessorSummary, PublicationKind, PublicationView,
    RankedProfessor, RepositoryProvider,
};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::interfaces::http::common::{
    error_detail_middleware, ApiError, ApiResponse, EmptyData, ErrorExposure,
};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::shared::PaginationMeta;

use super::modules::health::HealthState;
use super::modules::metrics::{http_metrics_middleware, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{auth, courses, health, metrics, professors, publications, users};

/// State shared by every API handler
#[derive(Clone)]
pub struct ApiState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub accounts: Arc<AccountService>,
    pub profiles: Arc<ProfileService>,
}

/// Everything the router needs, passed in explicitly
pub struct RouterOptions {
    pub db: DatabaseConnection,
    pub jwt_config: JwtConfig,
    pub environment: Environment,
    pub cors_origins: Vec<String>,
    pub password_cost: u32,
    /// `/metrics` is only mounted when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl RouterOptions {
    pub fn from_config(
        config: &AppConfig,
        db: DatabaseConnection,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            db,
            jwt_config: config.jwt_config(),
            environment: config.environment,
            cors_origins: config.cors.allowed_origins.clone(),
            password_cost: config.security.bcrypt_cost,
            metrics,
        }
    }
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
                        .description(Some("JWT Bearer token from /api/auth/login"))
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
        auth::register,
        auth::login,
        auth::forgot_password,
        // Courses
        courses::list_courses,
        courses::get_course,
        courses::search_courses,
        courses::list_areas,
        courses::approve_course,
        // Professors
        professors::list_professors,
        professors::get_professor,
        professors::search_professors,
        professors::top_professors,
        professors::rate_professor,
        // Publications
        publications::list_publications,
        publications::get_publication,
        publications::list_comments,
        publications::create_publication,
        publications::add_comment,
        // Users
        users::get_me,
        users::update_me,
        users::list_approved_courses,
        users::add_approved_course,
        users::remove_approved_course,
        users::get_stats,
        users::find_student,
    ),
    components(
        schemas(
            // Common
            ApiResponse<EmptyData>,
            EmptyData,
            PaginationMeta,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::ForgotPasswordRequest,
            // Courses
            CourseSummary,
            CourseDetail,
            CourseProfessor,
            AreaSummary,
            courses::CoursePage,
            courses::ApproveCourseRequest,
            // Professors
            ProfessorSummary,
            ProfessorDetail,
            ProfessorCourse,
            ProfessorRating,
            RankedProfessor,
            professors::ProfessorPage,
            professors::RateProfessorRequest,
            // Publications
            PublicationKind,
            PublicationView,
            CommentView,
            publications::PublicationPage,
            publications::CommentPage,
            publications::CreatePublicationRequest,
            publications::CreateCommentRequest,
            // Users
            users::UpdateProfileRequest,
            users::ApprovalRequest,
            health::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Authentication", description = "Student registration, login (JWT) and password reset"),
        (name = "Courses", description = "Course catalogue with paginated, filterable listing"),
        (name = "Professors", description = "Professors, rankings and ratings"),
        (name = "Publications", description = "Student publications about courses and professors, with comments"),
        (name = "Users", description = "The authenticated student's academic record"),
    ),
    info(
        title = "Professor Ranking API",
        version = "1.0.0",
        description = "Browse courses and professors, publish reviews and track approved courses",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(allowed)
}

/// Create the API router with all routes
pub fn create_api_router(options: RouterOptions) -> Router {
    let repos: Arc<dyn RepositoryProvider> =
        Arc::new(SeaOrmRepositoryProvider::new(options.db.clone()));

    let api_state = ApiState {
        accounts: Arc::new(
            AccountService::new(repos.clone(), options.jwt_config.clone())
                .with_password_cost(options.password_cost),
        ),
        profiles: Arc::new(ProfileService::new(repos.clone())),
        repos,
    };

    let auth_state = AuthState {
        jwt_config: options.jwt_config,
    };

    // Routes behind the bearer token
    let protected_routes = Router::new()
        .merge(courses::protected_routes())
        .merge(professors::protected_routes())
        .merge(publications::protected_routes())
        .merge(users::protected_routes())
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let api_routes = Router::new()
        .merge(auth::public_routes())
        .merge(courses::public_routes())
        .merge(professors::public_routes())
        .merge(publications::public_routes())
        .merge(protected_routes)
        .with_state(api_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db: options.db,
            started_at: Arc::new(Instant::now()),
        });

    let mut router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .merge(api_routes);

    if let Some(handle) = options.metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    let exposure = ErrorExposure {
        expose_detail: options.environment.is_development(),
    };

    router
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(exposure, error_detail_middleware))
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
}
