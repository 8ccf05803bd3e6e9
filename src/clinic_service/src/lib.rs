//! Service composition: route table, CORS, tracing and the server loop.

use std::net::SocketAddr;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use clinic_axum::{
    AppState,
    extract::require_auth,
    routes::{addresses, clinics, login, register, users, verify},
};

/// The assembled clinic backend.
///
/// Holds the `/api` router with the bearer guard applied to the private
/// routes. Tests mount it in-process; `run` serves it over a listener.
pub struct ClinicService {
    router: Router,
}

impl ClinicService {
    pub fn new(state: AppState) -> Self {
        let guard = middleware::from_fn_with_state(state.clone(), require_auth);

        let api = Router::new()
            .route("/register", post(register::register))
            .route("/login", post(login::login))
            .route("/verify", get(verify::verify_account))
            .route(
                "/users",
                get(users::list_users).route_layer(guard.clone()),
            )
            .route(
                "/users/update-password",
                post(users::update_password).route_layer(guard.clone()),
            )
            .route(
                "/users/update-email",
                post(users::update_email).route_layer(guard.clone()),
            )
            .route(
                "/users/verify-email",
                get(verify::verify_new_email).route_layer(guard.clone()),
            )
            .route(
                "/users/{id}",
                get(users::get_user)
                    .put(users::update_user)
                    .delete(users::delete_user)
                    .route_layer(guard.clone()),
            )
            // Clinic reads are public, mutations sit behind the guard.
            .route(
                "/clinics",
                get(clinics::list_clinics)
                    .merge(post(clinics::create_clinic).route_layer(guard.clone())),
            )
            .route(
                "/clinics/{id}",
                get(clinics::get_clinic).merge(
                    put(clinics::update_clinic)
                        .delete(clinics::delete_clinic)
                        .route_layer(guard.clone()),
                ),
            )
            .route(
                "/clinics/{id}/addresses",
                post(clinics::add_clinic_address)
                    .get(clinics::list_clinic_addresses)
                    .route_layer(guard.clone()),
            )
            .route(
                "/addresses",
                post(addresses::create_address)
                    .get(addresses::list_addresses)
                    .route_layer(guard.clone()),
            )
            .route(
                "/addresses/{id}",
                get(addresses::get_address)
                    .delete(addresses::delete_address)
                    .route_layer(guard),
            );

        let router = Router::new()
            .nest("/api", api)
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Applies the CORS allow-list and returns the final router.
    pub fn into_router(self, allowed_origins: &[String]) -> Router {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_origin(origins);

        self.router.layer(cors)
    }

    pub async fn run(
        self,
        listener: TcpListener,
        allowed_origins: &[String],
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("Clinic service listening on {}", listener.local_addr()?);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
    }
}
