//! HTTP surface of the location service.
//!
//! ## Routes
//!
//! | Method | Path                                  | Handler                         |
//! |--------|---------------------------------------|---------------------------------|
//! | POST   | `/api/location-generation/preview`    | [`handler::preview`]            |
//! | POST   | `/api/location-generation/generate`   | [`handler::generate`]           |
//! | GET    | `/api/storage-locations`              | [`handler::list_locations`]     |
//! | POST   | `/api/storage-locations`              | [`handler::create_location`]    |
//! | GET    | `/api/storage-locations/{id}`         | [`handler::get_location`]       |
//! | PUT    | `/api/storage-locations/{id}`         | [`handler::update_location`]    |
//! | GET    | `/healthz`                            | [`handler::healthz`]            |

pub mod handler;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use stowage::{LocationGenerator, LocationStore};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared handler state: one generator (and through it, one store) for the
/// whole process.
pub struct LocationService<S> {
    generator: Arc<LocationGenerator<S>>,
}

// Derived `Clone` would require `S: Clone`.
impl<S> Clone for LocationService<S> {
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<S> LocationService<S>
where
    S: LocationStore + 'static,
{
    pub fn new(generator: LocationGenerator<S>) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }

    pub fn generator(&self) -> &LocationGenerator<S> {
        &self.generator
    }

    pub fn router(self) -> Router {
        Router::new()
            .route(
                "/api/location-generation/preview",
                post(handler::preview::<S>),
            )
            .route(
                "/api/location-generation/generate",
                post(handler::generate::<S>),
            )
            .route(
                "/api/storage-locations",
                get(handler::list_locations::<S>).post(handler::create_location::<S>),
            )
            .route(
                "/api/storage-locations/{id}",
                get(handler::get_location::<S>).put(handler::update_location::<S>),
            )
            .route("/healthz", get(handler::healthz))
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .with_state(self)
    }
}
