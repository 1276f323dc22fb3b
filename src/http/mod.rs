//! HTTP surface of the function.
//!
//! The Functions host forwards `GET /api/profile` verbatim to the custom
//! handler; `GET /profile` is served too so the same router works when run
//! standalone. Neither route reads the query string, headers or body.

pub mod middleware;
pub mod response;
pub mod server;

use std::sync::Arc;

use axum::{extract::State, response::Response, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::core::{ConfigProvider, ProfileHandler, StoreConnector};

pub const PROFILE_ROUTE: &str = "/profile";
pub const FUNCTIONS_PROFILE_ROUTE: &str = "/api/profile";

pub fn create_router<C, P>(handler: ProfileHandler<C, P>) -> Router
where
    C: StoreConnector + 'static,
    P: ConfigProvider + 'static,
{
    let state = Arc::new(handler);

    Router::new()
        .route(PROFILE_ROUTE, get(get_profile::<C, P>))
        .route(FUNCTIONS_PROFILE_ROUTE, get(get_profile::<C, P>))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(middleware::request_id_layer))
        .with_state(state)
}

async fn get_profile<C, P>(State(handler): State<Arc<ProfileHandler<C, P>>>) -> Response
where
    C: StoreConnector + 'static,
    P: ConfigProvider + 'static,
{
    response::profile_response(handler.fetch().await)
}
