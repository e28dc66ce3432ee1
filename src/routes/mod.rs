mod extract;

pub use extract::PathValues;

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    middleware,
    routing::{MethodRouter, get},
};
use serde_json::Value as JsonValue;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    controllers::{Controller, Employees, MenuItems, Menus, Timesheets},
    error::AppError,
    middleware::{catch_panic_layer, json_error_middleware},
    pipeline::RequestContext,
    response::Reply,
    state::AppState,
};

pub const API_PREFIX: &str = "/api";

type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    let api = Router::new()
        .route("/employees", collection::<Employees>())
        .route("/employees/{employeeId}", member::<Employees>())
        .route(
            "/employees/{employeeId}/timesheets",
            collection::<Timesheets>(),
        )
        .route(
            "/employees/{employeeId}/timesheets/{timesheetId}",
            member::<Timesheets>(),
        )
        .route("/menus", collection::<Menus>())
        .route("/menus/{menuId}", member::<Menus>())
        .route("/menus/{menuId}/menu-items", collection::<MenuItems>())
        .route(
            "/menus/{menuId}/menu-items/{menuItemId}",
            member::<MenuItems>(),
        );

    Router::new()
        .nest(API_PREFIX, api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The router wrapped in the error normalisation, panic and tracing layers.
pub fn app(state: SharedState) -> Router {
    router(state)
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http())
}

fn collection<C: Controller>() -> MethodRouter<SharedState> {
    get(list::<C>).post(create::<C>)
}

fn member<C: Controller>() -> MethodRouter<SharedState> {
    get(show::<C>).put(update::<C>).delete(destroy::<C>)
}

async fn list<C: Controller>(
    State(state): State<SharedState>,
    PathValues(path): PathValues,
) -> Result<Reply, AppError> {
    let mut ctx = RequestContext::new(path, JsonValue::Null);
    C::list().execute(state.gateway.as_ref(), &mut ctx).await
}

async fn show<C: Controller>(
    State(state): State<SharedState>,
    PathValues(path): PathValues,
) -> Result<Reply, AppError> {
    let mut ctx = RequestContext::new(path, JsonValue::Null);
    C::show().execute(state.gateway.as_ref(), &mut ctx).await
}

async fn create<C: Controller>(
    State(state): State<SharedState>,
    PathValues(path): PathValues,
    body: Bytes,
) -> Result<Reply, AppError> {
    let mut ctx = RequestContext::from_raw(path, &body);
    C::create().execute(state.gateway.as_ref(), &mut ctx).await
}

async fn update<C: Controller>(
    State(state): State<SharedState>,
    PathValues(path): PathValues,
    body: Bytes,
) -> Result<Reply, AppError> {
    let mut ctx = RequestContext::from_raw(path, &body);
    C::update().execute(state.gateway.as_ref(), &mut ctx).await
}

async fn destroy<C: Controller>(
    State(state): State<SharedState>,
    PathValues(path): PathValues,
) -> Result<Reply, AppError> {
    let mut ctx = RequestContext::new(path, JsonValue::Null);
    C::delete().execute(state.gateway.as_ref(), &mut ctx).await
}
