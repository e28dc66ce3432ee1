use std::any::Any;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{error::AppError, logging::panic_message};

pub fn catch_panic_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(panic_to_error)
}

/// A panicking handler becomes a persistence-class failure: 500, with the
/// detail only shown in debug builds.
fn panic_to_error(panic: Box<dyn Any + Send + 'static>) -> Response {
    AppError::persistence(format!("handler panicked: {}", panic_message(panic.as_ref())))
        .into_response()
}
