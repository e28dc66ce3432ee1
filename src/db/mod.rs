pub mod connection;
mod error;
pub mod gateway;
pub mod named;
pub mod schema;

pub use error::{GatewayError, GatewayResult};
pub use gateway::{Gateway, Row, RunOutcome, SeaGateway};
