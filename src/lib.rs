pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod pipeline;
pub mod resources;
pub mod response;
pub mod routes;
pub mod state;
