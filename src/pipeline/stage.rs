use async_trait::async_trait;

use super::context::RequestContext;
use crate::{db::Gateway, error::AppError, response::Reply};

/// What a stage tells the executor once it succeeds.
#[derive(Debug)]
pub enum Flow {
    /// Hand the context to the next stage.
    Next,
    /// Stop here and send this reply.
    Respond(Reply),
}

/// One unit of request processing. Returning `Err` ends the pipeline.
#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, gateway: &dyn Gateway, ctx: &mut RequestContext)
    -> Result<Flow, AppError>;
}
