use tracing::debug;

use super::{
    context::RequestContext,
    stage::{Flow, Stage},
};
use crate::{db::Gateway, error::AppError, response::Reply};

/// An ordered chain of stages run strictly one after another.
pub struct Pipeline {
    name: &'static str,
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            stages: Vec::new(),
        }
    }

    pub fn then(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Runs the stages in order until one responds or fails. Running out of
    /// stages without a reply is a wiring bug and surfaces as a 500.
    pub async fn execute(
        &self,
        gateway: &dyn Gateway,
        ctx: &mut RequestContext,
    ) -> Result<Reply, AppError> {
        for stage in &self.stages {
            debug!(pipeline = self.name, stage = stage.name(), "running stage");
            match stage.run(gateway, ctx).await {
                Ok(Flow::Next) => {}
                Ok(Flow::Respond(reply)) => {
                    debug!(
                        pipeline = self.name,
                        stage = stage.name(),
                        status = reply.status.as_u16(),
                        "pipeline responded"
                    );
                    return Ok(reply);
                }
                Err(err) => {
                    debug!(
                        pipeline = self.name,
                        stage = stage.name(),
                        error = %err,
                        "pipeline short-circuited"
                    );
                    return Err(err);
                }
            }
        }

        Err(AppError::persistence(format!(
            "pipeline `{}` finished without a response",
            self.name
        )))
    }
}
