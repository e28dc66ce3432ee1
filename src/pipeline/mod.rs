//! Per-request pipelines: a parameter store and context threaded through an
//! ordered list of stages, any of which may end the request early.

pub mod context;
pub mod executor;
pub mod params;
pub mod resolver;
pub mod stage;
pub mod stages;

pub use context::RequestContext;
pub use executor::Pipeline;
pub use params::{Param, ParamStore, Params};
pub use resolver::ResolveParam;
pub use stage::{Flow, Stage};
