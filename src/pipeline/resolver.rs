use async_trait::async_trait;

use super::{
    context::RequestContext,
    executor::Pipeline,
    params::{NAMED_PREFIX, Param},
    stage::{Flow, Stage},
};
use crate::{db::Gateway, error::AppError};

/// One path identifier of a route (`menuId` -> `$menuId`), optionally tied to
/// the row it must name.
pub struct ResolveParam {
    name: &'static str,
    lookup: Option<Lookup>,
}

struct Lookup {
    sql: &'static str,
    slot: &'static str,
}

impl ResolveParam {
    /// Validate and bind only.
    pub fn bind(name: &'static str) -> Self {
        Self { name, lookup: None }
    }

    /// Validate, bind, then require the row selected by `sql` to exist.
    /// Lookups run after every identifier of the route is bound, so a child
    /// lookup can be scoped to its parent.
    pub fn load(name: &'static str, sql: &'static str, slot: &'static str) -> Self {
        Self {
            name,
            lookup: Some(Lookup { sql, slot }),
        }
    }
}

fn param_key(name: &str) -> String {
    format!("{NAMED_PREFIX}{name}")
}

/// Parses one path value and binds it as `$name`.
struct BindParam {
    name: &'static str,
}

#[async_trait]
impl Stage for BindParam {
    fn name(&self) -> &'static str {
        "resolve"
    }

    async fn run(&self, _gateway: &dyn Gateway, ctx: &mut RequestContext) -> Result<Flow, AppError> {
        let raw = ctx
            .path_value(self.name)
            .ok_or_else(|| AppError::validation(format!("missing path parameter `{}`", self.name)))?;
        let id = parse_identifier(self.name, raw)?;
        ctx.params.set(param_key(self.name), id);
        Ok(Flow::Next)
    }
}

/// Loads the row a bound identifier names into the context slot.
struct LoadRow {
    name: &'static str,
    sql: &'static str,
    slot: &'static str,
}

#[async_trait]
impl Stage for LoadRow {
    fn name(&self) -> &'static str {
        "load"
    }

    async fn run(&self, gateway: &dyn Gateway, ctx: &mut RequestContext) -> Result<Flow, AppError> {
        let key = param_key(self.name);
        let Some(Param::Int(id)) = ctx.params.get(&key).cloned() else {
            return Err(AppError::persistence(format!(
                "`{key}` must be bound before its row is loaded"
            )));
        };

        match gateway.get(self.sql, ctx.params.entries()).await? {
            Some(row) => {
                ctx.attach(self.slot, row);
                Ok(Flow::Next)
            }
            None => Err(AppError::not_found(format!("{} {id} not found", self.slot))),
        }
    }
}

impl Pipeline {
    /// Binds every identifier in `params` first and only then runs their
    /// lookups in order, so a malformed identifier anywhere in the path is
    /// rejected before the store is consulted.
    pub fn resolve(mut self, params: impl IntoIterator<Item = ResolveParam>) -> Self {
        let params: Vec<ResolveParam> = params.into_iter().collect();
        for param in &params {
            self = self.then(BindParam { name: param.name });
        }
        for param in params {
            if let Some(Lookup { sql, slot }) = param.lookup {
                self = self.then(LoadRow {
                    name: param.name,
                    sql,
                    slot,
                });
            }
        }
        self
    }
}

/// Accepts any finite, non-negative, integral number (`7`, `7.0`, `1e2`).
pub fn parse_identifier(name: &str, raw: &str) -> Result<i64, AppError> {
    let invalid = || {
        AppError::validation(format!(
            "`{name}` must be a non-negative integer, got `{raw}`"
        ))
    };

    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value >= i64::MAX as f64 {
        return Err(invalid());
    }
    Ok(value as i64)
}
