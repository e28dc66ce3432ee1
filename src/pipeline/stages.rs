//! The reusable stages every resource pipeline is assembled from.

use std::marker::PhantomData;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use super::{
    context::RequestContext,
    stage::{Flow, Stage},
};
use crate::{
    db::Gateway,
    error::AppError,
    resources::{Fields, Resource},
    response::Reply,
};

/// Checks the body object for `R` and seeds its validated fields as named
/// parameters. Never touches the store.
pub struct Validate<R>(PhantomData<fn() -> R>);

impl<R: Resource> Validate<R> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<R: Resource> Default for Validate<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Resource> Stage for Validate<R> {
    fn name(&self) -> &'static str {
        "validate"
    }

    async fn run(&self, _gateway: &dyn Gateway, ctx: &mut RequestContext) -> Result<Flow, AppError> {
        let input = {
            let fields = Fields::from_body(ctx.body(), R::SINGULAR)?;
            R::validate(&fields)?
        };
        ctx.params
            .seed(&input, true)
            .map_err(|err| AppError::persistence(format!("failed to bind {}: {err}", R::SINGULAR)))?;
        Ok(Flow::Next)
    }
}

/// Inserts with every accumulated parameter and binds the generated id under
/// `id_key` for the re-fetch that follows.
pub struct Insert {
    sql: &'static str,
    id_key: &'static str,
}

impl Insert {
    pub fn new(sql: &'static str, id_key: &'static str) -> Self {
        Self { sql, id_key }
    }
}

#[async_trait]
impl Stage for Insert {
    fn name(&self) -> &'static str {
        "insert"
    }

    async fn run(&self, gateway: &dyn Gateway, ctx: &mut RequestContext) -> Result<Flow, AppError> {
        let outcome = gateway.run(self.sql, ctx.params.entries()).await?;
        ctx.params.set(self.id_key, outcome.last_id);
        Ok(Flow::Next)
    }
}

/// What a mutation that changed no rows means for the request.
#[derive(Debug, Clone, Copy)]
pub enum Unchanged {
    /// The target row does not exist (`resource` names it).
    NotFound(&'static str),
    /// The row exists but an integrity rule kept it in place.
    Conflict(&'static str),
}

impl Unchanged {
    fn into_error(self) -> AppError {
        match self {
            Self::NotFound(resource) => AppError::not_found(format!("{resource} not found")),
            Self::Conflict(message) => AppError::conflict(message),
        }
    }
}

/// Runs an update or delete keyed by the resolved identifiers.
pub struct Mutate {
    name: &'static str,
    sql: &'static str,
    unchanged: Unchanged,
}

impl Mutate {
    pub fn update(sql: &'static str, resource: &'static str) -> Self {
        Self {
            name: "update",
            sql,
            unchanged: Unchanged::NotFound(resource),
        }
    }

    pub fn delete(sql: &'static str, unchanged: Unchanged) -> Self {
        Self {
            name: "delete",
            sql,
            unchanged,
        }
    }
}

#[async_trait]
impl Stage for Mutate {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(&self, gateway: &dyn Gateway, ctx: &mut RequestContext) -> Result<Flow, AppError> {
        let outcome = gateway.run(self.sql, ctx.params.entries()).await?;
        if outcome.changes == 0 {
            return Err(self.unchanged.into_error());
        }
        Ok(Flow::Next)
    }
}

/// Reads one row back after a write. The row must exist: a write that just
/// succeeded and cannot be read back is a store inconsistency.
pub struct FetchOne {
    sql: &'static str,
    slot: &'static str,
}

impl FetchOne {
    pub fn new(sql: &'static str, slot: &'static str) -> Self {
        Self { sql, slot }
    }
}

#[async_trait]
impl Stage for FetchOne {
    fn name(&self) -> &'static str {
        "fetch-one"
    }

    async fn run(&self, gateway: &dyn Gateway, ctx: &mut RequestContext) -> Result<Flow, AppError> {
        let row = gateway
            .get(self.sql, ctx.params.entries())
            .await?
            .ok_or_else(|| {
                AppError::persistence(format!("{} could not be read back after write", self.slot))
            })?;
        ctx.attach(self.slot, row);
        Ok(Flow::Next)
    }
}

pub struct FetchMany {
    sql: &'static str,
    slot: &'static str,
}

impl FetchMany {
    pub fn new(sql: &'static str, slot: &'static str) -> Self {
        Self { sql, slot }
    }
}

#[async_trait]
impl Stage for FetchMany {
    fn name(&self) -> &'static str {
        "fetch-many"
    }

    async fn run(&self, gateway: &dyn Gateway, ctx: &mut RequestContext) -> Result<Flow, AppError> {
        let rows = gateway.all(self.sql, ctx.params.entries()).await?;
        ctx.attach_all(self.slot, rows);
        Ok(Flow::Next)
    }
}

/// Fails with a conflict when `sql` finds a row, e.g. a child that still
/// references the parent about to be deleted.
pub struct Guard {
    sql: &'static str,
    key: &'static str,
    message: &'static str,
}

impl Guard {
    pub fn new(sql: &'static str, key: &'static str, message: &'static str) -> Self {
        Self { sql, key, message }
    }
}

#[async_trait]
impl Stage for Guard {
    fn name(&self) -> &'static str {
        "guard"
    }

    async fn run(&self, gateway: &dyn Gateway, ctx: &mut RequestContext) -> Result<Flow, AppError> {
        let blocking = gateway.get(self.sql, &ctx.params.entry(self.key)).await?;
        if blocking.is_some() {
            return Err(AppError::conflict(self.message));
        }
        Ok(Flow::Next)
    }
}

enum Shape {
    One,
    Many,
}

/// Renders the loaded row (slot `R::SINGULAR`) or rows (slot `R::PLURAL`)
/// under the matching body key.
pub struct Respond<R> {
    status: StatusCode,
    shape: Shape,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Respond<R> {
    pub fn one(status: StatusCode) -> Self {
        Self {
            status,
            shape: Shape::One,
            _resource: PhantomData,
        }
    }

    pub fn many(status: StatusCode) -> Self {
        Self {
            status,
            shape: Shape::Many,
            _resource: PhantomData,
        }
    }

    fn body(&self, ctx: &RequestContext) -> Result<JsonValue, AppError> {
        match self.shape {
            Shape::One => {
                let row = ctx.record(R::SINGULAR).ok_or_else(|| missing_slot(R::SINGULAR))?;
                keyed(R::SINGULAR, &R::decode(row)?)
            }
            Shape::Many => {
                let rows = ctx.records(R::PLURAL).ok_or_else(|| missing_slot(R::PLURAL))?;
                let items = rows.iter().map(R::decode).collect::<Result<Vec<_>, _>>()?;
                keyed(R::PLURAL, &items)
            }
        }
    }
}

#[async_trait]
impl<R: Resource> Stage for Respond<R> {
    fn name(&self) -> &'static str {
        "respond"
    }

    async fn run(&self, _gateway: &dyn Gateway, ctx: &mut RequestContext) -> Result<Flow, AppError> {
        let body = self.body(ctx)?;
        Ok(Flow::Respond(Reply::json(self.status, body)))
    }
}

pub struct NoContent;

#[async_trait]
impl Stage for NoContent {
    fn name(&self) -> &'static str {
        "no-content"
    }

    async fn run(&self, _gateway: &dyn Gateway, _ctx: &mut RequestContext) -> Result<Flow, AppError> {
        Ok(Flow::Respond(Reply::no_content()))
    }
}

fn missing_slot(slot: &str) -> AppError {
    AppError::persistence(format!("no `{slot}` was loaded for this request"))
}

fn keyed<T: Serialize>(key: &str, value: &T) -> Result<JsonValue, AppError> {
    let value = serde_json::to_value(value)
        .map_err(|err| AppError::persistence(format!("failed to encode `{key}`: {err}")))?;
    let mut body = Map::new();
    body.insert(key.to_string(), value);
    Ok(JsonValue::Object(body))
}
