use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, QueryResult, Statement};

use super::error::GatewayResult;
use super::named;
use crate::pipeline::params::Params;

/// A row as returned by the store; decoded by the resource that asked for it.
pub type Row = QueryResult;

/// Outcome of a mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Identifier generated by the last insert on this connection.
    pub last_id: i64,
    /// Rows inserted, updated or deleted.
    pub changes: u64,
}

/// Everything the request pipeline needs from the relational store.
///
/// Statements are SQL text with `$name` placeholders, bound from the request's
/// parameter map.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn get(&self, sql: &str, params: &Params) -> GatewayResult<Option<Row>>;

    async fn all(&self, sql: &str, params: &Params) -> GatewayResult<Vec<Row>>;

    async fn run(&self, sql: &str, params: &Params) -> GatewayResult<RunOutcome>;
}

#[derive(Clone)]
pub struct SeaGateway {
    db: DatabaseConnection,
}

impl SeaGateway {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn statement(&self, sql: &str, params: &Params) -> GatewayResult<Statement> {
        let backend = self.db.get_database_backend();
        let compiled = named::compile(backend, sql, params)?;
        Ok(Statement::from_sql_and_values(
            backend,
            compiled.sql,
            compiled.values.into_iter().map(sea_orm::Value::from),
        ))
    }
}

#[async_trait]
impl Gateway for SeaGateway {
    async fn get(&self, sql: &str, params: &Params) -> GatewayResult<Option<Row>> {
        let stmt = self.statement(sql, params)?;
        Ok(self.db.query_one_raw(stmt).await?)
    }

    async fn all(&self, sql: &str, params: &Params) -> GatewayResult<Vec<Row>> {
        let stmt = self.statement(sql, params)?;
        Ok(self.db.query_all_raw(stmt).await?)
    }

    async fn run(&self, sql: &str, params: &Params) -> GatewayResult<RunOutcome> {
        let stmt = self.statement(sql, params)?;
        let result = self.db.execute_raw(stmt).await?;
        Ok(RunOutcome {
            last_id: result.last_insert_id() as i64,
            changes: result.rows_affected(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Value};

    use super::{Gateway, RunOutcome, SeaGateway};
    use crate::db::GatewayError;
    use crate::pipeline::params::{Param, Params};

    fn menu_params() -> Params {
        Params::from([
            ("$menuId".to_string(), Param::Int(1)),
            ("$title".to_string(), Param::Text("Lunch".to_string())),
        ])
    }

    #[tokio::test]
    async fn run_reports_generated_id_and_changes() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([MockExecResult {
                last_insert_id: 7,
                rows_affected: 1,
            }])
            .into_connection();
        let gateway = SeaGateway::new(&db);

        let outcome = gateway
            .run("INSERT INTO Menu (title) VALUES ($title)", &menu_params())
            .await
            .expect("insert should succeed");
        assert_eq!(
            outcome,
            RunOutcome {
                last_id: 7,
                changes: 1
            }
        );
    }

    #[tokio::test]
    async fn get_returns_the_first_row() {
        let row = BTreeMap::from([
            ("id", Value::from(1_i64)),
            ("title", Value::from("Lunch")),
        ]);
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([[row]])
            .into_connection();
        let gateway = SeaGateway::new(&db);

        let row = gateway
            .get("SELECT * FROM Menu WHERE id = $menuId", &menu_params())
            .await
            .expect("query should succeed")
            .expect("row should exist");
        let title: String = row.try_get("", "title").expect("title column");
        assert_eq!(title, "Lunch");
    }

    #[tokio::test]
    async fn database_errors_are_wrapped() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_errors([DbErr::Custom("disk full".to_string())])
            .into_connection();
        let gateway = SeaGateway::new(&db);

        let err = gateway
            .run("DELETE FROM Menu WHERE id = $menuId", &menu_params())
            .await
            .expect_err("delete should fail");
        assert!(matches!(err, GatewayError::Db(_)));
    }

    #[tokio::test]
    async fn unbound_parameters_fail_before_reaching_the_store() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let gateway = SeaGateway::new(&db);

        let err = gateway
            .all("SELECT * FROM MenuItem WHERE menu_id = $menuId", &Params::new())
            .await
            .expect_err("query should fail");
        assert!(matches!(err, GatewayError::MissingParam(_)));
        assert!(db.into_transaction_log().is_empty());
    }
}
