use axum::http::StatusCode;

use super::{Controller, employee_id};
use crate::{
    pipeline::{
        Pipeline,
        stages::{FetchMany, FetchOne, Insert, Mutate, Respond, Validate},
    },
    resources::{Employee, Resource, employee::sql},
};

/// Employees are soft-deleted: `delete` clears `isCurrentEmployee` and returns
/// the row, which stays reachable by id but leaves the list.
pub struct Employees;

impl Controller for Employees {
    fn list() -> Pipeline {
        Pipeline::new("employees.list")
            .then(FetchMany::new(sql::SELECT_CURRENT, Employee::PLURAL))
            .then(Respond::<Employee>::many(StatusCode::OK))
    }

    fn show() -> Pipeline {
        Pipeline::new("employees.show")
            .resolve([employee_id()])
            .then(Respond::<Employee>::one(StatusCode::OK))
    }

    fn create() -> Pipeline {
        Pipeline::new("employees.create")
            .then(Validate::<Employee>::new())
            .then(Insert::new(sql::INSERT, "$employeeId"))
            .then(FetchOne::new(sql::SELECT_ONE, Employee::SINGULAR))
            .then(Respond::<Employee>::one(StatusCode::CREATED))
    }

    fn update() -> Pipeline {
        Pipeline::new("employees.update")
            .resolve([employee_id()])
            .then(Validate::<Employee>::new())
            .then(Mutate::update(sql::UPDATE, Employee::SINGULAR))
            .then(FetchOne::new(sql::SELECT_ONE, Employee::SINGULAR))
            .then(Respond::<Employee>::one(StatusCode::OK))
    }

    fn delete() -> Pipeline {
        Pipeline::new("employees.delete")
            .resolve([employee_id()])
            .then(Mutate::update(sql::RETIRE, Employee::SINGULAR))
            .then(FetchOne::new(sql::SELECT_ONE, Employee::SINGULAR))
            .then(Respond::<Employee>::one(StatusCode::OK))
    }
}
