use axum::http::StatusCode;

use super::{Controller, employee_id, timesheet_id};
use crate::{
    pipeline::{
        Pipeline,
        stages::{FetchMany, FetchOne, Insert, Mutate, NoContent, Respond, Unchanged, Validate},
    },
    resources::{Resource, Timesheet, timesheet::sql},
};

pub struct Timesheets;

impl Controller for Timesheets {
    fn list() -> Pipeline {
        Pipeline::new("timesheets.list")
            .resolve([employee_id()])
            .then(FetchMany::new(sql::SELECT_FOR_EMPLOYEE, Timesheet::PLURAL))
            .then(Respond::<Timesheet>::many(StatusCode::OK))
    }

    fn show() -> Pipeline {
        Pipeline::new("timesheets.show")
            .resolve([employee_id(), timesheet_id()])
            .then(Respond::<Timesheet>::one(StatusCode::OK))
    }

    fn create() -> Pipeline {
        Pipeline::new("timesheets.create")
            .resolve([employee_id()])
            .then(Validate::<Timesheet>::new())
            .then(Insert::new(sql::INSERT, "$timesheetId"))
            .then(FetchOne::new(sql::SELECT_ONE, Timesheet::SINGULAR))
            .then(Respond::<Timesheet>::one(StatusCode::CREATED))
    }

    fn update() -> Pipeline {
        Pipeline::new("timesheets.update")
            .resolve([employee_id(), timesheet_id()])
            .then(Validate::<Timesheet>::new())
            .then(Mutate::update(sql::UPDATE, Timesheet::SINGULAR))
            .then(FetchOne::new(sql::SELECT_ONE, Timesheet::SINGULAR))
            .then(Respond::<Timesheet>::one(StatusCode::OK))
    }

    fn delete() -> Pipeline {
        Pipeline::new("timesheets.delete")
            .resolve([employee_id(), timesheet_id()])
            .then(Mutate::delete(
                sql::DELETE,
                Unchanged::NotFound(Timesheet::SINGULAR),
            ))
            .then(NoContent)
    }
}
