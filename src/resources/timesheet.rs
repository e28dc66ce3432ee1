use sea_orm::FromQueryResult;
use serde::Serialize;

use super::{Fields, Resource};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timesheet {
    pub id: i64,
    pub hours: f64,
    pub rate: f64,
    /// Day number, e.g. days since the Unix epoch.
    pub date: i64,
    pub employee_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimesheetInput {
    pub hours: f64,
    pub rate: f64,
    pub date: i64,
}

impl Resource for Timesheet {
    const SINGULAR: &'static str = "timesheet";
    const PLURAL: &'static str = "timesheets";

    type Input = TimesheetInput;

    fn validate(fields: &Fields<'_>) -> Result<TimesheetInput, AppError> {
        Ok(TimesheetInput {
            hours: fields.number("hours")?,
            rate: fields.number("rate")?,
            date: fields.integer("date")?,
        })
    }
}

pub mod sql {
    pub const SELECT_ONE: &str = "
        SELECT * FROM Timesheet
        WHERE id = $timesheetId AND employee_id = $employeeId";

    pub const SELECT_FOR_EMPLOYEE: &str = "SELECT * FROM Timesheet WHERE employee_id = $employeeId";

    pub const INSERT: &str = "
        INSERT INTO Timesheet (hours, rate, date, employee_id)
        VALUES ($hours, $rate, $date, $employeeId)";

    pub const UPDATE: &str = "
        UPDATE Timesheet
        SET hours = $hours,
            rate = $rate,
            date = $date
        WHERE id = $timesheetId AND employee_id = $employeeId";

    pub const DELETE: &str = "
        DELETE FROM Timesheet
        WHERE id = $timesheetId AND employee_id = $employeeId";
}
