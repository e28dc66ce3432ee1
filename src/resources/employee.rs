use sea_orm::FromQueryResult;
use serde::Serialize;

use super::{Fields, Resource};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub wage: f64,
    pub is_current_employee: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub name: String,
    pub position: String,
    pub wage: f64,
    pub is_current_employee: bool,
}

impl Resource for Employee {
    const SINGULAR: &'static str = "employee";
    const PLURAL: &'static str = "employees";

    type Input = EmployeeInput;

    fn validate(fields: &Fields<'_>) -> Result<EmployeeInput, AppError> {
        Ok(EmployeeInput {
            name: fields.text("name")?,
            position: fields.text("position")?,
            wage: fields.number("wage")?,
            is_current_employee: fields.flag("isCurrentEmployee", true)?,
        })
    }
}

pub mod sql {
    pub const SELECT_ONE: &str = "SELECT * FROM Employee WHERE id = $employeeId";

    pub const SELECT_CURRENT: &str = "SELECT * FROM Employee WHERE is_current_employee = 1";

    pub const INSERT: &str = "
        INSERT INTO Employee (name, position, wage, is_current_employee)
        VALUES ($name, $position, $wage, $isCurrentEmployee)";

    pub const UPDATE: &str = "
        UPDATE Employee
        SET name = $name,
            position = $position,
            wage = $wage,
            is_current_employee = $isCurrentEmployee
        WHERE id = $employeeId";

    /// Employees are never removed; they stop being current.
    pub const RETIRE: &str = "UPDATE Employee SET is_current_employee = 0 WHERE id = $employeeId";
}
