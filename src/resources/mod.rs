//! Typed rows and inputs for the four resources, with the SQL that reads and
//! writes them.

pub mod employee;
pub mod fields;
pub mod menu;
pub mod menu_item;
pub mod timesheet;

use sea_orm::FromQueryResult;
use serde::Serialize;

pub use employee::{Employee, EmployeeInput};
pub use fields::Fields;
pub use menu::{Menu, MenuInput};
pub use menu_item::{MenuItem, MenuItemInput};
pub use timesheet::{Timesheet, TimesheetInput};

use crate::{db::Row, error::AppError};

pub trait Resource: FromQueryResult + Serialize + Send + Sync + 'static {
    /// Key of the resource in request and response bodies (`menuItem`).
    const SINGULAR: &'static str;
    /// Key of a list response (`menuItems`).
    const PLURAL: &'static str;

    /// Validated client input. Its serialized field names are the named
    /// parameters the insert and update statements expect.
    type Input: Serialize + Send + Sync;

    fn validate(fields: &Fields<'_>) -> Result<Self::Input, AppError>;

    fn decode(row: &Row) -> Result<Self, AppError> {
        Self::from_query_result(row, "").map_err(|err| {
            AppError::persistence(format!("failed to decode {} row: {err}", Self::SINGULAR))
        })
    }
}
