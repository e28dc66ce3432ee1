//! One controller per resource. Each operation is a freshly built pipeline;
//! the route layer only supplies the gateway and request context.

mod employees;
mod menu_items;
mod menus;
mod timesheets;

pub use employees::Employees;
pub use menu_items::MenuItems;
pub use menus::Menus;
pub use timesheets::Timesheets;

use crate::{
    pipeline::{Pipeline, ResolveParam},
    resources::{Employee, Menu, MenuItem, Resource, Timesheet, employee, menu, menu_item, timesheet},
};

pub trait Controller: Send + Sync + 'static {
    fn list() -> Pipeline;
    fn show() -> Pipeline;
    fn create() -> Pipeline;
    fn update() -> Pipeline;
    fn delete() -> Pipeline;
}

fn employee_id() -> ResolveParam {
    ResolveParam::load("employeeId", employee::sql::SELECT_ONE, Employee::SINGULAR)
}

fn timesheet_id() -> ResolveParam {
    ResolveParam::load("timesheetId", timesheet::sql::SELECT_ONE, Timesheet::SINGULAR)
}

fn menu_id() -> ResolveParam {
    ResolveParam::load("menuId", menu::sql::SELECT_ONE, Menu::SINGULAR)
}

fn menu_item_id() -> ResolveParam {
    ResolveParam::load("menuItemId", menu_item::sql::SELECT_ONE, MenuItem::SINGULAR)
}
