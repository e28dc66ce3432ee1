use sea_orm::FromQueryResult;
use serde::Serialize;

use super::{Fields, Resource};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct Menu {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuInput {
    pub title: String,
}

impl Resource for Menu {
    const SINGULAR: &'static str = "menu";
    const PLURAL: &'static str = "menus";

    type Input = MenuInput;

    fn validate(fields: &Fields<'_>) -> Result<MenuInput, AppError> {
        Ok(MenuInput {
            title: fields.text("title")?,
        })
    }
}

pub mod sql {
    pub const SELECT_ONE: &str = "SELECT * FROM Menu WHERE id = $menuId";

    pub const SELECT_ALL: &str = "SELECT * FROM Menu";

    pub const INSERT: &str = "INSERT INTO Menu (title) VALUES ($title)";

    pub const UPDATE: &str = "UPDATE Menu SET title = $title WHERE id = $menuId";

    pub const FIRST_ITEM: &str = "SELECT id FROM MenuItem WHERE menu_id = $menuId LIMIT 1";

    /// Re-checks for items in the same statement, so an item added after the
    /// guard ran leaves the menu in place (zero changes).
    pub const DELETE_IF_EMPTY: &str = "
        DELETE FROM Menu
        WHERE id = $menuId
          AND NOT EXISTS (SELECT 1 FROM MenuItem WHERE menu_id = $menuId)";
}
