use sea_orm::FromQueryResult;
use serde::Serialize;

use super::{Fields, Resource};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub inventory: i64,
    pub price: f64,
    pub menu_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItemInput {
    pub name: String,
    pub description: String,
    pub inventory: i64,
    pub price: f64,
}

impl Resource for MenuItem {
    const SINGULAR: &'static str = "menuItem";
    const PLURAL: &'static str = "menuItems";

    type Input = MenuItemInput;

    fn validate(fields: &Fields<'_>) -> Result<MenuItemInput, AppError> {
        Ok(MenuItemInput {
            name: fields.text("name")?,
            description: fields.text("description")?,
            inventory: fields.integer("inventory")?,
            price: fields.number("price")?,
        })
    }
}

pub mod sql {
    pub const SELECT_ONE: &str = "
        SELECT * FROM MenuItem
        WHERE id = $menuItemId AND menu_id = $menuId";

    pub const SELECT_FOR_MENU: &str = "SELECT * FROM MenuItem WHERE menu_id = $menuId";

    pub const INSERT: &str = "
        INSERT INTO MenuItem (name, description, inventory, price, menu_id)
        VALUES ($name, $description, $inventory, $price, $menuId)";

    pub const UPDATE: &str = "
        UPDATE MenuItem
        SET name = $name,
            description = $description,
            inventory = $inventory,
            price = $price
        WHERE id = $menuItemId AND menu_id = $menuId";

    pub const DELETE: &str = "
        DELETE FROM MenuItem
        WHERE id = $menuItemId AND menu_id = $menuId";
}
