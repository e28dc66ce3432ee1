use axum::http::StatusCode;

use super::{Controller, menu_id, menu_item_id};
use crate::{
    pipeline::{
        Pipeline,
        stages::{FetchMany, FetchOne, Insert, Mutate, NoContent, Respond, Unchanged, Validate},
    },
    resources::{MenuItem, Resource, menu_item::sql},
};

pub struct MenuItems;

impl Controller for MenuItems {
    fn list() -> Pipeline {
        Pipeline::new("menu-items.list")
            .resolve([menu_id()])
            .then(FetchMany::new(sql::SELECT_FOR_MENU, MenuItem::PLURAL))
            .then(Respond::<MenuItem>::many(StatusCode::OK))
    }

    fn show() -> Pipeline {
        Pipeline::new("menu-items.show")
            .resolve([menu_id(), menu_item_id()])
            .then(Respond::<MenuItem>::one(StatusCode::OK))
    }

    fn create() -> Pipeline {
        Pipeline::new("menu-items.create")
            .resolve([menu_id()])
            .then(Validate::<MenuItem>::new())
            .then(Insert::new(sql::INSERT, "$menuItemId"))
            .then(FetchOne::new(sql::SELECT_ONE, MenuItem::SINGULAR))
            .then(Respond::<MenuItem>::one(StatusCode::CREATED))
    }

    fn update() -> Pipeline {
        Pipeline::new("menu-items.update")
            .resolve([menu_id(), menu_item_id()])
            .then(Validate::<MenuItem>::new())
            .then(Mutate::update(sql::UPDATE, MenuItem::SINGULAR))
            .then(FetchOne::new(sql::SELECT_ONE, MenuItem::SINGULAR))
            .then(Respond::<MenuItem>::one(StatusCode::OK))
    }

    fn delete() -> Pipeline {
        Pipeline::new("menu-items.delete")
            .resolve([menu_id(), menu_item_id()])
            .then(Mutate::delete(
                sql::DELETE,
                Unchanged::NotFound(MenuItem::SINGULAR),
            ))
            .then(NoContent)
    }
}
