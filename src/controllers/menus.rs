use axum::http::StatusCode;

use super::{Controller, menu_id};
use crate::{
    pipeline::{
        Pipeline,
        stages::{FetchMany, FetchOne, Guard, Insert, Mutate, NoContent, Respond, Unchanged, Validate},
    },
    resources::{Menu, Resource, menu::sql},
};

const HAS_ITEMS: &str = "menu still has menu items";

pub struct Menus;

impl Controller for Menus {
    fn list() -> Pipeline {
        Pipeline::new("menus.list")
            .then(FetchMany::new(sql::SELECT_ALL, Menu::PLURAL))
            .then(Respond::<Menu>::many(StatusCode::OK))
    }

    fn show() -> Pipeline {
        Pipeline::new("menus.show")
            .resolve([menu_id()])
            .then(Respond::<Menu>::one(StatusCode::OK))
    }

    fn create() -> Pipeline {
        Pipeline::new("menus.create")
            .then(Validate::<Menu>::new())
            .then(Insert::new(sql::INSERT, "$menuId"))
            .then(FetchOne::new(sql::SELECT_ONE, Menu::SINGULAR))
            .then(Respond::<Menu>::one(StatusCode::CREATED))
    }

    fn update() -> Pipeline {
        Pipeline::new("menus.update")
            .resolve([menu_id()])
            .then(Validate::<Menu>::new())
            .then(Mutate::update(sql::UPDATE, Menu::SINGULAR))
            .then(FetchOne::new(sql::SELECT_ONE, Menu::SINGULAR))
            .then(Respond::<Menu>::one(StatusCode::OK))
    }

    /// The guard rejects early; the conditional delete catches an item that
    /// was added after the guard ran.
    fn delete() -> Pipeline {
        Pipeline::new("menus.delete")
            .resolve([menu_id()])
            .then(Guard::new(sql::FIRST_ITEM, "$menuId", HAS_ITEMS))
            .then(Mutate::delete(sql::DELETE_IF_EMPTY, Unchanged::Conflict(HAS_ITEMS)))
            .then(NoContent)
    }
}
