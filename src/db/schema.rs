use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::info;

pub const CREATE_EMPLOYEE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS Employee (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        position TEXT NOT NULL,
        wage REAL NOT NULL,
        is_current_employee BOOLEAN NOT NULL DEFAULT 1
    )";

pub const CREATE_TIMESHEET_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS Timesheet (
        id INTEGER PRIMARY KEY,
        hours REAL NOT NULL,
        rate REAL NOT NULL,
        date INTEGER NOT NULL,
        employee_id INTEGER NOT NULL,
        FOREIGN KEY(employee_id) REFERENCES Employee(id)
    )";

pub const CREATE_MENU_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS Menu (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL
    )";

pub const CREATE_MENU_ITEM_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS MenuItem (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        inventory INTEGER NOT NULL,
        price REAL NOT NULL,
        menu_id INTEGER NOT NULL,
        FOREIGN KEY(menu_id) REFERENCES Menu(id)
    )";

/// Parents before children so the foreign keys resolve.
const TABLES: [&str; 4] = [
    CREATE_EMPLOYEE_TABLE,
    CREATE_TIMESHEET_TABLE,
    CREATE_MENU_TABLE,
    CREATE_MENU_ITEM_TABLE,
];

pub async fn bootstrap(db: &DatabaseConnection) -> anyhow::Result<()> {
    info!("creating tables if missing");
    for ddl in TABLES {
        db.execute_unprepared(ddl).await?;
    }
    Ok(())
}
