use rusqlite::types::Value;

use super::{Row, Store, StoreError};
use crate::models::{status::Status, user::User};

pub const TABLE_NAME: &str = "users";

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS users (
        name VARCHAR(255) PRIMARY KEY,
        password VARCHAR(255) NOT NULL
    );";
const SELECT_ALL: &str = "SELECT name, password FROM users";
const SELECT_ONE: &str = "SELECT name, password FROM users WHERE name = ?";
const INSERT: &str = "INSERT INTO users (name, password) VALUES (?, ?)";
const UPDATE_PASSWORD: &str = "UPDATE users SET password = ? WHERE name = ?";
const DELETE: &str = "DELETE FROM users WHERE name = ?";

/// Builds the 500 answer for a failed store call, choosing the message by
/// whether the statement failed to prepare or to run.
fn store_status(why: StoreError, preparing: &str, running: &str) -> Status {
    let action = match why {
        StoreError::Prepare(_) => preparing,
        _ => running,
    };
    Status::internal(format!(
        "Error {} the database table {}: {}",
        action, TABLE_NAME, why
    ))
}

fn decode_user(row: &Row) -> Result<User, String> {
    match row.as_slice() {
        [Value::Text(name), Value::Text(password)] => Ok(User {
            name: name.clone(),
            password: password.clone(),
        }),
        [name, password] => Err(format!(
            "unsupported column types {:?} and {:?}, expected text",
            name.data_type(),
            password.data_type()
        )),
        _ => Err(format!("expected 2 columns, got {}", row.len())),
    }
}

pub fn create_users_table(store: &dyn Store) -> Result<(), StoreError> {
    store.execute(CREATE_TABLE, &[])?;
    Ok(())
}

/// Every user in storage order. A single undecodable row fails the listing.
pub fn select_all_users(store: &dyn Store) -> Result<Vec<User>, Status> {
    let rows = store.query(SELECT_ALL, &[]).map_err(|why| {
        store_status(why, "selecting all users from", "selecting all users from")
    })?;

    rows.iter()
        .map(decode_user)
        .collect::<Result<Vec<User>, String>>()
        .map_err(|why| {
            Status::internal(format!(
                "Error scanning all users from the database table {}: {}",
                TABLE_NAME, why
            ))
        })
}

pub fn insert_new_user(store: &dyn Store, user: &User) -> Result<(), Status> {
    store
        .execute(INSERT, &[user.name.as_str(), user.password.as_str()])
        .map_err(|why| store_status(why, "preparing to insert user to", "inserting user to"))?;
    Ok(())
}

/// The single user named `name`. Zero or several matches are both treated
/// as store inconsistencies.
pub fn get_user_with_name(store: &dyn Store, name: &str) -> Result<User, Status> {
    let rows = store
        .query(SELECT_ONE, &[name])
        .map_err(|why| store_status(why, "selecting an user from", "selecting an user from"))?;

    let row = match rows.as_slice() {
        [row] => row,
        _ => {
            return Err(Status::internal(format!(
                "Error selecting an user from the database table {}: expected 1 row, found {}",
                TABLE_NAME,
                rows.len()
            )))
        }
    };

    decode_user(row).map_err(|why| {
        Status::internal(format!(
            "Error scanning an user from the database table {}: {}",
            TABLE_NAME, why
        ))
    })
}

/// Sets the password of `user.name`. Succeeds without touching anything when
/// no such user exists.
pub fn update_user_password(store: &dyn Store, user: &User) -> Result<(), Status> {
    store
        .execute(UPDATE_PASSWORD, &[user.password.as_str(), user.name.as_str()])
        .map_err(|why| {
            store_status(
                why,
                "preparing to update user password to",
                "updating user password to",
            )
        })?;
    Ok(())
}

pub fn delete_user(store: &dyn Store, name: &str) -> Result<(), Status> {
    store
        .execute(DELETE, &[name])
        .map_err(|why| store_status(why, "preparing to delete user from", "deleting user from"))?;
    Ok(())
}
