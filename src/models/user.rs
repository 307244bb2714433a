use serde::{Deserialize, Serialize};

/// A row of the `users` table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct DeletedUser {
    pub name: String,
}
