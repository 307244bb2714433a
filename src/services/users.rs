use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use log::{debug, error};

use crate::{
    db::users as db,
    models::{
        status::Status,
        user::{DeletedUser, User},
    },
    AppState,
};

fn logged(status: Status) -> Status {
    if status.code.is_server_error() {
        error!("{}", status);
    } else {
        debug!("{}", status);
    }
    status
}

/// Parses a `{name, password}` body. Both fields must be present and non-empty.
fn user_from_body(body: &[u8]) -> Result<User, Status> {
    let user: User = serde_json::from_slice(body).map_err(|why| {
        Status::bad_request(format!("Error getting user from context: {}", why))
    })?;

    for (field, value) in [("name", &user.name), ("password", &user.password)] {
        if value.is_empty() {
            return Err(Status::bad_request(format!(
                "Error getting user from context: field `{}` is required",
                field
            )));
        }
    }
    Ok(user)
}

#[get("/users")]
async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, Status> {
    let users = db::select_all_users(state.store.as_ref()).map_err(logged)?;
    Ok(HttpResponse::Ok().json(users))
}

#[post("/users")]
async fn create_user(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, Status> {
    let user = user_from_body(&body).map_err(logged)?;
    db::insert_new_user(state.store.as_ref(), &user).map_err(logged)?;
    Ok(HttpResponse::Ok().json(user))
}

#[get("/users/{name}")]
async fn get_user(
    state: web::Data<AppState>,
    name: web::Path<String>,
) -> Result<HttpResponse, Status> {
    let user = db::get_user_with_name(state.store.as_ref(), &name).map_err(logged)?;
    Ok(HttpResponse::Ok().json(user))
}

#[put("/users/{name}")]
async fn update_user(
    state: web::Data<AppState>,
    name: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, Status> {
    let name = name.into_inner();
    let user = user_from_body(&body).map_err(logged)?;
    if user.name != name {
        return Err(logged(Status::bad_request(format!(
            "{} cannot change the password of {}.",
            name, user.name
        ))));
    }

    db::update_user_password(state.store.as_ref(), &user).map_err(logged)?;
    Ok(HttpResponse::Ok().json(user))
}

/// Always answers 200; a failed delete is only logged.
#[delete("/users/{name}")]
async fn delete_user(state: web::Data<AppState>, name: web::Path<String>) -> impl Responder {
    let name = name.into_inner();
    if let Err(why) = db::delete_user(state.store.as_ref(), &name) {
        error!("{}", why);
    }
    HttpResponse::Ok().json(DeletedUser { name })
}
