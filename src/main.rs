use std::{env, error::Error, process, sync::Arc};

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};

use crate::{
    config::Config,
    db::{users::create_users_table, SqliteStore, Store},
};

mod config;
mod db;
mod models;
mod services;

pub struct AppState {
    pub store: Arc<dyn Store>,
}

fn prepare_state(config: &Config) -> Result<web::Data<AppState>, Box<dyn Error>> {
    let store = SqliteStore::open(&config.database_url)?;
    create_users_table(&store)?;
    Ok(web::Data::new(AppState {
        store: Arc::new(store),
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    pretty_env_logger::formatted_builder()
        .parse_filters(&env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned()))
        .init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(why) => {
            error!("{}", why);
            process::exit(1);
        }
    };
    let state = match prepare_state(&config) {
        Ok(s) => s,
        Err(why) => {
            error!("Error preparing the database: {}", why);
            process::exit(1);
        }
    };

    info!("Listening on port {}", config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(services::configure)
    })
    .bind(config.bind_address())?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::users::select_all_users;

    fn config(database_url: &str) -> Config {
        Config {
            port: 8080,
            database_url: database_url.to_owned(),
        }
    }

    #[test]
    fn unreachable_database_stops_startup() {
        let result = prepare_state(&config("/nonexistent-dir/for/sure/users.db"));
        let why = result.err().unwrap();
        assert!(why.to_string().starts_with("unable to open database: "));
    }

    #[test]
    fn startup_creates_the_users_table() {
        let state = prepare_state(&config(":memory:")).unwrap_or_else(|why| panic!("{}", why));
        assert!(select_all_users(state.store.as_ref()).unwrap().is_empty());
    }
}
