#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod cors;
pub mod error;
pub mod logging;
pub mod model;

pub use config::Config;

use config::{ConfigFairing, DatabaseFairing};
use cors::CorsFairing;
use logging::LoggerFairing;

/// Assemble the server: configuration, database connection, CORS, routes,
/// and the JSON error catchers.
pub fn build() -> Rocket<Build> {
    rocket::custom(config::figment())
        .attach(LoggerFairing)
        .attach(ConfigFairing)
        .attach(DatabaseFairing)
        .attach(CorsFairing)
        .mount("/", api::routes())
        .register("/", api::catchers())
}

/// A client connected to the configured test deployment.
#[cfg(test)]
async fn db_client() -> mongodb::Client {
    config::DbConfig::from_figment(&config::figment())
        .unwrap()
        .connect()
        .await
        .unwrap()
}

/// A fresh database name, so tests can run in parallel.
#[cfg(test)]
fn database() -> String {
    use rand::Rng;
    format!("test{}", rand::thread_rng().gen::<u32>())
}

/// The server as [`build`] assembles it, but using an existing client and
/// the given database.
#[cfg(test)]
async fn rocket_for_db(client: mongodb::Client, db_name: &str) -> Rocket<Build> {
    let db = client.database(db_name);
    model::mongodb::ensure_schema(&db).await.unwrap();

    rocket::custom(config::figment())
        .attach(ConfigFairing)
        .attach(CorsFairing)
        .mount("/", api::routes())
        .register("/", api::catchers())
        .manage(client)
        .manage(db)
}
