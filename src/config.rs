use log::{error, info};
use mongodb::{
    error::Error as DbError,
    options::{ClientOptions, Credential},
    Client as MongoClient,
};
use rocket::{
    fairing::{Fairing, Info, Kind},
    figment::{providers::Env, Error as FigmentError, Figment},
    Build, Rocket,
};
use serde::Deserialize;

use crate::model::mongodb::ensure_schema;

/// Deployment variables read directly from the environment, alongside the
/// usual `Rocket.toml` and `ROCKET_*` sources.
const RAW_ENV_KEYS: &[&str] = &["DB_URL", "DB_USER", "DB_PASSWORD", "DB_NAME"];

/// The configuration sources for the server: `Rocket.toml`, `ROCKET_*`
/// environment variables, then the raw `DB_*` variables.
pub fn figment() -> Figment {
    rocket::Config::figment().merge(Env::raw().only(RAW_ENV_KEYS).global())
}

/// Application configuration. This struct becomes managed state and can be
/// inspected by any endpoint or fairing.
#[derive(Debug, Deserialize)]
pub struct Config {
    // non-secrets
    #[serde(default = "default_cors_origin")]
    cors_origin: String,
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Config {
    /// Value of the `Access-Control-Allow-Origin` header on every response.
    pub fn cors_origin(&self) -> &str {
        &self.cors_origin
    }
}

/// A fairing that loads the application config and puts it in managed state.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// Configuration for the database.
#[derive(Debug, Deserialize)]
pub struct DbConfig {
    // non-secrets
    /// Host and optional port, or a full `mongodb://` connection string.
    db_url: String,
    #[serde(default = "default_db_name")]
    db_name: String,
    // secrets
    db_user: Option<String>,
    db_password: Option<String>,
}

fn default_db_name() -> String {
    "trivia".to_string()
}

impl DbConfig {
    /// Load the database config, rejecting settings that cannot form a login.
    pub fn from_figment(figment: &Figment) -> Result<Self, FigmentError> {
        let config = figment.extract::<Self>()?;
        if config.db_password.is_some() && config.db_user.is_none() {
            return Err(FigmentError::from(
                "`db_password` is set but `db_user` is not".to_string(),
            ));
        }
        Ok(config)
    }

    /// The connection string, without credentials.
    pub fn uri(&self) -> String {
        if self.db_url.contains("://") {
            self.db_url.clone()
        } else {
            format!("mongodb://{}", self.db_url)
        }
    }

    /// The name of the database holding the trivia collections.
    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    /// The credentials to log in with, if any were configured.
    pub fn credential(&self) -> Option<Credential> {
        let user = self.db_user.clone()?;
        Some(
            Credential::builder()
                .username(user)
                .password(self.db_password.clone())
                .build(),
        )
    }

    /// Full client options. Credentials are set directly rather than spliced
    /// into the connection string, so they need no escaping.
    pub async fn client_options(&self) -> Result<ClientOptions, DbError> {
        let mut options = ClientOptions::parse(self.uri()).await?;
        if let Some(credential) = self.credential() {
            options.credential = Some(credential);
        }
        options.app_name = Some("trivia-backend".to_string());
        Ok(options)
    }

    /// Connect to the configured deployment.
    pub async fn connect(&self) -> Result<MongoClient, DbError> {
        MongoClient::with_options(self.client_options().await?)
    }
}

/// A fairing that loads the MongoDB config, connects to the database,
/// prepares its schema, and places both a `Client` and a `Database` into
/// managed state.
pub struct DatabaseFairing;

#[rocket::async_trait]
impl Fairing for DatabaseFairing {
    fn info(&self) -> Info {
        Info {
            name: "MongoDB",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match DbConfig::from_figment(rocket.figment()) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load database config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        info!("Loaded database config, connecting...");
        // Construct the connection.
        let client = match config.connect().await {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to connect to database: {e}");
                return Err(rocket);
            }
        };
        let db = client.database(config.db_name());

        // Create indexes and counters before any request can arrive.
        if let Err(e) = ensure_schema(&db).await {
            error!("Failed to prepare database schema: {e}");
            return Err(rocket);
        }
        info!("...database connection online!");

        // Manage the state.
        rocket = rocket.manage(client).manage(db);
        Ok(rocket)
    }
}
