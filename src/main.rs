use std::env;

use clap::Parser;
use config::Config;
use dotenvy::dotenv;

use infirmary_desk::backend::HttpBackend;
use infirmary_desk::cli::{CliArgs, run};
use infirmary_desk::models::config::ClientConfig;

fn main() {
    let args = CliArgs::parse();

    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let client_config = match settings.try_deserialize::<ClientConfig>() {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {}", err);
            std::process::exit(1);
        }
    };

    let backend = match HttpBackend::new(&client_config) {
        Ok(backend) => backend,
        Err(err) => {
            log::error!("Failed to build the HTTP client: {err}");
            std::process::exit(1);
        }
    };

    if let (Some(username), Some(password)) = (&client_config.username, &client_config.password) {
        if let Err(err) = backend.sign_in(username, password) {
            log::error!("Failed to sign in as {username}: {err}");
            std::process::exit(1);
        }
    }

    if let Err(err) = run(&client_config, &backend, args.command) {
        log::error!("{err}");
        std::process::exit(1);
    }
}
