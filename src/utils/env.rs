// src/utils/env.rs
use log::debug;

/// Load variables from a local .env file if one exists. Missing files are
/// normal in deployed environments.
pub fn load_env() {
    match dotenv::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(_) => debug!("No .env file found, using process environment"),
    }
}
