use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use std::path::Path;

use planhive_application::error::{AppError, AppResult};
use planhive_application::infrastructure_config::Config;

pub fn load_config() -> AppResult<Config> {
    let default_config = Config::default();
    let mut figment = Figment::from(Serialized::defaults(default_config));

    if Path::new("config.toml").exists() {
        figment = figment.merge(Toml::file("config.toml"));
    }

    if Path::new("config.json").exists() {
        figment = figment.merge(Json::file("config.json"));
    }

    let config: Config = figment
        .merge(Env::prefixed("PLANHIVE_").split("__"))
        .extract()
        .map_err(|e| AppError::ConfigError {
            message: format!("Failed to load configuration: {e}"),
        })?;

    config.validate()?;
    Ok(config)
}
