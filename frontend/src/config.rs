use gloo_console::{error, info};
use mapty_lib::config::Config;

const CONFIG_JSON: &str = include_str!("../mapty.json");

pub fn load() -> Config {
    match serde_json::from_str::<Config>(CONFIG_JSON) {
        Ok(config) => {
            info!(format!("Loaded config, zoom {}", config.map.zoom));
            config
        }
        Err(err) => {
            error!(format!("Invalid mapty.json, using defaults: {err}"));
            Config::default()
        }
    }
}
