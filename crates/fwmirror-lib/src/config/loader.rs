use super::Config;
use crate::error::FwMirrorError;
use config::Config as ConfigBuilder;

/// Loads and validates the configuration file, falling back to built-in
/// defaults when no file is given. Fields missing from the file keep their
/// defaults.
pub fn load_config(config_path: Option<&str>) -> Result<Config, FwMirrorError> {
    let app_config = match config_path {
        Some(config_path) => {
            tracing::debug!("Loading configuration from {}", config_path);
            ConfigBuilder::builder()
                .add_source(config::File::with_name(config_path))
                .build()?
                .try_deserialize::<Config>()?
        }
        None => Config::default(),
    };

    app_config.validate()?;
    Ok(app_config)
}
