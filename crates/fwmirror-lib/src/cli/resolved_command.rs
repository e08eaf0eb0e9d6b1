use crate::cli::args::Command;
use crate::cli::params::{IndexSource, MirrorParams};
use crate::config::load_config;
use crate::error::FwMirrorError;
use std::path::PathBuf;

/// Merges CLI arguments over the configuration file and built-in defaults.
pub fn resolve_command(command: Command) -> Result<MirrorParams, FwMirrorError> {
    let Command {
        config_path,
        index,
        output_dir,
    } = command;

    let app_config = load_config(config_path.as_deref())?;

    let index = index.unwrap_or(app_config.index_url);
    if index.trim().is_empty() {
        return Err(FwMirrorError::CliArgumentValidation {
            details: "Index source must not be empty.".to_string(),
        });
    }

    let output_dir = output_dir
        .map(PathBuf::from)
        .unwrap_or(app_config.output_dir);
    if output_dir.as_os_str().is_empty() {
        return Err(FwMirrorError::CliArgumentValidation {
            details: "Output directory must not be empty.".to_string(),
        });
    }

    Ok(MirrorParams {
        index_source: IndexSource::parse(&index),
        output_dir,
        http: app_config.http,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_INDEX_URL, DEFAULT_OUTPUT_DIR};

    #[test]
    fn test_defaults() {
        let params = resolve_command(Command {
            config_path: None,
            index: None,
            output_dir: None,
        })
        .unwrap();

        assert_eq!(params.index_source, IndexSource::parse(DEFAULT_INDEX_URL));
        assert_eq!(params.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(params.http.scheme, "https");
    }

    #[test]
    fn test_arguments_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("fwmirror.yaml");
        std::fs::write(
            &config_path,
            "index_url: https://config.example.com/index.xml\noutput_dir: from-config\nhttp:\n  user_agent: Mirror/2.0\n",
        )
        .unwrap();

        let from_config = resolve_command(Command {
            config_path: Some(config_path.to_str().unwrap().to_string()),
            index: None,
            output_dir: None,
        })
        .unwrap();
        assert_eq!(
            from_config.index_source.to_string(),
            "https://config.example.com/index.xml"
        );
        assert_eq!(from_config.output_dir, PathBuf::from("from-config"));
        assert_eq!(from_config.http.user_agent, "Mirror/2.0");

        let overridden = resolve_command(Command {
            config_path: Some(config_path.to_str().unwrap().to_string()),
            index: Some("local-index.xml".to_string()),
            output_dir: Some("from-cli".to_string()),
        })
        .unwrap();
        assert_eq!(
            overridden.index_source,
            IndexSource::File(PathBuf::from("local-index.xml"))
        );
        assert_eq!(overridden.output_dir, PathBuf::from("from-cli"));
    }

    #[test]
    fn test_empty_output_dir_is_rejected() {
        let result = resolve_command(Command {
            config_path: None,
            index: None,
            output_dir: Some(String::new()),
        });

        assert!(matches!(
            result,
            Err(FwMirrorError::CliArgumentValidation { .. })
        ));
    }
}
