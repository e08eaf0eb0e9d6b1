use eyre::Result;
use fwmirror_lib::config::{Config, HttpConfig};
use md5::{Digest, Md5};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const RELEASE_PATH: &str = "/dd/sleepbuds3/";

/// One `IMAGE` entry of a generated index.
pub struct TestImage {
    pub filename: &'static str,
    pub md5: String,
}

impl TestImage {
    pub fn for_content(filename: &'static str, content: &[u8]) -> Self {
        Self {
            filename,
            md5: md5_hex(content),
        }
    }
}

pub fn md5_hex(content: &[u8]) -> String {
    hex::encode(Md5::digest(content))
}

/// Builds a single-device, single-release index whose release points at
/// `http_host` (host and port, no scheme).
pub fn index_xml(http_host: &str, images: &[TestImage]) -> String {
    let images = images
        .iter()
        .map(|image| {
            format!(
                r#"        <IMAGE FILENAME="{}" MD5="{}" LENGTH="0" TARGET="1" SUBID="0" NXH_VERSION="1.2.3" REVISION="r1" BUILD_ID="b1" />"#,
                image.filename, image.md5
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<INDEX REVISION="7">
  <DEVICE ID="0x0001" PRODUCTNAME="Sleepbuds">
    <HARDWARE REVISION="1">
      <RELEASE CHANNEL="production" DATE="2024-05-01" HTTPHOST="{http_host}" URLPATH="{RELEASE_PATH}" REVISION="3.0.1">
{images}
      </RELEASE>
    </HARDWARE>
  </DEVICE>
</INDEX>
"#
    )
}

/// Path an image of the generated index is mirrored to.
pub fn mirrored_path(output_dir: &Path, filename: &str) -> PathBuf {
    output_dir
        .join("production")
        .join("2024-05-01")
        .join("3.0.1")
        .join(filename)
}

/// Plain HTTP so a local mock server can stand in for the firmware host.
pub fn create_test_config(index_url: &str, output_dir: &Path) -> Config {
    Config {
        index_url: index_url.to_string(),
        output_dir: output_dir.to_path_buf(),
        http: HttpConfig {
            scheme: "http".to_string(),
            timeout_secs: 10,
            ..Default::default()
        },
    }
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
    pub output_dir: PathBuf,
}

/// Creates a scratch directory holding a JSON config for `index_url` whose
/// output directory lives next to it.
pub fn setup_test_environment(index_url: &str) -> Result<TestEnvironment> {
    let temp_dir = tempfile::tempdir()?;
    let output_dir = temp_dir.path().join("firmware_downloads");

    let config = create_test_config(index_url, &output_dir);
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    Ok(TestEnvironment {
        temp_dir,
        config_path,
        output_dir,
    })
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("fwmirror_lib=debug,fwmirror_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
