use crate::index::{Image, Release};
use std::path::{Path, PathBuf};

/// Where one image comes from and where it lands.
#[derive(Debug, Clone)]
pub struct ImageTarget<'a> {
    pub release: &'a Release,
    pub image: &'a Image,
    pub url: String,
    pub destination: PathBuf,
}

impl<'a> ImageTarget<'a> {
    pub fn new(scheme: &str, base_dir: &Path, release: &'a Release, image: &'a Image) -> Self {
        Self {
            release,
            image,
            url: image_url(scheme, release, image),
            destination: destination_path(base_dir, release, image),
        }
    }
}

/// `scheme://host` followed by the release path and the file name, joined
/// verbatim. `url_path` is expected to carry its own slashes.
pub fn image_url(scheme: &str, release: &Release, image: &Image) -> String {
    format!(
        "{}://{}{}{}",
        scheme, release.http_host, release.url_path, image.filename
    )
}

/// `<base_dir>/<channel>/<date>/<release revision>/<filename>`.
pub fn destination_path(base_dir: &Path, release: &Release, image: &Image) -> PathBuf {
    base_dir
        .join(&release.channel)
        .join(&release.date)
        .join(&release.revision)
        .join(&image.filename)
}
