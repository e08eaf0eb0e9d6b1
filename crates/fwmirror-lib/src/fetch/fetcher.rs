use super::layout::ImageTarget;
use super::observer::FetchObserver;
use super::transport::Transport;
use super::types::{FetchSummary, ImageOutcome, ImageReport};
use crate::index::{Image, Index, Release};
use crate::verification::{CHUNK_SIZE, VerificationError, verify_file};
use eyre::{Result, WrapErr};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Root of the `<channel>/<date>/<revision>/<filename>` tree.
    pub output_dir: PathBuf,
    pub scheme: String,
}

/// Mirrors the images of an index into a local directory tree, one image at
/// a time.
pub struct Fetcher<T, O> {
    transport: T,
    observer: O,
    options: FetchOptions,
}

impl<T: Transport, O: FetchObserver> Fetcher<T, O> {
    pub fn new(transport: T, observer: O, options: FetchOptions) -> Self {
        Self {
            transport,
            observer,
            options,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Visits every image in document order. A failing image is recorded in
    /// the summary and the walk carries on with the next one.
    pub async fn fetch_all(&mut self, index: &Index) -> FetchSummary {
        self.observer.index_started(index);

        let mut summary = FetchSummary::default();
        for device in &index.devices {
            self.observer.device(device);
            for hardware in &device.hardware_revisions {
                self.observer.hardware_revision(hardware);
                for release in &hardware.releases {
                    self.observer.release(release);
                    for image in &release.images {
                        summary.push(self.fetch_image(release, image).await);
                    }
                }
            }
        }

        self.observer.index_finished(&summary);
        summary
    }

    pub async fn fetch_image(&mut self, release: &Release, image: &Image) -> ImageReport {
        let target = ImageTarget::new(
            &self.options.scheme,
            &self.options.output_dir,
            release,
            image,
        );

        let outcome = match self.try_fetch_image(&target).await {
            Ok(outcome) => outcome,
            Err(err) => ImageOutcome::Failed {
                reason: format!("{:#}", err),
            },
        };
        self.observer.image_finished(&target, &outcome);

        ImageReport {
            url: target.url,
            destination: target.destination,
            outcome,
        }
    }

    async fn try_fetch_image(&mut self, target: &ImageTarget<'_>) -> Result<ImageOutcome> {
        let output_path = &target.destination;

        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .wrap_err_with(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        if tokio::fs::try_exists(output_path).await.unwrap_or(false) {
            self.observer.checking(target);
            match verify_file(output_path, &target.image.md5).await {
                Ok(()) => {
                    debug!(output = %output_path.display(), "File exists with matching digest, skipping download");
                    return Ok(ImageOutcome::AlreadySatisfied);
                }
                Err(err) => {
                    info!(output = %output_path.display(), "File exists with incorrect digest, deleting: {}", err);
                    tokio::fs::remove_file(output_path).await.wrap_err_with(|| {
                        format!(
                            "Failed to delete file with incorrect digest: {}",
                            output_path.display()
                        )
                    })?;
                }
            }
        }

        self.observer.downloading(target);
        if let Err(err) = self.download(target).await {
            remove_partial_file(output_path).await;
            return Err(err);
        }

        match verify_file(output_path, &target.image.md5).await {
            Ok(()) => Ok(ImageOutcome::Verified),
            Err(VerificationError::VerificationFailed { expected, actual }) => {
                Ok(ImageOutcome::DigestMismatch { expected, actual })
            }
            Err(err) => Err(eyre::Report::new(err)
                .wrap_err(format!("Failed to verify {}", output_path.display()))),
        }
    }

    /// Streams the response body straight into the final path.
    async fn download(&mut self, target: &ImageTarget<'_>) -> Result<()> {
        let response = self.transport.get(&target.url).await?;

        let file = tokio::fs::File::create(&target.destination)
            .await
            .wrap_err_with(|| {
                format!(
                    "Failed to create output file: {}",
                    target.destination.display()
                )
            })?;
        let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);

        let total = response.content_length;
        let mut received: u64 = 0;
        let mut body = response.body;
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            writer
                .write_all(&chunk)
                .await
                .wrap_err_with(|| format!("Failed to write to {}", target.destination.display()))?;
            received += chunk.len() as u64;
            self.observer.progress(target, received, total);
        }

        writer
            .flush()
            .await
            .wrap_err_with(|| format!("Failed to flush {}", target.destination.display()))?;
        Ok(())
    }
}

async fn remove_partial_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(output = %path.display(), "Removed partially downloaded file"),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => warn!(output = %path.display(), "Failed to remove partially downloaded file: {}", err),
    }
}
