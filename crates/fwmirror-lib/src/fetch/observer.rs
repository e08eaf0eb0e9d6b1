use super::layout::ImageTarget;
use super::types::{FetchSummary, ImageOutcome};
use crate::index::{Device, HardwareRevision, Index, Release};
use tracing::{info, trace, warn};

/// Receives status updates while a [`Fetcher`](super::Fetcher) walks an index.
///
/// All methods default to doing nothing.
pub trait FetchObserver {
    fn index_started(&mut self, _index: &Index) {}

    fn device(&mut self, _device: &Device) {}

    fn hardware_revision(&mut self, _hardware: &HardwareRevision) {}

    fn release(&mut self, _release: &Release) {}

    /// An existing file is about to be checked against the expected digest.
    fn checking(&mut self, _target: &ImageTarget<'_>) {}

    fn downloading(&mut self, _target: &ImageTarget<'_>) {}

    fn progress(&mut self, _target: &ImageTarget<'_>, _received: u64, _total: Option<u64>) {}

    fn image_finished(&mut self, _target: &ImageTarget<'_>, _outcome: &ImageOutcome) {}

    fn index_finished(&mut self, _summary: &FetchSummary) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl FetchObserver for NoopObserver {}

/// Reports progress through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver {
    last_percent: Option<u64>,
}

impl FetchObserver for TracingObserver {
    fn index_started(&mut self, index: &Index) {
        info!(
            revision = %index.revision,
            devices = index.devices.len(),
            images = index.image_count(),
            "Starting firmware download"
        );
    }

    fn device(&mut self, device: &Device) {
        info!(id = %device.id, product = %device.product_name, "Device");
    }

    fn hardware_revision(&mut self, hardware: &HardwareRevision) {
        info!(revision = %hardware.revision, "Hardware revision");
    }

    fn release(&mut self, release: &Release) {
        info!(
            channel = %release.channel,
            date = %release.date,
            version = %release.revision,
            "Release"
        );
    }

    fn checking(&mut self, target: &ImageTarget<'_>) {
        tracing::debug!(file = %target.image.filename, output = %target.destination.display(), "Checking existing file");
    }

    fn downloading(&mut self, target: &ImageTarget<'_>) {
        self.last_percent = None;
        info!(
            file = %target.image.filename,
            url = %target.url,
            output = %target.destination.display(),
            expected_digest = %target.image.md5,
            "Downloading"
        );
    }

    fn progress(&mut self, target: &ImageTarget<'_>, received: u64, total: Option<u64>) {
        let Some(total) = total.filter(|total| *total > 0) else {
            return;
        };
        let percent = received.saturating_mul(100) / total;
        if self.last_percent != Some(percent) {
            self.last_percent = Some(percent);
            trace!(file = %target.image.filename, received, total, "Progress: {}%", percent);
        }
    }

    fn image_finished(&mut self, target: &ImageTarget<'_>, outcome: &ImageOutcome) {
        let file = &target.image.filename;
        match outcome {
            ImageOutcome::AlreadySatisfied => {
                info!(file = %file, "Already downloaded (MD5 valid)")
            }
            ImageOutcome::Verified => {
                info!(file = %file, "Downloaded and verified")
            }
            ImageOutcome::DigestMismatch { expected, actual } => {
                warn!(file = %file, expected = %expected, calculated = %actual, "MD5 validation failed")
            }
            ImageOutcome::Failed { reason } => {
                warn!(file = %file, url = %target.url, "Download failed: {}", reason)
            }
        }
    }

    fn index_finished(&mut self, summary: &FetchSummary) {
        info!(
            total = summary.total(),
            already_satisfied = summary.already_satisfied(),
            verified = summary.verified(),
            digest_mismatches = summary.digest_mismatches(),
            failed = summary.failed(),
            "Download completed"
        );
    }
}
