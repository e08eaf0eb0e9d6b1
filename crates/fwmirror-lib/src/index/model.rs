//! Typed view of the vendor firmware index.
//!
//! The index is a four level hierarchy:
//! `INDEX` → `DEVICE` → `HARDWARE` → `RELEASE` → `IMAGE`. Every entity is a
//! plain data aggregate; nothing here performs I/O.

/// Root of the firmware catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    pub revision: String,
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Device {
    pub id: String,
    pub product_name: String,
    pub hardware_revisions: Vec<HardwareRevision>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HardwareRevision {
    pub revision: String,
    pub releases: Vec<Release>,
}

/// One published firmware version for a hardware revision.
///
/// `channel`, `date` and `revision` form the directory the release's images
/// are mirrored into; `http_host` and `url_path` locate them remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Release {
    pub channel: String,
    pub date: String,
    pub http_host: String,
    pub url_path: String,
    pub revision: String,
    pub images: Vec<Image>,
}

/// A single binary within a release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub filename: String,
    /// Expected MD5 digest, hex encoded. Case is not significant.
    pub md5: String,
    pub length: i64,
    pub target: i64,
    pub sub_id: i64,
    pub nxh_version: String,
    pub l_bud_version: String,
    pub r_bud_version: String,
    pub revision: String,
    pub build_id: String,
}

impl Index {
    /// An index without devices is what both an empty catalog and a catalog
    /// with an unexpected root layout look like, so callers treat it as a
    /// failed retrieval.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Every release in traversal order, paired with the device it belongs to.
    pub fn releases(&self) -> impl Iterator<Item = (&Device, &HardwareRevision, &Release)> {
        self.devices.iter().flat_map(|device| {
            device.hardware_revisions.iter().flat_map(move |hardware| {
                hardware
                    .releases
                    .iter()
                    .map(move |release| (device, hardware, release))
            })
        })
    }

    pub fn image_count(&self) -> usize {
        self.releases()
            .map(|(_, _, release)| release.images.len())
            .sum()
    }
}
