use super::model::{Device, HardwareRevision, Image, Index, Release};
use quick_xml::Reader;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexParseError {
    #[error("Malformed index XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed attribute in index XML: {0}")]
    Attribute(#[from] AttrError),

    #[error("Index XML has no root element")]
    MissingRoot,

    #[error("Index XML has content outside the root element")]
    ContentOutsideRoot,

    #[error("Index XML ended inside <{element}>")]
    UnexpectedEof { element: String },

    #[error("Failed to read index file {path}: {reason}")]
    Read { path: PathBuf, reason: String },
}

type XmlReader<'a> = Reader<&'a [u8]>;

/// An element whose start tag has been read but whose content has not.
struct Element<'a> {
    start: BytesStart<'a>,
    empty: bool,
}

impl Element<'_> {
    fn is(&self, tag: &[u8]) -> bool {
        self.start.name().as_ref() == tag
    }

    fn tag(&self) -> String {
        String::from_utf8_lossy(self.start.name().as_ref()).into_owned()
    }

    /// Missing attributes read as an empty string. Names are matched exactly.
    fn attribute(&self, name: &str) -> Result<String, IndexParseError> {
        Ok(match self.start.try_get_attribute(name)? {
            Some(attribute) => attribute.unescape_value()?.into_owned(),
            None => String::new(),
        })
    }

    /// Integer attributes that are missing or fail to parse read as 0 rather
    /// than failing the whole document.
    fn integer_attribute(&self, name: &str) -> Result<i64, IndexParseError> {
        Ok(self.attribute(name)?.trim().parse().unwrap_or(0))
    }
}

/// Parse the XML text of a firmware index.
///
/// Walks the document top down. Unknown elements, text, comments and CDATA
/// inside the root are skipped at every level. Only XML that is not well
/// formed is rejected, including anything but whitespace, comments and
/// processing instructions after the root element.
pub fn parse(xml: &str) -> Result<Index, IndexParseError> {
    let mut reader = Reader::from_str(xml);
    let mut index = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) if index.is_none() => {
                let root = Element { start, empty: false };
                index = Some(read_index(&mut reader, &root)?);
            }
            Event::Empty(start) if index.is_none() => {
                let root = Element { start, empty: true };
                index = Some(read_index(&mut reader, &root)?);
            }
            Event::Start(_) | Event::Empty(_) | Event::End(_) | Event::CData(_) => {
                return Err(IndexParseError::ContentOutsideRoot);
            }
            Event::Text(text) if !text.iter().all(u8::is_ascii_whitespace) => {
                return Err(IndexParseError::ContentOutsideRoot);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let index = index.ok_or(IndexParseError::MissingRoot)?;
    tracing::debug!(
        revision = %index.revision,
        devices = index.devices.len(),
        images = index.image_count(),
        "Parsed firmware index"
    );
    Ok(index)
}

pub fn parse_file(path: &Path) -> Result<Index, IndexParseError> {
    let xml = std::fs::read_to_string(path).map_err(|e| IndexParseError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse(&xml)
}

/// Reads up to the next child element of `parent`, or returns `None` once
/// `parent` is closed. Anything that is not an element is passed over.
fn next_child<'a>(
    reader: &mut XmlReader<'a>,
    parent: &Element<'_>,
) -> Result<Option<Element<'a>>, IndexParseError> {
    if parent.empty {
        return Ok(None);
    }
    loop {
        match reader.read_event()? {
            Event::Start(start) => return Ok(Some(Element { start, empty: false })),
            Event::Empty(start) => return Ok(Some(Element { start, empty: true })),
            Event::End(_) => return Ok(None),
            Event::Eof => {
                return Err(IndexParseError::UnexpectedEof {
                    element: parent.tag(),
                });
            }
            _ => {}
        }
    }
}

fn skip(reader: &mut XmlReader<'_>, element: &Element<'_>) -> Result<(), IndexParseError> {
    if !element.empty {
        reader.read_to_end(element.start.name())?;
    }
    Ok(())
}

fn read_index(reader: &mut XmlReader<'_>, element: &Element<'_>) -> Result<Index, IndexParseError> {
    let mut index = Index {
        revision: element.attribute("REVISION")?,
        devices: Vec::new(),
    };
    while let Some(child) = next_child(reader, element)? {
        if child.is(b"DEVICE") {
            index.devices.push(read_device(reader, &child)?);
        } else {
            skip(reader, &child)?;
        }
    }
    Ok(index)
}

fn read_device(reader: &mut XmlReader<'_>, element: &Element<'_>) -> Result<Device, IndexParseError> {
    let mut device = Device {
        id: element.attribute("ID")?,
        product_name: element.attribute("PRODUCTNAME")?,
        hardware_revisions: Vec::new(),
    };
    while let Some(child) = next_child(reader, element)? {
        if child.is(b"HARDWARE") {
            device.hardware_revisions.push(read_hardware(reader, &child)?);
        } else {
            skip(reader, &child)?;
        }
    }
    Ok(device)
}

fn read_hardware(
    reader: &mut XmlReader<'_>,
    element: &Element<'_>,
) -> Result<HardwareRevision, IndexParseError> {
    let mut hardware = HardwareRevision {
        revision: element.attribute("REVISION")?,
        releases: Vec::new(),
    };
    while let Some(child) = next_child(reader, element)? {
        if child.is(b"RELEASE") {
            hardware.releases.push(read_release(reader, &child)?);
        } else {
            skip(reader, &child)?;
        }
    }
    Ok(hardware)
}

fn read_release(reader: &mut XmlReader<'_>, element: &Element<'_>) -> Result<Release, IndexParseError> {
    let mut release = Release {
        channel: element.attribute("CHANNEL")?,
        date: element.attribute("DATE")?,
        http_host: element.attribute("HTTPHOST")?,
        url_path: element.attribute("URLPATH")?,
        revision: element.attribute("REVISION")?,
        images: Vec::new(),
    };
    while let Some(child) = next_child(reader, element)? {
        if child.is(b"IMAGE") {
            release.images.push(read_image(reader, &child)?);
        } else {
            skip(reader, &child)?;
        }
    }
    Ok(release)
}

fn read_image(reader: &mut XmlReader<'_>, element: &Element<'_>) -> Result<Image, IndexParseError> {
    let image = Image {
        filename: element.attribute("FILENAME")?,
        md5: element.attribute("MD5")?,
        length: element.integer_attribute("LENGTH")?,
        target: element.integer_attribute("TARGET")?,
        sub_id: element.integer_attribute("SUBID")?,
        nxh_version: element.attribute("NXH_VERSION")?,
        l_bud_version: element.attribute("L_BUD_VERSION")?,
        r_bud_version: element.attribute("R_BUD_VERSION")?,
        revision: element.attribute("REVISION")?,
        build_id: element.attribute("BUILD_ID")?,
    };
    // IMAGE has no children of interest.
    skip(reader, element)?;
    Ok(image)
}
