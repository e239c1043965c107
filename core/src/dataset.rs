//! Dataset loading
//!
//! Wraps the dicom-rs parser so the rest of the crate only sees
//! [`Dataset::value`] lookups returning an [`ElementValue`].
//! Pixel data is never read.

use crate::error::Result;
use dicom_core::value::PrimitiveValue;
use dicom_core::Tag;
use dicom_dictionary_std::tags;
use dicom_object::file::{OpenFileOptions, ReadPreamble};
use dicom_object::mem::InMemElement;
use dicom_object::DefaultDicomObject;
use std::io::{Cursor, Read};
use std::path::Path;

/// Size of the DICOM file preamble preceding the `DICM` magic
const PREAMBLE_LEN: usize = 128;

/// First scalar of an element's value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarValue {
    /// Any binary integer representation
    Int(i64),
    /// First component of a textual value
    Text(String),
    /// Anything else (floats, dates, bytes, sequences, empty values)
    Other,
}

/// A value looked up from a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementValue {
    /// First underlying scalar
    pub first: ScalarValue,
    /// Default string form of the whole value, all components included
    pub text: String,
}

impl ElementValue {
    /// Creates a value holding a single string
    pub fn from_text(text: &str) -> Self {
        let text = trim_padding(text).to_string();
        Self {
            first: ScalarValue::Text(text.clone()),
            text,
        }
    }

    fn from_element(elem: &InMemElement) -> Self {
        if let Some(primitive) = elem.value().primitive() {
            return Self {
                first: first_scalar(primitive),
                text: trim_padding(&primitive.to_str()).to_string(),
            };
        }

        let text = match elem.items() {
            Some(items) => format!("Sequence of {} item(s)", items.len()),
            None => "Encapsulated pixel data".to_string(),
        };
        Self {
            first: ScalarValue::Other,
            text,
        }
    }
}

/// Strips trailing DICOM padding (spaces and NUL bytes)
fn trim_padding(s: &str) -> &str {
    s.trim_end_matches([' ', '\0'])
}

fn first_scalar(value: &PrimitiveValue) -> ScalarValue {
    let int = match value {
        PrimitiveValue::Str(s) => return ScalarValue::Text(trim_padding(s).to_string()),
        PrimitiveValue::Strs(strs) => {
            return strs
                .first()
                .map(|s| ScalarValue::Text(trim_padding(s).to_string()))
                .unwrap_or(ScalarValue::Other)
        }
        PrimitiveValue::I16(v) => v.first().map(|&n| i64::from(n)),
        PrimitiveValue::U16(v) => v.first().map(|&n| i64::from(n)),
        PrimitiveValue::I32(v) => v.first().map(|&n| i64::from(n)),
        PrimitiveValue::U32(v) => v.first().map(|&n| i64::from(n)),
        PrimitiveValue::I64(v) => v.first().copied(),
        PrimitiveValue::U64(v) => v.first().and_then(|&n| i64::try_from(n).ok()),
        _ => None,
    };
    int.map(ScalarValue::Int).unwrap_or(ScalarValue::Other)
}

/// A parsed DICOM file, queryable by tag
#[derive(Debug, Clone)]
pub struct Dataset {
    object: DefaultDicomObject,
}

impl Dataset {
    /// Wraps an already-parsed DICOM object
    pub fn new(object: DefaultDicomObject) -> Self {
        Self { object }
    }

    /// Opens a DICOM file from disk, stopping before the pixel data
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid DICOM
    pub fn open_file(path: &Path) -> Result<Self> {
        let object = OpenFileOptions::new()
            .read_until(tags::PIXEL_DATA)
            .open_file(path)?;
        Ok(Self::new(object))
    }

    /// Parses a DICOM stream, with or without its preamble, stopping before the pixel data
    ///
    /// Only the bytes up to the pixel data are pulled from `reader`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot be read or is not valid DICOM
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut head = Vec::with_capacity(PREAMBLE_LEN + 4);
        (&mut reader)
            .take((PREAMBLE_LEN + 4) as u64)
            .read_to_end(&mut head)?;
        if has_preamble(&head) {
            head.drain(..PREAMBLE_LEN);
        }

        let object = OpenFileOptions::new()
            .read_until(tags::PIXEL_DATA)
            .read_preamble(ReadPreamble::Never)
            .from_reader(Cursor::new(head).chain(reader))?;
        Ok(Self::new(object))
    }

    /// Looks up a tag, including file meta group attributes
    ///
    /// Returns `None` if the attribute is not present
    pub fn value(&self, tag: Tag) -> Option<ElementValue> {
        if tag.group() == 0x0002 {
            return self.meta_value(tag);
        }
        self.object
            .element(tag)
            .ok()
            .map(ElementValue::from_element)
    }

    /// Tags of every attribute in the dataset body, in file order
    pub fn tags(&self) -> Vec<Tag> {
        self.object.iter().map(|elem| elem.header().tag).collect()
    }

    fn meta_value(&self, tag: Tag) -> Option<ElementValue> {
        let meta = self.object.meta();
        let text = match tag {
            tags::FILE_META_INFORMATION_GROUP_LENGTH => {
                let length = meta.information_group_length;
                return Some(ElementValue {
                    first: ScalarValue::Int(i64::from(length)),
                    text: length.to_string(),
                });
            }
            tags::FILE_META_INFORMATION_VERSION => {
                return Some(ElementValue {
                    first: ScalarValue::Other,
                    text: join_bytes(&meta.information_version),
                });
            }
            tags::PRIVATE_INFORMATION => {
                return meta.private_information.as_deref().map(|bytes| ElementValue {
                    first: ScalarValue::Other,
                    text: join_bytes(bytes),
                });
            }
            tags::TRANSFER_SYNTAX_UID => meta.transfer_syntax().to_string(),
            tags::MEDIA_STORAGE_SOP_CLASS_UID => meta.media_storage_sop_class_uid().to_string(),
            tags::MEDIA_STORAGE_SOP_INSTANCE_UID => {
                meta.media_storage_sop_instance_uid().to_string()
            }
            tags::IMPLEMENTATION_CLASS_UID => meta.implementation_class_uid().to_string(),
            tags::IMPLEMENTATION_VERSION_NAME => meta.implementation_version_name.clone()?,
            tags::SOURCE_APPLICATION_ENTITY_TITLE => {
                meta.source_application_entity_title.clone()?
            }
            tags::PRIVATE_INFORMATION_CREATOR_UID => {
                meta.private_information_creator_uid.clone()?
            }
            _ => return None,
        };
        Some(ElementValue::from_text(&text))
    }
}

/// Renders binary values the way multi-valued numbers are printed
fn join_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join("\\")
}

/// Checks for a 128-byte preamble followed by the `DICM` magic
fn has_preamble(data: &[u8]) -> bool {
    data.len() >= PREAMBLE_LEN + 4 && &data[PREAMBLE_LEN..PREAMBLE_LEN + 4] == b"DICM"
}
