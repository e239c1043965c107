//! Tag catalog
//!
//! Maps human-readable attribute keywords (e.g. `PatientName`) to DICOM tags
//! and reports whether each attribute holds one value or several.
//! - [`TagDescriptor`]: a resolved attribute
//! - [`TagCatalog`]: lookup by keyword or tag
//! - [`StandardTagCatalog`]: the catalog backed by the DICOM standard dictionary

pub mod tags;

use dicom_core::dictionary::DataDictionary;
use dicom_core::Tag;
use dicom_dictionary_std::StandardDataDictionary;
use log::warn;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Declared cardinality of an attribute's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueMultiplicity {
    /// VM=1, the attribute holds one scalar
    Single,
    /// Any other VM, rendered in full
    Multiple,
}

impl ValueMultiplicity {
    /// Returns whether this is VM=1
    pub fn is_single(&self) -> bool {
        matches!(self, ValueMultiplicity::Single)
    }
}

/// A resolved attribute: tag, display name and value multiplicity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagDescriptor {
    pub tag: Tag,
    pub name: String,
    pub multiplicity: ValueMultiplicity,
}

impl TagDescriptor {
    /// Creates a new TagDescriptor
    pub fn new(tag: Tag, name: impl Into<String>, multiplicity: ValueMultiplicity) -> Self {
        Self {
            tag,
            name: name.into(),
            multiplicity,
        }
    }
}

impl fmt::Display for TagDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:04X},{:04X})",
            self.name, self.tag.0, self.tag.1
        )
    }
}

/// Lookup of attributes by keyword or by tag
pub trait TagCatalog {
    /// Resolves a keyword, or a tag written as `(gggg,eeee)`, `gggg,eeee` or `ggggeeee`
    fn find_by_name(&self, name: &str) -> Option<TagDescriptor>;

    /// Resolves the descriptor of a known tag
    fn find_by_tag(&self, tag: Tag) -> Option<TagDescriptor>;

    /// Resolves the requested column names in order
    ///
    /// Unknown names are reported and dropped. Each resolved descriptor is
    /// paired with the name as it was requested.
    fn resolve_all(&self, names: &[String]) -> Vec<(String, TagDescriptor)> {
        names
            .iter()
            .filter_map(|name| match self.find_by_name(name) {
                Some(descriptor) => Some((name.clone(), descriptor)),
                None => {
                    warn!("Unable to locate tag: {}", name);
                    None
                }
            })
            .collect()
    }
}

/// Tag catalog backed by the DICOM standard data dictionary
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTagCatalog;

impl StandardTagCatalog {
    /// Creates the standard catalog
    pub fn new() -> Self {
        Self
    }

    fn descriptor(tag: Tag, name: &str) -> TagDescriptor {
        let multiplicity = if tags::is_multi_valued(tag) {
            ValueMultiplicity::Multiple
        } else {
            ValueMultiplicity::Single
        };
        TagDescriptor::new(tag, name, multiplicity)
    }
}

impl TagCatalog for StandardTagCatalog {
    fn find_by_name(&self, name: &str) -> Option<TagDescriptor> {
        let name = name.trim();
        if let Some(entry) = StandardDataDictionary.by_name(name) {
            return Some(Self::descriptor(entry.tag.inner(), entry.alias));
        }

        let tag = parse_tag(name)?;
        match StandardDataDictionary.by_tag(tag) {
            Some(entry) => Some(Self::descriptor(tag, entry.alias)),
            None => Some(Self::descriptor(tag, name)),
        }
    }

    fn find_by_tag(&self, tag: Tag) -> Option<TagDescriptor> {
        StandardDataDictionary
            .by_tag(tag)
            .map(|entry| Self::descriptor(tag, entry.alias))
    }
}

/// Parses a tag written in hexadecimal form
///
/// Accepts `(0010,0010)`, `0010,0010` and `00100010`.
pub fn parse_tag(text: &str) -> Option<Tag> {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| {
        Regex::new(r"^\(?([0-9A-Fa-f]{4}),?([0-9A-Fa-f]{4})\)?$").expect("Failed to compile regex")
    });

    let caps = re.captures(text.trim())?;
    let group = u16::from_str_radix(&caps[1], 16).ok()?;
    let element = u16::from_str_radix(&caps[2], 16).ok()?;
    Some(Tag(group, element))
}
