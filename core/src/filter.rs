use crate::catalog::{TagCatalog, TagDescriptor};
use crate::dataset::Dataset;
use crate::error::{DicomTagsError, Result};
use crate::record::render_value;

/// Conjunctive `tag=value` constraints on datasets
///
/// A dataset matches when every constrained attribute is present and renders
/// exactly to the expected value. An empty filter matches everything.
///
/// # Example
///
/// ```
/// use dicomtags_core::{FilterSpec, StandardTagCatalog};
///
/// let catalog = StandardTagCatalog::new();
/// let filter = FilterSpec::parse(&["Modality=MR".to_string()], &catalog).unwrap();
/// assert_eq!(filter.len(), 1);
///
/// let unknown = FilterSpec::parse(&["NoSuchTag=1".to_string()], &catalog);
/// assert!(unknown.is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    constraints: Vec<(TagDescriptor, String)>,
}

impl FilterSpec {
    /// Creates an empty FilterSpec that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `tag=value` expressions, splitting on the first `=`
    ///
    /// # Errors
    ///
    /// * `InvalidFilter` if an expression has no `=`
    /// * `UnknownFilterTag` if the tag name does not resolve
    pub fn parse(expressions: &[String], catalog: &impl TagCatalog) -> Result<Self> {
        expressions.iter().try_fold(Self::new(), |spec, expression| {
            let (name, value) = expression
                .split_once('=')
                .ok_or_else(|| DicomTagsError::InvalidFilter(expression.clone()))?;
            let descriptor = catalog
                .find_by_name(name)
                .ok_or_else(|| DicomTagsError::UnknownFilterTag(name.to_string()))?;
            Ok(spec.with_constraint(descriptor, value))
        })
    }

    /// Builder: constrain an attribute, replacing any earlier constraint on the same tag
    pub fn with_constraint(mut self, descriptor: TagDescriptor, value: impl Into<String>) -> Self {
        let value = value.into();
        match self
            .constraints
            .iter_mut()
            .find(|(existing, _)| existing.tag == descriptor.tag)
        {
            Some(constraint) => *constraint = (descriptor, value),
            None => self.constraints.push((descriptor, value)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Checks every constraint against the dataset
    pub fn matches(&self, dataset: &Dataset) -> bool {
        self.constraints.iter().all(|(descriptor, expected)| {
            dataset
                .value(descriptor.tag)
                .map(|value| render_value(descriptor, &value) == *expected)
                .unwrap_or(false)
        })
    }
}
