use crate::catalog::TagDescriptor;
use crate::dataset::{Dataset, ElementValue, ScalarValue};
use crate::source::SourceRef;

/// One output row: the source identifier followed by one value per requested tag
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Record {
    /// Where the item was read from
    #[cfg_attr(feature = "json", serde(skip))]
    pub source: SourceRef,

    /// Display identifier (`path` or `archive#entry`)
    pub identifier: String,

    /// Rendered values, aligned with the requested tags
    pub values: Vec<String>,
}

impl Record {
    /// Builds a row from a dataset
    ///
    /// An absent attribute renders as the tag's display name.
    pub fn build(source: SourceRef, tags: &[TagDescriptor], dataset: &Dataset) -> Self {
        let values = tags
            .iter()
            .map(|descriptor| match dataset.value(descriptor.tag) {
                Some(value) => render_value(descriptor, &value),
                None => descriptor.name.clone(),
            })
            .collect();

        Self {
            identifier: source.identifier(),
            source,
            values,
        }
    }

    /// Value of the first requested tag, the sort key
    pub fn sort_key(&self) -> &str {
        self.values.first().map(String::as_str).unwrap_or("")
    }

    /// All fields in output order, identifier first
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.identifier.as_str()).chain(self.values.iter().map(String::as_str))
    }
}

/// Renders a present attribute
///
/// Single-valued attributes render their first scalar: integers as decimal
/// text, strings verbatim, anything else in the value's default string form.
/// Multi-valued attributes always render in full.
pub fn render_value(descriptor: &TagDescriptor, value: &ElementValue) -> String {
    if !descriptor.multiplicity.is_single() {
        return value.text.clone();
    }
    match &value.first {
        ScalarValue::Int(n) => n.to_string(),
        ScalarValue::Text(s) => s.clone(),
        ScalarValue::Other => value.text.clone(),
    }
}
