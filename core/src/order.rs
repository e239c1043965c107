//! Sorting and pagination of a completed result set
//!
//! Both operate on the full set of rows after traversal, keyed on the first
//! extracted value of each row.

use crate::record::Record;

/// Which sort passes to run on the first extracted value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder {
    /// Ascending raw-text ordering
    pub lexicographic: bool,
    /// Ascending base-10 integer ordering
    pub numeric: bool,
}

impl SortOrder {
    /// No sorting; rows keep traversal order
    pub fn none() -> Self {
        Self::default()
    }

    /// Builder: enable the lexicographic pass
    pub fn lexicographic(mut self, enabled: bool) -> Self {
        self.lexicographic = enabled;
        self
    }

    /// Builder: enable the numeric pass
    pub fn numeric(mut self, enabled: bool) -> Self {
        self.numeric = enabled;
        self
    }

    /// Sorts rows in place
    ///
    /// When both passes are enabled the lexicographic pass runs first and the
    /// numeric pass decides the final order. The numeric pass treats any pair
    /// where either key is not an integer as "not less than", so mixed keys
    /// do not form a total order; such pairs keep their relative order.
    pub fn apply(&self, records: &mut Vec<Record>) {
        if self.lexicographic {
            records.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
        }
        if self.numeric {
            let keyed: Vec<(Option<i64>, Record)> = records
                .drain(..)
                .map(|record| (record.sort_key().parse::<i64>().ok(), record))
                .collect();
            let sorted = merge_sort_by_less(keyed, &|(a, _), (b, _)| numeric_less(*a, *b));
            records.extend(sorted.into_iter().map(|(_, record)| record));
        }
    }
}

fn numeric_less(a: Option<i64>, b: Option<i64>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    }
}

/// Stable merge sort driven only by a "less than" predicate
///
/// Never inspects the predicate for consistency, so it accepts comparators
/// that are not total orders.
fn merge_sort_by_less<T, F>(mut items: Vec<T>, less: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> bool,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by_less(items, less);
    let right = merge_sort_by_less(right, less);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        let next = if less(r, l) { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    merged
}

/// Offset/limit window over the sorted rows
///
/// # Example
///
/// ```
/// use dicomtags_core::Pagination;
///
/// let page = Pagination::new(1, 1);
/// assert_eq!(page.window(3), 1..2);
///
/// // limit 0 means unlimited, an offset past the end is empty
/// assert_eq!(Pagination::new(2, 0).window(3), 2..3);
/// assert_eq!(Pagination::new(5, 0).window(3), 3..3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub offset: usize,
    /// Maximum number of rows; 0 means unlimited
    pub limit: usize,
}

impl Pagination {
    /// Creates a new Pagination
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Visible index range for `total` rows
    pub fn window(&self, total: usize) -> std::ops::Range<usize> {
        let end = if self.limit > 0 {
            self.offset.saturating_add(self.limit).min(total)
        } else {
            total
        };
        self.offset.min(end)..end
    }

    /// Keeps only the visible rows
    pub fn apply(&self, records: &mut Vec<Record>) {
        let window = self.window(records.len());
        records.truncate(window.end);
        records.drain(..window.start);
    }
}
