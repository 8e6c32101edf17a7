//! Sorting algorithms and their catalog
//!
//! Each algorithm is a plain function over `&mut dyn VisualArray`. It works the same on a
//! recording array, a headless array, or a [`SubArray`](crate::array::SubArray) view, and it
//! calls `take_snapshot` after every comparison and every swap so playback can go frame by
//! frame.
//!
//! The [`CATALOG`] order is the order the UI cycles through.

pub mod bubble;
pub mod insertion;
pub mod quick;
pub mod selection;
pub mod validation;

use crate::array::VisualArray;
use crate::errors::ArrayError;

/// Signature shared by all algorithms
pub type SortFn = fn(&mut dyn VisualArray) -> Result<(), ArrayError>;

/// Static metadata plus entry point for one algorithm
#[derive(Debug, Clone, Copy)]
pub struct Algorithm {
    pub name: &'static str,
    pub description: &'static str,
    pub sort: SortFn,
}

pub static CATALOG: [Algorithm; 4] = [
    Algorithm {
        name: "Bubble Sort",
        description: bubble::DESCRIPTION,
        sort: bubble::sort,
    },
    Algorithm {
        name: "Selection Sort",
        description: selection::DESCRIPTION,
        sort: selection::sort,
    },
    Algorithm {
        name: "Insertion Sort",
        description: insertion::DESCRIPTION,
        sort: insertion::sort,
    },
    Algorithm {
        name: "Quick Sort",
        description: quick::DESCRIPTION,
        sort: quick::sort,
    },
];

pub fn catalog() -> &'static [Algorithm] {
    &CATALOG
}

/// Catalog position of `name`, ignoring case and surrounding whitespace
pub fn position(name: &str) -> Option<usize> {
    let name = name.trim();
    CATALOG
        .iter()
        .position(|alg| alg.name.eq_ignore_ascii_case(name))
}

pub fn find(name: &str) -> Option<&'static Algorithm> {
    position(name).map(|i| &CATALOG[i])
}

/// Move `offset` entries from `current`, wrapping at both ends
pub fn cycle(current: usize, offset: isize) -> usize {
    let len = CATALOG.len() as isize;
    (current as isize + offset).rem_euclid(len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("quick sort").map(|a| a.name), Some("Quick Sort"));
        assert_eq!(find("  Bubble Sort ").map(|a| a.name), Some("Bubble Sort"));
        assert!(find("Bogo Sort").is_none());
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(cycle(0, -1), CATALOG.len() - 1);
        assert_eq!(cycle(CATALOG.len() - 1, 1), 0);
        assert_eq!(cycle(1, 1), 2);
        assert_eq!(cycle(2, -6), 0);
    }

    #[test]
    fn test_catalog_has_descriptions() {
        let names: Vec<&str> = catalog().iter().map(|a| a.name).collect();
        assert_eq!(
            names,
            vec!["Bubble Sort", "Selection Sort", "Insertion Sort", "Quick Sort"]
        );
        assert!(catalog().iter().all(|a| a.description.contains("O(")));
    }
}
