// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Frame type filtering.
//!
//! Readers consult a [`TypeFilter`] once a frame header is read; frames it
//! rejects have their payload drained and never reach the caller.

/// Filter for selecting frames by type tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeFilter {
    /// Accept every frame
    #[default]
    All,
    /// Accept only the listed type tags
    Include(Vec<u16>),
    /// Accept everything except the listed type tags
    Exclude(Vec<u16>),
}

impl TypeFilter {
    /// Check if a frame with this type tag should be yielded.
    pub fn should_include(&self, type_tag: u16) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Include(tags) => tags.contains(&type_tag),
            TypeFilter::Exclude(tags) => !tags.contains(&type_tag),
        }
    }

    /// Accept a single type tag.
    pub fn only(type_tag: u16) -> Self {
        Self::Include(vec![type_tag])
    }

    /// Create an include filter from type tags.
    pub fn include(tags: Vec<u16>) -> Self {
        Self::Include(tags)
    }

    /// Create an exclude filter from type tags.
    pub fn exclude(tags: Vec<u16>) -> Self {
        Self::Exclude(tags)
    }

    /// Build a filter from include and exclude lists.
    ///
    /// Empty lists mean "no constraint"; a tag in both lists is excluded.
    pub fn from_lists(include: Vec<u16>, exclude: Vec<u16>) -> Self {
        match (include.is_empty(), exclude.is_empty()) {
            (true, true) => Self::All,
            (true, false) => Self::exclude(exclude),
            (false, _) => Self::include(
                include
                    .into_iter()
                    .filter(|tag| !exclude.contains(tag))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all() {
        let filter = TypeFilter::default();
        assert!(filter.should_include(0));
        assert!(filter.should_include(u16::MAX));
    }

    #[test]
    fn test_only() {
        let filter = TypeFilter::only(1);
        assert!(filter.should_include(1));
        assert!(!filter.should_include(2));
    }

    #[test]
    fn test_exclude() {
        let filter = TypeFilter::exclude(vec![2, 3]);
        assert!(filter.should_include(1));
        assert!(!filter.should_include(2));
        assert!(!filter.should_include(3));
    }

    #[test]
    fn test_from_lists() {
        assert_eq!(TypeFilter::from_lists(vec![], vec![]), TypeFilter::All);
        assert_eq!(
            TypeFilter::from_lists(vec![], vec![2]),
            TypeFilter::Exclude(vec![2])
        );

        let filter = TypeFilter::from_lists(vec![1, 2, 3], vec![2]);
        assert_eq!(filter, TypeFilter::Include(vec![1, 3]));
        assert!(!filter.should_include(2));
        assert!(!filter.should_include(4));
    }
}
