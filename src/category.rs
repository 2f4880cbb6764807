use log::warn;

use crate::dataset::CategoryRow;
use crate::error::{Result, RouteError};
use crate::{CategoryId, FxIndexMap};

/// Closed, bidirectional mapping between category identifiers and structure names. Names are
/// stored trimmed since the category file pads them with whitespace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryResolver {
    names: FxIndexMap<CategoryId, String>,
    ids: FxIndexMap<String, CategoryId>,
}

impl CategoryResolver {
    pub fn new<'a, I>(rows: I) -> CategoryResolver
    where
        I: IntoIterator<Item = &'a CategoryRow>,
    {
        let mut resolver = CategoryResolver::default();
        for row in rows {
            let name = row.name.trim().to_owned();
            if let Some(old) = resolver.names.insert(row.category, name.clone()) {
                warn!("Category {} relabelled from {:?} to {:?}", row.category, old, name);
                if resolver.ids.get(&old) == Some(&row.category) {
                    resolver.ids.shift_remove(&old);
                }
            }
            if let Some(old) = resolver.ids.insert(name.clone(), row.category) {
                if old != row.category {
                    warn!("Name {:?} moved from category {} to {}", name, old, row.category);
                }
            }
        }
        resolver
    }

    pub fn name(&self, id: CategoryId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Reverse lookup. The argument is trimmed like the stored names.
    pub fn id(&self, name: &str) -> Option<CategoryId> {
        self.ids.get(name.trim()).copied()
    }

    /// Like [id](Self::id) but a missing name is fatal for the caller.
    pub fn require(&self, name: &str) -> Result<CategoryId> {
        self.id(name).ok_or_else(|| RouteError::MissingCategory {
            name: name.trim().to_owned(),
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Categories in the order they were first read.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &str)> {
        self.names.iter().map(|(id, name)| (*id, name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<CategoryRow> {
        vec![
            CategoryRow::new(1, " Apartment"),
            CategoryRow::new(2, " Building"),
            CategoryRow::new(3, " MyHome"),
            CategoryRow::new(4, " BandalgomCoffee "),
        ]
    }

    #[test]
    fn names_are_trimmed_both_ways() {
        let resolver = CategoryResolver::new(&rows());
        assert_eq!(resolver.name(3), Some("MyHome"));
        assert_eq!(resolver.id("BandalgomCoffee"), Some(4));
        assert_eq!(resolver.id("  Apartment "), Some(1));
        assert_eq!(resolver.len(), 4);
    }

    #[test]
    fn missing_name_is_reported() {
        let resolver = CategoryResolver::new(&rows());
        match resolver.require("Library") {
            Err(RouteError::MissingCategory { name }) => assert_eq!(name, "Library"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn relabelled_category_drops_old_name() {
        let rows = vec![CategoryRow::new(7, "Park"), CategoryRow::new(7, "Garden")];
        let resolver = CategoryResolver::new(&rows);
        assert_eq!(resolver.name(7), Some("Garden"));
        assert_eq!(resolver.id("Park"), None);
        assert_eq!(resolver.id("Garden"), Some(7));
    }
}
