//! In-memory operations on a loaded document.
//!
//! Every method either succeeds completely or returns an error with the
//! document left untouched, so callers can persist only on `Ok`.

use super::interface::{Theme, ThemeDocument, ThemeError};
use std::collections::HashSet;

impl ThemeDocument {
    /// Empty document for a freshly seeded slot.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn find_theme(&self, name: &str) -> Option<&Theme> {
        self.theme_list.iter().find(|t| t.theme == name)
    }

    fn find_theme_mut(&mut self, name: &str) -> Result<&mut Theme, ThemeError> {
        self.theme_list
            .iter_mut()
            .find(|t| t.theme == name)
            .ok_or_else(|| ThemeError::ThemeNotFound {
                name: name.to_string(),
            })
    }

    pub fn theme_names(&self) -> Vec<&str> {
        self.theme_list.iter().map(|t| t.theme.as_str()).collect()
    }

    pub fn set_metadata(&mut self, theme_name: String, description: String) {
        self.theme_name = theme_name;
        self.description = description;
    }

    /// Append a new, empty theme. `name` is expected to be trimmed already.
    pub fn add_theme(&mut self, name: &str) -> Result<Theme, ThemeError> {
        if name.trim().is_empty() {
            return Err(ThemeError::EmptyName);
        }
        if self.find_theme(name).is_some() {
            return Err(ThemeError::DuplicateTheme {
                name: name.to_string(),
            });
        }

        let theme = Theme::new(name);
        self.theme_list.push(theme.clone());
        Ok(theme)
    }

    /// Set-union the given items into a theme's list.
    ///
    /// Input duplicates collapse to their first occurrence; items already in
    /// the list keep their position and new ones are appended in input order.
    pub fn add_items<I, S>(&mut self, theme_name: &str, items: I) -> Result<Theme, ThemeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let theme = self.find_theme_mut(theme_name)?;
        let mut seen: HashSet<String> = theme.list.iter().cloned().collect();

        for item in items {
            let item = item.into();
            if seen.insert(item.clone()) {
                theme.list.push(item);
            }
        }

        Ok(theme.clone())
    }

    /// Drop every exact occurrence of `item`. Absent items are not an error.
    pub fn delete_item(&mut self, theme_name: &str, item: &str) -> Result<Theme, ThemeError> {
        let theme = self.find_theme_mut(theme_name)?;
        theme.list.retain(|i| i != item);
        Ok(theme.clone())
    }

    /// Permute `theme_list` into the given order.
    ///
    /// `names` must name every existing theme exactly once.
    pub fn reorder(&mut self, names: &[String]) -> Result<Vec<Theme>, ThemeError> {
        if names.len() != self.theme_list.len() {
            return Err(ThemeError::InvalidOrder);
        }

        let mut requested = HashSet::with_capacity(names.len());
        for name in names {
            if !requested.insert(name.as_str()) || self.find_theme(name).is_none() {
                return Err(ThemeError::InvalidOrder);
            }
        }

        let mut remaining = std::mem::take(&mut self.theme_list);
        let mut reordered = Vec::with_capacity(remaining.len());
        for name in names {
            // Membership was checked above, so every name is still present.
            if let Some(index) = remaining.iter().position(|t| &t.theme == name) {
                reordered.push(remaining.swap_remove(index));
            }
        }

        self.theme_list = reordered;
        Ok(self.theme_list.clone())
    }

    /// Rename in place, keeping position and items.
    pub fn rename_theme(&mut self, old_name: &str, new_name: &str) -> Result<Theme, ThemeError> {
        if self.find_theme(old_name).is_none() {
            return Err(ThemeError::ThemeNotFound {
                name: old_name.to_string(),
            });
        }

        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return Err(ThemeError::EmptyName);
        }
        if trimmed != old_name && self.find_theme(trimmed).is_some() {
            return Err(ThemeError::DuplicateTheme {
                name: trimmed.to_string(),
            });
        }

        let theme = self.find_theme_mut(old_name)?;
        theme.theme = trimmed.to_string();
        Ok(theme.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(themes: &[(&str, &[&str])]) -> ThemeDocument {
        let mut doc = ThemeDocument::empty();
        for (name, items) in themes {
            doc.theme_list.push(Theme {
                theme: name.to_string(),
                list: items.iter().map(|s| s.to_string()).collect(),
            });
        }
        doc
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn add_theme_appends_to_end() {
        let mut doc = doc_with(&[("A", &[]), ("B", &[])]);
        let theme = doc.add_theme("C").unwrap();
        assert_eq!(theme, Theme::new("C"));
        assert_eq!(doc.theme_names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn add_theme_rejects_exact_duplicate_only() {
        let mut doc = doc_with(&[("Foo", &[])]);
        assert!(matches!(
            doc.add_theme("Foo"),
            Err(ThemeError::DuplicateTheme { .. })
        ));
        // Case-sensitive
        assert!(doc.add_theme("foo").is_ok());
        assert_eq!(doc.theme_list.len(), 2);
    }

    #[test]
    fn add_theme_rejects_blank_name() {
        let mut doc = ThemeDocument::empty();
        assert!(matches!(doc.add_theme("   "), Err(ThemeError::EmptyName)));
        assert!(doc.theme_list.is_empty());
    }

    #[test]
    fn add_items_dedupes_input_and_keeps_existing_order() {
        let mut doc = doc_with(&[("T", &["B-10", "A-10"])]);
        let theme = doc
            .add_items("T", ["X-10", "A-10", "X-10", "Y-20"])
            .unwrap();
        assert_eq!(theme.list, names(&["B-10", "A-10", "X-10", "Y-20"]));
    }

    #[test]
    fn add_items_is_idempotent() {
        let mut doc = doc_with(&[("T", &[])]);
        let once = doc.add_items("T", ["AB-12"]).unwrap();
        let twice = doc.add_items("T", ["AB-12"]).unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.list, names(&["AB-12"]));
    }

    #[test]
    fn add_items_unknown_theme() {
        let mut doc = doc_with(&[("T", &[])]);
        let err = doc.add_items("t", ["AB-12"]).unwrap_err();
        assert!(matches!(err, ThemeError::ThemeNotFound { ref name } if name == "t"));
    }

    #[test]
    fn delete_item_removes_every_occurrence() {
        // Hand-edited files can carry duplicates; delete clears them all.
        let mut doc = doc_with(&[("T", &["A-10", "B-10", "A-10"])]);
        let theme = doc.delete_item("T", "A-10").unwrap();
        assert_eq!(theme.list, names(&["B-10"]));
    }

    #[test]
    fn delete_absent_item_is_noop() {
        let mut doc = doc_with(&[("T", &["A-10"])]);
        let before = doc.clone();
        let theme = doc.delete_item("T", "Z-99").unwrap();
        assert_eq!(theme.list, names(&["A-10"]));
        assert_eq!(doc, before);
    }

    #[test]
    fn reorder_permutes_without_touching_lists() {
        let mut doc = doc_with(&[("A", &["A-1"]), ("B", &["B-1", "B-2"]), ("C", &[])]);
        let out = doc.reorder(&names(&["C", "A", "B"])).unwrap();
        assert_eq!(doc.theme_names(), vec!["C", "A", "B"]);
        assert_eq!(out, doc.theme_list);
        assert_eq!(doc.find_theme("B").unwrap().list, names(&["B-1", "B-2"]));
    }

    #[test]
    fn reorder_rejects_non_permutations() {
        let mut doc = doc_with(&[("A", &[]), ("B", &[]), ("C", &[])]);
        let before = doc.clone();

        for bad in [
            names(&["A", "B"]),
            names(&["A", "B", "C", "D"]),
            names(&["A", "B", "D"]),
            names(&["A", "A", "B"]),
            names(&["a", "b", "c"]),
        ] {
            assert!(
                matches!(doc.reorder(&bad), Err(ThemeError::InvalidOrder)),
                "expected InvalidOrder for {:?}",
                bad
            );
            assert_eq!(doc, before);
        }
    }

    #[test]
    fn rename_keeps_position_and_items() {
        let mut doc = doc_with(&[("A", &[]), ("B", &["B-1"]), ("C", &[])]);
        let theme = doc.rename_theme("B", "  Bee ").unwrap();
        assert_eq!(theme.theme, "Bee");
        assert_eq!(doc.theme_names(), vec!["A", "Bee", "C"]);
        assert_eq!(doc.theme_list[1].list, names(&["B-1"]));
    }

    #[test]
    fn rename_to_same_name_is_noop_success() {
        let mut doc = doc_with(&[("A", &["A-1"]), ("B", &[])]);
        let before = doc.clone();
        let theme = doc.rename_theme("A", "A").unwrap();
        assert_eq!(theme.theme, "A");
        assert_eq!(doc, before);
    }

    #[test]
    fn rename_collision_and_errors() {
        let mut doc = doc_with(&[("A", &[]), ("B", &[])]);
        let before = doc.clone();

        assert!(matches!(
            doc.rename_theme("A", "B"),
            Err(ThemeError::DuplicateTheme { .. })
        ));
        assert!(matches!(
            doc.rename_theme("A", " B "),
            Err(ThemeError::DuplicateTheme { .. })
        ));
        assert!(matches!(
            doc.rename_theme("A", "   "),
            Err(ThemeError::EmptyName)
        ));
        assert!(matches!(
            doc.rename_theme("Z", "Y"),
            Err(ThemeError::ThemeNotFound { .. })
        ));
        assert_eq!(doc, before);
    }

    #[test]
    fn rename_missing_theme_wins_over_empty_name() {
        let mut doc = doc_with(&[("A", &[])]);
        assert!(matches!(
            doc.rename_theme("Z", ""),
            Err(ThemeError::ThemeNotFound { .. })
        ));
    }
}
