//! Folder grouping for request items.

use crate::model::{Folder, Item};
use std::collections::HashMap;

/// Groups request items into folders keyed by an arbitrary string.
///
/// Folders come out in the order their key was first seen, and items keep
/// their insertion order within each folder.
#[derive(Debug, Default)]
pub struct FolderSet {
    folders: Vec<Folder>,
    index: HashMap<String, usize>,
}

impl FolderSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item` to the folder for `key`, creating the folder with
    /// `display_name` if this is the first item for that key.
    pub fn push(&mut self, key: &str, display_name: impl FnOnce() -> String, item: Item) {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                let slot = self.folders.len();
                self.folders.push(Folder {
                    name: display_name(),
                    item: Vec::new(),
                });
                self.index.insert(key.to_string(), slot);
                slot
            }
        };
        self.folders[slot].item.push(item);
    }

    /// Adds a complete folder unless it has no items.
    pub fn push_folder(&mut self, name: impl Into<String>, items: Vec<Item>) {
        if items.is_empty() {
            return;
        }
        let name = name.into();
        tracing::debug!(folder = %name, items = items.len(), "Adding folder");
        self.index.insert(name.clone(), self.folders.len());
        self.folders.push(Folder { name, item: items });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.folders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    #[must_use]
    pub fn into_folders(self) -> Vec<Folder> {
        self.folders
    }
}

/// Derives a folder title from a path segment: hyphens and underscores become
/// spaces and every word is title-cased (`user-profiles` → `User Profiles`).
#[must_use]
pub fn folder_display_name(segment: &str) -> String {
    title_case(&segment.replace(['-', '_'], " "))
}

/// Upper-cases the first letter of every run of letters and lower-cases the
/// rest. Any non-letter, digits included, starts a new word.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(ch);
            in_word = false;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Request, Url};

    fn item(name: &str) -> Item {
        Item {
            name: name.to_string(),
            request: Request {
                method: "GET".to_string(),
                header: vec![],
                url: Url::variable("baseUrl"),
                body: None,
                description: None,
            },
            response: vec![],
        }
    }

    #[test]
    fn test_folder_display_name() {
        assert_eq!(folder_display_name("users"), "Users");
        assert_eq!(folder_display_name("user-profiles"), "User Profiles");
        assert_eq!(folder_display_name("order_items"), "Order Items");
        assert_eq!(folder_display_name("API"), "Api");
    }

    #[test]
    fn test_title_case_digit_boundaries() {
        assert_eq!(title_case("v2api"), "V2Api");
        assert_eq!(title_case("hello world"), "Hello World");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_folder_set_first_seen_order() {
        let mut folders = FolderSet::new();
        folders.push("users", || "Users".to_string(), item("GET /users"));
        folders.push("orders", || "Orders".to_string(), item("GET /orders"));
        folders.push("users", || unreachable!(), item("POST /users"));

        assert_eq!(folders.len(), 2);
        let folders = folders.into_folders();
        assert_eq!(folders[0].name, "Users");
        assert_eq!(folders[0].item.len(), 2);
        assert_eq!(folders[0].item[1].name, "POST /users");
        assert_eq!(folders[1].name, "Orders");
    }

    #[test]
    fn test_push_folder_skips_empty() {
        let mut folders = FolderSet::new();
        folders.push_folder("queries", vec![]);
        assert!(folders.is_empty());
        folders.push_folder("mutations", vec![item("createUser")]);
        assert_eq!(folders.into_folders()[0].name, "mutations");
    }
}
