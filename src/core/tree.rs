use crate::domain::model::MenuItem;
use crate::utils::error::{NavError, Result};
use crate::utils::validation::{validate_menu_fields, validate_non_empty_string, validate_url};
use std::collections::{HashMap, HashSet};

/// An owned menu forest. Lookups are depth-first, pre-order, first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuTree {
    items: Vec<MenuItem>,
}

/// Pre-order traversal yielding `(depth, item)`, roots at depth 0.
pub struct Walk<'a> {
    stack: Vec<(usize, &'a MenuItem)>,
}

impl<'a> Walk<'a> {
    fn new(roots: &'a [MenuItem]) -> Self {
        Self {
            stack: roots.iter().rev().map(|item| (0, item)).collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a MenuItem);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, item) = self.stack.pop()?;
        self.stack
            .extend(item.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, item))
    }
}

fn find_in<'a>(items: &'a [MenuItem], id: &str) -> Option<&'a MenuItem> {
    for item in items {
        if item.id == id {
            return Some(item);
        }
        if let Some(found) = find_in(&item.children, id) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(items: &'a mut [MenuItem], id: &str) -> Option<&'a mut MenuItem> {
    for item in items.iter_mut() {
        if item.id == id {
            return Some(item);
        }
        if let Some(found) = find_in_mut(&mut item.children, id) {
            return Some(found);
        }
    }
    None
}

fn path_in<'a>(items: &'a [MenuItem], id: &str, trail: &mut Vec<&'a MenuItem>) -> bool {
    for item in items {
        trail.push(item);
        if item.id == id || path_in(&item.children, id, trail) {
            return true;
        }
        trail.pop();
    }
    false
}

fn expand_ancestors(items: &mut [MenuItem], id: &str) -> bool {
    for item in items.iter_mut() {
        if item.id == id {
            return true;
        }
        if expand_ancestors(&mut item.children, id) {
            item.is_expanded = Some(true);
            return true;
        }
    }
    false
}

fn remove_in(items: &mut Vec<MenuItem>, id: &str) -> Option<MenuItem> {
    if let Some(pos) = items.iter().position(|item| item.id == id) {
        return Some(items.remove(pos));
    }
    for item in items.iter_mut() {
        if let Some(removed) = remove_in(&mut item.children, id) {
            return Some(removed);
        }
    }
    None
}

fn for_each_mut<F: FnMut(&mut MenuItem)>(items: &mut [MenuItem], f: &mut F) {
    for item in items.iter_mut() {
        f(item);
        for_each_mut(&mut item.children, f);
    }
}

impl From<Vec<MenuItem>> for MenuTree {
    fn from(items: Vec<MenuItem>) -> Self {
        Self::new(items)
    }
}

impl MenuTree {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<MenuItem> {
        self.items
    }

    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.items)
    }

    /// Total number of items, all levels.
    pub fn len(&self) -> usize {
        self.walk().count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of levels; 0 for an empty tree.
    pub fn depth(&self) -> usize {
        self.walk().map(|(depth, _)| depth + 1).max().unwrap_or(0)
    }

    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        find_in(&self.items, id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut MenuItem> {
        find_in_mut(&mut self.items, id)
    }

    /// Breadcrumb from the root down to and including `id`.
    pub fn path_to(&self, id: &str) -> Option<Vec<&MenuItem>> {
        let mut trail = Vec::new();
        if path_in(&self.items, id, &mut trail) {
            Some(trail)
        } else {
            None
        }
    }

    /// Ids occurring more than once, each reported once, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = Vec::new();
        for (_, item) in self.walk() {
            let count = counts.entry(item.id.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push(item.id.clone());
            }
        }
        order
    }

    fn require_mut(&mut self, id: &str) -> Result<&mut MenuItem> {
        self.find_mut(id).ok_or_else(|| NavError::not_found(id))
    }

    /// Flips the expanded flag and returns the new value.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let item = self.require_mut(id)?;
        let next = !item.is_expanded();
        item.is_expanded = Some(next);
        tracing::debug!("Toggled '{}' to expanded={}", id, next);
        Ok(next)
    }

    pub fn set_expanded(&mut self, id: &str, expanded: bool) -> Result<()> {
        self.require_mut(id)?.is_expanded = Some(expanded);
        Ok(())
    }

    /// Expands every item that has children.
    pub fn expand_all(&mut self) {
        for_each_mut(&mut self.items, &mut |item| {
            if item.has_children() {
                item.is_expanded = Some(true);
            }
        });
    }

    /// Leaves absent flags absent.
    pub fn collapse_all(&mut self) {
        for_each_mut(&mut self.items, &mut |item| {
            if item.is_expanded.is_some() {
                item.is_expanded = Some(false);
            }
        });
    }

    /// Expands every ancestor of `id` so the item becomes visible.
    pub fn expand_to(&mut self, id: &str) -> Result<()> {
        if expand_ancestors(&mut self.items, id) {
            Ok(())
        } else {
            Err(NavError::not_found(id))
        }
    }

    /// Puts `id` under edit. Any other item under edit is released.
    pub fn begin_edit(&mut self, id: &str) -> Result<()> {
        if self.find(id).is_none() {
            return Err(NavError::not_found(id));
        }
        let mut marked = false;
        for_each_mut(&mut self.items, &mut |item| {
            if item.id == id && !marked {
                item.is_editing = Some(true);
                marked = true;
            } else {
                item.is_editing = None;
            }
        });
        Ok(())
    }

    pub fn finish_edit(&mut self, id: &str, label: Option<String>, url: Option<String>) -> Result<()> {
        if let Some(label) = &label {
            validate_non_empty_string("label", label)?;
        }
        if let Some(url) = &url {
            validate_url("url", url)?;
        }

        let item = self.require_mut(id)?;
        if !item.is_editing() {
            return Err(NavError::NotEditing { id: id.to_string() });
        }
        if let Some(label) = label {
            item.label = label;
        }
        if let Some(url) = url {
            item.url = url;
        }
        item.is_editing = None;
        Ok(())
    }

    pub fn editing(&self) -> Option<&MenuItem> {
        self.walk().map(|(_, item)| item).find(|item| item.is_editing())
    }

    fn check_insertable(&self, item: &MenuItem) -> Result<()> {
        let existing: HashSet<&str> = self.walk().map(|(_, i)| i.id.as_str()).collect();
        let mut incoming = HashSet::new();
        for (_, candidate) in Walk::new(std::slice::from_ref(item)) {
            validate_menu_fields("item", candidate)?;
            if existing.contains(candidate.id.as_str()) || !incoming.insert(candidate.id.as_str()) {
                return Err(NavError::DuplicateId {
                    id: candidate.id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn insert_root(&mut self, item: MenuItem) -> Result<()> {
        self.check_insertable(&item)?;
        self.items.push(item);
        Ok(())
    }

    pub fn insert_child(&mut self, parent_id: &str, item: MenuItem) -> Result<()> {
        self.check_insertable(&item)?;
        self.require_mut(parent_id)?.children.push(item);
        Ok(())
    }

    /// Detaches and returns the subtree rooted at `id`.
    pub fn remove(&mut self, id: &str) -> Result<MenuItem> {
        remove_in(&mut self.items, id).ok_or_else(|| NavError::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MenuTree {
        MenuTree::new(vec![
            MenuItem::new("home", "Home", "/"),
            MenuItem::new("products", "Products", "/products")
                .with_child(
                    MenuItem::new("hardware", "Hardware", "/products/hardware")
                        .with_child(MenuItem::new("laptops", "Laptops", "/products/hardware/laptops")),
                )
                .with_child(MenuItem::new("software", "Software", "/products/software")),
            MenuItem::new("about", "About", "/about").expanded(false),
        ])
    }

    #[test]
    fn test_walk_is_preorder_with_depth() {
        let tree = sample();
        let visited: Vec<(usize, &str)> = tree.walk().map(|(d, i)| (d, i.id.as_str())).collect();
        assert_eq!(
            visited,
            vec![
                (0, "home"),
                (0, "products"),
                (1, "hardware"),
                (2, "laptops"),
                (1, "software"),
                (0, "about"),
            ]
        );
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.depth(), 3);
        assert_eq!(MenuTree::default().depth(), 0);
    }

    #[test]
    fn test_find_and_path_to() {
        let tree = sample();
        assert_eq!(tree.find("laptops").map(|i| i.label.as_str()), Some("Laptops"));
        assert!(tree.find("missing").is_none());

        let crumbs: Vec<&str> = tree
            .path_to("laptops")
            .unwrap()
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(crumbs, vec!["products", "hardware", "laptops"]);
        assert!(tree.path_to("missing").is_none());
    }

    #[test]
    fn test_toggle_treats_absent_as_collapsed() {
        let mut tree = sample();
        assert!(tree.toggle("products").unwrap());
        assert!(!tree.toggle("products").unwrap());
        tree.set_expanded("products", true).unwrap();
        assert!(tree.find("products").unwrap().is_expanded());
        assert!(matches!(tree.toggle("nope"), Err(NavError::NotFound { .. })));
    }

    #[test]
    fn test_collapse_all_keeps_absent_flags_absent() {
        let mut tree = sample();
        tree.expand_all();
        assert_eq!(tree.find("products").unwrap().is_expanded, Some(true));
        assert_eq!(tree.find("home").unwrap().is_expanded, None);

        tree.collapse_all();
        assert_eq!(tree.find("products").unwrap().is_expanded, Some(false));
        assert_eq!(tree.find("about").unwrap().is_expanded, Some(false));
        assert_eq!(tree.find("home").unwrap().is_expanded, None);
    }

    #[test]
    fn test_expand_to_opens_ancestors_only() {
        let mut tree = sample();
        tree.expand_to("laptops").unwrap();
        assert!(tree.find("products").unwrap().is_expanded());
        assert!(tree.find("hardware").unwrap().is_expanded());
        assert_eq!(tree.find("laptops").unwrap().is_expanded, None);
        assert!(tree.expand_to("ghost").is_err());
    }

    #[test]
    fn test_single_item_under_edit() {
        let mut tree = sample();
        tree.begin_edit("home").unwrap();
        tree.begin_edit("software").unwrap();

        assert_eq!(tree.editing().map(|i| i.id.as_str()), Some("software"));
        assert_eq!(tree.find("home").unwrap().is_editing, None);

        tree.finish_edit("software", Some("Apps".into()), Some("/apps".into()))
            .unwrap();
        let edited = tree.find("software").unwrap();
        assert_eq!(edited.label, "Apps");
        assert_eq!(edited.url, "/apps");
        assert!(tree.editing().is_none());

        assert!(matches!(
            tree.finish_edit("software", None, None),
            Err(NavError::NotEditing { .. })
        ));
    }

    #[test]
    fn test_finish_edit_rejects_bad_url() {
        let mut tree = sample();
        tree.begin_edit("home").unwrap();
        assert!(tree.finish_edit("home", None, Some("no spaces allowed".into())).is_err());
        assert!(tree.find("home").unwrap().is_editing());
    }

    #[test]
    fn test_insert_rejects_duplicate_subtree_ids() {
        let mut tree = sample();
        tree.insert_child("about", MenuItem::new("team", "Team", "/about/team"))
            .unwrap();
        assert_eq!(tree.find("about").unwrap().children.len(), 1);

        let clash = MenuItem::new("careers", "Careers", "/careers")
            .with_child(MenuItem::new("home", "Home", "/"));
        assert!(matches!(
            tree.insert_root(clash),
            Err(NavError::DuplicateId { id }) if id == "home"
        ));
        assert!(matches!(
            tree.insert_child("ghost", MenuItem::new("x", "X", "/x")),
            Err(NavError::NotFound { .. })
        ));
    }

    #[test]
    fn test_insert_checks_label_and_url() {
        let mut tree = sample();
        assert!(matches!(
            tree.insert_root(MenuItem::new("blank", " ", "/blank")),
            Err(NavError::InvalidFieldValue { .. })
        ));
        let nested_bad_url = MenuItem::new("docs", "Docs", "/docs")
            .with_child(MenuItem::new("guide", "Guide", "bad url"));
        assert!(matches!(
            tree.insert_child("about", nested_bad_url),
            Err(NavError::InvalidFieldValue { .. })
        ));
        assert!(tree.find("blank").is_none());
        assert!(tree.find("docs").is_none());
    }

    #[test]
    fn test_remove_detaches_subtree() {
        let mut tree = sample();
        let removed = tree.remove("hardware").unwrap();
        assert_eq!(removed.children[0].id, "laptops");
        assert!(tree.find("laptops").is_none());
        assert_eq!(tree.len(), 4);
        assert!(tree.remove("hardware").is_err());
    }

    #[test]
    fn test_duplicate_ids_reported_once() {
        let tree = MenuTree::new(vec![
            MenuItem::new("a", "A", "/a").with_child(MenuItem::new("b", "B", "/b")),
            MenuItem::new("b", "B", "/b"),
            MenuItem::new("b", "B", "/b"),
            MenuItem::new("a", "A", "/a"),
        ]);
        assert_eq!(tree.duplicate_ids(), vec!["b".to_string(), "a".to_string()]);
    }
}
