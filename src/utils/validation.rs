use crate::domain::model::{MenuItem, PageItem, SiteDocument};
use crate::utils::error::{NavError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Any navigation target is accepted (relative references, any scheme)
/// unless it is empty, contains whitespace, or is an absolute URL that
/// does not parse.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(NavError::invalid_field(field_name, url_str, "URL cannot be empty"));
    }

    if url_str.chars().any(char::is_whitespace) {
        return Err(NavError::invalid_field(
            field_name,
            url_str,
            "URL contains whitespace",
        ));
    }

    match Url::parse(url_str) {
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => Ok(()),
        Err(e) => Err(NavError::invalid_field(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NavError::invalid_field(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_css_class(field_name: &str, value: &str) -> Result<()> {
    if value.chars().any(|c| c.is_whitespace() && c != ' ') {
        return Err(NavError::invalid_field(
            field_name,
            value,
            "Class list may only be separated by spaces",
        ));
    }
    Ok(())
}

/// Checks one item's own fields; children are not visited.
pub fn validate_menu_fields(path: &str, item: &MenuItem) -> Result<()> {
    validate_non_empty_string(&format!("{}.id", path), &item.id)?;
    validate_non_empty_string(&format!("{}.label", path), &item.label)?;
    validate_url(&format!("{}.url", path), &item.url)?;
    if let Some(css) = &item.css_class {
        validate_css_class(&format!("{}.cssClass", path), css)?;
    }
    Ok(())
}

fn validate_menu_item(path: &str, item: &MenuItem, seen: &mut HashSet<String>) -> Result<()> {
    validate_menu_fields(path, item)?;
    if !seen.insert(item.id.clone()) {
        return Err(NavError::DuplicateId {
            id: item.id.clone(),
        });
    }

    for (index, child) in item.children.iter().enumerate() {
        validate_menu_item(&format!("{}.children[{}]", path, index), child, seen)?;
    }
    Ok(())
}

impl Validate for MenuItem {
    fn validate(&self) -> Result<()> {
        validate_menu_item("menu", self, &mut HashSet::new())
    }
}

impl Validate for PageItem {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("page.id", &self.id)?;
        validate_non_empty_string("page.name", &self.name)?;
        validate_url("page.url", &self.url)
    }
}

/// Menu ids and page ids are checked independently of each other.
impl Validate for SiteDocument {
    fn validate(&self) -> Result<()> {
        let mut menu_ids = HashSet::new();
        for (index, item) in self.menu.iter().enumerate() {
            validate_menu_item(&format!("menu[{}]", index), item, &mut menu_ids)?;
        }

        let mut page_ids = HashSet::new();
        for page in &self.pages {
            page.validate()?;
            if !page_ids.insert(page.id.as_str()) {
                return Err(NavError::DuplicateId {
                    id: page.id.clone(),
                });
            }
        }
        Ok(())
    }
}
