use crate::domain::model::{MenuItem, SiteDocument};
use crate::utils::error::{NavError, Result};
use regex::{Captures, Regex};

/// TOML front end for [`SiteDocument`]: `name`, `[[menu]]` with nested
/// `[[menu.children]]`, and `[[pages]]`.
///
/// String values may reference environment variables as `${VAR}`; unset
/// variables are left as written. `$${VAR}` is the literal text `${VAR}`.
/// Output escapes every reference, so writing then reading is lossless.
pub struct TomlDocument;

fn reference_pattern() -> Result<Regex> {
    Regex::new(r"(\$+)\{([^}]+)\}").map_err(|e| NavError::ConfigError {
        message: format!("env pattern: {}", e),
    })
}

fn map_strings<F: Fn(&str) -> String>(document: &mut SiteDocument, f: &F) {
    fn map_item<F: Fn(&str) -> String>(item: &mut MenuItem, f: &F) {
        item.id = f(&item.id);
        item.label = f(&item.label);
        item.url = f(&item.url);
        if let Some(css) = item.css_class.as_mut() {
            *css = f(css.as_str());
        }
        for child in &mut item.children {
            map_item(child, f);
        }
    }

    if let Some(name) = document.name.as_mut() {
        *name = f(name.as_str());
    }
    for item in &mut document.menu {
        map_item(item, f);
    }
    for page in &mut document.pages {
        page.id = f(&page.id);
        page.name = f(&page.name);
        page.url = f(&page.url);
    }
}

impl TomlDocument {
    pub fn from_toml_str(content: &str) -> Result<SiteDocument> {
        let mut document: SiteDocument = toml::from_str(content)?;
        let re = reference_pattern()?;
        map_strings(&mut document, &|value: &str| Self::substitute_env_vars(&re, value));
        Ok(document)
    }

    pub fn to_toml_string(document: &SiteDocument) -> Result<String> {
        let re = reference_pattern()?;
        let mut escaped = document.clone();
        map_strings(&mut escaped, &|value: &str| {
            re.replace_all(value, |caps: &Captures| format!("${}{{{}}}", &caps[1], &caps[2]))
                .into_owned()
        });
        Ok(toml::to_string_pretty(&escaped)?)
    }

    /// 替換環境變數 (例如 ${BASE_URL}); one `$` is dropped from escaped references.
    fn substitute_env_vars(re: &Regex, value: &str) -> String {
        re.replace_all(value, |caps: &Captures| {
            let dollars = &caps[1];
            let var_name = &caps[2];
            if dollars.len() > 1 {
                return format!("{}{{{}}}", &dollars[1..], var_name);
            }
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PageItem;

    const SITE: &str = r#"
name = "docs-site"

[[menu]]
id = "guide"
label = "Guide"
url = "/guide"
isExpanded = true
cssClass = "nav-primary"

[[menu.children]]
id = "install"
label = "Install"
url = "/guide/install"

[[menu.children]]
id = "usage"
label = "Usage"
url = "/guide/usage"

[[menu]]
id = "api"
label = "API"
url = "/api"

[[pages]]
id = "changelog"
name = "Changelog"
url = "/changelog"
"#;

    #[test]
    fn test_parse_nested_menu() {
        let doc = TomlDocument::from_toml_str(SITE).unwrap();

        assert_eq!(doc.name.as_deref(), Some("docs-site"));
        assert_eq!(doc.menu.len(), 2);
        assert_eq!(doc.menu[0].children.len(), 2);
        assert_eq!(doc.menu[0].children[1].id, "usage");
        assert_eq!(doc.menu[0].is_expanded, Some(true));
        assert_eq!(doc.menu[0].css_class.as_deref(), Some("nav-primary"));
        assert_eq!(doc.menu[1].is_expanded, None);
        assert_eq!(doc.pages[0].name, "Changelog");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("NAVTREE_TEST_DOCS_HOST", "https://docs.example.com");

        let content = r#"
[[menu]]
id = "ext"
label = "External"
url = "${NAVTREE_TEST_DOCS_HOST}/start"

[[pages]]
id = "keep"
name = "Keep"
url = "${NAVTREE_TEST_UNSET_VAR}"
"#;
        let doc = TomlDocument::from_toml_str(content).unwrap();
        assert_eq!(doc.menu[0].url, "https://docs.example.com/start");
        assert_eq!(doc.pages[0].url, "${NAVTREE_TEST_UNSET_VAR}");

        std::env::remove_var("NAVTREE_TEST_DOCS_HOST");
    }

    #[test]
    fn test_env_value_with_quotes_stays_in_its_field() {
        std::env::set_var("NAVTREE_TEST_QUOTED", "x\"y");

        let content = r#"
[[menu]]
id = "q"
label = "say \"${NAVTREE_TEST_QUOTED}\""
url = "/q"
"#;
        let doc = TomlDocument::from_toml_str(content).unwrap();
        assert_eq!(doc.menu[0].label, "say \"x\"y\"");

        std::env::remove_var("NAVTREE_TEST_QUOTED");
    }

    #[test]
    fn test_literal_references_survive_write_and_read() {
        std::env::set_var("NAVTREE_TEST_LITERAL", "expanded");

        let doc = SiteDocument {
            name: Some("costs ${NAVTREE_TEST_LITERAL}".to_string()),
            menu: vec![MenuItem::new("price", "Price ${NAVTREE_TEST_LITERAL}", "/p?q=$${x}")
                .with_css_class("$$${weird}")],
            pages: vec![PageItem::new("p", "${a${b}", "/${NAVTREE_TEST_LITERAL}")],
        };

        let text = TomlDocument::to_toml_string(&doc).unwrap();
        assert!(text.contains("Price $${NAVTREE_TEST_LITERAL}"));
        assert_eq!(TomlDocument::from_toml_str(&text).unwrap(), doc);

        std::env::remove_var("NAVTREE_TEST_LITERAL");
    }

    #[test]
    fn test_escaped_reference_is_literal() {
        let content = r#"
[[pages]]
id = "lit"
name = "$${HOME}"
url = "/lit"
"#;
        let doc = TomlDocument::from_toml_str(content).unwrap();
        assert_eq!(doc.pages[0].name, "${HOME}");
    }

    #[test]
    fn test_page_missing_url_is_rejected() {
        let content = r#"
[[pages]]
id = "p"
name = "No url"
"#;
        assert!(matches!(
            TomlDocument::from_toml_str(content),
            Err(NavError::TomlError(_))
        ));
    }

    #[test]
    fn test_toml_output_reads_back() {
        let doc = TomlDocument::from_toml_str(SITE).unwrap();
        let text = TomlDocument::to_toml_string(&doc).unwrap();
        assert_eq!(TomlDocument::from_toml_str(&text).unwrap(), doc);
    }
}
