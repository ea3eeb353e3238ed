//! Protected-class classification.

use crate::subscription::Site;

/// Matcher for the protected site class.
///
/// A site is protected when its `name` contains one of the name keywords or
/// its `api` contains one of the endpoint keywords. Both checks are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedClass {
    name_keywords: Vec<String>,
    api_keywords: Vec<String>,
}

impl ProtectedClass {
    pub fn new<S: AsRef<str>>(name_keywords: &[S], api_keywords: &[S]) -> Self {
        Self {
            name_keywords: lowercase_keywords(name_keywords),
            api_keywords: lowercase_keywords(api_keywords),
        }
    }

    pub fn is_protected(&self, site: &Site) -> bool {
        let name_match = site
            .name()
            .map(|name| contains_any(name, &self.name_keywords))
            .unwrap_or(false);
        name_match
            || site
                .api()
                .map(|api| contains_any(api, &self.api_keywords))
                .unwrap_or(false)
    }
}

impl Default for ProtectedClass {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_PROTECTED_NAME_KEYWORDS,
            crate::config::DEFAULT_PROTECTED_API_KEYWORDS,
        )
    }
}

fn lowercase_keywords<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}
