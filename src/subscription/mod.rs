//! Subscription data model.
//!
//! A subscription is a JSON document with an `api_site` collection plus
//! arbitrary passthrough fields (`cache_time`, spider settings, ...). Only
//! the collection is interpreted; everything else is carried verbatim.

mod collection;
mod site;
mod ttl;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::FIELD_CACHE_TIME;

pub use collection::{site_key, SiteCollection};
pub use site::Site;
pub use ttl::Ttl;

/// A decoded subscription document.
///
/// A document without `api_site` is treated as having zero sites.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Subscription {
    /// The site collection
    #[serde(default)]
    pub api_site: SiteCollection,
    /// Every other top-level field, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Subscription {
    pub fn new(api_site: SiteCollection) -> Self {
        Self {
            api_site,
            extra: Map::new(),
        }
    }

    /// Overwrites the `cache_time` passthrough field with the value verbatim.
    pub fn set_cache_time(&mut self, cache_time: &str) {
        self.extra.insert(
            FIELD_CACHE_TIME.to_string(),
            Value::from(cache_time.to_string()),
        );
    }
}
