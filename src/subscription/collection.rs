//! Keyed, ordered site collection.

use std::collections::HashSet;
use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::site::Site;
use crate::config::SITE_KEY_PREFIX;

/// Ordered sequence of `(key, Site)` pairs.
///
/// Subscriptions supply `api_site` either as a JSON object or as a JSON
/// array. Both shapes deserialize into this one representation; arrays are
/// keyed `api_1..api_n` in source order. Keys carry no meaning beyond
/// uniqueness within the collection.
#[derive(Debug, Clone, Default)]
pub struct SiteCollection {
    entries: Vec<(String, Site)>,
    /// Numeric suffixes of the `api_<n>` keys in `entries`
    numbered: HashSet<usize>,
}

impl PartialEq for SiteCollection {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

/// Synthesized key for the `n`th site (1-based).
pub fn site_key(n: usize) -> String {
    format!("{}{}", SITE_KEY_PREFIX, n)
}

fn key_number(key: &str) -> Option<usize> {
    key.strip_prefix(SITE_KEY_PREFIX)?.parse().ok()
}

impl SiteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection keyed `api_1..api_n` in iteration order.
    pub fn from_sites<I: IntoIterator<Item = Site>>(sites: I) -> Self {
        let entries: Vec<_> = sites
            .into_iter()
            .enumerate()
            .map(|(i, site)| (site_key(i + 1), site))
            .collect();
        let numbered = (1..=entries.len()).collect();
        Self { entries, numbered }
    }

    fn from_entries(entries: Vec<(String, Site)>) -> Self {
        let numbered = entries.iter().filter_map(|(k, _)| key_number(k)).collect();
        Self { entries, numbered }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Site)> {
        self.entries.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn sites(&self) -> impl Iterator<Item = &Site> {
        self.entries.iter().map(|(_, s)| s)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&Site> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    /// Appends a site under a freshly synthesized key.
    ///
    /// The key is `api_<len+1>`, bumped past any key already present so an
    /// existing entry is never shadowed. Returns the key used.
    pub fn push(&mut self, site: Site) -> String {
        let mut n = self.entries.len() + 1;
        while !self.numbered.insert(n) {
            n += 1;
        }
        let key = site_key(n);
        self.entries.push((key.clone(), site));
        key
    }

    pub fn into_sites(self) -> impl Iterator<Item = Site> {
        self.entries.into_iter().map(|(_, s)| s)
    }
}

impl Serialize for SiteCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, site) in &self.entries {
            map.serialize_entry(key, site)?;
        }
        map.end()
    }
}

struct SiteCollectionVisitor;

impl<'de> Visitor<'de> for SiteCollectionVisitor {
    type Value = SiteCollection;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map or a list of site objects")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, site)) = access.next_entry::<String, Site>()? {
            entries.push((key, site));
        }
        Ok(SiteCollection::from_entries(entries))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut sites = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(site) = access.next_element::<Site>()? {
            sites.push(site);
        }
        Ok(SiteCollection::from_sites(sites))
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(SiteCollection::new())
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(SiteCollection::new())
    }
}

impl<'de> Deserialize<'de> for SiteCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SiteCollectionVisitor)
    }
}
