//! Site name normalization.
//!
//! Sources tag their site names with a group prefix (`"GroupTag-ActualName"`).
//! The prefix has to go before names from different sources can be compared.

use crate::config::{GROUP_TAG_SEPARATOR, UNKNOWN_SITE_NAME};
use crate::subscription::Site;

/// Strips the group-tag prefix from a display name.
///
/// Splits on the first separator only: `"X-Y-Z"` becomes `"Y-Z"`. A name
/// without a separator is returned unchanged.
pub fn normalize_name(name: &str) -> &str {
    match name.split_once(GROUP_TAG_SEPARATOR) {
        Some((_, rest)) => rest,
        None => name,
    }
}

/// Normalized name of a site; a site without `name` groups as `"Unknown"`.
pub fn normalized_site_name(site: &Site) -> &str {
    normalize_name(site.name().unwrap_or(UNKNOWN_SITE_NAME))
}
