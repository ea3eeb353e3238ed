//! Multi-source merging with endpoint deduplication.

use std::collections::HashSet;

use log::info;

use crate::error_handling::{InfoType, ProcessingStats};
use crate::subscription::Subscription;

/// Merges subscriptions into one, deduplicating sites by endpoint.
///
/// The first subscription is the base: all of its fields and sites are kept
/// (sites lacking `api` included) and its endpoints seed the "seen" set.
/// Each later subscription contributes only the sites whose `api` has not
/// been seen yet; they are appended under fresh keys. Later subscriptions'
/// other fields are ignored, as are their sites without an `api`.
///
/// Endpoint-less sites from later sources are dropped on purpose: without an
/// `api` there is nothing to deduplicate them by, so keeping them would add
/// the same entry once per source.
///
/// Inputs are not modified: every kept site is copied.
///
/// # Arguments
///
/// * `subscriptions` - Decoded sources, in configuration order
/// * `stats` - Counters for dropped duplicates and endpoint-less sites
///
/// # Returns
///
/// The merged subscription; empty if `subscriptions` is empty.
pub fn merge_subscriptions(subscriptions: &[Subscription], stats: &ProcessingStats) -> Subscription {
    let Some((base, rest)) = subscriptions.split_first() else {
        return Subscription::default();
    };

    let mut merged = base.clone();
    let mut seen: HashSet<String> = merged
        .api_site
        .sites()
        .filter_map(|site| site.api().map(str::to_string))
        .collect();

    info!("Base subscription has {} sites", merged.api_site.len());

    for (i, subscription) in rest.iter().enumerate() {
        let mut added = 0usize;
        let mut duplicates = 0usize;
        let mut without_api = 0usize;

        for site in subscription.api_site.sites() {
            let Some(api) = site.api() else {
                without_api += 1;
                continue;
            };
            if seen.contains(api) {
                duplicates += 1;
                continue;
            }
            seen.insert(api.to_string());
            merged.api_site.push(site.clone());
            added += 1;
        }

        stats.add_info(InfoType::DuplicateSiteDropped, duplicates);
        stats.add_info(InfoType::SiteWithoutApiDropped, without_api);
        info!(
            "Added {} unique sites from subscription {} ({} duplicates skipped)",
            added,
            i + 1,
            duplicates
        );
    }

    info!(
        "Final merged subscription has {} sites",
        merged.api_site.len()
    );
    merged
}

#[cfg(test)]
mod tests;
