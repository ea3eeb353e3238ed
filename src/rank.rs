//! Latency ranking.

use log::info;

use crate::select::SelectedSite;
use crate::subscription::SiteCollection;

/// Orders retained sites by ttl and re-keys them `api_1..api_n`.
///
/// The sort is stable, so sites with equal ttl keep their selection order.
/// Untested sites sort after every measured one.
pub fn rank_sites(mut sites: Vec<SelectedSite>) -> SiteCollection {
    sites.sort_by_key(|s| s.ttl);

    let untested = sites.iter().filter(|s| s.ttl.is_untested()).count();
    info!(
        "Ranked {} sites ({} measured, {} untested)",
        sites.len(),
        sites.len() - untested,
        untested
    );

    SiteCollection::from_sites(sites.into_iter().map(|s| s.site))
}
