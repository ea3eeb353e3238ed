//! Protected-site guarantee.

use log::{info, warn};

use super::{Member, SelectedSite, SelectionContext, SelectionState};
use crate::config::{FAILED_PROBE_TTL_MS, NO_ENDPOINT_TTL_MS};
use crate::error_handling::InfoType;
use crate::probe::{LatencyProber, ProbeOutcome};
use crate::subscription::Ttl;

/// Makes sure the output holds a protected site whenever the input had one.
///
/// Does nothing if no input site is protected or a protected site was
/// already retained. Otherwise the protected site with the lowest latency is
/// appended regardless of the ceiling. Measurements taken during selection
/// are reused; a site without an endpoint counts as 0 ms; unmeasured sites
/// are probed only while the budget allows. A site with no measurement ranks
/// at the 9999 ms sentinel. Ties go to the earlier site.
///
/// # Returns
///
/// `true` if a site was appended.
pub(crate) async fn ensure_protected<P: LatencyProber>(
    ctx: &SelectionContext<P>,
    members: &[Member],
    retained: &mut Vec<SelectedSite>,
    state: &mut SelectionState,
) -> bool {
    let protected: Vec<&Member> = members.iter().filter(|m| m.protected).collect();
    if protected.is_empty() || retained.iter().any(|s| s.protected) {
        return false;
    }

    warn!(
        "No protected site survived selection; choosing among {} candidates",
        protected.len()
    );

    let mut scores: Vec<Option<u64>> = Vec::with_capacity(protected.len());
    let mut unmeasured = Vec::new();
    for (pos, member) in protected.iter().enumerate() {
        let score = match (member.site.api(), state.measurement(member.index)) {
            (None, _) => Some(NO_ENDPOINT_TTL_MS),
            (Some(_), Some(ProbeOutcome::Measured(ms))) => Some(ms),
            (Some(_), Some(ProbeOutcome::Failed(_))) => Some(FAILED_PROBE_TTL_MS),
            (Some(api), None) => {
                unmeasured.push((pos, api.to_string()));
                None
            }
        };
        scores.push(score);
    }

    // A site without an endpoint already has the best possible score.
    if !scores.contains(&Some(NO_ENDPOINT_TTL_MS)) {
        let mut planned = Vec::new();
        for (pos, api) in unmeasured {
            if ctx.budget().try_acquire() {
                planned.push((pos, api));
            }
        }
        for (pos, outcome) in ctx.run_probes(planned).await {
            state.measurements.insert(protected[pos].index, outcome);
            scores[pos] = Some(outcome.latency_ms().unwrap_or(FAILED_PROBE_TTL_MS));
        }
    }

    let Some((pos, ms)) = scores
        .iter()
        .enumerate()
        .map(|(pos, score)| (pos, score.unwrap_or(FAILED_PROBE_TTL_MS)))
        .min_by_key(|(_, ms)| *ms)
    else {
        return false;
    };

    let member = protected[pos].clone();
    info!(
        "Force-retaining protected site {} at {}ms",
        member.site.label(),
        ms
    );
    state.note_protected(member.index, ms);
    ctx.stats().increment_info(InfoType::ProtectedSiteForced);
    retained.push(SelectedSite::from_member(member, Ttl::Millis(ms), ctx.rename));
    true
}
