//! Grouping by normalized name and per-group representative choice.

use std::collections::HashMap;

use log::debug;

use super::{Member, SelectedSite, SelectionState, Verdict};
use crate::config::{FAILED_PROBE_COMPARE_MS, FAILED_PROBE_TTL_MS, NO_ENDPOINT_TTL_MS};
use crate::error_handling::{InfoType, ProcessingStats};
use crate::probe::ProbeOutcome;
use crate::subscription::Ttl;

/// Sites sharing one normalized name.
#[derive(Debug, Clone)]
pub(crate) struct SiteGroup {
    pub name: String,
    pub(crate) members: Vec<Member>,
}

impl SiteGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }
}

/// Partitions members into groups keyed by normalized name.
///
/// Groups appear in order of first occurrence; members keep input order.
pub(crate) fn group_by_name(members: Vec<Member>) -> Vec<SiteGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<SiteGroup> = Vec::new();

    for member in members {
        match index.get(&member.normalized) {
            Some(&i) => groups[i].members.push(member),
            None => {
                index.insert(member.normalized.clone(), groups.len());
                groups.push(SiteGroup {
                    name: member.normalized.clone(),
                    members: vec![member],
                });
            }
        }
    }
    groups
}

/// Comparison latency and output ttl of a protected member with a usable signal.
///
/// A failed probe still counts as a signal: it compares at 5000 ms and is
/// written out at the 9999 ms sentinel.
fn protected_score(verdict: Verdict) -> Option<(u64, Ttl)> {
    match verdict {
        Verdict::NoEndpoint => Some((NO_ENDPOINT_TTL_MS, Ttl::Millis(NO_ENDPOINT_TTL_MS))),
        Verdict::Probed(ProbeOutcome::Measured(ms)) => Some((ms, Ttl::Millis(ms))),
        Verdict::Probed(ProbeOutcome::Failed(_)) => {
            Some((FAILED_PROBE_COMPARE_MS, Ttl::Millis(FAILED_PROBE_TTL_MS)))
        }
        Verdict::Untested => None,
    }
}

/// Latency of a member that passes the ceiling, if it does.
///
/// Without a ceiling every measured member passes. A failed probe only
/// passes for the lone member of a group with no ceiling, at the 9999 ms
/// sentinel; in a larger group it never competes with measured members.
fn passing_ttl(verdict: Verdict, ceiling: Option<u64>, single: bool) -> Option<u64> {
    match verdict {
        Verdict::NoEndpoint => Some(NO_ENDPOINT_TTL_MS),
        Verdict::Probed(ProbeOutcome::Measured(ms)) => match ceiling {
            Some(max) if ms > max => None,
            _ => Some(ms),
        },
        Verdict::Probed(ProbeOutcome::Failed(_)) => match ceiling {
            None if single => Some(FAILED_PROBE_TTL_MS),
            _ => None,
        },
        Verdict::Untested => None,
    }
}

/// Picks what survives from one group.
///
/// At most one evaluated member is retained: the protected member with the
/// best score if any protected member has a usable signal, otherwise the
/// member with the lowest passing latency. Ties go to the earlier member.
/// A group where nothing passes is discarded.
/// Members left untested by the probe budget are all retained on top of
/// that; a protected one is pinned at 0 ms while no protected site has been
/// retained yet in the run.
///
/// # Arguments
///
/// * `members` - The group's members paired with their verdicts, in input order
/// * `ceiling` - Latency ceiling in milliseconds, if filtering is enabled
/// * `rename` - Whether retained sites get their group tag stripped
/// * `state` - Run-wide selection state (best protected site so far)
/// * `stats` - Counters for the drop/retain decisions
pub(crate) fn decide_group(
    members: Vec<(Member, Verdict)>,
    ceiling: Option<u64>,
    rename: bool,
    state: &mut SelectionState,
    stats: &ProcessingStats,
) -> Vec<SelectedSite> {
    let single = members.len() == 1;
    let (untested, evaluated): (Vec<_>, Vec<_>) = members
        .into_iter()
        .partition(|(_, verdict)| *verdict == Verdict::Untested);

    let protected_pick = evaluated
        .iter()
        .enumerate()
        .filter(|(_, (member, _))| member.protected)
        .filter_map(|(pos, (_, verdict))| {
            protected_score(*verdict).map(|(score, ttl)| (pos, score, ttl))
        })
        .min_by_key(|(_, score, _)| *score);

    let winner = protected_pick.map(|(pos, _, ttl)| (pos, ttl)).or_else(|| {
        evaluated
            .iter()
            .enumerate()
            .filter_map(|(pos, (_, verdict))| {
                passing_ttl(*verdict, ceiling, single).map(|ttl| (pos, Ttl::Millis(ttl)))
            })
            .min_by_key(|(_, ttl)| *ttl)
    });

    let mut retained = Vec::new();
    for (pos, (member, verdict)) in evaluated.into_iter().enumerate() {
        match winner {
            Some((winner_pos, ttl)) if winner_pos == pos => {
                if let Some((_, score, _)) = protected_pick {
                    if ceiling.is_some() && passing_ttl(verdict, ceiling, single).is_none() {
                        stats.increment_info(InfoType::ProtectedRetainedOverCeiling);
                        debug!(
                            "Keeping protected site {} despite the latency ceiling",
                            member.site.label()
                        );
                    }
                    state.note_protected(member.index, score);
                }
                retained.push(SelectedSite::from_member(member, ttl, rename));
            }
            _ => {
                let reason = match verdict {
                    Verdict::Probed(ProbeOutcome::Measured(ms))
                        if ceiling.is_some_and(|max| ms > max) =>
                    {
                        InfoType::SiteOverCeilingDropped
                    }
                    Verdict::Probed(ProbeOutcome::Failed(_)) if ceiling.is_some() || !single => {
                        InfoType::FailedProbeDropped
                    }
                    _ => InfoType::GroupMemberDiscarded,
                };
                stats.increment_info(reason);
                debug!("Dropping {} ({})", member.site.label(), reason.as_str());
            }
        }
    }

    for (member, _) in untested {
        let ttl = if member.protected && state.best_protected().is_none() {
            state.note_protected(member.index, NO_ENDPOINT_TTL_MS);
            Ttl::Millis(NO_ENDPOINT_TTL_MS)
        } else {
            Ttl::Untested
        };
        stats.increment_info(InfoType::UntestedSiteRetained);
        retained.push(SelectedSite::from_member(member, ttl, rename));
    }

    retained
}
