//! Grouping and selection engine.
//!
//! Sites are grouped by normalized name and each group is reduced to a single
//! representative: the fastest member whose latency passes the ceiling, or the
//! protected member when one is present. Probing is capped by a run-wide
//! budget; sites the budget never reaches are kept untested. A final pass
//! guarantees that a protected site survives whenever the input had one.

mod group;
mod guarantee;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{debug, info};

use crate::classify::ProtectedClass;
use crate::config::DEFAULT_PROBE_CONCURRENCY;
use crate::error_handling::{update_error_stats, ProcessingStats, WarningType};
use crate::normalize::normalized_site_name;
use crate::probe::{LatencyProber, ProbeBudget, ProbeOutcome};
use crate::subscription::{Site, SiteCollection, Ttl};
use crate::utils::{truncate_for_log, TimingStats};

use group::SiteGroup;

/// Characters of an endpoint shown in per-probe log lines
const LOG_API_CHARS: usize = 50;

/// A site from the merged collection, as the engine sees it.
#[derive(Debug, Clone)]
pub(crate) struct Member {
    /// Position in the merged collection
    pub index: usize,
    pub site: Site,
    pub normalized: String,
    pub protected: bool,
}

/// What the engine knows about a member's latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    /// The site has no endpoint and is treated as always healthy
    NoEndpoint,
    Probed(ProbeOutcome),
    /// The probe budget was spent before this site was reached
    Untested,
}

/// A site that survived selection, annotated with its ttl.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedSite {
    pub site: Site,
    pub ttl: Ttl,
    pub protected: bool,
}

impl SelectedSite {
    fn from_member(member: Member, ttl: Ttl, rename: bool) -> Self {
        let mut site = member.site;
        if rename && site.name().is_some() {
            site.set_name(&member.normalized);
        }
        site.set_ttl(ttl);
        Self {
            site,
            ttl,
            protected: member.protected,
        }
    }
}

/// Best protected site retained so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectedPick {
    /// Position of the site in the merged collection
    pub index: usize,
    /// Latency the site was compared at
    pub compare_ms: u64,
}

/// Run-wide state threaded through the per-group decisions.
#[derive(Debug, Default)]
pub struct SelectionState {
    best_protected: Option<ProtectedPick>,
    measurements: HashMap<usize, ProbeOutcome>,
    budget_exhaustion_logged: bool,
}

impl SelectionState {
    pub fn best_protected(&self) -> Option<ProtectedPick> {
        self.best_protected
    }

    /// Probe outcome recorded for the site at `index`, if it was probed.
    pub fn measurement(&self, index: usize) -> Option<ProbeOutcome> {
        self.measurements.get(&index).copied()
    }

    fn note_protected(&mut self, index: usize, compare_ms: u64) {
        if self
            .best_protected
            .is_none_or(|best| compare_ms < best.compare_ms)
        {
            self.best_protected = Some(ProtectedPick { index, compare_ms });
        }
    }
}

/// Result of a selection run.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Retained sites in group order, not yet ranked
    pub sites: Vec<SelectedSite>,
    /// Number of name groups in the input
    pub groups: usize,
    /// Number of protected sites in the input
    pub protected_in_input: usize,
    /// Whether the guarantee pass had to force a protected site in
    pub forced_protected: bool,
}

/// Everything the engine needs for one run.
///
/// Built with [`SelectionContext::new`] and adjusted with the `with_*`
/// methods; every knob has a usable default.
pub struct SelectionContext<P> {
    prober: P,
    protected: ProtectedClass,
    ceiling: Option<u64>,
    budget: Arc<ProbeBudget>,
    concurrency: usize,
    rename: bool,
    stats: Arc<ProcessingStats>,
    timing: Arc<TimingStats>,
    probed: Arc<AtomicUsize>,
}

impl<P: LatencyProber> SelectionContext<P> {
    pub fn new(prober: P, protected: ProtectedClass) -> Self {
        Self {
            prober,
            protected,
            ceiling: None,
            budget: Arc::new(ProbeBudget::unbounded()),
            concurrency: DEFAULT_PROBE_CONCURRENCY,
            rename: false,
            stats: Arc::new(ProcessingStats::new()),
            timing: Arc::new(TimingStats::new()),
            probed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sets the latency ceiling in milliseconds; `None` disables filtering.
    pub fn with_ceiling(mut self, ceiling: Option<u64>) -> Self {
        self.ceiling = ceiling;
        self
    }

    pub fn with_budget(mut self, budget: Arc<ProbeBudget>) -> Self {
        self.budget = budget;
        self
    }

    /// Sets how many probes may be in flight at once (at least one).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Renames retained sites to their normalized name. Off by default, since
    /// a renamed `"A-Y-Z"` would regroup as `"Z"` on the next run.
    pub fn with_rename(mut self, rename: bool) -> Self {
        self.rename = rename;
        self
    }

    pub fn with_stats(mut self, stats: Arc<ProcessingStats>, timing: Arc<TimingStats>) -> Self {
        self.stats = stats;
        self.timing = timing;
        self
    }

    /// Counter incremented after every completed probe, for progress logging.
    pub fn with_progress(mut self, probed: Arc<AtomicUsize>) -> Self {
        self.probed = probed;
        self
    }

    pub fn budget(&self) -> &ProbeBudget {
        &self.budget
    }

    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    /// Runs grouping, probing, per-group selection and the protected-site
    /// guarantee over a merged collection.
    ///
    /// Groups are processed one after another in order of first appearance.
    /// Inside a group, budget is reserved member by member in input order and
    /// the reserved probes then run concurrently. The input is not modified.
    ///
    /// # Arguments
    ///
    /// * `sites` - The merged site collection
    ///
    /// # Returns
    ///
    /// The retained sites with their ttl annotations, in group order.
    pub async fn select(&self, sites: &SiteCollection) -> Selection {
        let members = self.members(sites);
        let protected_in_input = members.iter().filter(|m| m.protected).count();
        let groups = group::group_by_name(members.clone());
        let group_count = groups.len();

        info!(
            "Selecting from {} sites in {} name groups ({} protected)",
            members.len(),
            group_count,
            protected_in_input
        );

        let mut state = SelectionState::default();
        let mut retained = Vec::new();
        for group in groups {
            debug!("Group {} has {} members", group.name, group.len());
            let verdicts = self.evaluate_group(group, &mut state).await;
            retained.extend(group::decide_group(
                verdicts,
                self.ceiling,
                self.rename,
                &mut state,
                &self.stats,
            ));
        }

        let forced_protected =
            guarantee::ensure_protected(self, &members, &mut retained, &mut state).await;

        info!(
            "Selection kept {} of {} sites ({} probes issued)",
            retained.len(),
            members.len(),
            self.budget.used()
        );

        Selection {
            sites: retained,
            groups: group_count,
            protected_in_input,
            forced_protected,
        }
    }

    fn members(&self, sites: &SiteCollection) -> Vec<Member> {
        sites
            .sites()
            .enumerate()
            .map(|(index, site)| {
                if site.name().is_none() {
                    self.stats.increment_warning(WarningType::MissingName);
                }
                if site.api().is_none() {
                    self.stats.increment_warning(WarningType::MissingApi);
                }
                Member {
                    index,
                    site: site.clone(),
                    normalized: normalized_site_name(site).to_string(),
                    protected: self.protected.is_protected(site),
                }
            })
            .collect()
    }

    async fn evaluate_group(
        &self,
        group: SiteGroup,
        state: &mut SelectionState,
    ) -> Vec<(Member, Verdict)> {
        let mut verdicts = Vec::with_capacity(group.len());
        let mut planned = Vec::new();

        for (slot, member) in group.members.iter().enumerate() {
            let verdict = match member.site.api() {
                None => Verdict::NoEndpoint,
                Some(api) if self.budget.try_acquire() => {
                    planned.push((slot, api.to_string()));
                    Verdict::Untested
                }
                Some(_) => {
                    if self.budget.is_exhausted() && !state.budget_exhaustion_logged {
                        state.budget_exhaustion_logged = true;
                        info!(
                            "Probe budget of {} exhausted; remaining sites are kept untested",
                            self.budget.limit().unwrap_or_default()
                        );
                    }
                    Verdict::Untested
                }
            };
            verdicts.push(verdict);
        }

        for (slot, outcome) in self.run_probes(planned).await {
            state.measurements.insert(group.members[slot].index, outcome);
            verdicts[slot] = Verdict::Probed(outcome);
        }

        group.members.into_iter().zip(verdicts).collect()
    }

    /// Probes the planned endpoints, at most `concurrency` at a time.
    ///
    /// Results come back in the order they were planned.
    pub(crate) async fn run_probes(&self, planned: Vec<(usize, String)>) -> Vec<(usize, ProbeOutcome)> {
        stream::iter(planned)
            .map(|(slot, api)| async move {
                let outcome = self.prober.probe(&api).await;
                self.record_probe(&api, outcome);
                (slot, outcome)
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    fn record_probe(&self, api: &str, outcome: ProbeOutcome) {
        self.probed.fetch_add(1, Ordering::Relaxed);
        let shown = truncate_for_log(api, LOG_API_CHARS);
        match outcome {
            ProbeOutcome::Measured(ms) => {
                self.timing.record(ms);
                let mark = if self.ceiling.is_some_and(|max| ms > max) {
                    "✗"
                } else {
                    "✓"
                };
                info!("  {} - {}ms {}", shown, ms, mark);
            }
            ProbeOutcome::Failed(failure) => {
                update_error_stats(&self.stats, failure);
                info!("  {} - failed ({}) ✗", shown, failure);
            }
        }
    }
}
