use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use hashchip_markup::Rewriter;

use crate::core::{BlockId, ContentHost, PassThroughPolicy, TrustPolicy};
use crate::time::{Debouncer, Trigger};

/// Timing of relabel passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherConfig {
    /// Delay between the host reporting load and the first pass. Gives the
    /// page time to populate its blocks.
    pub initial_delay: Duration,
    /// Quiet window that change notifications are coalesced into.
    pub debounce: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(200),
            debounce: Duration::from_millis(1000),
        }
    }
}

/// Summary of one relabel pass.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Blocks visited.
    pub blocks: usize,
    /// Blocks whose markup changed and was written back.
    pub rendered: usize,
    /// Blocks that vanished or were refused by the policy or the host.
    pub failed: usize,
    /// Change notifications folded into this pass instead of scheduling
    /// their own. Always zero for [`LabelWatcher::relabel_all`].
    pub coalesced: u64,
}

/// Keeps every block of a [`ContentHost`] labelled.
///
/// The host forwards its lifecycle to the watcher: [`on_load`] once, then
/// [`on_mutation`] for every change notification, and [`tick`] whenever the
/// [`deadline`] passes. Passes only write blocks whose rewritten markup
/// differs, so a labelled document produces no further writes.
///
/// [`on_load`]: Self::on_load
/// [`on_mutation`]: Self::on_mutation
/// [`tick`]: Self::tick
/// [`deadline`]: Self::deadline
pub struct LabelWatcher<H, P = PassThroughPolicy> {
    host: H,
    policy: P,
    rewriter: Rewriter,
    config: WatcherConfig,
    debouncer: Debouncer,
    /// `Debouncer::coalesced` as of the last scheduled pass.
    coalesced_seen: u64,
    /// Set once the initial pass has run; notifications before that are ignored.
    observing: bool,
}

impl<H: ContentHost> LabelWatcher<H> {
    pub fn new(host: H, config: WatcherConfig) -> Self {
        Self::with_policy(host, PassThroughPolicy::default(), config)
    }
}

impl<H: ContentHost, P: TrustPolicy> LabelWatcher<H, P> {
    pub fn with_policy(host: H, policy: P, config: WatcherConfig) -> Self {
        let debouncer = Debouncer::new(config.debounce);
        Self {
            host,
            policy,
            rewriter: Rewriter::default(),
            config,
            debouncer,
            coalesced_seen: 0,
            observing: false,
        }
    }

    pub fn with_rewriter(mut self, rewriter: Rewriter) -> Self {
        self.rewriter = rewriter;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &WatcherConfig {
        &self.config
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Schedules the initial pass `initial_delay` after `now`.
    pub fn on_load(&mut self, now: Instant) -> Trigger {
        log::debug!("watcher: load reported, first pass in {:?}", self.config.initial_delay);
        self.debouncer.schedule_at(now + self.config.initial_delay)
    }

    /// Reports a change in the host document.
    ///
    /// Ignored until the initial pass has run, and coalesced while a pass is
    /// pending or running.
    pub fn on_mutation(&mut self, now: Instant) -> Trigger {
        if !self.observing {
            return Trigger::Coalesced;
        }
        let trigger = self.debouncer.trigger(now);
        if let Trigger::Scheduled(due) = trigger {
            log::trace!("watcher: pass scheduled in {:?}", due.saturating_duration_since(now));
        }
        trigger
    }

    /// When the next pass is due, if one is scheduled.
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Runs the scheduled pass if it is due at `now`.
    pub fn tick(&mut self, now: Instant) -> Option<PassReport> {
        let token = self.debouncer.poll(now)?;
        let mut report = self.relabel_all();
        self.debouncer.finish(token);

        let total = self.debouncer.coalesced();
        report.coalesced = total - self.coalesced_seen;
        self.coalesced_seen = total;
        if report.coalesced > 0 {
            log::debug!("watcher: pass covered {} coalesced notification(s)", report.coalesced);
        }
        self.observing = true;
        Some(report)
    }

    /// Relabels every block immediately, outside the schedule.
    pub fn relabel_all(&mut self) -> PassReport {
        let mut report = PassReport::default();

        for id in self.host.blocks() {
            report.blocks += 1;
            match self.relabel(id) {
                Ok(true) => report.rendered += 1,
                Ok(false) => {}
                Err(e) => {
                    report.failed += 1;
                    log::warn!("watcher: block {}: {e:#}", id.0);
                }
            }
        }

        log::debug!(
            "watcher: pass done, {} block(s), {} rendered, {} failed",
            report.blocks, report.rendered, report.failed
        );
        report
    }

    /// Relabels one block; `Ok(false)` when it was already up to date.
    fn relabel(&mut self, id: BlockId) -> Result<bool> {
        let current = self.host.read(id).context("block disappeared")?;
        let next = self.rewriter.rewrite(&current);
        if next == current {
            return Ok(false);
        }

        let markup = self
            .policy
            .create_html(next)
            .with_context(|| format!("policy `{}` refused markup", self.policy.name()))?;
        self.host.render(id, markup).context("host refused render")?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MemoryHost, TrustedMarkup};
    use anyhow::bail;
    use hashchip_markup::{inspect, revert};

    fn ms(n: u64) -> Duration { Duration::from_millis(n) }

    fn host(blocks: &[&str]) -> MemoryHost {
        let mut host = MemoryHost::new();
        for b in blocks {
            host.push(*b);
        }
        host
    }

    /// Loads and runs the initial pass; returns the instant it ran at.
    fn start(w: &mut LabelWatcher<MemoryHost>) -> Instant {
        let t0 = Instant::now();
        w.on_load(t0);
        let t1 = t0 + ms(200);
        assert!(w.tick(t1).is_some());
        t1
    }

    // ── scheduling ────────────────────────────────────────────────────────

    #[test]
    fn initial_pass_waits_for_delay() {
        let mut w = LabelWatcher::new(host(&["#a"]), WatcherConfig::default());
        let t0 = Instant::now();
        assert_eq!(w.on_load(t0), Trigger::Scheduled(t0 + ms(200)));
        assert!(w.tick(t0 + ms(199)).is_none());
        let report = w.tick(t0 + ms(200)).unwrap();
        assert_eq!(report, PassReport { blocks: 1, rendered: 1, failed: 0, coalesced: 0 });
        assert!(w.is_observing());
    }

    #[test]
    fn mutations_before_initial_pass_are_ignored() {
        let mut w = LabelWatcher::new(host(&["#a"]), WatcherConfig::default());
        let t0 = Instant::now();
        assert_eq!(w.on_mutation(t0), Trigger::Coalesced);
        assert_eq!(w.deadline(), None);
    }

    #[test]
    fn mutation_burst_runs_one_pass() {
        let mut w = LabelWatcher::new(host(&["plain"]), WatcherConfig::default());
        let t1 = start(&mut w);

        let id = w.host().blocks()[0];
        w.host_mut().edit(id, "now #tagged").unwrap();
        assert_eq!(w.on_mutation(t1), Trigger::Scheduled(t1 + ms(1000)));
        for i in 1..5 {
            assert_eq!(w.on_mutation(t1 + ms(i * 100)), Trigger::Coalesced);
        }

        assert!(w.tick(t1 + ms(999)).is_none());
        let report = w.tick(t1 + ms(1000)).unwrap();
        assert_eq!(report.rendered, 1);
        assert_eq!(report.coalesced, 4);
        assert!(w.tick(t1 + ms(5000)).is_none());

        // the next pass only counts its own burst
        assert!(matches!(w.on_mutation(t1 + ms(6000)), Trigger::Scheduled(_)));
        assert_eq!(w.on_mutation(t1 + ms(6100)), Trigger::Coalesced);
        assert_eq!(w.tick(t1 + ms(7000)).unwrap().coalesced, 1);
        assert_eq!(revert(w.host().content(id).unwrap()), "now #tagged");
    }

    // ── fixed point ───────────────────────────────────────────────────────

    #[test]
    fn labelled_blocks_are_not_rewritten() {
        let mut w = LabelWatcher::new(host(&["#a b", "no tags", "#c"]), WatcherConfig::default());
        start(&mut w);
        assert_eq!(w.host().render_count(), 2);

        let again = w.relabel_all();
        assert_eq!(again, PassReport { blocks: 3, rendered: 0, failed: 0, coalesced: 0 });
        assert_eq!(w.host().render_count(), 2);
    }

    #[test]
    fn stale_labels_are_refreshed() {
        let stale = "<label style=\"background-color: rgb(1, 2, 3)\">x</label>";
        let mut w = LabelWatcher::new(host(&[stale]), WatcherConfig::default());
        start(&mut w);
        let labels = inspect(w.host().contents().next().unwrap());
        assert_eq!(labels[0].tag, "x");
        assert_eq!(labels[0].background, Some(hashchip_color::derive_color("x")));
    }

    // ── failures ──────────────────────────────────────────────────────────

    struct RefuseAll;

    impl TrustPolicy for RefuseAll {
        fn name(&self) -> &str { "refuse" }
        fn create_html(&self, _html: String) -> Result<TrustedMarkup> {
            bail!("not allowed")
        }
    }

    #[test]
    fn refused_markup_is_counted_and_skipped() {
        let mut w = LabelWatcher::with_policy(
            host(&["#a", "plain"]),
            RefuseAll,
            WatcherConfig::default(),
        );
        let report = w.relabel_all();
        assert_eq!(report, PassReport { blocks: 2, rendered: 0, failed: 1, coalesced: 0 });
        assert_eq!(w.host().contents().next(), Some("#a"));
    }

    /// Host whose blocks vanish between listing and reading.
    struct VanishingHost;

    impl ContentHost for VanishingHost {
        fn blocks(&self) -> Vec<BlockId> { vec![BlockId(0), BlockId(1)] }
        fn read(&self, _id: BlockId) -> Option<String> { None }
        fn render(&mut self, _id: BlockId, _markup: TrustedMarkup) -> Result<()> {
            bail!("unreachable in this test")
        }
    }

    #[test]
    fn vanished_blocks_do_not_abort_the_pass() {
        let mut w = LabelWatcher::new(VanishingHost, WatcherConfig::default());
        let report = w.relabel_all();
        assert_eq!(report, PassReport { blocks: 2, rendered: 0, failed: 2, coalesced: 0 });
    }

    #[test]
    fn failed_pass_still_releases_the_schedule() {
        let mut w = LabelWatcher::new(VanishingHost, WatcherConfig::default());
        let t0 = Instant::now();
        w.on_load(t0);
        assert!(w.tick(t0 + ms(200)).is_some());
        assert!(matches!(w.on_mutation(t0 + ms(300)), Trigger::Scheduled(_)));
    }
}
