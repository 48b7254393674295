//! Attribution gate.
//!
//! Normalizes the one-shot attribution callback and owns the single
//! delayed re-fetch for organic installs. Organic installs often lack
//! full attribution at the first callback; one bounded retry captures
//! most late data without a retry storm.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use ob_core::attribution::AttributionSnapshot;
use ob_core::error::FetchError;
use ob_core::onboarding::{OnboardingEvent, OnboardingState};
use ob_core::ports::{DelayPort, InstallDataPort};

/// What the gate decided after absorbing a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Attribution is settled; the config fetch may proceed.
    Completed,
    /// An organic re-fetch was scheduled; the config fetch waits for
    /// its completion event.
    RefetchScheduled,
    /// Duplicate or stale callback, absorbed silently.
    Ignored,
}

pub struct AttributionGate {
    install_data: Arc<dyn InstallDataPort>,
    delay: Arc<dyn DelayPort>,
    refetch_delay: Duration,
    events: mpsc::Sender<OnboardingEvent>,
}

impl AttributionGate {
    pub fn new(
        install_data: Arc<dyn InstallDataPort>,
        delay: Arc<dyn DelayPort>,
        refetch_delay: Duration,
        events: mpsc::Sender<OnboardingEvent>,
    ) -> Self {
        Self {
            install_data,
            delay,
            refetch_delay,
            events,
        }
    }

    /// Absorb the initial attribution callback.
    pub fn on_success(&self, state: &mut OnboardingState, raw: &str) -> GateOutcome {
        if state.attribution.is_some() {
            warn!("duplicate attribution callback ignored");
            return GateOutcome::Ignored;
        }

        let snapshot = match AttributionSnapshot::parse(raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                // Malformed blob: treated like a failed callback so
                // downstream consumers are not blocked.
                warn!(error = %e, "attribution blob unparseable, using empty snapshot");
                AttributionSnapshot::empty()
            }
        };

        let organic = snapshot.is_organic();
        state.attribution = Some(snapshot);

        if organic && !state.organic_refetch_scheduled {
            state.organic_refetch_scheduled = true;
            self.schedule_refetch();
            return GateOutcome::RefetchScheduled;
        }
        GateOutcome::Completed
    }

    /// Absorb a failed attribution callback: record an empty snapshot
    /// and move on, no retry.
    pub fn on_failure(&self, state: &mut OnboardingState, error: &str) -> GateOutcome {
        if state.attribution.is_some() {
            warn!(error, "attribution failure after data was already captured, ignored");
            return GateOutcome::Ignored;
        }
        info!(error, "attribution failed, continuing with empty snapshot");
        state.attribution = Some(AttributionSnapshot::empty());
        GateOutcome::Completed
    }

    /// Absorb the delayed re-fetch result. Success replaces the
    /// snapshot (the one allowed replacement); failure keeps the prior
    /// data and does not retry further.
    pub fn on_refetch_completed(
        &self,
        state: &mut OnboardingState,
        result: Result<AttributionSnapshot, FetchError>,
    ) {
        match result {
            Ok(snapshot) => {
                debug!("organic re-fetch replaced the attribution snapshot");
                state.attribution = Some(snapshot);
            }
            Err(e) => warn!(error = %e, "organic re-fetch failed, keeping prior data"),
        }
    }

    fn schedule_refetch(&self) {
        let install_data = self.install_data.clone();
        let delay = self.delay.clone();
        let refetch_delay = self.refetch_delay;
        let events = self.events.clone();
        tokio::spawn(async move {
            delay.sleep(refetch_delay).await;
            let result = install_data.fetch_install_data().await;
            if events
                .send(OnboardingEvent::OrganicRefetchCompleted { result })
                .await
                .is_err()
            {
                debug!("orchestrator gone before organic re-fetch completed");
            }
        });
    }
}
