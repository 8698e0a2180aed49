//! Landing page aggregate.
//!
//! The overview shows the incidents, reservoir metrics and snow cover for one
//! day. Each panel keeps its own [`ViewState`], so a failing panel shows an
//! error next to its last good data while the others still refresh.

use chrono::NaiveDate;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::api::dto::{Incident, ReservoirSummary, SnowCoverReport};
use crate::application::services::{IncidentService, ReservoirService, SnowCoverService};
use crate::domain::{Call, ViewState};
use crate::error::ApiResult;
use crate::infrastructure::http::ApiClient;

/// Services and per-panel state of the overview page.
pub struct Dashboard {
    incident_service: IncidentService,
    reservoir_service: ReservoirService,
    snow_cover_service: SnowCoverService,
    pub incidents: ViewState<Vec<Incident>>,
    pub reservoirs: ViewState<Vec<ReservoirSummary>>,
    pub snow_cover: ViewState<SnowCoverReport>,
}

/// In-flight calls of one refresh.
///
/// Hand it back to [`Dashboard::finish`] to clear the loading flags.
/// Cancelling drops every pending request; `finish` then leaves the panels as
/// they were. Dropping a `Refresh` unfinished cancels its calls, but the
/// panels keep loading until the next `finish`.
pub struct Refresh {
    cancel: CancellationToken,
    _cancel_on_drop: DropGuard,
    incidents: Call<Vec<Incident>>,
    reservoirs: Call<Vec<ReservoirSummary>>,
    snow_cover: Call<SnowCoverReport>,
}

impl Refresh {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token that cancels every call of this refresh, usable from another
    /// task.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

impl Dashboard {
    pub fn new(api: ApiClient) -> Self {
        Self {
            incident_service: IncidentService::new(api.clone()),
            reservoir_service: ReservoirService::new(api.clone()),
            snow_cover_service: SnowCoverService::new(api),
            incidents: ViewState::new(),
            reservoirs: ViewState::new(),
            snow_cover: ViewState::new(),
        }
    }

    /// Starts loading every panel for `date` concurrently.
    pub fn start(&mut self, date: NaiveDate) -> Refresh {
        self.incidents.begin();
        self.reservoirs.begin();
        self.snow_cover.begin();

        let incidents = self.incident_service.clone();
        let reservoirs = self.reservoir_service.clone();
        let snow_cover = self.snow_cover_service.clone();

        let cancel = CancellationToken::new();
        Refresh {
            incidents: Call::with_token(cancel.child_token(), async move {
                incidents.list(Some(date)).await
            }),
            reservoirs: Call::with_token(cancel.child_token(), async move {
                reservoirs.summary(date).await
            }),
            snow_cover: Call::with_token(cancel.child_token(), async move {
                snow_cover.report(Some(date)).await
            }),
            _cancel_on_drop: cancel.clone().drop_guard(),
            cancel,
        }
    }

    /// Waits for a refresh and applies each outcome to its panel.
    pub async fn finish(&mut self, refresh: Refresh) {
        let (incidents, reservoirs, snow_cover) = tokio::join!(
            refresh.incidents.outcome(),
            refresh.reservoirs.outcome(),
            refresh.snow_cover.outcome(),
        );

        settle(&mut self.incidents, incidents);
        settle(&mut self.reservoirs, reservoirs);
        settle(&mut self.snow_cover, snow_cover);
    }

    /// Refreshes every panel for `date`.
    pub async fn refresh(&mut self, date: NaiveDate) {
        let refresh = self.start(date);
        self.finish(refresh).await;
    }

    /// True if any panel currently shows an error.
    pub fn has_errors(&self) -> bool {
        self.incidents.error().is_some()
            || self.reservoirs.error().is_some()
            || self.snow_cover.error().is_some()
    }
}

fn settle<T>(state: &mut ViewState<T>, outcome: Option<ApiResult<T>>) {
    match outcome {
        Some(result) => state.apply(result),
        None => state.abort(),
    }
}
