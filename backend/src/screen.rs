//! Summary screen state machine: visibility, refresh lifecycle and the continue event.

use crate::refresh::RefreshTask;
use crate::store::StatsStore;
use crate::types::{DisplayLines, GridCell, SummaryStats};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// Default fade-in when the summary appears. Hiding is immediate.
pub const FADE_IN: Duration = Duration::from_millis(500);

/// Notifications sent to whoever decides navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryEvent {
    ContinueTapped,
}

/// What the UI layer should draw this frame.
#[derive(Debug)]
pub enum SummaryView<'a> {
    Hidden,
    Visible {
        grid: &'a [GridCell],
        lines: &'a DisplayLines,
        refreshing: bool,
        opacity: f32,
    },
}

enum Visibility {
    Hidden,
    Visible(Session),
}

struct Session {
    shown_at: Instant,
    refresh: Option<RefreshTask>,
    continued: bool,
}

/// Post-swipe summary screen.
///
/// Holds the last applied stats and the grid and lines derived from them. Stats are
/// only replaced once a refresh has read all four aggregates.
pub struct SummaryScreen {
    stats: SummaryStats,
    grid: Vec<GridCell>,
    lines: DisplayLines,
    visibility: Visibility,
    events: UnboundedSender<SummaryEvent>,
    fade_in: Duration,
}

impl SummaryScreen {
    pub fn new(events: UnboundedSender<SummaryEvent>) -> Self {
        let stats = SummaryStats::default();
        Self {
            grid: stats.grid(),
            lines: stats.lines(),
            stats,
            visibility: Visibility::Hidden,
            events,
            fade_in: FADE_IN,
        }
    }

    pub fn with_fade_in(mut self, fade_in: Duration) -> Self {
        self.fade_in = fade_in;
        self
    }

    /// Follow the host's "show summary" flag.
    pub fn set_summary_visible(
        &mut self,
        visible: bool,
        runtime: &Handle,
        store: Arc<dyn StatsStore>,
    ) {
        if visible {
            self.show(runtime, store);
        } else {
            self.hide();
        }
    }

    /// Hidden → Visible: start a refresh. No-op when already visible.
    pub fn show(&mut self, runtime: &Handle, store: Arc<dyn StatsStore>) {
        if self.is_visible() {
            return;
        }
        debug!("summary shown");
        self.visibility = Visibility::Visible(Session {
            shown_at: Instant::now(),
            refresh: Some(RefreshTask::spawn(runtime, store)),
            continued: false,
        });
    }

    /// Visible → Hidden: any in-flight refresh is cancelled and its result discarded.
    pub fn hide(&mut self) {
        let previous = std::mem::replace(&mut self.visibility, Visibility::Hidden);
        if let Visibility::Visible(session) = previous {
            if let Some(task) = session.refresh {
                task.cancel();
            }
            debug!("summary hidden");
        }
    }

    /// Apply a finished refresh. Returns true when new stats were applied.
    ///
    /// A failed refresh is logged and the previous values stay on screen.
    pub fn poll(&mut self) -> bool {
        let result = match &mut self.visibility {
            Visibility::Visible(session) => {
                match session.refresh.as_mut().and_then(RefreshTask::try_take) {
                    Some(result) => {
                        session.refresh = None;
                        result
                    }
                    None => return false,
                }
            }
            Visibility::Hidden => return false,
        };

        match result {
            Ok(stats) => {
                self.apply(stats);
                true
            }
            Err(e) => {
                warn!("Summary refresh failed, keeping previous values: {}", e);
                false
            }
        }
    }

    /// Report a tap on Continue. Sent at most once per visible session.
    pub fn tap_continue(&mut self) -> bool {
        let Visibility::Visible(session) = &mut self.visibility else {
            return false;
        };
        if session.continued {
            return false;
        }
        session.continued = true;
        info!("summary continue tapped");
        // A listener that has gone away is not an error.
        let _ = self.events.send(SummaryEvent::ContinueTapped);
        true
    }

    pub fn view(&self) -> SummaryView<'_> {
        match &self.visibility {
            Visibility::Hidden => SummaryView::Hidden,
            Visibility::Visible(session) => SummaryView::Visible {
                grid: &self.grid,
                lines: &self.lines,
                refreshing: session.refresh.is_some(),
                opacity: fade_opacity(session.shown_at.elapsed(), self.fade_in),
            },
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.visibility, Visibility::Visible(_))
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(&self.visibility, Visibility::Visible(s) if s.refresh.is_some())
    }

    pub fn stats(&self) -> &SummaryStats {
        &self.stats
    }

    fn apply(&mut self, stats: SummaryStats) {
        self.grid = stats.grid();
        self.lines = stats.lines();
        self.stats = stats;
    }
}

/// Ease-out opacity `elapsed` into a fade of length `fade`.
pub fn fade_opacity(elapsed: Duration, fade: Duration) -> f32 {
    if fade.is_zero() {
        return 1.0;
    }
    let t = (elapsed.as_secs_f32() / fade.as_secs_f32()).clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
