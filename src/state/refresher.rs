use crate::state::messages::UiEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Periodic refresh — every 30 seconds. The main loop decides what a tick
/// means: an auto-sync while a live match detail is open, a ticker reload on
/// the live tab, nothing otherwise.
pub struct PeriodicRefresher {
    ui_events: mpsc::Sender<UiEvent>,
}

impl PeriodicRefresher {
    pub fn new(ui_events: mpsc::Sender<UiEvent>) -> Self {
        Self { ui_events }
    }

    pub async fn run(self) {
        let mut tick_interval = interval(Duration::from_secs(30));
        // Skip the immediate first tick so startup loading isn't double-triggered.
        tick_interval.tick().await;

        loop {
            tick_interval.tick().await;
            if self.ui_events.send(UiEvent::RefreshTick).await.is_err() {
                break;
            }
        }
    }
}
