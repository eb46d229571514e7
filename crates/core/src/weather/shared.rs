//! Snapshot handle shared between the weather provider and the frame loop

use super::snapshot::WeatherSnapshot;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Atomically swapped, immutable weather snapshot
///
/// Writers replace the whole `Arc`; readers clone it and keep a consistent
/// snapshot for the rest of the frame even if a publish lands mid-frame.
/// Last write wins. Cloning the handle shares the same slot.
///
/// # Example
/// ```
/// use weather_drift_core::{SharedWeather, WeatherSnapshot};
///
/// let shared = SharedWeather::default();
/// let provider = shared.clone();
///
/// let frame_view = shared.current();
/// provider.publish(WeatherSnapshot::new(28.0, 10.0, 0.0, 2.0, 45.0, 0.0, true));
///
/// // The frame that already holds a snapshot is unaffected
/// assert_eq!(*frame_view.temperature, 15.0);
/// assert_eq!(*shared.current().temperature, 28.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedWeather {
    slot: Arc<RwLock<Arc<WeatherSnapshot>>>,
}

impl SharedWeather {
    /// Create a handle holding `initial` (sanitized)
    #[must_use]
    pub fn new(initial: WeatherSnapshot) -> Self {
        SharedWeather {
            slot: Arc::new(RwLock::new(Arc::new(initial.sanitized()))),
        }
    }

    /// Replace the current snapshot
    ///
    /// The snapshot is sanitized before it becomes visible. A lock poisoned
    /// by a panicking writer is recovered; the slot only ever holds a whole
    /// snapshot.
    pub fn publish(&self, snapshot: WeatherSnapshot) {
        let next = Arc::new(snapshot.sanitized());
        info!(
            "Publishing weather snapshot: T={}, cloud={}, rain={}, wind={} @ {}, fog={:.2}, day={}",
            next.temperature,
            next.cloud_cover,
            next.rain,
            next.wind_speed,
            next.wind_direction,
            next.fog,
            next.is_day
        );
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }

    /// The snapshot to use for this frame
    #[must_use]
    pub fn current(&self) -> Arc<WeatherSnapshot> {
        let guard = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }
}
