use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::warn;

static STATS_LOCK_POISON_WARNED: AtomicBool = AtomicBool::new(false);

fn warn_stats_lock_poison_once(operation: &'static str) {
    if STATS_LOCK_POISON_WARNED
        .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
        .is_ok()
    {
        warn!(operation, "loop stats lock poisoned; recovered inner value");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoopStatsSnapshot {
    pub fps: f32,
    pub tps: f32,
    pub avg_frame_ms: f32,
    pub max_frame_ms: f32,
}

#[derive(Clone, Debug)]
pub struct StatsHandle {
    snapshot: Arc<Mutex<LoopStatsSnapshot>>,
}

impl Default for StatsHandle {
    fn default() -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(LoopStatsSnapshot::default())),
        }
    }
}

impl StatsHandle {
    pub fn snapshot(&self) -> LoopStatsSnapshot {
        match self.snapshot.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => {
                warn_stats_lock_poison_once("read");
                *poisoned.into_inner()
            }
        }
    }

    pub(crate) fn publish(&self, snapshot: LoopStatsSnapshot) {
        match self.snapshot.lock() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => {
                warn_stats_lock_poison_once("write");
                let mut guard = poisoned.into_inner();
                *guard = snapshot;
            }
        }
    }
}

#[derive(Debug)]
pub(crate) struct StatsAccumulator {
    interval_start: Instant,
    interval: Duration,
    frames: u32,
    ticks: u32,
    frame_time_sum: Duration,
    frame_time_max: Duration,
}

impl StatsAccumulator {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval_start: Instant::now(),
            interval,
            frames: 0,
            ticks: 0,
            frame_time_sum: Duration::ZERO,
            frame_time_max: Duration::ZERO,
        }
    }

    pub(crate) fn record_frame(&mut self, frame_dt: Duration) {
        self.frames = self.frames.saturating_add(1);
        self.frame_time_sum = self.frame_time_sum.saturating_add(frame_dt);
        self.frame_time_max = self.frame_time_max.max(frame_dt);
    }

    pub(crate) fn record_tick(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    pub(crate) fn maybe_snapshot(&mut self, now: Instant) -> Option<LoopStatsSnapshot> {
        let elapsed = now.saturating_duration_since(self.interval_start);
        if elapsed < self.interval {
            return None;
        }

        let elapsed_seconds = elapsed.as_secs_f32().max(f32::EPSILON);
        let avg_frame_ms = if self.frames == 0 {
            0.0
        } else {
            (self.frame_time_sum.as_secs_f32() / self.frames as f32) * 1000.0
        };

        let snapshot = LoopStatsSnapshot {
            fps: self.frames as f32 / elapsed_seconds,
            tps: self.ticks as f32 / elapsed_seconds,
            avg_frame_ms,
            max_frame_ms: self.frame_time_max.as_secs_f32() * 1000.0,
        };

        self.interval_start = now;
        self.frames = 0;
        self.ticks = 0;
        self.frame_time_sum = Duration::ZERO;
        self.frame_time_max = Duration::ZERO;

        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::thread;

    use super::*;

    fn poison_lock(lock: &Mutex<LoopStatsSnapshot>) {
        thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _guard = lock.lock().expect("lock guard");
                    panic!("poison stats lock");
                })
                .join();
        });
    }

    #[test]
    fn snapshot_computes_expected_rates() {
        let mut accumulator = StatsAccumulator::new(Duration::from_secs(1));
        let base = Instant::now();

        accumulator.record_frame(Duration::from_millis(10));
        accumulator.record_frame(Duration::from_millis(30));
        for _ in 0..4 {
            accumulator.record_tick();
        }

        let snapshot = accumulator
            .maybe_snapshot(base + Duration::from_secs(1))
            .expect("snapshot should be emitted");

        assert!((snapshot.fps - 2.0).abs() < 0.05);
        assert!((snapshot.tps - 4.0).abs() < 0.05);
        assert!((snapshot.avg_frame_ms - 20.0).abs() < 0.001);
        assert!((snapshot.max_frame_ms - 30.0).abs() < 0.001);
    }

    #[test]
    fn snapshot_not_emitted_before_interval() {
        let mut accumulator = StatsAccumulator::new(Duration::from_secs(1));
        let base = Instant::now();
        accumulator.record_frame(Duration::from_millis(16));

        assert!(accumulator
            .maybe_snapshot(base + Duration::from_millis(400))
            .is_none());
    }

    #[test]
    fn max_frame_time_resets_between_intervals() {
        let mut accumulator = StatsAccumulator::new(Duration::from_secs(1));
        let base = Instant::now();

        accumulator.record_frame(Duration::from_millis(50));
        let first = accumulator
            .maybe_snapshot(base + Duration::from_secs(1))
            .expect("first snapshot");
        assert!((first.max_frame_ms - 50.0).abs() < 0.001);

        accumulator.record_frame(Duration::from_millis(5));
        let second = accumulator
            .maybe_snapshot(base + Duration::from_secs(2))
            .expect("second snapshot");
        assert!((second.max_frame_ms - 5.0).abs() < 0.001);
    }

    #[test]
    fn handle_recovers_after_poison_without_panic() {
        let handle = StatsHandle::default();
        poison_lock(handle.snapshot.as_ref());

        let expected = LoopStatsSnapshot {
            fps: 30.0,
            tps: 60.0,
            avg_frame_ms: 12.0,
            max_frame_ms: 40.0,
        };
        handle.publish(expected);

        let actual = handle.snapshot();
        assert_eq!(actual.fps, expected.fps);
        assert_eq!(actual.tps, expected.tps);
    }
}
