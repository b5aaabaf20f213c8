//! Background poll scheduler
//!
//! One cooperative loop drives every monitored device: each iteration it
//! applies pending enroll/unenroll requests, ticks every device whose
//! interval has elapsed, and sleeps briefly. All per-device work runs
//! sequentially on this one thread, so no device's state is ever mutated
//! from two places at once.

use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use device_store::DeviceId;
use tracing::{debug, warn};

use crate::error::{Result, StateError};

/// Sleep between scheduler iterations; bounds busy-waiting and sets the
/// floor on tick resolution
const LOOP_SLEEP: Duration = Duration::from_millis(100);

/// A device the scheduler drives
pub trait Monitored: Send + Sync {
    fn id(&self) -> DeviceId;
    /// Minimum time between ticks
    fn interval(&self) -> Duration;
    /// One unit of work: refresh for players, refresh-and-decide for the
    /// manager. Must never panic; errors are handled at the device.
    fn tick(&self);
}

enum ControlMessage {
    Enroll(Arc<dyn Monitored>),
    Unenroll(DeviceId),
    Shutdown,
}

/// Handle to the running scheduler thread
pub struct PollScheduler {
    control: Sender<ControlMessage>,
    handle: Option<JoinHandle<()>>,
}

impl PollScheduler {
    pub fn start() -> Self {
        Self::start_with_sleep(LOOP_SLEEP)
    }

    fn start_with_sleep(sleep: Duration) -> Self {
        let (control, inbox) = mpsc::channel::<ControlMessage>();
        let handle = thread::spawn(move || {
            // `None` = never ticked, due immediately
            let mut monitored: Vec<(Arc<dyn Monitored>, Option<Instant>)> = Vec::new();

            loop {
                // Apply all pending control messages before ticking, so an
                // unenrolled device never sees another tick
                loop {
                    match inbox.try_recv() {
                        Ok(ControlMessage::Enroll(device)) => {
                            let id = device.id();
                            monitored.retain(|(d, _)| d.id() != id);
                            debug!(device = %id, "enrolled for monitoring");
                            // Due immediately: published state should not
                            // wait a full interval after enrollment
                            monitored.push((device, None));
                        }
                        Ok(ControlMessage::Unenroll(id)) => {
                            monitored.retain(|(d, _)| d.id() != id);
                            debug!(device = %id, "unenrolled from monitoring");
                        }
                        Ok(ControlMessage::Shutdown) => return,
                        Err(mpsc::TryRecvError::Empty) => break,
                        Err(mpsc::TryRecvError::Disconnected) => return,
                    }
                }

                for (device, last) in monitored.iter_mut() {
                    let due = match last {
                        Some(t) => t.elapsed() >= device.interval(),
                        None => true,
                    };
                    if due {
                        device.tick();
                        *last = Some(Instant::now());
                    }
                }

                thread::sleep(sleep);
            }
        });

        Self {
            control,
            handle: Some(handle),
        }
    }

    /// Start (or restart) monitoring a device; enrolling an already
    /// monitored id replaces the previous entry
    pub fn enroll(&self, device: Arc<dyn Monitored>) {
        if self.control.send(ControlMessage::Enroll(device)).is_err() {
            warn!("scheduler loop is gone, enroll dropped");
        }
    }

    /// Stop monitoring a device; unknown ids are a no-op
    pub fn unenroll(&self, id: DeviceId) {
        if self.control.send(ControlMessage::Unenroll(id)).is_err() {
            warn!("scheduler loop is gone, unenroll dropped");
        }
    }

    /// Stop the loop and wait for it to finish
    ///
    /// An in-flight tick is allowed to complete; nothing is forcibly
    /// cancelled.
    pub fn shutdown(mut self) -> Result<()> {
        let _ = self.control.send(ControlMessage::Shutdown);
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| StateError::ShutdownFailed),
            None => Ok(()),
        }
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        let _ = self.control.send(ControlMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingDevice {
        id: DeviceId,
        interval: Duration,
        ticks: AtomicUsize,
    }

    impl CountingDevice {
        fn new(id: u64, interval: Duration) -> Arc<Self> {
            Arc::new(Self {
                id: DeviceId::new(id),
                interval,
                ticks: AtomicUsize::new(0),
            })
        }

        fn count(&self) -> usize {
            self.ticks.load(Ordering::SeqCst)
        }
    }

    impl Monitored for CountingDevice {
        fn id(&self) -> DeviceId {
            self.id
        }

        fn interval(&self) -> Duration {
            self.interval
        }

        fn tick(&self) {
            self.ticks.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_enrolled_device_gets_ticked() {
        let scheduler = PollScheduler::start_with_sleep(Duration::from_millis(5));
        let device = CountingDevice::new(1, Duration::ZERO);
        scheduler.enroll(device.clone());

        thread::sleep(Duration::from_millis(150));
        assert!(device.count() >= 2, "expected multiple ticks, got {}", device.count());
        scheduler.shutdown().unwrap();
    }

    #[test]
    fn test_interval_limits_tick_rate() {
        let scheduler = PollScheduler::start_with_sleep(Duration::from_millis(5));
        let device = CountingDevice::new(1, Duration::from_secs(60));
        scheduler.enroll(device.clone());

        thread::sleep(Duration::from_millis(150));
        // The immediate post-enrollment tick, then nothing until the
        // interval elapses
        assert_eq!(device.count(), 1);
        scheduler.shutdown().unwrap();
    }

    #[test]
    fn test_unenroll_stops_ticks_and_is_idempotent() {
        let scheduler = PollScheduler::start_with_sleep(Duration::from_millis(5));
        let device = CountingDevice::new(1, Duration::ZERO);
        scheduler.enroll(device.clone());
        thread::sleep(Duration::from_millis(100));

        scheduler.unenroll(device.id());
        scheduler.unenroll(device.id());
        thread::sleep(Duration::from_millis(50));
        let after_unenroll = device.count();
        thread::sleep(Duration::from_millis(100));
        assert_eq!(device.count(), after_unenroll);
        scheduler.shutdown().unwrap();
    }

    #[test]
    fn test_reenroll_replaces_entry() {
        let scheduler = PollScheduler::start_with_sleep(Duration::from_millis(5));
        let first = CountingDevice::new(1, Duration::ZERO);
        let second = CountingDevice::new(1, Duration::ZERO);
        scheduler.enroll(first.clone());
        scheduler.enroll(second.clone());

        thread::sleep(Duration::from_millis(100));
        let first_count = first.count();
        thread::sleep(Duration::from_millis(100));
        // Only the replacement keeps ticking
        assert_eq!(first.count(), first_count);
        assert!(second.count() >= 2);
        scheduler.shutdown().unwrap();
    }

    #[test]
    fn test_shutdown_joins() {
        let scheduler = PollScheduler::start_with_sleep(Duration::from_millis(5));
        assert!(scheduler.shutdown().is_ok());
    }
}
