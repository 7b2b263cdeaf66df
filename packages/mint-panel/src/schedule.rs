use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::oneshot;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use crate::chain::{SaleContract, Wallet};
use crate::error::PolicyError;
use crate::panel::MintPanel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshPolicy {
    /// How often the phase and countdown are recomputed.
    pub tick_interval: Duration,
    /// How often contract reads are repeated.
    pub refresh_interval: Duration,
}

impl RefreshPolicy {
    pub fn new(tick_interval: Duration, refresh_interval: Duration) -> Result<Self, PolicyError> {
        let policy = RefreshPolicy {
            tick_interval,
            refresh_interval,
        };
        policy.check()?;
        Ok(policy)
    }

    /// The tick drives everything, so it must run and refreshes can not be
    /// more frequent than it.
    pub fn check(&self) -> Result<(), PolicyError> {
        if self.tick_interval.is_zero() {
            return Err(PolicyError::ZeroTickInterval);
        }
        if self.refresh_interval < self.tick_interval {
            return Err(PolicyError::RefreshFasterThanTick {
                tick: self.tick_interval,
                refresh: self.refresh_interval,
            });
        }
        Ok(())
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        RefreshPolicy {
            tick_interval: Duration::from_secs(1),
            refresh_interval: Duration::from_secs(10),
        }
    }
}

/// Actions due at an instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Due {
    pub tick: bool,
    pub refresh: bool,
}

/// Decides what is due given the time elapsed since the session started.
/// Both actions are due on the first call.
#[derive(Clone, Debug)]
pub struct RefreshSchedule {
    policy: RefreshPolicy,
    last_tick: Option<Duration>,
    last_refresh: Option<Duration>,
}

impl RefreshSchedule {
    pub fn new(policy: RefreshPolicy) -> Self {
        RefreshSchedule {
            policy,
            last_tick: None,
            last_refresh: None,
        }
    }

    pub fn due(&mut self, elapsed: Duration) -> Due {
        let due = Due {
            tick: is_due(self.last_tick, elapsed, self.policy.tick_interval),
            refresh: is_due(self.last_refresh, elapsed, self.policy.refresh_interval),
        };
        if due.tick {
            self.last_tick = Some(elapsed);
        }
        if due.refresh {
            self.last_refresh = Some(elapsed);
        }
        due
    }
}

fn is_due(last: Option<Duration>, elapsed: Duration, interval: Duration) -> bool {
    last.map_or(true, |last| elapsed.saturating_sub(last) >= interval)
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

/// Drives `panel` until `shutdown` fires: ticks on every tick interval and
/// refreshes when the refresh interval has passed or the phase changed.
/// `clock` returns the current unix time in seconds. An invalid policy is
/// rejected before anything runs.
pub async fn run_panel<C, W, F>(
    panel: &MintPanel<C, W>,
    policy: RefreshPolicy,
    clock: F,
    mut shutdown: oneshot::Receiver<()>,
) -> Result<(), PolicyError>
where
    C: SaleContract,
    W: Wallet,
    F: Fn() -> u64,
{
    policy.check()?;
    let started = Instant::now();
    let mut schedule = RefreshSchedule::new(policy);
    let mut interval = tokio::time::interval(policy.tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                debug!("panel loop stopped");
                break;
            }
            _ = interval.tick() => {
                let due = schedule.due(started.elapsed());
                let now = clock();
                let phase_changed = due.tick && panel.tick(now);
                if due.refresh || phase_changed {
                    panel.refresh(now).await;
                }
            }
        }
    }
    Ok(())
}
