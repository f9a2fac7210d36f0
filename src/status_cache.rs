// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coalescing status cache.
//!
//! Characteristic getters tend to fire in bursts: the accessory framework
//! asks for power, rotation speed and swing mode almost at once. The cache
//! collapses every request made within the throttle window, or while a
//! query is in flight, into a single upstream query whose snapshot is handed
//! to all waiters.
//!
//! ```text
//! Idle --request--> Pending (throttle, readiness, query) --resolve--> Idle
//!                      ^  |
//!                      |  +-- further requests join the pending refresh
//! ```
//!
//! Transport failures during a query do not reach the waiters as errors.
//! They resolve to [`FanStatus::disconnected`] so polling keeps running.
//! Parse failures and readiness timeouts are returned to every waiter of
//! the refresh.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::error::{Error, ProtocolError, Result};
use crate::protocol::Protocol;
use crate::state::{FanStatus, parse_query_result};

type Outcome = std::result::Result<FanStatus, Arc<Error>>;

/// Result of one [`StatusCache::poll`] cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Power, intensity or oscillation changed since the previous poll.
    Changed(FanStatus),
    /// Nothing observable changed.
    Unchanged,
}

impl PollOutcome {
    /// Returns the new snapshot if something changed.
    #[must_use]
    pub fn changed(self) -> Option<FanStatus> {
        match self {
            Self::Changed(status) => Some(status),
            Self::Unchanged => None,
        }
    }
}

/// Shares one upstream status query among concurrent requesters.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use alexa_fan_lib::config::ApiConfig;
/// use alexa_fan_lib::status_cache::StatusCache;
///
/// # async fn example() -> alexa_fan_lib::Result<()> {
/// let client = Arc::new(ApiConfig::new("session-id=...").into_client()?);
/// client.initialize().await?;
///
/// let cache = StatusCache::new(client, "fan-1", Duration::from_millis(50));
///
/// // Both calls are answered by the same query.
/// let (a, b) = tokio::join!(cache.current(), cache.current());
/// assert_eq!(a?, b?);
/// # Ok(())
/// # }
/// ```
pub struct StatusCache<P> {
    shared: Arc<Shared<P>>,
    previous_poll: Mutex<Option<FanStatus>>,
}

struct Shared<P> {
    protocol: Arc<P>,
    device_id: String,
    throttle: Duration,
    slot: Mutex<Slot>,
}

#[derive(Default)]
struct Slot {
    pending: Option<watch::Receiver<Option<Outcome>>>,
    last: Option<FanStatus>,
}

impl<P: Protocol + 'static> StatusCache<P> {
    /// Creates a cache for one device.
    pub fn new(protocol: Arc<P>, device_id: impl Into<String>, throttle: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                protocol,
                device_id: device_id.into(),
                throttle,
                slot: Mutex::new(Slot::default()),
            }),
            previous_poll: Mutex::new(None),
        }
    }

    /// Returns the device this cache queries.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.shared.device_id
    }

    /// Returns the coalescing window.
    #[must_use]
    pub fn throttle(&self) -> Duration {
        self.shared.throttle
    }

    /// Returns the most recently resolved snapshot, degraded ones included.
    #[must_use]
    pub fn last_known(&self) -> Option<FanStatus> {
        self.shared.slot.lock().last.clone()
    }

    /// Returns `true` while a refresh is scheduled or in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.shared
            .slot
            .lock()
            .pending
            .as_ref()
            .is_some_and(|pending| pending.has_changed().is_ok())
    }

    /// Signals interest in a fresh snapshot without waiting for it.
    ///
    /// The refresh runs on the current Tokio runtime. Outside a runtime the
    /// request is logged and dropped.
    pub fn request_refresh(&self) {
        drop(self.join_or_schedule());
    }

    /// Returns the snapshot of the pending refresh, scheduling one if needed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Refresh` wrapping the parse failure or readiness
    /// timeout that ended the refresh, or `ProtocolError::ChannelClosed` when
    /// the refresh could not run.
    pub async fn current(&self) -> Result<FanStatus> {
        resolve(self.join_or_schedule()).await
    }

    /// Refreshes and reports whether anything observable changed.
    ///
    /// The first poll always reports a change. Degraded snapshots are
    /// remembered too, so recovering from a failed query counts as a change.
    ///
    /// # Errors
    ///
    /// Returns the error of [`current`](Self::current). The previous snapshot
    /// is kept in that case.
    pub async fn poll(&self) -> Result<PollOutcome> {
        let status = self.current().await?;

        let mut previous = self.previous_poll.lock();
        let changed = previous
            .as_ref()
            .is_none_or(|previous| status.differs_from(previous));
        *previous = Some(status.clone());

        if changed {
            tracing::debug!(device_id = %self.shared.device_id, ?status, "Fan status changed");
            Ok(PollOutcome::Changed(status))
        } else {
            tracing::trace!(device_id = %self.shared.device_id, "Fan status unchanged");
            Ok(PollOutcome::Unchanged)
        }
    }

    fn join_or_schedule(&self) -> watch::Receiver<Option<Outcome>> {
        let mut slot = self.shared.slot.lock();

        // A dropped sender means the refresh task died without resolving.
        if let Some(pending) = slot.pending.as_ref().filter(|p| p.has_changed().is_ok()) {
            tracing::trace!(device_id = %self.shared.device_id, "Joining pending refresh");
            return pending.clone();
        }

        let (sender, receiver) = watch::channel(None);
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(
                device_id = %self.shared.device_id,
                "No Tokio runtime available, status refresh skipped"
            );
            // Dropping the sender resolves waiters with a closed-channel error.
            return receiver;
        };
        slot.pending = Some(receiver.clone());
        drop(slot);

        tracing::trace!(device_id = %self.shared.device_id, "Scheduling refresh");
        runtime.spawn(refresh(Arc::clone(&self.shared), sender));
        receiver
    }
}

impl<P: Protocol> Shared<P> {
    async fn fetch(&self) -> Outcome {
        self.protocol.readiness().wait().await.map_err(Arc::new)?;

        match self.protocol.query_device_states(&self.device_id).await {
            Ok(result) => parse_query_result(&result).map_err(|e| {
                tracing::warn!(device_id = %self.device_id, error = %e, "Failed to parse fan status");
                Arc::new(Error::Parse(e))
            }),
            Err(e) => {
                let e = Error::UpstreamQuery(e);
                tracing::warn!(
                    device_id = %self.device_id,
                    error = %e,
                    "Reporting fan as disconnected"
                );
                Ok(FanStatus::disconnected())
            }
        }
    }
}

async fn refresh<P: Protocol>(shared: Arc<Shared<P>>, sender: watch::Sender<Option<Outcome>>) {
    tokio::time::sleep(shared.throttle).await;
    let outcome = shared.fetch().await;

    let mut slot = shared.slot.lock();
    slot.pending = None;
    if let Ok(status) = &outcome {
        slot.last = Some(status.clone());
    }
    sender.send_replace(Some(outcome));
}

async fn resolve(mut receiver: watch::Receiver<Option<Outcome>>) -> Result<FanStatus> {
    let outcome = match receiver.wait_for(Option::is_some).await {
        Ok(outcome) => outcome.clone(),
        Err(_) => None,
    };

    match outcome {
        Some(Ok(status)) => Ok(status),
        Some(Err(e)) => Err(Error::Refresh(e)),
        None => Err(Error::Protocol(ProtocolError::ChannelClosed(
            "status refresh ended without a result".to_string(),
        ))),
    }
}

impl<P> fmt::Debug for StatusCache<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.shared.slot.lock();
        f.debug_struct("StatusCache")
            .field("device_id", &self.shared.device_id)
            .field("throttle", &self.shared.throttle)
            .field("pending", &slot.pending.is_some())
            .field("last", &slot.last)
            .finish_non_exhaustive()
    }
}
