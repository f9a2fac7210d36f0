// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic status polling.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::protocol::Protocol;
use crate::status_cache::{PollOutcome, StatusCache};
use crate::subscription::CallbackRegistry;

/// Handle to a running poll loop.
///
/// The loop stops when the handle is dropped or [`stop`](Self::stop)ped.
#[derive(Debug)]
pub struct PollingHandle {
    task: JoinHandle<()>,
    interval: Duration,
}

impl PollingHandle {
    /// Returns the polling interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` once the loop has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the loop.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub(crate) fn spawn<P: Protocol + 'static>(
    cache: Arc<StatusCache<P>>,
    callbacks: Arc<CallbackRegistry>,
    interval: Duration,
) -> PollingHandle {
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match cache.poll().await {
                Ok(PollOutcome::Changed(status)) => {
                    for update in status.characteristic_updates() {
                        tracing::debug!(
                            device_id = %cache.device_id(),
                            characteristic = update.name(),
                            "Pushing characteristic update"
                        );
                        callbacks.dispatch(&update);
                    }
                    callbacks.dispatch_status(&status);
                }
                Ok(PollOutcome::Unchanged) => {}
                Err(e) => {
                    tracing::warn!(device_id = %cache.device_id(), error = %e, "Status poll failed");
                }
            }
        }
    });

    tracing::info!(?interval, "Started status polling");
    PollingHandle { task, interval }
}
