// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::future::Future;

use discro::{Publisher, Ref, Subscriber};

use crate::{Result, scope::ViewScope};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MutationState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed {
        err_msg: String,
    },
}

impl MutationState {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn err_msg(&self) -> Option<&str> {
        match self {
            Self::Failed { err_msg } => Some(err_msg),
            Self::Idle | Self::Pending | Self::Succeeded => None,
        }
    }

    fn start_pending(&mut self) -> bool {
        if self.is_pending() {
            // Concurrent mutations share the pending state
            return false;
        }
        *self = Self::Pending;
        true
    }

    fn finish<T>(&mut self, result: &Result<T>) -> bool {
        let next = match result {
            Ok(_) => Self::Succeeded,
            Err(err) => Self::Failed {
                err_msg: err.to_string(),
            },
        };
        if *self == next {
            return false;
        }
        *self = next;
        true
    }
}

/// Executes write operations and tracks their outcome.
#[derive(Debug, Default)]
pub struct Mutation {
    state: Publisher<MutationState>,
}

impl Mutation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn read(&self) -> Ref<'_, MutationState> {
        self.state.read()
    }

    #[must_use]
    pub fn subscribe_changed(&self) -> Subscriber<MutationState> {
        self.state.subscribe_changed()
    }

    /// Run the operation within the scope.
    ///
    /// The `on_success` callback is invoked after the operation
    /// succeeded and before the outcome is published. It is not
    /// invoked if the operation failed or has been cancelled.
    pub async fn mutate<T>(
        &self,
        scope: &ViewScope,
        operation: impl Future<Output = Result<T>>,
        on_success: impl FnOnce(&T),
    ) -> Result<T> {
        self.state.modify(MutationState::start_pending);
        let pending = PendingMutation {
            state: Some(&self.state),
        };
        let result = scope.run(operation).await;
        match &result {
            Ok(output) => {
                on_success(output);
            }
            Err(err) => {
                log::warn!("Mutation failed: {err}");
            }
        }
        pending.finish(&result);
        result
    }
}

/// Resets the pending state when dropped before finishing.
struct PendingMutation<'a> {
    state: Option<&'a Publisher<MutationState>>,
}

impl PendingMutation<'_> {
    fn finish<T>(mut self, result: &Result<T>) {
        if let Some(state) = self.state.take() {
            state.modify(|state| state.finish(result));
        }
    }
}

impl Drop for PendingMutation<'_> {
    fn drop(&mut self) {
        let Some(state) = self.state.take() else {
            return;
        };
        log::debug!("Mutation dropped while pending");
        state.modify(|state| {
            if !state.is_pending() {
                return false;
            }
            *state = MutationState::Idle;
            true
        });
    }
}
