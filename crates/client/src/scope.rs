// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::{Error, Result};

/// Lifetime of a view.
///
/// Requests started within a scope are abandoned when the scope is
/// cancelled or dropped. Child scopes are cancelled together with
/// their parent.
#[derive(Debug, Default)]
pub struct ViewScope {
    cancellation_token: CancellationToken,
}

impl ViewScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            cancellation_token: self.cancellation_token.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }

    /// Completes when the scope has been cancelled.
    pub async fn cancelled(&self) {
        self.cancellation_token.cancelled().await;
    }

    /// Run a request until it completes or the scope is cancelled.
    pub async fn run<T>(&self, request: impl Future<Output = Result<T>>) -> Result<T> {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }
        self.cancellation_token
            .run_until_cancelled(request)
            .await
            .unwrap_or(Err(Error::Cancelled))
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.cancellation_token.cancel();
    }
}
