// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use reqwest::StatusCode;
use thiserror::Error;

/// A failed operation.
#[derive(Error, Debug)]
pub enum Error {
    /// The request has not been sent.
    #[error("invalid request: {0}")]
    InvalidRequest(anyhow::Error),

    #[error(transparent)]
    Network(#[from] reqwest::Error),

    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("undecodable response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cancelled")]
    Cancelled,
}

impl Error {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            Self::InvalidRequest(_) | Self::Decode(_) | Self::Cancelled => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
