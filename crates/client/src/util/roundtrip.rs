// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

type SequenceNumber = u64;

/// Identifies a single pending request.
///
/// Only the token of the most recently started request is accepted
/// when finishing, i.e. responses of outdated requests are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingToken {
    sequence: SequenceNumber,
    generation: Generation,
}

impl PendingToken {
    /// The cache generation when the request has been started.
    #[must_use]
    pub const fn generation(self) -> Generation {
        self.generation
    }
}

/// Counts invalidations of cached data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn initial() -> Self {
        Self(0)
    }

    pub fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// Issues and accepts [`PendingToken`]s.
#[derive(Debug, Default)]
pub struct Watermark {
    sequence: SequenceNumber,
    pending: Option<PendingToken>,
}

impl Watermark {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sequence: 0,
            pending: None,
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a new request, replacing any pending request.
    pub fn start_pending(&mut self, generation: Generation) -> PendingToken {
        self.sequence = self.sequence.wrapping_add(1);
        let token = PendingToken {
            sequence: self.sequence,
            generation,
        };
        self.pending = Some(token);
        token
    }

    /// Finish the pending request.
    ///
    /// Returns `false` and leaves the state unchanged if the token is
    /// outdated.
    pub fn finish_pending(&mut self, token: PendingToken) -> bool {
        if self.pending != Some(token) {
            return false;
        }
        self.pending = None;
        true
    }
}
