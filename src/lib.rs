// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Music inventory frontend.
//!
//! The domain model is always available. The JSON mapping and the
//! client for the inventory backend are enabled by features.

pub use musinv_core::*;

#[cfg(feature = "json")]
pub use musinv_core_json as json;

#[cfg(feature = "client")]
pub use musinv_client as client;
