// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Domain model of a music inventory.
//!
//! Pure data and functions without any I/O.

pub mod record;
pub use self::record::{InventoryRecord, Record, SerialNumber, YearType};

pub mod search;
pub use self::search::{SearchFilter, fold_search_text};

pub mod summary;
pub use self::summary::Summary;

pub mod sorting;

pub mod add_title;
pub use self::add_title::{AddTitle, AddTitlePlan, SerialConflict};

pub mod prelude {
    pub(crate) use semval::prelude::*;
    // Re-export trait methods from semval
    pub use semval::{IsValid, Validate as _};
}
