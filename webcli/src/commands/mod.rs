// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::bail;

use musinv_client::InventoryApi;
use musinv_core::{
    AddTitlePlan, Summary,
    add_title::plan_add_title,
    sorting::albums_by_artist,
};

use crate::{cli::Command, output};

/// Execute the command and return the output.
pub(crate) async fn execute<A>(api: &A, command: Command) -> anyhow::Result<String>
where
    A: InventoryApi,
{
    match command {
        Command::List { search, sorted } => {
            let records = api.list(search.as_deref()).await?;
            if sorted {
                Ok(output::sorted_listing(&records))
            } else {
                Ok(output::listing(&records))
            }
        }
        Command::Artist { name } => {
            let records = api.list(None).await?;
            Ok(output::albums(&name, &albums_by_artist(&records, &name)))
        }
        Command::Add { add_title, dry_run } => {
            let records = api.list(None).await?;
            let plan = plan_add_title(&records, add_title)?;
            if dry_run {
                log::info!("Dry run");
                return Ok(output::add_title_plan(&plan));
            }
            match plan {
                AddTitlePlan::AppendTitle { updated } => {
                    let updated = api.update(updated.serial_number, updated.body).await?;
                    Ok(format!(
                        "Appended title to record\n{}",
                        output::record_line(&updated)
                    ))
                }
                AddTitlePlan::Unchanged { serial_number } => Ok(format!(
                    "Record {serial_number} already contains the title"
                )),
                AddTitlePlan::CreateRecord {
                    created,
                    reassigned_from,
                } => {
                    if let Some(reassigned_from) = reassigned_from {
                        log::warn!(
                            "Serial number {reassigned_from} is already taken, using {} instead",
                            created.serial_number
                        );
                    }
                    let created = api
                        .create(Some(created.serial_number), created.body)
                        .await?;
                    Ok(format!("Created record\n{}", output::record_line(&created)))
                }
            }
        }
        Command::Update {
            serial_number,
            patch,
        } => {
            if patch.is_empty() {
                bail!("nothing to update");
            }
            let records = api.list(None).await?;
            let Some(mut record) = records
                .into_iter()
                .find(|record| record.serial_number == serial_number)
            else {
                bail!("record {serial_number} not found");
            };
            patch.apply_on(&mut record.body);
            let updated = api.update(serial_number, record.body).await?;
            Ok(format!("Updated record\n{}", output::record_line(&updated)))
        }
        Command::Delete { serial_number } => {
            api.delete(serial_number).await?;
            Ok(format!("Deleted record {serial_number}"))
        }
        Command::Stats => {
            let records = api.list(None).await?;
            Ok(output::stats(&Summary::of(&records)))
        }
    }
}
