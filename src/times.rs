use anyhow::Context;
use chrono::NaiveDate;
use compact_str::CompactString;
use serde::Serialize;

use crate::{
    date::{days_for_inquiry, parse_date},
    html::{get_text, squash},
    lookup::Lookup,
};

pub const I485: &str = "I-485 | Application to Register Permanent Residence or Adjust Status";
pub const I765: &str = "I-765 | Application for Employment Authorization";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormQuery {
    /// Short name used in the report, e.g. `I-765`.
    pub label: CompactString,
    pub form: CompactString,
    pub office: CompactString,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessingTime {
    pub form: CompactString,
    pub estimate: String,
    pub as_of: NaiveDate,
    pub days_for_inquiry: i64,
}

/// Which row of the results table belongs to `form`.
///
/// Forms whose code has a `4` as third character (I-485 and friends) come
/// back with an extra leading row, so their figures sit in the second one.
pub fn row_index(form: &str) -> usize {
    usize::from(form.as_bytes().get(2) == Some(&b'4'))
}

pub async fn get_times<L: Lookup>(
    lookup: &mut L,
    query: &FormQuery,
    received: NaiveDate,
) -> anyhow::Result<ProcessingTime> {
    tracing::info!(target: "times", "\x1b[33mlooking up\x1b[0m {} at {} ...", query.label, query.office);

    let table = lookup
        .processing_times(&query.form, &query.office)
        .await
        .with_context(|| format!("processing times lookup for {}", query.label))?;

    let r = row_index(&query.form);
    let (Some(est), Some(date)) = (table.estimates.get(r), table.dates.get(r)) else {
        anyhow::bail!(
            "processing times for {} have no row #{r} ({} estimates, {} dates)",
            query.label,
            table.estimates.len(),
            table.dates.len(),
        );
    };

    let estimate = squash(&get_text(est));
    let date = squash(&get_text(date));
    let as_of = parse_date(&date)
        .with_context(|| format!("posted date {date:?} for {}", query.label))?;
    let days = days_for_inquiry(received, as_of);

    tracing::info!(target: "times", "\x1b[36m{}\x1b[0m: {estimate}, as of {as_of}", query.label);

    Ok(ProcessingTime {
        form: query.label.clone(),
        estimate,
        as_of,
        days_for_inquiry: days,
    })
}
