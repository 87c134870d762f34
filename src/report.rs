use core::fmt;

use compact_str::CompactString;
use serde::Serialize;

use crate::{
    config::Config,
    lookup::Lookup,
    receipt::ReceiptNumber,
    status::get_app_status,
    times::{ProcessingTime, get_times},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub form: CompactString,
    pub receipt: ReceiptNumber,
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Report {
    pub statuses: Vec<StatusLine>,
    /// In print order: I-765 first, then I-485.
    pub times: Vec<ProcessingTime>,
}

/// Status of every receipt in the batch, then the I-485 and I-765 processing
/// times, all through the same `lookup`.
pub async fn run<L: Lookup>(lookup: &mut L, config: &Config) -> anyhow::Result<Report> {
    let status = get_app_status(lookup, &config.first_receipt, config.forms.len()).await?;

    let [i485, i765] = config.queries();
    let t485 = get_times(lookup, &i485, config.received_date).await?;
    let t765 = get_times(lookup, &i765, config.received_date).await?;

    let statuses = config
        .forms
        .iter()
        .zip(status)
        .map(|(form, s)| {
            Ok(StatusLine {
                form: form.clone(),
                status: s.headline()?,
                receipt: s.receipt,
            })
        })
        .collect::<anyhow::Result<_>>()?;

    Ok(Report {
        statuses,
        times: vec![t765, t485],
    })
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status:")?;
        writeln!(f, "-------")?;
        for line in &self.statuses {
            writeln!(f, "{}: {}", line.form, line.status)?;
        }
        writeln!(f, "{}", "-".repeat(74))?;
        for t in &self.times {
            writeln!(
                f,
                "{} estimate waiting time: {}, inquiry in {} days",
                t.form, t.estimate, t.days_for_inquiry
            )?;
        }
        Ok(())
    }
}
