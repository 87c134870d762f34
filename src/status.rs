use anyhow::Context;

use crate::{html::headline, lookup::Lookup, receipt::ReceiptNumber};

#[derive(Clone, Debug)]
pub struct CaseStatus {
    pub receipt: ReceiptNumber,
    pub html: String,
}

impl CaseStatus {
    pub fn headline(&self) -> anyhow::Result<String> {
        headline(&self.html)
            .with_context(|| format!("no status headline on the panel for {}", self.receipt))
    }
}

/// Looks up `first` and the `count - 1` receipts after it, one at a time.
pub async fn get_app_status<L: Lookup>(
    lookup: &mut L,
    first: &ReceiptNumber,
    count: usize,
) -> anyhow::Result<Vec<CaseStatus>> {
    let mut status = Vec::with_capacity(count);
    for receipt in first.sequence(count)? {
        tracing::info!(target: "status", "\x1b[33mlooking up\x1b[0m {receipt} ...");
        let html = lookup
            .case_status(&receipt)
            .await
            .with_context(|| format!("case status lookup for {receipt}"))?;
        tracing::debug!(target: "status", "{receipt}: {} bytes", html.len());
        status.push(CaseStatus { receipt, html });
    }
    Ok(status)
}
