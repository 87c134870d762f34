use crate::receipt::ReceiptNumber;

/// Raw result cells of the processing-times table, in page order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimesTable {
    pub estimates: Vec<String>,
    pub dates: Vec<String>,
}

/// The two lookups the public site offers.
///
/// [`crate::scrape::Session`] answers them with a live browser.
#[allow(async_fn_in_trait)]
pub trait Lookup {
    /// Outer HTML of the status panel for one receipt.
    async fn case_status(&mut self, receipt: &ReceiptNumber) -> anyhow::Result<String>;

    /// `form` and `office` are the visible texts of the two dropdowns.
    async fn processing_times(&mut self, form: &str, office: &str) -> anyhow::Result<TimesTable>;
}
