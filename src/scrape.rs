use std::{sync::Arc, time::Duration};

use headless_chrome::{Browser, Tab};

use crate::{
    config::Config,
    html::get_text,
    lookup::{Lookup, TimesTable},
    receipt::ReceiptNumber,
};

mod puppeteer;

pub use puppeteer::{
    clear_value, find, find_all, first_tab, navigate_to, outer_html, puppeteer, select_by_text,
    wait_until, with_tab,
};

pub const CASE_STATUS_URL: &str = "https://egov.uscis.gov/casestatus/landing.do";
pub const PROCESSING_TIMES_URL: &str = "https://egov.uscis.gov/processing-times/";

mod selector {
    pub const RECEIPT_INPUT: &str = "input[name=\"appReceiptNum\"]";
    pub const SEARCH_BUTTON: &str = "[name=\"initCaseSearch\"]";
    pub const STATUS_PANEL: &str = ".text-center";

    pub const FORM_SELECT: &str = "#selectForm";
    pub const OFFICE_SELECT: &str = "#officeOrCenter";
    pub const TIMES_BUTTON: &str = "#getProcTimes";
    // several cells share each id, one per table row
    pub const ESTIMATE: &str = "[id=\"est\"]";
    pub const DATE: &str = "[id=\"date\"]";
}

/// One Chrome instance with a single working tab.
///
/// Chrome is shut down when the session is dropped, on every exit path.
pub struct Session {
    tab: Arc<Tab>,
    timeout: Duration,
    _browser: Browser,
}

impl Session {
    pub fn launch(config: &Config) -> anyhow::Result<Self> {
        let timeout = config.wait_timeout();
        let browser = puppeteer(
            config.headless,
            !config.no_sandbox,
            config.proxy.as_deref(),
            timeout.max(Duration::from_secs(30)) * 2,
        )?;
        let tab = first_tab(&browser)?;
        tracing::info!(target: "browser", "chrome is up (headless = {})", config.headless);

        Ok(Self {
            tab,
            timeout,
            _browser: browser,
        })
    }

    async fn select(&self, selector: &'static str, text: &str) -> anyhow::Result<()> {
        let option = text.to_owned();
        let what = format!("option {text:?} in {selector}");

        wait_until(&self.tab, self.timeout, &what, move |tab| {
            let Some(select) = find(tab, selector)? else {
                return Ok(None);
            };
            Ok(select_by_text(&select, &option)?.then_some(()))
        })
        .await
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::info!(target: "browser", "closing chrome");
    }
}

impl Lookup for Session {
    async fn case_status(&mut self, receipt: &ReceiptNumber) -> anyhow::Result<String> {
        navigate_to(&self.tab, CASE_STATUS_URL.into()).await?;

        wait_until(&self.tab, self.timeout, "the receipt number box", |tab| {
            Ok(find(tab, selector::RECEIPT_INPUT)?.map(|_| ()))
        })
        .await?;

        let number = receipt.to_string();
        with_tab(&self.tab, move |tab| {
            let input = tab.find_element(selector::RECEIPT_INPUT)?;
            clear_value(&input)?;
            input.click()?.type_into(&number)?;
            tab.find_element(selector::SEARCH_BUTTON)?.click()?;
            tab.wait_until_navigated()?;
            Ok(())
        })
        .await?;

        wait_until(&self.tab, self.timeout, "the status panel", |tab| {
            for panel in find_all(tab, selector::STATUS_PANEL)? {
                let html = outer_html(&panel)?;
                if html.contains("<h1") {
                    return Ok(Some(html));
                }
            }
            Ok(None)
        })
        .await
    }

    async fn processing_times(&mut self, form: &str, office: &str) -> anyhow::Result<TimesTable> {
        navigate_to(&self.tab, PROCESSING_TIMES_URL.into()).await?;

        self.select(selector::FORM_SELECT, form).await?;
        // the office list is filled in only after a form is chosen
        self.select(selector::OFFICE_SELECT, office).await?;

        with_tab(&self.tab, |tab| {
            tab.find_element(selector::TIMES_BUTTON)?.click()?;
            Ok(())
        })
        .await?;

        wait_until(&self.tab, self.timeout, "the processing times table", |tab| {
            let estimates = find_all(tab, selector::ESTIMATE)?
                .iter()
                .map(outer_html)
                .collect::<anyhow::Result<Vec<_>>>()?;
            let dates = find_all(tab, selector::DATE)?
                .iter()
                .map(outer_html)
                .collect::<anyhow::Result<Vec<_>>>()?;

            let ready = !dates.is_empty()
                && estimates.len() == dates.len()
                && dates.iter().all(|d| !get_text(d).trim().is_empty());
            Ok(ready.then_some(TimesTable { estimates, dates }))
        })
        .await
    }
}
