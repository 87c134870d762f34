use std::{borrow::Cow, ffi::OsStr, sync::Arc, time::Duration};

use headless_chrome::{Browser, Element, LaunchOptions, Tab, browser::tab::NoElementFound};
use serde_json::Value;
use tokio::{
    task::spawn_blocking,
    time::{Instant, sleep},
};

pub fn puppeteer(
    headless: bool,
    sandbox: bool,
    proxy: Option<&str>,
    idle_timeout: Duration,
) -> anyhow::Result<Browser> {
    Browser::new(LaunchOptions {
        args: vec![OsStr::new("--disable-blink-features=AutomationControlled")],
        headless,
        sandbox,
        proxy_server: proxy,
        idle_browser_timeout: idle_timeout,
        ..LaunchOptions::default()
    })
}

#[allow(clippy::significant_drop_tightening)]
pub fn first_tab(browser: &Browser) -> anyhow::Result<Arc<Tab>> {
    let tab = browser.new_tab()?;

    {
        let tabs_guard = browser
            .get_tabs()
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        for remain in &*tabs_guard {
            if !Arc::ptr_eq(&tab, remain) {
                remain.close(true)?;
            }
        }
    }

    Ok(tab)
}

pub async fn navigate_to(tab: &Arc<Tab>, url: Cow<'static, str>) -> anyhow::Result<()> {
    let tab = Arc::clone(tab);

    spawn_blocking(move || tab.navigate_to(&url)?.wait_until_navigated().map(|_| ())).await?
}

/// Runs `f` against the tab on the blocking pool.
pub async fn with_tab<T, F>(tab: &Arc<Tab>, f: F) -> anyhow::Result<T>
where
    F: FnOnce(&Tab) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let tab = Arc::clone(tab);

    spawn_blocking(move || f(&tab)).await?
}

/// Polls `probe` until it yields something or `timeout` runs out.
pub async fn wait_until<T, F>(
    tab: &Arc<Tab>,
    timeout: Duration,
    what: &str,
    probe: F,
) -> anyhow::Result<T>
where
    F: Fn(&Tab) -> anyhow::Result<Option<T>> + Send + Sync + 'static,
    T: Send + 'static,
{
    const PERIOD: Duration = Duration::from_millis(1832 / 4);

    let deadline = Instant::now() + timeout;
    let probe = Arc::new(probe);

    loop {
        let probe = Arc::clone(&probe);
        if let Some(value) = with_tab(tab, move |tab| (*probe)(tab)).await? {
            break Ok(value);
        }

        if Instant::now() >= deadline {
            anyhow::bail!("timed out after {timeout:?} waiting for {what}");
        }

        sleep(PERIOD).await;
    }
}

/// Like [`Tab::find_element`], but a missing element is `Ok(None)`.
pub fn find<'tab>(tab: &'tab Tab, selector: &str) -> anyhow::Result<Option<Element<'tab>>> {
    match tab.find_element(selector) {
        Ok(element) => Ok(Some(element)),
        Err(err) if err.is::<NoElementFound>() => Ok(None),
        Err(err) => Err(err),
    }
}

pub fn find_all<'tab>(tab: &'tab Tab, selector: &str) -> anyhow::Result<Vec<Element<'tab>>> {
    match tab.find_elements(selector) {
        Ok(elements) => Ok(elements),
        Err(err) if err.is::<NoElementFound>() => Ok(Vec::new()),
        Err(err) => Err(err),
    }
}

pub fn outer_html(element: &Element<'_>) -> anyhow::Result<String> {
    element.get_content()
}

/// Picks the `<option>` whose visible text is `text` and fires `change`.
/// Returns `false` while the option is not there yet.
pub fn select_by_text(element: &Element<'_>, text: &str) -> anyhow::Result<bool> {
    const SELECT: &str = "function(text) {
        const option = Array.from(this.options).find(o => o.text.trim() === text);
        if (!option) return false;
        this.value = option.value;
        this.dispatchEvent(new Event('change', { bubbles: true }));
        return true;
    }";

    let ret = element.call_js_fn(SELECT, vec![Value::String(text.to_owned())], false)?;

    match ret.value {
        Some(Value::Bool(b)) => Ok(b),
        Some(value) => anyhow::bail!("not a boolean: {value}"),
        None => anyhow::bail!("returned nothing"),
    }
}

pub fn clear_value(element: &Element<'_>) -> anyhow::Result<()> {
    element.call_js_fn("function(){this.value=''}", Vec::new(), false)?;
    Ok(())
}
