use core::time::Duration;

use chrono::NaiveDate;
use compact_str::CompactString;

use crate::{
    date::parse_date,
    receipt::ReceiptNumber,
    times::{FormQuery, I485, I765},
};

/// Checks the status of a batch of sequential USCIS receipts and the
/// processing times that apply to them.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub struct Config {
    /// First receipt number of the batch, e.g. EAC1990123456
    #[arg(long, env = "FF", value_name = "RECEIPT")]
    pub first_receipt: ReceiptNumber,

    /// Date printed on the receipt notices, e.g. "January 1, 2018"
    #[arg(long, env = "RD", value_name = "DATE", value_parser = parse_date)]
    pub received_date: NaiveDate,

    /// Report labels of the sequential receipts; one lookup per label
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = ["I-485", "I-130", "I-131", "I-765"].map(CompactString::const_new),
    )]
    pub forms: Vec<CompactString>,

    /// Office handling the I-485
    #[arg(long, default_value = "Los Angeles CA")]
    pub i485_office: CompactString,

    /// Office handling the I-765
    #[arg(long, default_value = "California Service Center")]
    pub i765_office: CompactString,

    /// Run Chrome without a window
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub headless: bool,

    /// Disable the Chrome sandbox (needed when running as root)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Proxy server handed to Chrome
    #[arg(long)]
    pub proxy: Option<String>,

    /// Seconds to wait for a page element before giving up
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    pub timeout: u64,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Config {
    pub const fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Processing-time lookups in fetch order.
    pub fn queries(&self) -> [FormQuery; 2] {
        [
            FormQuery {
                label: CompactString::const_new("I-485"),
                form: CompactString::const_new(I485),
                office: self.i485_office.clone(),
            },
            FormQuery {
                label: CompactString::const_new("I-765"),
                form: CompactString::const_new(I765),
                office: self.i765_office.clone(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parses_with_defaults() {
        let config = Config::try_parse_from([
            "case-status",
            "--first-receipt",
            "LIN1990123456",
            "--received-date",
            "June 5, 2019",
        ])
        .unwrap();
        assert_eq!(config.first_receipt.to_string(), "LIN1990123456");
        assert_eq!(config.received_date, NaiveDate::from_ymd_opt(2019, 6, 5).unwrap());
        assert_eq!(config.forms, ["I-485", "I-130", "I-131", "I-765"]);
        assert_eq!(config.i485_office, "Los Angeles CA");
        assert_eq!(config.i765_office, "California Service Center");
        assert!(config.headless);
        assert!(!config.no_sandbox);
        assert!(!config.json);
        assert_eq!(config.wait_timeout(), Duration::from_secs(30));

        let [a, b] = config.queries();
        assert_eq!((a.label.as_str(), a.form.as_str()), ("I-485", I485));
        assert_eq!(
            (b.label.as_str(), b.office.as_str()),
            ("I-765", "California Service Center")
        );
    }

    #[test]
    fn overrides() {
        let config = Config::try_parse_from([
            "case-status",
            "--first-receipt=LIN1990123456",
            "--received-date=June 5, 2019",
            "--forms=I-485,I-765",
            "--headless=false",
            "--timeout=5",
        ])
        .unwrap();
        assert_eq!(config.forms, ["I-485", "I-765"]);
        assert!(!config.headless);
        assert_eq!(config.wait_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::try_parse_from([
            "case-status",
            "--first-receipt=LIN1990123456",
            "--received-date=Juno 5, 2019",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("unknown month name"), "{err}");

        let err = Config::try_parse_from([
            "case-status",
            "--first-receipt=1990123456",
            "--received-date=June 5, 2019",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("3 letters followed by digits"), "{err}");
    }
}
