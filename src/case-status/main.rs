#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;

    pretty_env_logger::init_timed();

    let config = uscis::config::Config::parse();
    tracing::info!(
        target: "main",
        "checking {} receipts from \x1b[1;36m{}\x1b[0m, received {}",
        config.forms.len(),
        config.first_receipt,
        config.received_date,
    );

    let report = {
        let mut session = uscis::scrape::Session::launch(&config)?;
        uscis::report::run(&mut session, &config).await?
    };

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    Ok(())
}
