use inventory_smoke::api_client::InventoryApiClient;
use inventory_smoke::configuration::get_configuration;
use inventory_smoke::suite;
use inventory_smoke::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so stdout stays a clean report stream.
    let subscriber = get_subscriber("inventory-smoke".into(), "info".into(), std::io::stderr);
    init_subscriber(subscriber);

    let configuration = get_configuration()?;
    tracing::info!(base_url = %configuration.target.base_url, "starting smoke run");

    let timeout = configuration.target.timeout();
    let client = InventoryApiClient::new(configuration.target.base_url, timeout);
    let report = suite::run(&client).await;
    print!("{report}");

    // The report is the verdict; the process itself always exits cleanly.
    Ok(())
}
