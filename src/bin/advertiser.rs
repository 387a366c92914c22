//! Registers an LE advertisement with BlueZ and idles until interrupted,
//! unregistering it on the way out.

use anyhow::Context;
use tracing::info;

use jetson_ble::domain::advertisement::Advertisement;
use jetson_ble::domain::settings::Settings;
use jetson_ble::infrastructure::bluez::{self, adapter, BluezClient, Registrar};
use jetson_ble::infrastructure::logging;

use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    let _log_guard = logging::init_logger(&settings.log)?;
    info!("starting LE advertiser");

    let connection = zbus::Connection::system()
        .await
        .context("failed to connect to the system bus")?;
    let daemon = Arc::new(
        BluezClient::connect(&connection, &settings.advertising.adapter_path)
            .await
            .context("failed to resolve the BlueZ adapter")?,
    );

    let mut registrar = Registrar::new(daemon.clone(), settings.registration_policy);
    registrar
        .power_on()
        .await
        .context("failed to power on the adapter")?;
    adapter::apply_alias(
        daemon.as_ref(),
        settings.advertising.adapter_alias.as_deref(),
    )
    .await;

    let advertisement =
        Advertisement::new(&settings.advertising).context("failed to build the advertisement")?;
    let path = bluez::export_advertisement(&connection, advertisement)
        .await
        .context("failed to export the advertisement")?;
    registrar.objects_exported();

    registrar
        .register_advertisement(&path)
        .await
        .context("RegisterAdvertisement failed")?;

    registrar.run_until_interrupted().await;
    Ok(())
}
