//! Registers a minimal GATT application (one Battery Service) with BlueZ
//! and idles until interrupted.

use anyhow::Context;
use tracing::info;

use jetson_ble::domain::gatt::Application;
use jetson_ble::domain::settings::Settings;
use jetson_ble::infrastructure::bluez::{self, BluezClient, Registrar};
use jetson_ble::infrastructure::logging;

use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    let _log_guard = logging::init_logger(&settings.log)?;
    info!("starting GATT application server");

    let connection = zbus::Connection::system()
        .await
        .context("failed to connect to the system bus")?;
    let daemon = Arc::new(
        BluezClient::connect(&connection, &settings.gatt.adapter_path)
            .await
            .context("failed to resolve the BlueZ adapter")?,
    );

    let mut registrar = Registrar::new(daemon, settings.registration_policy);
    registrar
        .power_on()
        .await
        .context("failed to power on the adapter")?;

    let application =
        Application::new(&settings.gatt).context("failed to build the GATT application")?;
    let root = bluez::export_application(&connection, application)
        .await
        .context("failed to export the GATT application")?;
    registrar.objects_exported();

    registrar
        .register_application(&root)
        .await
        .context("RegisterApplication failed")?;

    registrar.run_until_interrupted().await;
    Ok(())
}
