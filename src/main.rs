use anyhow::Context;
use posterboard_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load posterboard settings")?;
    posterboard_telemetry::init(&settings.telemetry)?;

    posterboard_app::app::serve(&settings).await
}
