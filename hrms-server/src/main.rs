use anyhow::Result;
use hrms_server::config::{self, AppSettings};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = AppSettings::from_config(&config::load().snapshot())?;
    let state = hrms_server::hrms_state(&settings).await?;
    let ax = hrms_server::build(state);

    tracing::info!(addr = %settings.addr(), "HRMS API starting");
    ax.listen(settings.addr()).await?;

    Ok(())
}
