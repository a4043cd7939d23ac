use crate::{api, api::handlers::state::AuthConfig, cli::actions::Action};
use anyhow::{Context, Result};
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            frontend_base_url,
            session_ttl_seconds,
        } => {
            // Reject malformed connection strings before touching the pool
            Url::parse(&dsn).context("Invalid database connection string")?;

            let config =
                AuthConfig::new(frontend_base_url).with_session_ttl_seconds(session_ttl_seconds);

            api::new(port, dsn, config).await?;
        }
    }

    Ok(())
}
