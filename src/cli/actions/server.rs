use crate::{api, cli::actions::Action, cli::globals::GlobalArgs};
use anyhow::Result;
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            token_secret,
        } => {
            // Reject an unparsable DSN here instead of deep inside the pool.
            let dsn = Url::parse(&dsn)?;

            let globals = GlobalArgs::new(token_secret);

            api::new(port, dsn.to_string(), &globals).await?;
        }
    }

    Ok(())
}
