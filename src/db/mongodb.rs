use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::time::Duration;

/// Connect lazily to MongoDB. Nothing is sent to the server until the first
/// operation, which fails after `timeout` if no server can be selected.
pub async fn get_database(
    uri: &str,
    name: &str,
    timeout: Duration,
) -> mongodb::error::Result<Database> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some("makemeqr".to_string());
    options.server_selection_timeout = Some(timeout);
    options.connect_timeout = Some(timeout);

    let client = Client::with_options(options)?;
    Ok(client.database(name))
}
