use mongodb::{
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client,
};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::AppResult;

pub async fn create_mongo_client(uri: &str) -> AppResult<Arc<Client>> {
    log::info!("Connecting to MongoDB");

    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);
    client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    // A failed ping is not fatal: the trip endpoints report their own errors and
    // seat maps fall back to synthesized inventories.
    match client
        .database("admin")
        .run_command(mongodb::bson::doc! {"ping": 1})
        .await
    {
        Ok(_) => log::info!("Connected to MongoDB and verified with ping"),
        Err(e) => log::warn!("Connected to MongoDB but ping failed: {}", e),
    }

    Ok(Arc::new(client))
}
