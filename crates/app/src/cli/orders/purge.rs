use std::{sync::Arc, time::Duration};

use clap::Args;
use serde_json::{Map, json};
use shopease_app::{
    database,
    documents::{DocumentStore, NewDocument, PgDocumentStore, kinds},
    domain::orders::{DocumentOrdersService, OrdersService},
    notifications::LogNotifier,
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct PurgeOrdersArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Skip the confirmation delay
    #[arg(long)]
    yes: bool,

    /// Seconds to wait before deleting; Ctrl+C aborts
    #[arg(long, default_value_t = 5)]
    delay_seconds: u64,
}

pub(crate) async fn run(args: PurgeOrdersArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let documents: Arc<dyn DocumentStore> = Arc::new(PgDocumentStore::new(pool));

    check_permissions(documents.as_ref()).await?;
    println!("permission check passed");

    let orders = DocumentOrdersService::new(documents, Arc::new(LogNotifier));

    let count = orders
        .count_orders()
        .await
        .map_err(|error| format!("failed to count orders: {error}"))?;

    if count == 0 {
        println!("no orders to delete");
        return Ok(());
    }

    println!("found {count} orders");

    if !args.yes {
        println!(
            "deleting all orders in {} seconds; press Ctrl+C to abort",
            args.delay_seconds
        );

        tokio::select! {
            () = tokio::time::sleep(Duration::from_secs(args.delay_seconds)) => {}
            signal = tokio::signal::ctrl_c() => {
                signal.map_err(|error| format!("failed to listen for Ctrl+C: {error}"))?;
                return Err("aborted, no orders were deleted".to_string());
            }
        }
    }

    let removed = orders
        .purge_orders()
        .await
        .map_err(|error| format!("failed to delete orders: {error}"))?;

    println!("deleted {removed} orders");

    Ok(())
}

/// Create, read, patch and delete a throwaway document. The document is
/// removed again whenever it was created, even when a later step fails.
async fn check_permissions(documents: &dyn DocumentStore) -> Result<(), String> {
    let check = NewDocument::new(kinds::PERMISSION_CHECK, &json!({ "purpose": "orders purge" }))
        .map_err(|error| format!("failed to build permission check document: {error}"))?;
    let id = check.id;

    documents
        .create(check)
        .await
        .map_err(|error| format!("permission check failed on create: {error}"))?;

    let checked = read_and_update(documents, id).await;

    let deleted = documents
        .delete(id)
        .await
        .map_err(|error| format!("permission check failed on delete: {error}"));

    match (checked, deleted) {
        (Err(check), Err(delete)) => Err(format!("{check}; {delete}, document {id} remains")),
        (Err(check), Ok(())) => Err(check),
        (Ok(()), deleted) => deleted,
    }
}

async fn read_and_update(documents: &dyn DocumentStore, id: Uuid) -> Result<(), String> {
    documents
        .get(id)
        .await
        .map_err(|error| format!("permission check failed on read: {error}"))?;

    let mut fields = Map::new();
    fields.insert("checked".to_owned(), json!(true));

    documents
        .patch(id, fields)
        .await
        .map_err(|error| format!("permission check failed on update: {error}"))?;

    Ok(())
}
