use std::sync::Arc;

use clap::Args;
use jiff::SignedDuration;
use shopease_app::{
    auth::{DocumentSessionProvider, UserUuid},
    database,
    documents::PgDocumentStore,
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct IssueSessionArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Id of the user document the session belongs to
    #[arg(long)]
    user_id: Uuid,

    /// Session lifetime in hours
    #[arg(long, default_value_t = 24, value_parser = clap::value_parser!(i64).range(1..=8760))]
    ttl_hours: i64,
}

pub(crate) async fn run(args: IssueSessionArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let sessions = DocumentSessionProvider::new(Arc::new(PgDocumentStore::new(pool)));

    let issued = sessions
        .issue_session(
            UserUuid::from_uuid(args.user_id),
            SignedDuration::from_hours(args.ttl_hours),
        )
        .await
        .map_err(|error| format!("failed to issue session: {error}"))?;

    println!("user_id: {}", issued.user_id);
    println!("expires_at: {}", issued.expires_at);
    println!("session_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
