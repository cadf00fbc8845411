use mongodb::{Client, bson::doc};

/// Run the `ping` command against `database`
pub async fn ping(client: &Client, database: &str) -> mongodb::error::Result<()> {
    client
        .database(database)
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
}
