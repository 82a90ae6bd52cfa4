use std::time::Duration;

use spacesign_core::{Context, OsEnv};
use spacesign_http_send_reqwest::ReqwestHttpSend;
use spacesign_spaces::{Client, Config, ResponseError};

#[tokio::main]
async fn main() -> std::result::Result<(), ResponseError> {
    env_logger::init();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let client = Client::new(ctx.clone(), &Config::default().from_env(&ctx))?;

    let buckets = client.list_buckets().await?;
    for bucket in &buckets.buckets.bucket {
        println!("{} (created {})", bucket.name, bucket.creation_date);
    }

    if let Some(bucket) = buckets.buckets.bucket.first() {
        let listing = client.list_objects(&bucket.name, None).await?;
        if let Some(object) = listing.contents.first() {
            let url = client.presign_get(&bucket.name, &object.key, Some(Duration::from_secs(600)))?;
            println!("{url}");
        }
    }

    Ok(())
}
