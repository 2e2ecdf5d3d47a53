use anyhow::Result;

use crate::client::{chat_script, RouteGuideClient};

pub async fn run(client: &RouteGuideClient) -> Result<()> {
    let received = client.route_chat(chat_script()).await?;
    tracing::info!(received = received.len(), "RouteChat finished");
    Ok(())
}
