//! Fetch a URL through the embedding transport and print the result.
//!
//! Run with: cargo run --example embed_get -- 'https://api.example.com/orders/1?with=customer'

use bytes::Bytes;
use hal_embed::client::{ClientConfig, EmbedTransport, HttpTransport, Transport};
use http::header::ACCEPT;
use http::Request;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let url = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: embed_get <url-with-?with=rel.rel>"))?;

    let embed = EmbedTransport::new(HttpTransport::with_config(ClientConfig::default())?);

    let request = Request::get(url)
        .header(ACCEPT, "application/hal+json, application/json")
        .body(Bytes::new())?;
    let response = embed.round_trip(request).await?;

    println!("Status: {}", response.status());
    for (name, value) in response.headers() {
        println!("  {}: {:?}", name, value);
    }
    println!("{}", String::from_utf8_lossy(response.body()));

    Ok(())
}
