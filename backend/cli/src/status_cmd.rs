//! CLI Status Command
//!
//! Pings the health endpoint of a gateway running on this host.

use anyhow::Result;

pub async fn run(port: u16) -> Result<()> {
    let url = format!("http://localhost:{port}/health");
    match reqwest::get(&url).await {
        Ok(resp) if resp.status().is_success() => {
            println!("slashgate is running on port {port}: {}", resp.text().await?);
        }
        Ok(resp) => {
            println!("slashgate on port {port} answered {}", resp.status());
        }
        Err(_) => {
            println!("slashgate is not running on port {port}");
        }
    }
    Ok(())
}
