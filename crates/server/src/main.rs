#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quickabout_server::start().await
}
