#[tokio::main]
async fn main() -> anyhow::Result<()> {
    verse_recall_backend::run().await
}
