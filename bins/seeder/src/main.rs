//! Chart of accounts seeder for Kassa.
//!
//! Inserts the default chart of accounts. Codes already present are left
//! untouched, so re-running is safe.
//!
//! Usage: cargo run --bin seeder

use kassa_db::AccountRepository;
use kassa_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = kassa_db::connect(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;

    println!("Seeding default chart of accounts...");
    let repo = AccountRepository::new(db);
    let created = repo.seed_default_accounts().await?;

    if created.is_empty() {
        println!("Chart already seeded; nothing to do.");
    } else {
        for account in &created {
            println!("  created {} {}", account.code, account.name);
        }
        println!("Seeded {} accounts.", created.len());
    }

    Ok(())
}
