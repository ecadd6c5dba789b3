use anyhow::{anyhow, Result};
use planner_bot::config::DEFAULT_DATABASE_URL;
use planner_bot::database::connection::{sqlite_file_path, DatabaseManager};
use planner_bot::database::models::User;
use std::env;
use std::io;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("migrate");

    match command {
        "migrate" | "up" => run_migrations().await,
        "check" => check_database().await,
        "reset" => reset_database().await,
        "authorize" => set_authorized(args.get(2), true).await,
        "revoke" => set_authorized(args.get(2), false).await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            print_help();
            std::process::exit(1);
        }
    }
}

/// Only the database location matters here, so the bot token is not required.
fn database_url() -> String {
    dotenvy::dotenv().ok();
    match env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_DATABASE_URL.to_string(),
    }
}

async fn connect() -> Result<DatabaseManager> {
    let url = database_url();
    println!("📊 Database URL: {}", mask_url(&url));
    DatabaseManager::new(&url)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))
}

async fn run_migrations() -> Result<()> {
    println!("🔧 Planner Bot - Database Migration Tool");
    println!("========================================");

    let db = connect().await?;
    println!("🚀 Running database migrations...");

    match db.run_migrations().await {
        Ok(_) => println!("✅ Migrations completed successfully!"),
        Err(e) => {
            eprintln!("❌ Migration failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn check_database() -> Result<()> {
    println!("🔍 Checking database connection and schema...");

    let db = connect().await?;

    match check_tables(&db).await {
        Ok(tables) => {
            println!("✅ Database connection successful!");
            println!("📋 Found tables:");
            for table in tables {
                println!("  • {table}");
            }
        }
        Err(e) => {
            println!("⚠️  Database check failed: {e}");
            println!("💡 Try running 'admin migrate' to create the schema");
        }
    }

    Ok(())
}

async fn reset_database() -> Result<()> {
    println!("⚠️  WARNING: This will delete ALL events and users!");
    println!("🤔 Are you sure you want to continue? (yes/no)");

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    if input.trim().to_lowercase() != "yes" {
        println!("❌ Reset cancelled.");
        return Ok(());
    }

    let url = database_url();
    let db_path = sqlite_file_path(&url)
        .ok_or_else(|| anyhow!("Reset is only supported for file-backed SQLite databases"))?;
    if Path::new(db_path).exists() {
        std::fs::remove_file(db_path)?;
        println!("🗑️  Deleted database file: {db_path}");
    }

    println!("🔄 Recreating database schema...");
    run_migrations().await?;

    println!("✅ Database reset completed!");
    Ok(())
}

async fn set_authorized(id: Option<&String>, authorized: bool) -> Result<()> {
    let id: i64 = id
        .ok_or_else(|| anyhow!("A Telegram user id is required"))?
        .trim()
        .parse()
        .map_err(|_| anyhow!("User id must be a number"))?;

    let db = connect().await?;
    db.run_migrations().await?;

    User::set_authorized(&db.pool, id, authorized).await?;
    if authorized {
        println!("✅ User {id} is now authorized");
    } else {
        println!("🚫 User {id} is no longer authorized");
    }
    Ok(())
}

async fn check_tables(db: &DatabaseManager) -> Result<Vec<String>> {
    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE '\\_%' ESCAPE '\\'",
    )
    .fetch_all(&db.pool)
    .await?;

    Ok(tables)
}

fn mask_url(url: &str) -> String {
    match sqlite_file_path(url).and_then(|p| Path::new(p).file_name()) {
        Some(filename) => format!("sqlite:.../{}", filename.to_string_lossy()),
        None => url.to_string(),
    }
}

fn print_help() {
    println!("📅 Planner Bot - Administration Tool");
    println!();
    println!("USAGE:");
    println!("    admin [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    migrate, up       Run database migrations (default)");
    println!("    check             Check database connection and schema");
    println!("    reset             Reset database (SQLite only) - DESTRUCTIVE!");
    println!("    authorize <id>    Allow a Telegram user to use the bot");
    println!("    revoke <id>       Withdraw a user's access");
    println!("    help              Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    DATABASE_URL   Database connection string (default: {DEFAULT_DATABASE_URL})");
    println!();
    println!("EXAMPLES:");
    println!("    admin                      # Run migrations");
    println!("    admin authorize 123456789  # Grant access");
    println!("    admin check                # Check database status");
    println!();
}
