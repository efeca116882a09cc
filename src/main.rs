use adoption_mocks::{
    generate_data, logging, BcryptHasher, Config, GenerateCounts, MockGenerator, SqliteStore,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "adoption-mocks", version, about = "Generate mock accounts and pets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print preview pets as JSON (nothing is stored)
    PreviewPets {
        #[arg(short, long)]
        count: Option<usize>,
    },

    /// Print preview accounts as JSON (nothing is stored)
    PreviewUsers {
        #[arg(short, long)]
        count: Option<usize>,
    },

    /// Generate accounts and pets and persist them to SQLite
    Generate {
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        users: i64,

        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        pets: i64,

        /// Database file (defaults to MOCKS_DB_PATH or mocks.db)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::PreviewPets { count } => {
            let count = count.unwrap_or(config.preview_pets);
            let pets = MockGenerator::from_entropy().generate_pets_preview(count);
            println!("{}", serde_json::to_string_pretty(&pets)?);
        }
        Command::PreviewUsers { count } => {
            let count = count.unwrap_or(config.preview_users);
            let hasher = BcryptHasher::new(config.bcrypt_cost);
            let users = MockGenerator::from_entropy()
                .with_password(config.mock_password.clone())
                .generate_accounts_preview(count, &hasher)
                .await?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        Command::Generate { users, pets, db } => {
            run_generate(&config, GenerateCounts::from_signed(users, pets), db).await?;
        }
    }

    Ok(())
}

async fn run_generate(config: &Config, counts: GenerateCounts, db: Option<PathBuf>) -> Result<()> {
    let db_path = db.unwrap_or_else(|| config.db_path.clone());

    println!("🐾 Adoption Mocks - Generate Data");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("\n🔧 Opening database {:?}...", db_path);
    let store = SqliteStore::open(&db_path)?;
    let hasher = BcryptHasher::new(config.bcrypt_cost);
    let mut generator = MockGenerator::from_entropy().with_password(config.mock_password.clone());

    println!("\n💾 Inserting {} users and {} pets...", counts.users, counts.pets);
    let summary = generate_data(&mut generator, &hasher, &store, counts).await?;

    println!("✓ Users inserted: {} of {}", summary.users.inserted, counts.users);
    println!("✓ Pets inserted: {} of {}", summary.pets.inserted, counts.pets);
    println!(
        "✓ Database contains {} users and {} pets",
        store.count_accounts()?,
        store.count_pets()?
    );

    Ok(())
}
