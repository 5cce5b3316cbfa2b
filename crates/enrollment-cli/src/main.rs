use std::sync::Arc;

use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use enrollment::modules::students::repository::PgStudentRepository;
use enrollment::modules::users::repository::PgUserRepository;
use enrollment::modules::users::service::CredentialStore;
use enrollment_core::{AppError, BcryptHasher, Role};
use enrollment_db::{PgPool, init_db_pool, run_migrations};
use enrollment_models::ids::UserId;

#[derive(Parser)]
#[command(name = "enrollment-cli")]
#[command(about = "Enrollment CLI - Administrative tools for the Enrollment API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin account
    CreateAdmin {
        /// Username (prompted if not provided)
        username: Option<String>,

        /// Password (will be prompted securely if not provided)
        password: Option<String>,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = init_db_pool().await;

    if let Err(e) = run_migrations(&pool).await {
        eprintln!("\n❌ Error applying migrations: {}", e.error);
        std::process::exit(1);
    }

    match cli.command {
        Commands::CreateAdmin { username, password } => {
            handle_create_admin(pool, username, password).await
        }
        Commands::Migrate => println!("✅ Migrations applied"),
    }
}

async fn create_admin(pool: PgPool, username: &str, password: &str) -> Result<UserId, AppError> {
    let credentials = CredentialStore::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgStudentRepository::new(pool)),
        Arc::new(BcryptHasher::from_env()),
    );

    credentials.register(username, password, Role::Admin).await
}

async fn handle_create_admin(pool: PgPool, username: Option<String>, password: Option<String>) {
    let username = username.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Username")
            .interact_text()
            .expect("Failed to read username")
    });

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .expect("Failed to read password")
    });

    match create_admin(pool, &username, &password).await {
        Ok(user_id) => {
            println!("\n✅ Admin created successfully!");
            println!("   Username: {}", username);
            println!("   User ID: {}", user_id);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e.error);
            std::process::exit(1);
        }
    }
}
