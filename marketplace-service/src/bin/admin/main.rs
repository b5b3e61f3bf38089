use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use auth::PasswordHasher;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use marketplace_service::config::Config;
use marketplace_service::domain::identity::models::EmailAddress;
use marketplace_service::domain::identity::models::ProvisionIdentityCommand;
use marketplace_service::domain::identity::ports::SessionServicePort;
use marketplace_service::domain::identity::service::SessionService;
use marketplace_service::outbound::repositories::PostgresIdentityRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(name = "marketplace-admin", about = "B2Bmarket identity administration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a login identity
    CreateUser(CreateUserArgs),
    /// Switch an identity off; its tokens stop working immediately
    Disable(EmailArgs),
    /// Switch an identity back on
    Enable(EmailArgs),
    /// Invalidate every issued token of an identity
    RevokeSessions(EmailArgs),
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    email: String,

    #[arg(long, env = "MARKETPLACE_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Account status; only ACTIVE and VERIFIED can log in
    #[arg(long, default_value = "ACTIVE")]
    status: String,
}

#[derive(Debug, Args)]
struct EmailArgs {
    email: String,
}

fn email(raw: String) -> anyhow::Result<EmailAddress> {
    EmailAddress::new(raw).context("invalid email")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketplace_service=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await
        .context("failed to connect to database")?;
    sqlx::migrate!("./migrations").run(&pg_pool).await?;

    let authenticator = Arc::new(Authenticator::new(
        &config.jwt.secret,
        PasswordHasher::with_cost(config.password.hash_cost),
        config.jwt.lifetimes(),
    ));
    let service = SessionService::new(
        Arc::new(PostgresIdentityRepository::new(pg_pool)),
        authenticator,
    );

    match cli.command {
        Commands::CreateUser(args) => {
            let identity = service
                .provision_identity(ProvisionIdentityCommand {
                    email: email(args.email)?,
                    password: args.password,
                    status: Some(args.status),
                })
                .await?;
            println!("created user {} ({})", identity.email, identity.id);
        }
        Commands::Disable(args) => {
            let email = email(args.email)?;
            service.set_active(&email, false).await?;
            println!("disabled {}", email);
        }
        Commands::Enable(args) => {
            let email = email(args.email)?;
            service.set_active(&email, true).await?;
            println!("enabled {}", email);
        }
        Commands::RevokeSessions(args) => {
            let email = email(args.email)?;
            service.revoke_sessions(&email).await?;
            println!("revoked all sessions of {}", email);
        }
    }

    Ok(())
}
