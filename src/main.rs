use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

use credential_gate::{
    auth::{
        Account, Argon2Hasher, AuthState, CredentialVerifier, SecretHasher, SqliteAccountStore,
        ValidatedCredential,
    },
    logging, GateConfig, HttpServer, Result,
};

#[derive(Parser, Debug)]
#[command(name = "credential_gate", version, about)]
struct Cli {
    /// Path to the SQLite account database
    #[arg(long, global = true)]
    db_path: Option<String>,

    /// Log spec, e.g. `debug` (overrides RUST_LOG; default `info`)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write logs to rotating files in this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the login hook over HTTP
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short = 'p', long)]
        port: Option<u16>,

        /// Create the users table if it is missing
        #[arg(long, default_value_t = false)]
        init_schema: bool,
    },
    /// Read a password from stdin and print its Argon2 hash
    HashPassword,
    /// Create an account; the password is read from stdin
    AddAccount {
        #[arg(long)]
        email: String,

        #[arg(long)]
        name: String,
    },
}

impl Cli {
    fn apply(&self, config: &mut GateConfig) {
        if let Some(db_path) = &self.db_path {
            config.db_path = db_path.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_spec = level.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = Some(dir.clone());
        }
        if let Command::Serve { host, port, .. } = &self.command {
            if let Some(host) = host {
                config.http.host = host.clone();
            }
            if let Some(port) = port {
                config.http.port = *port;
            }
        }
    }
}

fn read_password() -> Result<String> {
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// Open the account database, creating it (and its directory) only when asked
fn open_store(db_path: &str, create: bool) -> Result<SqliteAccountStore> {
    if !create {
        return Ok(SqliteAccountStore::open(db_path)?);
    }

    // Ensure data directory exists
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let store = SqliteAccountStore::open_or_create(db_path)?;
    store.init_schema()?;
    Ok(store)
}

async fn serve(config: &GateConfig, init_schema: bool) -> Result<()> {
    let store = open_store(&config.db_path, init_schema)?;

    let verifier = CredentialVerifier::new(store, Argon2Hasher::new())?;
    log::info!("🔐 Credential verifier ready (db: {})", config.db_path);

    let state = Arc::new(AuthState::new(verifier));
    HttpServer::new(config.http.clone(), state).start().await
}

fn add_account(config: &GateConfig, email: &str, name: &str) -> Result<()> {
    let password = read_password()?;
    let credential = ValidatedCredential::parse(&json!({"email": email, "password": password}))?;

    let store = open_store(&config.db_path, true)?;

    let hash = Argon2Hasher::new().hash(credential.password().expose())?;
    let account = Account::new(name, credential.email(), hash);
    store.insert_account(&account)?;

    log::info!("✅ Account {} created", account.id);
    println!("{}", account.id);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = GateConfig::from_env();
    cli.apply(&mut config);

    let _logger = logging::setup_logging(&config)?;

    match &cli.command {
        Command::Serve { init_schema, .. } => serve(&config, *init_schema).await,
        Command::HashPassword => {
            let password = read_password()?;
            println!("{}", Argon2Hasher::new().hash(&password)?);
            Ok(())
        }
        Command::AddAccount { email, name } => add_account(&config, email, name),
    }
}
