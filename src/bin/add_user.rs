//! Creates a user in the credential store.
//!
//! There is no registration endpoint; accounts are provisioned with this tool:
//!
//! ```text
//! add_user --username alice --password 'correct horse'
//! ```

use clap::Parser;
use todolist::{
    auth::hash_password,
    config::Config,
    models::UserInput,
    store::{PgStore, UserStore},
};
use validator::Validate;

#[derive(Debug, Parser)]
#[command(name = "add_user", about = "Create a to-do list user")]
struct Args {
    /// Login name (1-50 characters: letters, digits, '_', '-', '.').
    #[arg(long)]
    username: String,

    /// Password; falls back to the TODOLIST_PASSWORD environment variable.
    #[arg(long, env = "TODOLIST_PASSWORD", hide_env_values = true)]
    password: String,

    /// Database to write to; defaults to DATABASE_URL.
    #[arg(long)]
    database_url: Option<String>,
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let input = UserInput {
        username: args.username,
        password: args.password,
    };
    input.validate()?;

    let database_url = match args.database_url {
        Some(url) => url,
        None => Config::from_env()?
            .database_url
            .ok_or("DATABASE_URL is not set and --database-url was not given")?,
    };

    let store = PgStore::connect(&database_url).await?;
    let password_hash = hash_password(&input.password)?;
    let user = store.create_user(&input.username, &password_hash).await?;

    log::info!("created user {:?} with id {}", user.username, user.id);
    Ok(())
}
