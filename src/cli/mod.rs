pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "netinv")]
#[command(about = "Network inventory service - devices organised in a node hierarchy")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP API server (default)")]
    Serve,

    #[command(about = "Apply the schema bootstrap and exit")]
    Migrate,

    #[command(about = "Seed default users and demo inventory, ignoring SEED_TEST_DATA")]
    Seed,

    #[command(about = "Print an argon2 hash for the given password")]
    HashPassword {
        #[arg(help = "Plain-text password to hash")]
        password: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::handle().await,
        Commands::Migrate => commands::db::migrate().await,
        Commands::Seed => commands::db::seed().await,
        Commands::HashPassword { password } => commands::hash_password(&password),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["netinv"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn hash_password_takes_positional_argument() {
        let cli = Cli::try_parse_from(["netinv", "hash-password", "s3cret"]).unwrap();
        match cli.command {
            Some(Commands::HashPassword { password }) => assert_eq!(password, "s3cret"),
            _ => panic!("expected hash-password"),
        }
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["netinv", "explode"]).is_err());
    }
}
