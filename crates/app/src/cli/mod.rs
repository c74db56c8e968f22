use clap::{Parser, Subcommand};

mod catalog;
mod orders;
mod session;

#[derive(Debug, Parser)]
#[command(name = "shopease-app", about = "ShopEase maintenance CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Catalog(catalog::CatalogCommand),
    Orders(orders::OrdersCommand),
    Session(session::SessionCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Catalog(command) => catalog::run(command).await,
            Commands::Orders(command) => orders::run(command).await,
            Commands::Session(command) => session::run(command).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn purge_defaults_to_a_five_second_delay() {
        let cli = Cli::try_parse_from([
            "shopease-app",
            "orders",
            "purge",
            "--database-url",
            "postgres://localhost/shopease",
        ]);

        assert!(cli.is_ok(), "expected purge arguments to parse: {cli:?}");
    }
}
