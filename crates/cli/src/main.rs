use anyhow::Context;
use clap::{Parser, Subcommand};
use posterboard_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "posterboard", version, about = "Poster catalog API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply migrations and serve the HTTP API (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Print the merged OpenAPI document
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load posterboard settings")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            posterboard_telemetry::init(&settings.telemetry)?;
            posterboard_app::app::serve(&settings).await
        }
        Command::Migrate => {
            posterboard_telemetry::init(&settings.telemetry)?;
            let applied = posterboard_app::app::migrate(&settings).await?;
            println!("applied {applied} migration(s)");
            Ok(())
        }
        Command::Openapi => {
            let document = posterboard_app::app::openapi_document(&settings);
            println!("{}", serde_json::to_string_pretty(&document)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["posterboard"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn migrate_subcommand_parses() {
        let cli = Cli::try_parse_from(["posterboard", "migrate"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Migrate)));
    }
}
