use anyhow::Context;
use bookshelf_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// Bookshelf - books and authors over HTTP
#[derive(Debug, Parser)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// Run the HTTP server until interrupted
    Serve {
        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the resolved configuration as JSON
    Config,
}

fn render_config(settings: &Settings) -> anyhow::Result<String> {
    serde_json::to_string_pretty(settings).with_context(|| "failed to render settings")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            bookshelf_telemetry::init(&settings.telemetry)?;
            bookshelf_app::run(settings).await
        }
        Command::Config => {
            println!("{}", render_config(&settings)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn serve_accepts_port_override() {
        let cli = Cli::try_parse_from(["bookshelf", "serve", "--port", "8080"]).unwrap();
        assert_eq!(cli.command, Command::Serve { port: Some(8080) });

        let cli = Cli::try_parse_from(["bookshelf", "serve"]).unwrap();
        assert_eq!(cli.command, Command::Serve { port: None });
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["bookshelf"]).is_err());
        assert!(Cli::try_parse_from(["bookshelf", "serve", "--port", "http"]).is_err());
    }

    #[test]
    fn config_renders_layered_settings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.toml"),
            "[server]\nport = 4000\n\n[database]\nbackend = \"sled\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("staging.toml"), "[server]\nport = 5000\n").unwrap();

        let settings = Settings::load_from(dir.path(), "staging").unwrap();
        let rendered: Value = serde_json::from_str(&render_config(&settings).unwrap()).unwrap();
        assert_eq!(rendered["environment"], "staging");
        assert_eq!(rendered["server"]["port"], 5000);
        assert_eq!(rendered["database"]["backend"], "sled");
        assert_eq!(rendered["telemetry"]["log_format"], "pretty");
    }
}
