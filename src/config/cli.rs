use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "profile-func")]
#[command(about = "Serves the site profile document from Azure Blob Storage")]
#[command(version)]
pub struct CliConfig {
    /// Optional TOML file with [storage] and [http] overrides
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP endpoint locally
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
    /// Fetch the profile once and print it to stdout
    Fetch {
        /// Pretty-print the document if it parses as JSON
        #[arg(long)]
        pretty: bool,
    },
}
