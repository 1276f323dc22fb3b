use clap::Parser;
use profile_func::config::toml_config::TomlConfig;
use profile_func::config::{CliConfig, Command};
use profile_func::http::server::serve;
use profile_func::utils::{logger, validation::Validate};
use profile_func::{
    create_router, AzureConnector, ErrorKind, HttpSettings, ProfileHandler, ProfileSettings,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting profile-func CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            if let Err(e) = config.validate() {
                eprintln!("❌ Invalid config file '{}': {}", path, e);
                eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
                std::process::exit(1);
            }
            config
        }
        None => TomlConfig::default(),
    };

    let mut settings = ProfileSettings::from_env();
    file_config.apply_to_profile(&mut settings);

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let handler = ProfileHandler::new(AzureConnector::new()?, settings);

    match cli.command {
        Command::Serve { host, port } => {
            let mut http = HttpSettings::default();
            file_config.apply_to_http(&mut http);
            if let Some(host) = host {
                http.host = host;
            }
            if let Some(port) = port {
                http.port = port;
            }

            serve(create_router(handler), http.socket_addr()?).await?;
        }
        Command::Fetch { pretty } => match handler.fetch().await {
            Ok(document) => {
                let body = document.into_body();
                match serde_json::from_str::<serde_json::Value>(&body) {
                    Ok(value) if pretty => println!("{}", serde_json::to_string_pretty(&value)?),
                    Ok(_) => println!("{}", body),
                    Err(e) => {
                        tracing::warn!("Profile document is not valid JSON: {}", e);
                        println!("{}", body);
                    }
                }
            }
            Err(e) => {
                eprintln!("❌ {}", e);
                eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

                let exit_code = match e.kind() {
                    ErrorKind::StoreFailure => 1,
                    ErrorKind::NotFound => 2,
                    ErrorKind::ConfigMissing => 3,
                };
                std::process::exit(exit_code);
            }
        },
    }

    Ok(())
}
