//! Azure Functions custom handler entry point.
//!
//! The Functions host starts this executable, tells it which port to listen
//! on through `FUNCTIONS_CUSTOMHANDLER_PORT`, and forwards HTTP triggers to it.

use profile_func::domain::ports::ConfigProvider;
use profile_func::http::server::serve;
use profile_func::utils::{logger, validation::Validate};
use profile_func::{create_router, AzureConnector, HttpSettings, ProfileHandler, ProfileSettings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_function_logger();

    let settings = ProfileSettings::from_env();
    if let Err(e) = settings.validate() {
        tracing::error!(error = %e, suggestion = e.recovery_suggestion(), "Invalid function configuration");
        return Err(e.into());
    }

    let http = HttpSettings::for_custom_handler()?;
    tracing::info!(
        blob = %settings.location(),
        port = http.port,
        "Starting profile custom handler"
    );

    let handler = ProfileHandler::new(AzureConnector::new()?, settings);
    serve(create_router(handler), http.socket_addr()?).await?;

    Ok(())
}
