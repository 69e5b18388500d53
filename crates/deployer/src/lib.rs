pub mod arguments;
pub mod artifact;
pub mod config;
pub mod deploy;
pub mod error;
pub mod request;

pub use {
    deploy::{Deployer, Deployment, Notification, PendingDeployment},
    error::{ContractError, Error},
};
use {
    arguments::Arguments,
    clap::Parser,
    config::Configuration,
    futures::StreamExt,
    qkcrpc::Client,
    request::DeploymentRequest,
    std::process::ExitCode,
};

/// Exit code for invalid configuration. Nothing was sent to the node.
const EXIT_CONFIGURATION: u8 = 2;
const EXIT_FAILURE: u8 = 1;

pub async fn start(args: impl Iterator<Item = String>) -> ExitCode {
    // Values from `.env` never override the real environment.
    let _ = dotenv::dotenv();
    let args = Arguments::parse_from(args);
    let obs_config = observe::Config::new(
        &args.logging.log_filter,
        args.logging.log_stderr_threshold,
        args.logging.use_json_logs,
    );
    observe::tracing::initialize(&obs_config);
    observe::panic_hook::install();
    tracing::info!("running deployer with arguments:\n{}", args);

    let result = run(&args).await;
    if let Err(err) = &result {
        tracing::error!(%err, "deployment failed");
    }
    ExitCode::from(exit_code(&result))
}

fn exit_code(result: &Result<(), Error>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(Error::Configuration(_)) => EXIT_CONFIGURATION,
        Err(_) => EXIT_FAILURE,
    }
}

/// Resolves the configuration, then deploys the artifact and logs the
/// progress of the deployment.
pub async fn run(args: &Arguments) -> Result<(), Error> {
    let config = Configuration::from_arguments(args)?;
    let request = DeploymentRequest::new(&config)?;

    let mut client = Client::http(&config.node_url, config.network);
    let address = client.register_signer(config.signer, config.full_shard_key);
    tracing::info!(%address, network = %client.network(), "deploying from");

    observe_deployment(Deployer::new(&client, config.poll_interval).deploy(&request)).await
}

/// Drives a deployment stream to its end, logging every notification.
pub async fn observe_deployment(
    mut notifications: futures::stream::BoxStream<'_, Result<Notification, Error>>,
) -> Result<(), Error> {
    while let Some(notification) = notifications.next().await {
        match notification? {
            Notification::Submitted(deployment) => {
                tracing::info!(
                    transaction_id = %deployment.transaction_id(),
                    "waiting for the deployment to be mined"
                );
            }
            Notification::Confirmed(deployment) => {
                if let Some(address) = deployment.address() {
                    tracing::info!(%address, "deployed contract address");
                }
            }
        }
    }
    Ok(())
}
