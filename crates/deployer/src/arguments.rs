use {
    qkcrpc::Network,
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
        time::Duration,
    },
    url::Url,
};

#[derive(clap::Parser)]
pub struct LoggingArguments {
    #[clap(long, env, default_value = "warn,deployer=info,qkcrpc=info")]
    pub log_filter: String,

    /// Events at this level or more severe are printed to stderr instead of
    /// stdout.
    #[clap(long, env)]
    pub log_stderr_threshold: Option<tracing::Level>,

    /// Whether to use JSON format for the logs.
    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            use_json_logs,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold:?}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}

#[derive(clap::Parser)]
#[clap(about = "Deploys a compiled contract through a node of a sharded chain")]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// The node JSON-RPC endpoint to deploy through.
    #[clap(long, env, default_value = "http://jrpc.devnet.quarkchain.io:38391")]
    pub node_url: Url,

    /// The network the deployment transaction is signed for.
    #[clap(long, env, value_enum, default_value = "dev")]
    pub network: Network,

    /// Hex encoded private key the deployment is signed with.
    #[clap(long, env = "PK", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Shard the contract gets deployed on, as `0x` prefixed hex or decimal.
    /// The deployment is sent from and to this shard.
    #[clap(long, env = "FULLSHARDKEY")]
    pub full_shard_key: Option<String>,

    /// Path to the compiled contract (JSON with `abi` and `bytecode`).
    #[clap(long, env, default_value = "build/UniswapV2Router02.json")]
    pub artifact: PathBuf,

    /// Constructor arguments, comma separated, in the order of the ABI.
    #[clap(long, env, use_value_delimiter = true)]
    pub constructor_args: Vec<String>,

    /// Factory the router is deployed against. Used as the only constructor
    /// argument when `--constructor-args` is not given.
    #[clap(long, env = "FACTORYADDRESS")]
    pub factory_address: Option<String>,

    #[clap(long, env, default_value = "5000000")]
    pub gas_limit: u64,

    /// Gas price in wei.
    #[clap(long, env, default_value = "1000000000")]
    pub gas_price: u128,

    /// How often the node is asked whether the deployment got mined.
    #[clap(
        long,
        env,
        default_value = "5s",
        value_parser = humantime::parse_duration,
    )]
    pub poll_interval: Duration,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            node_url,
            network,
            private_key,
            full_shard_key,
            artifact,
            constructor_args,
            factory_address,
            gas_limit,
            gas_price,
            poll_interval,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "network: {network}")?;
        writeln!(
            f,
            "private_key: {}",
            private_key.as_ref().map(|_| "SECRET").unwrap_or("None")
        )?;
        writeln!(f, "full_shard_key: {full_shard_key:?}")?;
        writeln!(f, "artifact: {}", artifact.display())?;
        writeln!(f, "constructor_args: {constructor_args:?}")?;
        writeln!(f, "factory_address: {factory_address:?}")?;
        writeln!(f, "gas_limit: {gas_limit}")?;
        writeln!(f, "gas_price: {gas_price}")?;
        writeln!(f, "poll_interval: {poll_interval:?}")?;
        Ok(())
    }
}
