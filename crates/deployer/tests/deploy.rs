use {
    alloy::primitives::{Address, B256, Bytes},
    clap::Parser,
    deployer::{
        Deployer,
        Error,
        Notification,
        arguments::Arguments,
        config::{Configuration, ConfigurationError},
        observe_deployment,
        request::DeploymentRequest,
    },
    futures::StreamExt,
    mockall::predicate::{always, eq},
    qkcrpc::{Client, FullShardKey, MockRpc, Network, QkcAddress, Receipt, TransactionId},
    std::{io::Write, time::Duration},
    tempfile::NamedTempFile,
};

const PRIVATE_KEY: &str = "0x7c852118294e51e653712a81e05800f419141751be58f605c371e15141b007a6";
const FACTORY: &str = "0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f";

fn artifact() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "abi": [{{
                "type": "constructor",
                "inputs": [{{ "name": "_factory", "type": "address" }}],
                "stateMutability": "nonpayable"
            }}],
            "bytecode": "6001600155"
        }}"#
    )
    .unwrap();
    file
}

fn arguments(artifact: &NamedTempFile, private_key: Option<&str>) -> Arguments {
    let mut args = Arguments::try_parse_from([
        "deployer",
        "--node-url",
        "http://node.example:1234",
        "--network",
        "dev",
        "--full-shard-key",
        "0x1",
        "--constructor-args",
        FACTORY,
        "--poll-interval",
        "1ms",
        "--artifact",
        &artifact.path().display().to_string(),
    ])
    .unwrap();
    args.private_key = private_key.map(str::to_owned);
    args
}

fn transaction_id() -> TransactionId {
    TransactionId {
        hash: B256::repeat_byte(0x71),
        full_shard_key: FullShardKey(1),
    }
}

fn contract() -> QkcAddress {
    QkcAddress::new(Address::repeat_byte(0xc1), FullShardKey(1))
}

#[tokio::test]
async fn deploys_with_two_notifications() {
    observe::tracing::initialize_reentrant("deployer=debug,qkcrpc=debug");
    let artifact = artifact();
    let config = Configuration::from_arguments(&arguments(&artifact, Some(PRIVATE_KEY))).unwrap();
    let request = DeploymentRequest::new(&config).unwrap();
    assert_eq!(request.init_code().len(), 5 + 32);

    let sender = QkcAddress::new(config.signer.address(), FullShardKey(1));
    let mut rpc = MockRpc::new();
    rpc.expect_transaction_count()
        .with(eq(sender))
        .times(1)
        .returning(|_| Ok(0));
    rpc.expect_send_raw_transaction()
        .with(always())
        .times(1)
        .returning(|_| Ok(transaction_id()));
    rpc.expect_transaction_receipt()
        .with(eq(transaction_id()))
        .returning(|_| {
            Ok(Some(Receipt {
                success: true,
                contract_address: Some(contract()),
                gas_used: Some(2_000_000),
                block_height: Some(42),
            }))
        });
    rpc.expect_code()
        .with(eq(contract()))
        .times(1)
        .returning(|_| Ok(Bytes::from_static(&[0x60, 0x80])));

    let mut client = Client::new(Box::new(rpc), config.network);
    assert_eq!(client.register_signer(config.signer.clone(), config.full_shard_key), sender);

    let deployer = Deployer::new(&client, config.poll_interval);
    let mut notifications = deployer.deploy(&request);

    let submitted = match notifications.next().await {
        Some(Ok(Notification::Submitted(deployment))) => deployment,
        other => panic!("expected submitted notification, got {other:?}"),
    };
    assert_eq!(submitted.transaction_id(), transaction_id());
    assert_eq!(submitted.address(), None);

    let confirmed = match notifications.next().await {
        Some(Ok(Notification::Confirmed(deployment))) => deployment,
        other => panic!("expected confirmed notification, got {other:?}"),
    };
    assert_eq!(confirmed.address(), Some(contract()));
    // the handle from the first notification sees the address too
    assert_eq!(submitted.address(), Some(contract()));
    assert!(notifications.next().await.is_none());
}

#[tokio::test]
async fn observes_deployment_to_the_end() {
    let artifact = artifact();
    let config = Configuration::from_arguments(&arguments(&artifact, Some(PRIVATE_KEY))).unwrap();
    let request = DeploymentRequest::new(&config).unwrap();

    let mut rpc = MockRpc::new();
    rpc.expect_transaction_count().returning(|_| Ok(5));
    rpc.expect_send_raw_transaction()
        .returning(|_| Ok(transaction_id()));
    rpc.expect_transaction_receipt()
        .returning(|_| Err(qkcrpc::Error::MissingSigner));

    let mut client = Client::new(Box::new(rpc), Network::Dev);
    client.register_signer(config.signer.clone(), config.full_shard_key);

    let result = observe_deployment(Deployer::new(&client, Duration::ZERO).deploy(&request)).await;
    assert!(matches!(result, Err(Error::Transport(_))));
}

#[tokio::test]
async fn missing_signing_key_fails_before_any_network_call() {
    let artifact = artifact();
    let args = arguments(&artifact, None);

    assert!(matches!(
        deployer::run(&args).await,
        Err(Error::Configuration(ConfigurationError::MissingSigningKey))
    ));
}

#[tokio::test]
async fn mismatched_constructor_arguments_fail_before_any_network_call() {
    let artifact = artifact();
    let mut args = arguments(&artifact, Some(PRIVATE_KEY));
    args.constructor_args.push(FACTORY.to_owned());

    assert!(matches!(
        deployer::run(&args).await,
        Err(Error::Contract(deployer::ContractError::ArgumentCount {
            expected: 1,
            actual: 2
        }))
    ));
}
