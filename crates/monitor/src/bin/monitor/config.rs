use std::num::NonZeroU64;
use std::time::Duration;

use monitor_common::BlockHeight;
use monitor_lib::driver::DriverConfig;
use monitor_watcher::near::MAINNET_NETWORK_ID;
use monitor_watcher::NearConfig;
use url::Url;

#[derive(clap::Parser)]
#[command(name = "monitor")]
#[command(version)]
#[command(about = "Watches NEAR for published VAAs and polls the Wormchain accountant.")]
struct Cli {
    #[arg(
        long = "near.url",
        long_help = "HTTP JSON-RPC endpoint of a NEAR node. Archival nodes serve older blocks than regular ones.",
        value_name = "HTTP(s) URL",
        value_hint = clap::ValueHint::Url,
        default_value = near_rpc_client::MAINNET_URL,
        env = "MONITOR_NEAR_URL"
    )]
    near_url: Url,

    #[arg(
        long = "near.network-id",
        long_help = "Network id the NEAR node must report on connection",
        value_name = "ID",
        default_value = MAINNET_NETWORK_ID,
        env = "MONITOR_NEAR_NETWORK_ID"
    )]
    near_network_id: String,

    #[arg(
        long = "network",
        long_help = "Protocol deployment to observe. Selects the NEAR core contract. Accountant endpoints are always given explicitly.",
        value_enum,
        default_value = "mainnet",
        env = "MONITOR_NETWORK"
    )]
    network: Network,

    #[arg(
        long = "start-block",
        long_help = "First block to scan. Scanning starts at the finalized block when not set.",
        value_name = "HEIGHT",
        env = "MONITOR_START_BLOCK"
    )]
    start_block: Option<u64>,

    #[arg(
        long = "max-batch-size",
        long_help = "Largest number of blocks scanned in one polling cycle",
        value_name = "BLOCKS",
        default_value = "100",
        env = "MONITOR_MAX_BATCH_SIZE"
    )]
    max_batch_size: NonZeroU64,

    #[arg(
        long = "poll-interval",
        long_help = "Seconds between polling cycles",
        value_name = "SECONDS",
        default_value = "10",
        env = "MONITOR_POLL_INTERVAL"
    )]
    poll_interval: NonZeroU64,

    #[arg(
        long = "accountant.url",
        long_help = "LCD REST endpoint of a Wormchain node. The accountant poller only runs when this and '--accountant.contract' are set.",
        value_name = "HTTP(s) URL",
        value_hint = clap::ValueHint::Url,
        requires = "accountant_contract",
        env = "MONITOR_ACCOUNTANT_URL"
    )]
    accountant_url: Option<Url>,

    #[arg(
        long = "accountant.contract",
        long_help = "Address of the accountant contract on Wormchain",
        value_name = "ADDRESS",
        requires = "accountant_url",
        env = "MONITOR_ACCOUNTANT_CONTRACT"
    )]
    accountant_contract: Option<String>,
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum Network {
    Mainnet,
    Testnet,
}

impl From<Network> for monitor_common::Network {
    fn from(value: Network) -> Self {
        match value {
            Network::Mainnet => monitor_common::Network::Mainnet,
            Network::Testnet => monitor_common::Network::Testnet,
        }
    }
}

pub struct Config {
    pub near: NearConfig,
    pub driver: DriverConfig,
    pub accountant: Option<Accountant>,
}

pub struct Accountant {
    pub url: Url,
    pub contract: String,
}

impl Config {
    pub fn parse() -> Self {
        Self::from_cli(<Cli as clap::Parser>::parse())
    }

    fn from_cli(cli: Cli) -> Self {
        let accountant = match (cli.accountant_url, cli.accountant_contract) {
            (Some(url), Some(contract)) => Some(Accountant { url, contract }),
            _ => None,
        };

        Config {
            near: NearConfig {
                url: cli.near_url,
                network_id: cli.near_network_id,
                network: cli.network.into(),
            },
            driver: DriverConfig {
                start_block: cli.start_block.map(BlockHeight::new),
                max_batch_size: cli.max_batch_size,
                poll_interval: Duration::from_secs(cli.poll_interval.get()),
            },
            accountant,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Cli::try_parse_from(std::iter::once("monitor").chain(args.iter().copied()))
            .map(Config::from_cli)
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap();

        assert_eq!(config.near.url.as_str(), "https://rpc.mainnet.near.org/");
        assert_eq!(config.near.network_id, "mainnet");
        assert_eq!(config.near.network, monitor_common::Network::Mainnet);
        assert_eq!(config.driver.start_block, None);
        assert_eq!(config.driver.max_batch_size.get(), 100);
        assert_eq!(config.driver.poll_interval, Duration::from_secs(10));
        assert!(config.accountant.is_none());
    }

    #[test]
    fn testnet_with_accountant() {
        let config = parse(&[
            "--network",
            "testnet",
            "--near.url",
            "https://rpc.testnet.near.org",
            "--near.network-id",
            "testnet",
            "--start-block",
            "120000000",
            "--accountant.url",
            "https://lcd.example.org",
            "--accountant.contract",
            "wormhole1accountant",
        ])
        .unwrap();

        assert_eq!(config.near.network, monitor_common::Network::Testnet);
        assert_eq!(config.driver.start_block, Some(BlockHeight::new(120000000)));
        let accountant = config.accountant.unwrap();
        assert_eq!(accountant.url.as_str(), "https://lcd.example.org/");
        assert_eq!(accountant.contract, "wormhole1accountant");
    }

    #[test]
    fn network_does_not_imply_an_accountant() {
        let config = parse(&["--network", "testnet"]).unwrap();

        assert_eq!(config.near.network, monitor_common::Network::Testnet);
        assert!(config.accountant.is_none());
    }

    #[test]
    fn accountant_requires_both_options() {
        assert!(parse(&["--accountant.url", "https://lcd.example.org"]).is_err());
        assert!(parse(&["--accountant.contract", "wormhole1accountant"]).is_err());
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        assert!(parse(&["--max-batch-size", "0"]).is_err());
    }

    #[test]
    fn cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
