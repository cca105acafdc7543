//! A minimal demo process that wires `meshcache`'s [`Group`], [`HashRing`],
//! and TCP transport together. Not part of the published library; it exists
//! only to exercise the core end-to-end.

use clap::{Parser, Subcommand};
use meshcache::config::GroupConfig;
use meshcache::group::Group;
use std::sync::Arc;

mod ring_picker;
mod store;
mod transport;
mod wire;

use ring_picker::RingPicker;
use store::BackingStore;

/// Runs one node of a `meshcache`-backed cache mesh.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start this node, serving a group over TCP and answering peer fetches.
    Serve {
        /// This node's peer id (must also appear in `--peer`).
        #[arg(long)]
        self_id: String,

        /// Address to bind and listen on, e.g. 127.0.0.1:7070.
        #[arg(long)]
        bind: String,

        /// Other peers in the ring as `id=host:port`. Repeatable.
        #[arg(long = "peer", value_name = "ID=ADDR")]
        peers: Vec<String>,

        /// Name of the group this node serves.
        #[arg(long, default_value = "demo")]
        group: String,

        /// Local cache byte budget (0 = unbounded).
        #[arg(long, default_value_t = 1 << 20)]
        max_bytes: u64,

        /// Seed entries as `key=value`. Repeatable.
        #[arg(long = "seed", value_name = "KEY=VALUE")]
        seed: Vec<String>,
    },

    /// Perform a single lookup against a standalone, unseeded local group
    /// (no peers), useful for a quick smoke test of the loader path.
    Get {
        /// Key to fetch.
        key: String,

        /// Seed entries as `key=value`. Repeatable.
        #[arg(long = "seed", value_name = "KEY=VALUE")]
        seed: Vec<String>,
    },
}

fn parse_kv_pairs(pairs: &[String]) -> Vec<(String, String)> {
    pairs
        .iter()
        .filter_map(|pair| pair.split_once('=').map(|(k, v)| (k.to_string(), v.to_string())))
        .collect()
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Commands::Get { key, seed } => {
            let store = BackingStore::new(parse_kv_pairs(&seed));
            let group = Group::new(GroupConfig::new("demo", 0), store).expect("valid group config");
            match group.get(&key) {
                Ok(value) => println!("{}", value.as_string()),
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Serve {
            self_id,
            bind,
            peers,
            group,
            max_bytes,
            seed,
        } => {
            let store = BackingStore::new(parse_kv_pairs(&seed));
            let group = Arc::new(
                Group::new(GroupConfig::new(group, max_bytes), store).expect("valid group config"),
            );

            let mut addresses = parse_kv_pairs(&peers);
            addresses.push((self_id.clone(), bind.clone()));
            let picker = RingPicker::new(self_id, addresses);
            group
                .register_peers(picker)
                .expect("peers registered exactly once at startup");

            transport::serve(&bind, group)?;
        }
    }

    Ok(())
}
