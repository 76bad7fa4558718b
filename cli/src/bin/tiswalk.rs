use std::collections::HashSet;
use std::io::{BufWriter, Write};
use std::path::Path;
use walker::error::WalkerError;
use walker::network::Network;
use walker::walk::{TransitionOperator, WalkConfig};
use walker::{matrix, rank, reduce, seed, walk};
#[macro_use]
extern crate log;

fn main() {
    let matches = tiswalk_cli::commands::tiswalk_parser().get_matches();
    if let Some((_, sub_m)) = matches.subcommand() {
        let level = match sub_m.get_count("verbose") {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    }
    let result = match matches.subcommand() {
        Some(("run", sub_m)) => run(sub_m),
        Some(("batch", sub_m)) => batch(sub_m),
        _ => unreachable!(),
    };
    if let Err(why) = result {
        eprintln!("{why}");
        std::process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches) -> Result<(), WalkerError> {
    debug!("START\tRun");
    let graph: &String = matches.get_one("graph").unwrap();
    let seed_file: &String = matches.get_one("seed").unwrap();
    let restart_prob: f64 = *matches.get_one("restart_prob").unwrap();
    let og_prob: f64 = *matches.get_one("og_prob").unwrap();
    let max_rounds = matches.get_one::<usize>("max_rounds").copied();
    let mut remove: HashSet<String> = matches
        .get_many::<String>("remove")
        .map(|nodes| nodes.cloned().collect())
        .unwrap_or_default();
    if let Some(path) = matches.get_one::<String>("remove_list") {
        remove.extend(seed::load_removal_list(Path::new(path))?);
    }

    // filter nodes we want to remove out of the starting seed, if any
    let mut seeds = seed::load_seed_list(Path::new(seed_file))?;
    seeds.retain(|s| !remove.contains(s));

    let network = Network::load(Path::new(graph))?;
    let network = reduce::remove_and_reduce(&network, &remove);
    let (adjacency, og) = matrix::build_og(&network);
    let op = match matches.get_one::<String>("low_list") {
        Some(path) => {
            let tsg = matrix::build_tsg(&network, &adjacency, Path::new(path))?;
            TransitionOperator::blended(og, tsg, og_prob)
        }
        None => TransitionOperator::Original(og),
    };

    let p_0 = walk::seed_vector(&seeds, &network)?;
    let config = WalkConfig::new(restart_prob, max_rounds);
    let walk = walk::run_walk(&op, &p_0, &config)?;
    debug!("WALK\t{}\t{}\tConverged", network.node_count(), walk.rounds);

    let stdout = std::io::stdout();
    let mut wtr = BufWriter::new(stdout.lock());
    match matches.get_one::<String>("node_list") {
        Some(path) => {
            let order = seed::load_node_order(Path::new(path))?;
            for prob in rank::probabilities_in_order(&walk.probabilities, &network, &order)? {
                writeln!(wtr, "{prob:.10}")?;
            }
        }
        None => {
            for name in rank::rank_descending(&walk.probabilities, network.names()) {
                writeln!(wtr, "{name}")?;
            }
        }
    }
    Ok(())
}

fn batch(matches: &clap::ArgMatches) -> Result<(), WalkerError> {
    debug!("START\tBatch");
    let path: &String = matches.get_one("profile").unwrap();
    let profile = tiswalk_cli::batch::load_profile(Path::new(path))?;
    tiswalk_cli::batch::run_batch(&profile)
}
