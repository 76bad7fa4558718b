use clap::{value_parser, Arg, ArgAction, Command};

fn arg_verbose() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Debug mode")
}

fn subcommand_run() -> Command {
    Command::new("run")
        .about("Run one walk to convergence and write the rank list to stdout.")
        .arg(arg_verbose())
        .arg(
            Arg::new("graph")
                .value_name("GRAPH")
                .required(true)
                .help("Original PPI graph input file, in edge list format"),
        )
        .arg(
            Arg::new("seed")
                .value_name("SEED")
                .required(true)
                .help("Seed file, to pull start nodes from"),
        )
        .arg(
            Arg::new("restart_prob")
                .short('e')
                .long("restart_prob")
                .value_name("PROB")
                .default_value("0.7")
                .value_parser(value_parser!(f64))
                .help("Restart probability for the random walk"),
        )
        .arg(
            Arg::new("og_prob")
                .short('o')
                .long("og_prob")
                .value_name("PROB")
                .default_value("0.1")
                .value_parser(value_parser!(f64))
                .help("Probability of walking on the original graph, when a low list is given"),
        )
        .arg(
            Arg::new("low_list")
                .short('l')
                .long("low_list")
                .value_name("FILE")
                .help("List of genes expressed and unexpressed in the current tissue"),
        )
        .arg(
            Arg::new("node_list")
                .short('n')
                .long("node_list")
                .value_name("FILE")
                .help("Write probabilities in this node order instead of a rank list"),
        )
        .arg(
            Arg::new("remove")
                .short('r')
                .long("remove")
                .value_name("NODE")
                .num_args(1..)
                .action(ArgAction::Append)
                .help("Nodes to remove from the graph, if any"),
        )
        .arg(
            Arg::new("remove_list")
                .long("remove_list")
                .value_name("FILE")
                .help("File of nodes to remove from the graph, one per line"),
        )
        .arg(
            Arg::new("max_rounds")
                .long("max_rounds")
                .value_name("NUM")
                .value_parser(value_parser!(usize))
                .help("Abort if the walk has not converged after this many rounds"),
        )
}

fn subcommand_batch() -> Command {
    Command::new("batch")
        .about("Run walks for many seed files in parallel, from a TOML profile.")
        .arg(arg_verbose())
        .arg(
            Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("TOML")
                .required(true)
                .help("Batch profile"),
        )
}

pub fn tiswalk_parser() -> Command {
    Command::new("tiswalk")
        .version("0.1.0")
        .about("Tissue-specific random walk with restart over a PPI network.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(subcommand_run())
        .subcommand(subcommand_batch())
}
