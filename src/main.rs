use clap::Parser;

use strict_guard::cli::{Cli, Commands};
use strict_guard::commands::{CheckKind, run_all, run_check, run_config, run_cover, run_init};
use strict_guard::logging::init_tracing;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Syntax(args) => run_check(CheckKind::Syntax, args, &cli),
        Commands::Strict(args) => run_check(CheckKind::Strict, args, &cli),
        Commands::Warnings(args) => run_check(CheckKind::Warnings, args, &cli),
        Commands::All(args) => run_all(args, &cli),
        Commands::Cover(args) => run_cover(args, &cli),
        Commands::Init(args) => run_init(args, &cli),
        Commands::Config(args) => run_config(args, &cli),
    };

    std::process::exit(exit_code);
}
