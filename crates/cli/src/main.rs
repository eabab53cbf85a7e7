use clap::Parser;
use nacosctl::{cli::Cli, commands, logging, output};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = commands::dispatch(cli) {
        output::print_error(&err);
        std::process::exit(1);
    }
}
