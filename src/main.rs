// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::Parser;

use pose_overlay::cli::args::{Cli, Commands};
use pose_overlay::cli::logging::set_verbose;
use pose_overlay::cli::overlay::run_detect;

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Detect(args) => {
            set_verbose(args.verbose);
            run_detect(args);
        }
    }
}
