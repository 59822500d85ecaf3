mod cli;

use clap::Parser;
use cli::Cli;
use restamp::collect::ConsoleInput;
use restamp::{run, RunOptions};

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let options = RunOptions {
        template: cli.template,
        deployment_name: cli.deployment_name,
        deployment_count: cli.deployment_count,
        delimiter: cli.delimiter,
        sentinel: cli.sentinel,
        debug: cli.debug,
        skip_constants: cli.skip_constants,
    };

    run(&options, &mut ConsoleInput)?;
    Ok(())
}
