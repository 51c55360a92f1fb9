use clap::Parser;
use faultkit::cli::output::log_level;
use faultkit::cli::{Cli, Commands};
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(cli.global.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Analyze(args) => faultkit::cli::commands::analyze::run(args, &cli.global),
        Commands::Tensor(args) => faultkit::cli::commands::tensor::run(args, &cli.global),
        Commands::Plane(args) => faultkit::cli::commands::plane::run(args, &cli.global),
        Commands::Completions(args) => faultkit::cli::commands::completions::run(args),
    }
}
