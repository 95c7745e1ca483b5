use clap::Parser;
use miette::Result;
use sda::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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
    let global = cli.global;

    init_logging(global.quiet, global.verbose);

    match cli.command {
        Commands::Schema(cmd) => sda::cli::commands::schema::run(cmd, &global),
        Commands::Validate(args) => sda::cli::commands::validate::run(args, &global),
        Commands::Generate(args) => sda::cli::commands::generate::run(args, &global),
        Commands::Parse(args) => sda::cli::commands::parse::run(args),
        Commands::Session(args) => sda::cli::commands::session::run(args, &global),
        Commands::Config(cmd) => sda::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => sda::cli::commands::completions::run(args),
    }
}

/// Logs go to stderr so stdout stays pipeable. RUST_LOG wins unless -q/-v is given.
fn init_logging(quiet: bool, verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}
