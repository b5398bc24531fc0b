use clap::Parser;
use element_picker::cli::commands::{cmd_catalog, cmd_pick, cmd_sample};
use element_picker::cli::config::{
    Cli, Commands, build_session_options, build_tracer, load_config, resolve_source,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Resolve settings: CLI > config > defaults
    let loaded = match cli.command {
        Commands::Catalog { source } => {
            let source = resolve_source(source.as_deref(), &config);
            cmd_catalog(&source, cli.verbose)?
        }
        Commands::Sample {
            source,
            pool_size,
            seed,
            format,
        } => {
            let source = resolve_source(source.as_deref(), &config);
            let options = build_session_options(pool_size, seed, cli.verbose, &config);
            let tracer = build_tracer(cli.trace.as_deref(), &config);
            cmd_sample(&source, &options, &format, tracer)?
        }
        Commands::Pick {
            source,
            pool_size,
            seed,
            script,
            format,
        } => {
            let source = resolve_source(source.as_deref(), &config);
            let options = build_session_options(pool_size, seed, cli.verbose, &config);
            let tracer = build_tracer(cli.trace.as_deref(), &config);
            cmd_pick(&source, &options, script.as_deref(), &format, tracer)?
        }
    };

    if !loaded {
        std::process::exit(1);
    }

    Ok(())
}
