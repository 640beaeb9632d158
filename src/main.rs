use clap::Parser;
use daypost::application::{
    CorrelateOptions, CorrelateService, InitOptions, InitService, ListTagsService,
};
use daypost::cli::{format_report, format_tag_list, Cli, Commands};
use daypost::domain::DuplicatePolicy;
use daypost::error::DaypostError;
use daypost::infrastructure::FileSystemRepository;
use daypost::logging;
use std::str::FromStr;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), DaypostError> {
    match cli.command {
        Some(Commands::Init {
            path,
            entries,
            posts,
            on_duplicate,
        }) => {
            let on_duplicate =
                DuplicatePolicy::from_str(&on_duplicate).map_err(DaypostError::Config)?;

            let config_path = InitService::execute(
                &path,
                InitOptions {
                    entries_dir: entries,
                    posts_dir: posts,
                    on_duplicate,
                },
            )?;
            println!("Initialized daypost site at {}", config_path.display());
            Ok(())
        }
        Some(Commands::Correlate { dry_run }) => {
            let repo = FileSystemRepository::discover()?;
            let report = CorrelateService::new(repo).execute(CorrelateOptions { dry_run })?;

            println!("{}", format_report(&report).trim_end());
            if !report.written.is_empty() {
                println!("Wrote {} data files", report.written.len());
            }
            Ok(())
        }
        Some(Commands::Tags) => {
            let repo = FileSystemRepository::discover()?;
            let posts = ListTagsService::new(repo).execute()?;
            println!("{}", format_tag_list(&posts).trim_end());
            Ok(())
        }
        None => {
            println!("daypost - attach journal entries to site posts");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
