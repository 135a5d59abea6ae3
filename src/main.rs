#[cfg(not(feature = "cli"))]
compile_error!("The `cfr` binary requires the `cli` feature. Build with `--features cli`.");

use clap::{CommandFactory, Parser};
use std::fs::File;
use std::io::Write;
use std::process;

use cfr::cli;
use cfr::cli::app::{Cli, ColorMode, Commands};
use cfr::ChannelError;

fn main() {
    let cli = Cli::parse();

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {} // colored auto-detects tty
    }

    let writer_result: Result<Box<dyn Write>, ChannelError> = match &cli.output {
        Some(path) => File::create(path)
            .map(|f| Box::new(f) as Box<dyn Write>)
            .map_err(|e| ChannelError::Io(format!("Cannot create {}: {}", path, e))),
        None => Ok(Box::new(std::io::stdout()) as Box<dyn Write>),
    };

    let mut writer = match writer_result {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Dump {
            file,
            verbose,
            format,
            dfp_marker,
        } => cli::dump::execute(
            &cli::dump::DumpOptions {
                file,
                verbose,
                format,
                dfp_marker,
                mmap: cli.mmap,
            },
            &mut writer,
        ),

        Commands::Info {
            file,
            json,
            dfp_marker,
        } => cli::info::execute(
            &cli::info::InfoOptions {
                file,
                json,
                dfp_marker,
                mmap: cli.mmap,
            },
            &mut writer,
        ),

        Commands::Refs {
            file,
            verbose,
            json,
            dfp_marker,
        } => cli::refs::execute(
            &cli::refs::RefsOptions {
                file,
                verbose,
                json,
                dfp_marker,
                mmap: cli.mmap,
            },
            &mut writer,
        ),

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "cfr", &mut writer);
            Ok(())
        }
    };

    if let Err(e) = result.and_then(|()| {
        writer
            .flush()
            .map_err(|e| ChannelError::Io(format!("Cannot flush output: {}", e)))
    }) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
