use clap::CommandFactory;
use clap_complete::{Generator, Shell};
use clap_mangen::Man;
use std::io;
use std::path::{Path, PathBuf};

// CLI definition shared with the library crate
include!("src/cli/app.rs");

fn write_man_page(cmd: clap::Command, path: &Path) -> io::Result<()> {
    let mut buf = Vec::new();
    Man::new(cmd).render(&mut buf)?;
    std::fs::write(path, buf)
}

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=src/cli/app.rs");

    if std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default() == "wasm32" {
        return Ok(());
    }

    let out_dir =
        PathBuf::from(std::env::var("OUT_DIR").unwrap_or_else(|_| "target/man".to_string()));

    let man_dir = out_dir.join("man");
    std::fs::create_dir_all(&man_dir)?;
    let cmd = Cli::command();
    write_man_page(cmd.clone(), &man_dir.join("cfr.1"))?;
    for sub in cmd.get_subcommands() {
        write_man_page(sub.clone(), &man_dir.join(format!("cfr-{}.1", sub.get_name())))?;
    }

    let completions_dir = out_dir.join("completions");
    std::fs::create_dir_all(&completions_dir)?;
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        clap_complete::generate(shell, &mut cmd, "cfr", &mut buf);
        std::fs::write(completions_dir.join(shell.file_name("cfr")), buf)?;
    }

    Ok(())
}
