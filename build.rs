//! Build script for generating the `envpy` man page.
//!
//! The page is rendered from the shared clap definitions into the build output
//! directory as `<package>.1`, where packaging picks it up.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_mangen::Man;

#[path = "src/cli/mod.rs"]
mod cli;

use cli::Cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout();
    writeln!(stdout, "cargo:rerun-if-changed=build.rs")?;
    writeln!(stdout, "cargo:rerun-if-changed=src/cli/mod.rs")?;

    let out_dir =
        PathBuf::from(env::var_os("OUT_DIR").ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR was not set")
        })?);

    let command = Cli::command();
    let page = out_dir.join(format!("{}.1", env!("CARGO_PKG_NAME")));
    if command.get_name() != env!("CARGO_PKG_NAME") {
        writeln!(
            stdout,
            "cargo:warning=CLI is named `{}` but the man page is installed as {}",
            command.get_name(),
            page.display()
        )?;
    }

    let mut file = File::create(&page)?;
    Man::new(command).render(&mut file)?;

    Ok(())
}
