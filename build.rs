//! Renders the `pkg-merge(1)` manual page from the clap definition.

use std::{fs, path::Path};

use clap::CommandFactory;
use clap_mangen::Man;

#[path = "src/cli.rs"]
mod cli;

const MAN_DIR: &str = "target/generated-man";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let out_dir = Path::new(MAN_DIR);
    fs::create_dir_all(out_dir)?;

    let page = Man::new(cli::Cli::command()).section("1");
    let mut rendered = Vec::new();
    page.render(&mut rendered)?;
    fs::write(out_dir.join(format!("{}.1", env!("CARGO_PKG_NAME"))), rendered)?;

    Ok(())
}
