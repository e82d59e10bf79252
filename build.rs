use clap_complete::{generate_to, Shell};
use clap_mangen::Man;
use std::io::Error;
use std::path::Path;
use std::{fs::File, path::PathBuf};

use clap::{CommandFactory, Parser, ValueEnum};
use serde::Deserialize;

include!("src/targets_config.rs");
include!("src/opts.rs");

fn build_shell_completion(outdir: &Path) -> Result<(), Error> {
    let mut opts = Opts::command();
    let shells = Shell::value_variants();

    for shell in shells {
        generate_to(*shell, &mut opts, "pkgforget", outdir)?;
    }

    Ok(())
}

fn build_manpages(outdir: &Path) -> Result<(), Error> {
    let opts = Opts::command();

    let file = Path::new(&outdir).join("pkgforget.1");
    let mut file = File::create(file)?;

    Man::new(opts).render(&mut file)?;

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=src/opts.rs");
    println!("cargo:rerun-if-changed=src/targets_config.rs");

    let outdir = PathBuf::from(std::env::var("OUT_DIR")?)
        .ancestors()
        .nth(3)
        .ok_or("unable to find the target directory")?
        .to_path_buf();

    let comp_path = outdir.join("completions");
    let man_path = outdir.join("man");
    std::fs::create_dir_all(&comp_path)?;
    std::fs::create_dir_all(&man_path)?;

    build_shell_completion(&comp_path)?;
    build_manpages(&man_path)?;

    Ok(())
}
