#[derive(Parser)]
#[clap(
    name = "pkgforget",
    version,
    author,
    about,
    long_about = concat!("Uninstall a macOS package and its dependencies by removing the files",
                         " listed in their package receipts, then forgetting the receipts")
)]
pub struct Opts {
    #[clap(short, long, help = "Path to the pkgforget.yml configuration")]
    pub config: Option<String>,
    #[clap(
        short,
        long,
        help = concat!("Do not print anything on the stdout. Warnings and",
                       " errors will still be print on the stderr")
    )]
    pub quiet: bool,
    #[clap(
        short,
        long,
        conflicts_with = "quiet",
        help = "Print every file removed and every package skipped"
    )]
    pub verbose: bool,
    #[clap(
        short = 'n',
        long,
        help = "Print what would be removed without changing anything"
    )]
    pub dry_run: bool,
    #[clap(
        long,
        conflicts_with = "dependencies",
        help = "Only uninstall the main package"
    )]
    pub no_dependencies: bool,
    #[clap(flatten)]
    pub targets: TargetsConfig,
}
