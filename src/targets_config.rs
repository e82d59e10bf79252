#[derive(Parser, Deserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct TargetsConfig {
    #[clap(
        long,
        value_name = "NAME",
        help = "Name of the main package to uninstall [default: plaso]"
    )]
    pub package: Option<String>,
    #[clap(
        long = "dependency",
        value_name = "NAME",
        help = concat!("Name of a dependency package to uninstall; can be repeated",
                       " and replaces the default dependency list")
    )]
    pub dependencies: Option<Vec<String>>,
    #[clap(
        long,
        value_name = "PATH",
        help = "Volume the package receipts refer to [default: /]"
    )]
    pub volume: Option<String>,
}
