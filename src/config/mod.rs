pub mod paths;

use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::Shell;
use std::path::PathBuf;

pub use paths::CachePaths;

/// The IEEE-published OUI registry dump.
pub const IEEE_OUI_CSV_URL: &str = "https://standards-oui.ieee.org/oui/oui.csv";

/// Tool to obtain the vendor name / organizationally unique identifier (OUI)
/// for MAC addresses.
#[derive(Debug, Clone, Parser)]
#[command(name = "ouilookup", version, disable_version_flag = true)]
#[command(about = "Tool to obtain vendor name / organizationally unique identifier (OUI) for MAC addresses")]
#[command(after_help = "Have a great day!")]
pub struct CliConfig {
    /// The full MAC address or the OUI portion (first 6 hex digits).
    /// Separating characters such as `:`, `-`, or `.` are allowed at any
    /// interval. Examples: 74:13:ea:9a:22:2e 28-EA-0B-6C-A9-E5
    /// b4df.9181.7fb1 e073e7-ec3802 080030
    #[arg(value_name = "MAC")]
    pub macs: Vec<String>,

    /// Use a file with one MAC address per line
    #[arg(short, long = "file", value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Download the IEEE OUI file `oui.csv` into the user data directory and
    /// convert it to the `oui.json` lookup index
    #[arg(short, long)]
    pub download: bool,

    /// Suppress warning messages when a MAC is not found to be valid
    #[arg(short, long)]
    pub quiet: bool,

    /// Show the version number and exit
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Print shell completion to the terminal and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completion: Option<Shell>,
}

/// Generate a completion script for the declared command schema.
///
/// The generator consumes only the `clap::Command` description (flags,
/// choices, help text), never the lookup engine itself.
pub fn print_completion(shell: Shell) {
    let mut cmd = CliConfig::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
