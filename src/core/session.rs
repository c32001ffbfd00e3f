use clap::{CommandFactory, Parser};
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use crate::config::{print_completion, CachePaths, CliConfig, IEEE_OUI_CSV_URL};
use crate::core::index::OuiIndex;
use crate::core::registry::RegistryStore;
use crate::core::report::{self, ReportEntry};
use crate::utils::error::{LookupError, Result};

const PROMPT: &str = "ouilookup> ";

/// Orchestrates one invocation: collects addresses, drives the
/// normalize -> lookup -> format pipeline, and emits the report.
pub struct QuerySession {
    config: CliConfig,
    store: RegistryStore,
}

impl QuerySession {
    pub fn new(config: CliConfig, paths: CachePaths) -> Result<Self> {
        Ok(Self {
            config,
            store: RegistryStore::new(paths, IEEE_OUI_CSV_URL)?,
        })
    }

    /// Entry point. Interactive mode is entered only when no addresses,
    /// files, pipe, or download flag were supplied.
    pub async fn run(&self) -> Result<()> {
        let piped = !io::stdin().is_terminal();
        let batch = !self.config.macs.is_empty()
            || !self.config.files.is_empty()
            || self.config.download
            || piped;
        if batch {
            self.run_batch(&self.config, piped).await
        } else {
            self.run_interactive().await
        }
    }

    /// One pass of the full pipeline. Errors propagate to the caller, which
    /// makes them fatal in batch mode and prompt-returning in interactive.
    async fn run_batch(&self, config: &CliConfig, read_pipe: bool) -> Result<()> {
        if config.download {
            self.store.refresh().await?;
            self.store.rebuild_index()?;
        }
        self.store.ensure_ready()?;

        let index_path = self.store.paths().index_json();
        let index = OuiIndex::load(&index_path)?;
        if index.is_empty() {
            return Err(LookupError::CacheUnavailable { path: index_path });
        }
        tracing::debug!("loaded {} OUI entries", index.len());

        let inputs = collect_inputs(config, read_pipe);
        let result = report::build_report(&inputs, &index, config.quiet);
        for entry in &result.entries {
            match entry {
                ReportEntry::Line(line) => println!("{line}"),
                ReportEntry::Warning(warning) => eprintln!("{warning}"),
            }
        }
        Ok(())
    }

    /// Prompt -> tokenize -> dispatch loop. Two named commands (`help`,
    /// `quit`, case-insensitive prefix match); anything else is re-parsed as
    /// a fresh argument set and run through the batch pipeline once.
    async fn run_interactive(&self) -> Result<()> {
        loop {
            if let Err(e) = self.store.ensure_ready() {
                eprintln!("{e}");
                if let Some(hint) = e.recovery_suggestion() {
                    eprintln!("{hint}");
                }
            }
            println!("\nEnter MAC/OUI and/or options, 'h' for help, 'q' to quit");
            print!("{PROMPT}");
            io::stdout().flush()?;

            let mut reply = String::new();
            if io::stdin().read_line(&mut reply)? == 0 {
                // EOF behaves like quit.
                println!("Bye!");
                return Ok(());
            }
            let Some(tokens) = shlex::split(reply.trim()) else {
                eprintln!("[WARNING]: Could not parse input line");
                continue;
            };
            let Some(first) = tokens.first() else {
                continue;
            };
            let command = first.to_lowercase();
            if command.starts_with('q') {
                println!("Bye!");
                return Ok(());
            }
            if command.starts_with('h') {
                print_interactive_help();
                continue;
            }

            let config = match CliConfig::try_parse_from(
                std::iter::once("ouilookup".to_string()).chain(tokens),
            ) {
                Ok(config) => config,
                Err(e) => {
                    let _ = e.print();
                    continue;
                }
            };
            if let Some(shell) = config.completion {
                print_completion(shell);
                continue;
            }
            if let Err(e) = self.run_batch(&config, false).await {
                eprintln!("{e}");
                if let Some(hint) = e.recovery_suggestion() {
                    eprintln!("{hint}");
                }
            }
        }
    }
}

/// Concatenate inputs in order: positional arguments, `--file` contents,
/// then piped stdin; every entry trimmed. Duplicates are kept.
fn collect_inputs(config: &CliConfig, read_pipe: bool) -> Vec<String> {
    let mut inputs: Vec<String> = config.macs.iter().map(|m| m.trim().to_string()).collect();
    for file in &config.files {
        inputs.extend(read_address_file(file, config.quiet));
    }
    if read_pipe {
        let stdin = io::stdin();
        for line in stdin.lock().lines().map_while(|line| line.ok()) {
            inputs.push(line.trim().to_string());
        }
    }
    inputs
}

/// One address per line. A missing or empty file degrades to a warning
/// (suppressed when quiet) and contributes nothing.
fn read_address_file(path: &Path, quiet: bool) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(contents) if contents.is_empty() => {
            if !quiet {
                eprintln!("[WARNING]: No data found in file: `{}`", path.display());
            }
            Vec::new()
        }
        Ok(contents) => contents.lines().map(|l| l.trim().to_string()).collect(),
        Err(_) => {
            if !quiet {
                eprintln!("Could not open file: `{}`", path.display());
            }
            Vec::new()
        }
    }
}

fn print_interactive_help() {
    let mut cmd = CliConfig::command();
    println!("{}", cmd.render_help());
    println!("interactive commands:");
    println!("  {:<20}  show this message again", "help");
    println!("  {:<20}  exit program", "quit");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_from(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("ouilookup").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_collect_inputs_trims_positional_arguments() {
        let config = config_from(&["  74:13:ea:9a:22:2e  ", "080030"]);
        let inputs = collect_inputs(&config, false);
        assert_eq!(inputs, vec!["74:13:ea:9a:22:2e", "080030"]);
    }

    #[test]
    fn test_collect_inputs_appends_file_entries_after_positionals() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("macs.txt");
        fs::write(&file, "286fb9\n  b4df.9181.7fb1\n").unwrap();

        let config = config_from(&["080030", "-f", file.to_str().unwrap()]);
        let inputs = collect_inputs(&config, false);
        assert_eq!(inputs, vec!["080030", "286fb9", "b4df.9181.7fb1"]);
    }

    #[test]
    fn test_read_address_file_missing_is_empty() {
        let temp = TempDir::new().unwrap();
        let inputs = read_address_file(&temp.path().join("absent.txt"), true);
        assert!(inputs.is_empty());
    }

    #[test]
    fn test_read_address_file_empty_is_empty() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("empty.txt");
        fs::write(&file, "").unwrap();
        let inputs = read_address_file(&file, true);
        assert!(inputs.is_empty());
    }

    #[test]
    fn test_read_address_file_keeps_blank_lines_as_entries() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("macs.txt");
        fs::write(&file, "080030\n\n286fb9\n").unwrap();
        let inputs = read_address_file(&file, true);
        assert_eq!(inputs, vec!["080030", "", "286fb9"]);
    }

    #[tokio::test]
    async fn test_run_batch_without_cache_is_fatal() {
        let temp = TempDir::new().unwrap();
        let paths = CachePaths::at(temp.path().to_path_buf()).unwrap();
        let config = config_from(&["080030"]);
        let session = QuerySession::new(config.clone(), paths).unwrap();

        let err = session.run_batch(&config, false).await.unwrap_err();
        assert!(matches!(err, LookupError::CacheUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_run_batch_with_prepared_cache_succeeds() {
        let temp = TempDir::new().unwrap();
        let paths = CachePaths::at(temp.path().to_path_buf()).unwrap();
        fs::write(
            paths.index_json(),
            r#"{"080030": "NETWORK RESEARCH CORPORATION"}"#,
        )
        .unwrap();

        let config = config_from(&["080030", "not-a-mac", "-q"]);
        let session = QuerySession::new(config.clone(), paths).unwrap();
        session.run_batch(&config, false).await.unwrap();
    }
}
