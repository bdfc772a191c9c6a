use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use hashchip_engine::logging::{init_logging, LoggingConfig};
use hashchip_engine::{LabelWatcher, MemoryHost, PageMatcher, WatcherConfig};
use hashchip_markup::{find_tags, revert};

/// Label the #tags in text files and print the result as HTML.
///
/// Blocks are runs of lines separated by blank lines. Each block becomes one
/// `<div><html-blob>` element with every #tag turned into a colored label.
#[derive(Parser, Debug, PartialEq)]
#[command(name = "hashchip-studio", version)]
struct Args {
    /// Only label when URL is a page the labeller runs on
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Strip labels back to #tags instead of applying them
    #[arg(long)]
    revert: bool,

    /// Log filter in env_logger syntax, e.g. "debug" or "hashchip_engine=trace"
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,

    /// Input files; `-` or none reads stdin
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::default().with_default_level(log::LevelFilter::Warn);
    if let Some(filter) = &args.log {
        logging = logging.with_filter(filter.as_str());
    }
    init_logging(logging);

    let text = read_input(&args.files)?;
    let blocks = split_blocks(&text);

    let labelled = match &args.url {
        Some(url) if !PageMatcher::default().matches(url) => {
            log::warn!("{url} is not a labelled page; passing content through");
            blocks.iter().map(|b| b.to_string()).collect()
        }
        _ if args.revert => blocks.iter().map(|b| revert(b).into_owned()).collect(),
        _ => label_blocks(&blocks),
    };

    let mut stdout = io::stdout().lock();
    for block in &labelled {
        writeln!(stdout, "<div><html-blob>{block}</html-blob></div>")?;
    }
    Ok(())
}

/// Runs the blocks through a watcher the way a page would: load, wait for
/// the initial delay, one pass.
fn label_blocks(blocks: &[&str]) -> Vec<String> {
    let mut host = MemoryHost::new();
    for (i, block) in blocks.iter().enumerate() {
        log::debug!("block {i}: tags {:?}", find_tags(block));
        host.push(*block);
    }

    let mut watcher = LabelWatcher::new(host, WatcherConfig::default());
    watcher.on_load(Instant::now());
    while let Some(due) = watcher.deadline() {
        std::thread::sleep(due.saturating_duration_since(Instant::now()));
        if let Some(report) = watcher.tick(Instant::now()) {
            log::info!(
                "labelled {} of {} block(s), {} failed",
                report.rendered, report.blocks, report.failed
            );
        }
    }

    watcher.into_host().contents().map(str::to_string).collect()
}

fn read_input(files: &[PathBuf]) -> Result<String> {
    if files.is_empty() {
        return read_stdin();
    }
    let mut text = String::new();
    for path in files {
        let chunk = if path.as_os_str() == "-" {
            read_stdin()?
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?
        };
        if !text.is_empty() {
            text.push_str("\n\n");
        }
        text.push_str(&chunk);
    }
    Ok(text)
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
    Ok(text)
}

/// Paragraphs of `text`: runs of lines separated by blank lines. Lines
/// inside a block are kept as they are.
fn split_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if content.trim().is_empty() {
            if let Some(s) = start.take() {
                blocks.push(&text[s..end]);
            }
        } else {
            start.get_or_insert(offset);
            end = offset + content.len();
        }
        offset += line.len();
    }
    if let Some(s) = start {
        blocks.push(&text[s..end]);
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("hashchip-studio").chain(list.iter().copied()))
    }

    #[test]
    fn parses_flags_and_files() {
        let a = args(&["--url", "https://x", "--revert", "a.txt", "-"]).unwrap();
        assert_eq!(a.url.as_deref(), Some("https://x"));
        assert!(a.revert);
        assert_eq!(a.log, None);
        assert_eq!(a.files, vec![PathBuf::from("a.txt"), PathBuf::from("-")]);
    }

    #[test]
    fn no_args_reads_stdin() {
        let a = args(&[]).unwrap();
        assert!(a.files.is_empty());
        assert!(!a.revert);
    }

    #[test]
    fn log_filter_is_passed_through() {
        let a = args(&["--log", "hashchip_engine=debug"]).unwrap();
        assert_eq!(a.log.as_deref(), Some("hashchip_engine=debug"));
    }

    #[test]
    fn help_short_circuits() {
        let err = args(&["a.txt", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn bad_flags_error() {
        assert_eq!(args(&["--url"]).unwrap_err().kind(), clap::error::ErrorKind::InvalidValue);
        assert_eq!(args(&["--bogus"]).unwrap_err().kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn blocks_split_on_blank_lines() {
        let text = "Buy milk #groceries\nand eggs\n\n  \n#urgent call\r\n\r\nlast";
        assert_eq!(
            split_blocks(text),
            vec!["Buy milk #groceries\nand eggs", "#urgent call", "last"]
        );
    }

    #[test]
    fn no_blocks_in_blank_input() {
        assert!(split_blocks("").is_empty());
        assert!(split_blocks("\n \n\t\n").is_empty());
    }

    #[test]
    fn label_blocks_labels_each_block() {
        let out = label_blocks(&["#a", "plain"]);
        assert_eq!(out.len(), 2);
        assert!(out[0].starts_with("<label "));
        assert_eq!(out[1], "plain");
    }
}
