//! htmlfmt: re-indent, compact or highlight HTML read from a file or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use htmltree::Options;

/// Reformat HTML markup.
#[derive(Parser, Debug)]
#[command(name = "htmlfmt", version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Input file (stdin when omitted or `-`).
    input: Option<PathBuf>,

    /// Write everything on one line.
    #[arg(long)]
    compact: bool,

    /// Reject mismatched, stray or unclosed tags.
    #[arg(long)]
    strict: bool,

    /// Rebuild `<html>` input as a full document.
    #[arg(long)]
    document: bool,

    /// Render highlighted source instead of markup.
    #[arg(long)]
    highlight: bool,

    /// Spaces per indentation level.
    #[arg(long, value_name = "N", default_value_t = 4)]
    tab: usize,
}

impl Cli {
    fn options(&self) -> Options {
        Options::new()
            .with_formatted(!self.compact)
            .with_strict(self.strict)
            .with_document(self.document)
            .with_tab_width(self.tab)
    }

    fn read_input(&self) -> io::Result<String> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => fs::read_to_string(path),
            _ => {
                let mut html = String::new();
                io::stdin().read_to_string(&mut html)?;
                Ok(html)
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let html = match cli.read_input() {
        Ok(html) => html,
        Err(err) => {
            eprintln!("htmlfmt: {err}");
            return ExitCode::FAILURE;
        }
    };
    let options = cli.options();
    let result = if cli.highlight {
        htmltree::highlight_with(&html, &options)
    } else {
        htmltree::format_with(&html, &options)
    };
    match result {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("htmlfmt: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["htmlfmt"]).unwrap();
        assert!(cli.input.is_none());
        assert_eq!(cli.options(), Options::new());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "htmlfmt", "--compact", "--strict", "--document", "--tab", "2", "page.html",
        ])
        .unwrap();
        let options = cli.options();
        assert!(!options.serialize.formatted);
        assert!(options.parse.strict);
        assert!(options.parse.as_document);
        assert_eq!(options.serialize.tab, "  ");
        assert_eq!(cli.input, Some(PathBuf::from("page.html")));
    }

    #[test]
    fn test_bad_tab_width_is_rejected() {
        assert!(Cli::try_parse_from(["htmlfmt", "--tab", "x"]).is_err());
    }
}
