//! Command-line front end for the streaming XML printer.
//!
//! Reads event scripts (see [`xmlprinter::script`]) and prints the XML they
//! describe in the requested output encoding.

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use encoding_rs::Encoding;

use xmlprinter::encoding::{app_encoding_for_label, EncodingError};
use xmlprinter::script::{parse_script, ScriptEvent};
use xmlprinter::{DocumentAttributes, PrintError, XmlPrinter};

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// xmlprint -- turn structural event scripts into XML.
///
/// Each input file holds one event per line: `open NAME`, `attr NAME`,
/// `value TEXT`, `close [NAME]`.
#[derive(Parser, Debug)]
#[command(name = "xmlprint", version, about, long_about = None)]
struct Cli {
    /// Event script files to process (use `-` for stdin).
    #[arg(required = true)]
    files: Vec<String>,

    /// Output encoding label (e.g., UTF-8, UTF-16LE, ISO-8859-1).
    #[arg(long, value_name = "ENCODING", default_value = "UTF-8")]
    encoding: String,

    /// Character encoding of the script files (WHATWG label, default UTF-8).
    #[arg(long = "app-encoding", value_name = "ENCODING")]
    app_encoding: Option<String>,

    /// Stop at the first rejected event instead of skipping it.
    #[arg(long)]
    strict: bool,

    /// Report rejected events on stderr.
    #[arg(long)]
    verbose: bool,

    /// Save output to a file instead of stdout.
    #[arg(long, value_name = "FILE")]
    output: Option<String>,

    /// Print timing information.
    #[arg(long)]
    timing: bool,
}

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

const EXIT_SUCCESS: u8 = 0;
const EXIT_INPUT_ERROR: u8 = 1;
const EXIT_PROTOCOL_ERROR: u8 = 2;
const EXIT_ENCODING_ERROR: u8 = 3;

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();

    let script_encoding = match resolve_script_encoding(&cli) {
        Ok(encoding) => encoding,
        Err(e) => {
            eprintln!("xmlprint: {e}");
            return ExitCode::from(EXIT_ENCODING_ERROR);
        }
    };
    // Scripts are decoded up front, so the printer always sees UTF-8.
    let attributes = DocumentAttributes::new(&cli.encoding);

    let mut worst_exit = EXIT_SUCCESS;
    let mut output = Vec::new();

    for file in &cli.files {
        let exit = process_file(&cli, &attributes, script_encoding, file, &mut output);
        if exit > worst_exit {
            worst_exit = exit;
        }
        if exit == EXIT_ENCODING_ERROR {
            break;
        }
    }

    if let Err(e) = write_output(&cli, &output) {
        eprintln!("xmlprint: failed to write output: {e}");
        return ExitCode::from(EXIT_INPUT_ERROR);
    }

    ExitCode::from(worst_exit)
}

fn resolve_script_encoding(cli: &Cli) -> Result<&'static Encoding, EncodingError> {
    match cli.app_encoding {
        Some(ref label) => app_encoding_for_label(label),
        None => Ok(encoding_rs::UTF_8),
    }
}

/// Prints one script with a fresh printer and returns an exit code.
fn process_file(
    cli: &Cli,
    attributes: &DocumentAttributes,
    script_encoding: &'static Encoding,
    filename: &str,
    output: &mut Vec<u8>,
) -> u8 {
    let data = match read_input(filename) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("{filename}: failed to read: {e}");
            return EXIT_INPUT_ERROR;
        }
    };
    // A BOM overrides the configured encoding; malformed bytes become U+FFFD.
    let (input, _, _) = script_encoding.decode(&data);

    let events = match parse_script(&input) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("{filename}: {e}");
            return EXIT_INPUT_ERROR;
        }
    };

    let start = Instant::now();
    let mut printer = XmlPrinter::new(attributes.clone());
    let exit = print_events(cli, filename, &mut printer, &events, output);

    if cli.timing {
        let elapsed = start.elapsed();
        eprintln!("Printing {} events took {elapsed:?}", events.len());
    }

    if cli.verbose && printer.depth() > 0 {
        let open: Vec<String> = printer
            .open_tags()
            .iter()
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .collect();
        eprintln!(
            "{filename}: {} element(s) left open at end of script: {}",
            open.len(),
            open.join(", ")
        );
    }

    exit
}

fn print_events(
    cli: &Cli,
    filename: &str,
    printer: &mut XmlPrinter,
    events: &[ScriptEvent],
    output: &mut Vec<u8>,
) -> u8 {
    let mut exit = EXIT_SUCCESS;
    for event in events {
        match printer.print_event(event.as_print_event(), output) {
            Ok(_) => {}
            Err(e @ PrintError::UnsupportedEncoding { .. }) => {
                eprintln!("{filename}: {e}");
                return EXIT_ENCODING_ERROR;
            }
            Err(e) => {
                if cli.verbose || cli.strict {
                    eprintln!("{filename}:{}: {e}", event.line);
                }
                exit = EXIT_PROTOCOL_ERROR;
                if cli.strict {
                    break;
                }
            }
        }
    }
    exit
}

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

/// Reads raw input from a file or stdin (when filename is `-`).
fn read_input(filename: &str) -> io::Result<Vec<u8>> {
    if filename == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(filename)
    }
}

/// Writes the output to a file or stdout.
fn write_output(cli: &Cli, content: &[u8]) -> io::Result<()> {
    if let Some(ref output_file) = cli.output {
        fs::write(output_file, content)
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(content)?;
        stdout.flush()
    }
}
