use std::io::{BufRead, Write};

use clap::{App, Arg, ArgMatches};
use slog::{o, Drain, Logger};
use slog_term::{FullFormat, TermDecorator};

use rv32asm::Program;

fn parse_arguments() -> ArgMatches<'static> {
    App::new("rvasm-repl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive line-by-line input for the RV32I subset assembler")
        .arg(Arg::with_name("output")
             .help("File the machine words are written to after assembly")
             .short("o")
             .long("output")
             .value_name("FILE")
             .takes_value(true))
        .arg(Arg::with_name("verbose")
             .help("Log the assembly stages to the terminal")
             .short("v")
             .long("verbose"))
        .get_matches()
}

fn create_logger() -> Logger {
    let decorator = TermDecorator::new().build();
    let drain = FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Logger::root(drain, o!())
}

/// Reads numbered lines from the terminal until a blank line ends the
/// capture. Comments are kept: the parser skips them on its own.
fn capture_source() -> std::io::Result<String> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut source = String::new();
    let mut number = 1;

    println!("Enter assembly, one instruction per line. A blank line assembles.");

    loop {
        print!("{:04} > ", number);
        std::io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        if line.trim().is_empty() {
            break;
        }

        source.push_str(&line);
        source.push('\n');
        number += 1;
    }

    Ok(source)
}

fn main() {
    let args = parse_arguments();

    if let Err(io) = run(&args) {
        eprintln!("IO error: {}", io);
        std::process::exit(1);
    }
}

fn run(args: &ArgMatches) -> std::io::Result<()> {
    let source = capture_source()?;

    let logger = if args.is_present("verbose") {
        Some(create_logger())
    } else {
        None
    };

    let program = Program::parse(&source);

    let assembly = match program.assemble_with_logger(logger) {
        Ok(assembly) => assembly,
        Err(fatal) => {
            eprintln!("error: {}", fatal);
            std::process::exit(1);
        }
    };

    for error in &assembly.errors {
        eprintln!("error: {}", error);
    }

    if !assembly.words.is_empty() {
        println!("{}", assembly.to_bitstrings());
    }

    if let Some(path) = args.value_of("output") {
        let mut file = std::fs::File::create(path)?;
        writeln!(file, "{}", assembly.to_bitstrings())?;
        println!("Results saved to {}", path);
    }

    Ok(())
}
