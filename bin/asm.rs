use std::io::Write;

use clap::{App, Arg, ArgMatches};
use slog::{o, Drain, Logger};
use slog_term::{FullFormat, TermDecorator};

use rv32asm::Program;

enum Error {
    Assembly,
    IO(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::IO(e)
    }
}

fn parse_arguments() -> ArgMatches<'static> {
    App::new("rvasm")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Assembler for a small RV32I subset")
        .arg(Arg::with_name("source")
             .help("File containing assembly source")
             .value_name("SOURCE")
             .required(true)
             .index(1))
        .arg(Arg::with_name("output")
             .help("File the machine words are written to instead of stdout")
             .short("o")
             .long("output")
             .value_name("FILE")
             .takes_value(true))
        .arg(Arg::with_name("hex")
             .help("Emit hexadecimal words instead of binary")
             .long("hex"))
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

fn main() {
    let args = parse_arguments();

    match run(&args) {
        Ok(()) => (),
        Err(Error::IO(io)) => {
            eprintln!("IO error: {}", io);
            std::process::exit(1);
        }
        Err(Error::Assembly) => std::process::exit(1),
    }
}

fn run(args: &ArgMatches) -> Result<(), Error> {
    let file_path = args.value_of("source").unwrap();
    let source = std::fs::read_to_string(file_path)?;

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
            return Err(Error::Assembly);
        }
    };

    for error in &assembly.errors {
        eprintln!("error: {}", error);
    }

    let words = if args.is_present("hex") {
        assembly.to_hexstrings()
    } else {
        assembly.to_bitstrings()
    };

    match args.value_of("output") {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            writeln!(file, "{}", words)?;
        }
        None => println!("{}", words),
    }

    if assembly.is_clean() {
        Ok(())
    } else {
        Err(Error::Assembly)
    }
}
