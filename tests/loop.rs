use rv32asm::{assemble_with_logger, Assembly, Program};

use slog::{o, Drain, Logger};
use slog_term::{CompactFormat, TermDecorator};

fn assemble_program() -> Assembly {
    let source = include_str!("loop.asm");

    let program = Program::parse(source);
    assert!(program.errors.is_empty());

    let decorator = TermDecorator::new().build();
    let drain = CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let logger = Logger::root(drain, o!());

    assemble_with_logger(&program.lines, logger).unwrap()
}

#[test]
fn test_loop_addresses_and_symbols() {
    let assembly = assemble_program();

    assert!(assembly.is_clean());
    assert_eq!(assembly.words.len(), 8);

    // 8 instructions, 4 bytes each; `loop` names the third one and `end`
    // the first free address after the program.
    assert_eq!(assembly.symbols.len(), 2);
    assert_eq!(assembly.symbols.address_of("loop"), Some(8));
    assert_eq!(assembly.symbols.address_of("end"), Some(32));
}

#[test]
fn test_loop_words() {
    let assembly = assemble_program();

    assert_eq!(assembly.words, vec![
        0x00A00093, // addi x1, x0, 10
        0x00000113, // addi x2, x0, 0
        0x0000A183, // lw   x3, 0(x1)
        0x0021C233, // xor  x4, x3, x2
        0x002252B3, // srl  x5, x4, x2
        0x0050A223, // sw   x5, 4(x1)
        0x402080B3, // sub  x1, x1, x2
        0x00008263, // beq  x1, x0, end (+4)
    ]);
}

#[test]
fn test_loop_report_format() {
    let assembly = assemble_program();

    let report = assembly.to_bitstrings();
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "00000000101000000000000010010011");
    assert!(lines.iter().all(|line| line.len() == 32));
}
