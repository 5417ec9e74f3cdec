use rv32asm::error::{AssemblyError, ErrorKind};
use rv32asm::Program;

#[test]
fn test_malformed_store_does_not_disturb_later_lines() {
    let source = r#"
        addi x1, x0, 1
        sw   x5, x1
        addi x2, x0, 2
        beq  x2, x0, end
end:
    "#;

    let assembly = Program::parse(source).assemble().unwrap();

    assert_eq!(assembly.errors.len(), 1);
    assert_eq!(assembly.errors[0].line, 3);
    assert_eq!(
        assembly.errors[0].kind,
        ErrorKind::MalformedMemoryOperand {
            token: "x1".to_string()
        },
    );

    // The bad line still occupied its address slot: the beq at address 12
    // targets `end` at 16, offset +4.
    assert_eq!(assembly.words.len(), 3);
    assert_eq!(assembly.words[2], 0x00010263);
}

#[test]
fn test_duplicate_label_yields_no_words() {
    let source = r#"
loop:   addi x1, x0, 1
        sub  x1, x1, x2
loop:   addi x2, x0, 2
    "#;

    let result = Program::parse(source).assemble();

    assert_eq!(
        result,
        Err(AssemblyError::DuplicateLabel {
            label: "loop".to_string(),
            first_line: 2,
            second_line: 4,
        }),
    );
}

#[test]
fn test_unknown_mnemonic_reports_and_suggests() {
    let source = "adi x1, x0, 1";

    let assembly = Program::parse(source).assemble().unwrap();

    assert!(assembly.words.is_empty());
    assert_eq!(
        assembly.errors[0].kind,
        ErrorKind::UnknownMnemonic {
            mnemonic: "adi".to_string(),
            suggestion: Some("addi"),
        },
    );
}

#[test]
fn test_undefined_label_is_local_to_its_line() {
    let source = r#"
        beq  x1, x0, nowhere
        addi x1, x0, 1
    "#;

    let assembly = Program::parse(source).assemble().unwrap();

    assert_eq!(assembly.words.len(), 1);
    assert_eq!(
        assembly.errors[0].kind,
        ErrorKind::UndefinedLabel {
            label: "nowhere".to_string()
        },
    );
}

#[test]
fn test_unlexable_line_is_collected_with_the_rest() {
    let source = r#"
        addi x1, x0, 1
        addi x2, x0, @
        sub  x1, x1, x2
    "#;

    let program = Program::parse(source);
    assert_eq!(program.errors.len(), 1);

    let assembly = program.assemble().unwrap();

    assert_eq!(assembly.words.len(), 2);
    assert_eq!(assembly.errors.len(), 1);
    assert_eq!(assembly.errors[0].line, 3);
    assert!(matches!(
        assembly.errors[0].kind,
        ErrorKind::UnexpectedToken { .. }
    ));
}

#[test]
fn test_register_range_is_enforced_in_operands() {
    let source = "addi x32, x0, 1";

    let assembly = Program::parse(source).assemble().unwrap();

    assert_eq!(
        assembly.errors[0].kind,
        ErrorKind::InvalidRegister {
            token: "x32".to_string()
        },
    );
}

#[test]
fn test_diagnostics_render_line_numbers() {
    let source = "sw x5, x1";

    let assembly = Program::parse(source).assemble().unwrap();

    assert_eq!(
        assembly.errors[0].to_string(),
        "line 1: malformed memory operand 'x1', expected offset(base)",
    );
}
