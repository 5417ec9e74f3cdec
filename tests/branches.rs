use rv32asm::Program;

#[test]
fn test_forward_reference_resolves() {
    // `done` is defined after its only reference; pass 1 must complete
    // before pass 2 encodes anything for this to resolve.
    let source = r#"
        beq  x1, x0, done
        addi x2, x0, 1
done:   addi x3, x0, 2
    "#;

    let assembly = Program::parse(source).assemble().unwrap();

    assert!(assembly.is_clean());
    assert_eq!(assembly.symbols.address_of("done"), Some(8));

    // Offset +8 from address 0: imm[4:1] = 0b0100.
    assert_eq!(assembly.words[0], 0x00008463);
}

#[test]
fn test_backward_reference_encodes_negative_offset() {
    let source = r#"
top:    addi x1, x0, 1
        beq  x1, x2, top
    "#;

    let assembly = Program::parse(source).assemble().unwrap();

    assert!(assembly.is_clean());

    // Offset is 0 - 4 = -4, masked to 13 bits: 0x1FFC, sign bit set.
    let beq = assembly.words[1];
    assert_eq!(beq >> 31, 1);
    assert_eq!(beq, 0xFE208EE3);
}

#[test]
fn test_branch_offsets_relative_to_each_instruction() {
    // Two branches to the same label encode different offsets.
    let source = r#"
        beq  x0, x0, target
        beq  x0, x0, target
target:
    "#;

    let assembly = Program::parse(source).assemble().unwrap();

    // +8 from address 0, +4 from address 4.
    assert_eq!(assembly.words[0], 0x00000463);
    assert_eq!(assembly.words[1], 0x00000263);
}

#[test]
fn test_literal_branch_targets_are_byte_offsets() {
    let source = "beq x1, x0, -4";

    let assembly = Program::parse(source).assemble().unwrap();

    assert_eq!(assembly.words, vec![0xFE008EE3]);
}

#[test]
fn test_label_on_instruction_line_binds_to_that_instruction() {
    let source = r#"
        addi x1, x0, 1
here:   sub  x2, x2, x1
        beq  x2, x0, here
    "#;

    let assembly = Program::parse(source).assemble().unwrap();

    assert_eq!(assembly.symbols.address_of("here"), Some(4));

    // Offset 4 - 8 = -4.
    assert_eq!(assembly.words[2], 0xFE010EE3);
}
