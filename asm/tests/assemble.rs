use pretty_assertions::assert_eq;

use armasm::{assemble, assemble_words, Error};

#[test]
fn single_instruction_bytes_are_little_endian() {
    let mut out: Vec<u8> = Vec::new();
    assemble("mov r1, #0x41\n", &mut out).unwrap();
    assert_eq!(out, vec![0x41, 0x10, 0xA0, 0xE3]);
}

#[test]
fn minimal_function() {
    let words = assemble_words("mov r0, #0x42\nbx lr\n").unwrap();
    assert_eq!(words, vec![0xE3A0_0042, 0xE12F_FF1E]);
}

#[test]
fn mixed_statements() {
    let src = "\
@ scratch
mov r1, #0x41
mov r2, r1
bx r2
str r1, [r2, #4]
ldr r3, [r3, #8]
";
    let words = assemble_words(src).unwrap();
    assert_eq!(
        words,
        vec![0xE3A0_1041, 0xE1A0_2001, 0xE12F_FF12, 0xE582_1004, 0xE593_3008]
    );
}

#[test]
fn if_else_program() {
    let src = "\
@ if/else demo
mov r0, #10
mov r1, #20
cmp r0, r1
bge else_part
mov r2, #1
add r3, r2, #2
sub r4, r3, r2
mov r5, r4
str r5, [sp]
b done
else_part:
mov r2, #5
add r3, r2, #4
sub r4, r3, #1
mov r5, r4
str r5, [sp, #4]
done:
ldr r6, [sp]
moveq r7, #1
movne r7, #0
bx lr
";
    let words = assemble_words(src).unwrap();
    assert_eq!(
        words,
        vec![
            0xE3A0_000A,
            0xE3A0_1014,
            0xE150_0001,
            0xAA00_0005,
            0xE3A0_2001,
            0xE282_3002,
            0xE043_4002,
            0xE1A0_5004,
            0xE58D_5000,
            0xEA00_0004,
            0xE3A0_2005,
            0xE282_3004,
            0xE243_4001,
            0xE1A0_5004,
            0xE58D_5004,
            0xE59D_6000,
            0x03A0_7001,
            0x13A0_7000,
            0xE12F_FF1E,
        ]
    );
}

#[test]
fn forward_and_backward_branches() {
    let src = "\
start:
mov r0, #0
loop:
add r0, r0, #1
cmp r0, #3
blt loop
b end
mov r1, #9
end:
bx lr
";
    let words = assemble_words(src).unwrap();
    // blt at index 3 back to index 1: 1 - 3 - 2 = -4
    assert_eq!(words[3], 0xBAFF_FFFC);
    // b at index 4 forward to index 6: 6 - 4 - 2 = 0
    assert_eq!(words[4], 0xEA00_0000);
}

#[test]
fn label_redefinition_last_one_wins() {
    let src = "\
x:
mov r0, #1
x:
mov r0, #2
b x
";
    let words = assemble_words(src).unwrap();
    // b at index 2 to the second x at index 1: 1 - 2 - 2 = -3
    assert_eq!(words[2], 0xEAFF_FFFD);
}

#[test]
fn uppercase_source_is_normalized() {
    let words = assemble_words("MOV R1, #0x41\n").unwrap();
    assert_eq!(words, vec![0xE3A0_1041]);
}

#[test]
fn repeated_hash_marks_accepted() {
    let words = assemble_words("mov r1, ##5\n").unwrap();
    assert_eq!(words, vec![0xE3A0_1005]);
}

#[test]
fn undefined_label_is_an_error() {
    let err = assemble_words("b nowhere\n").unwrap_err();
    assert!(matches!(err.kind(), Error::UndefinedLabel(_)));
}

#[test]
fn unknown_mnemonic_is_an_error() {
    let err = assemble_words("frob r1, r2\n").unwrap_err();
    assert!(matches!(err.kind(), Error::UnknownMnemonic(_)));
    assert_eq!(err.line(), 1);
}

#[test]
fn missing_operands_are_an_error() {
    let err = assemble_words("mov r0, #1\nmov\n").unwrap_err();
    assert!(matches!(err.kind(), Error::MalformedInstruction(_)));
    assert_eq!(err.line(), 2);
}

#[test]
fn bad_addressing_is_an_error() {
    let err = assemble_words("ldr r1, r2\n").unwrap_err();
    assert!(matches!(err.kind(), Error::InvalidAddressingSyntax(_)));
}

#[test]
fn out_of_range_immediate_is_an_error() {
    let err = assemble_words("mov r1, #0x1000000\n").unwrap_err();
    assert!(matches!(err.kind(), Error::InvalidImmediate(_)));
}

#[test]
fn negative_immediate_is_an_error() {
    let err = assemble_words("mov r1, #-1\n").unwrap_err();
    assert!(matches!(err.kind(), Error::InvalidImmediate(_)));
}

#[test]
fn bad_register_is_an_error() {
    let err = assemble_words("mov r16, #1\n").unwrap_err();
    assert!(matches!(err.kind(), Error::InvalidRegister(_)));
}

#[test]
fn directives_and_comments_emit_nothing() {
    let words = assemble_words(".text\n.global main\n@ nothing here\nmain:\nbx lr\n").unwrap();
    assert_eq!(words, vec![0xE12F_FF1E]);
}
