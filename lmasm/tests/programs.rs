use liblmc::{
    digits::NUM_DIGITS,
    load::decode_image,
    port::MemoryPort,
    Lmc, StopReason,
};
use lmasm::{assemble_program, AsmError};

fn run_image(image: &[u8], inputs: Vec<u32>) -> (StopReason, Vec<u32>) {
    let mailboxes = decode_image(image).unwrap();
    let (outputs, port) = MemoryPort::new(inputs);
    let mut lmc = Lmc::with_image(&mailboxes, Box::new(port));
    let stop = lmc.run_until(10_000);
    let outputs = outputs.borrow().clone();
    (stop, outputs)
}

#[test]
fn assemble_and_run_output_five() {
    let image = assemble_program("LDA FIVE\nOUT\nHLT\nFIVE DAT 5\n").unwrap();

    assert_eq!(image.len(), 4 * NUM_DIGITS);
    assert_eq!(&image[3 * NUM_DIGITS..], &[0, 0, 5]);

    let (stop, outputs) = run_image(&image, Vec::new());
    assert_eq!(stop, StopReason::Halted);
    assert_eq!(outputs, vec![5]);
}

#[test]
fn assemble_and_run_add_one() {
    let source = "\tINP\n\tADD ONE\n\tOUT\n\tHLT\nONE\tDAT 1\n";
    let image = assemble_program(source).unwrap();

    let (stop, outputs) = run_image(&image, vec![41]);
    assert_eq!(stop, StopReason::Halted);
    assert_eq!(outputs, vec![42]);
}

#[test]
fn assemble_and_run_countdown() {
    // Counts down from the input to zero, printing each value.
    let source = "\
\tINP
LOOP\tOUT
\tBRZ DONE
\tSUB ONE
\tBRA LOOP
DONE\tHLT
ONE\tDAT 1
";
    let image = assemble_program(source).unwrap();

    let (stop, outputs) = run_image(&image, vec![3]);
    assert_eq!(stop, StopReason::Halted);
    assert_eq!(outputs, vec![3, 2, 1, 0]);
}

#[test]
fn assembly_is_idempotent() {
    let source = "\tINP\n\tSTA 99\n\tLDA 99\n\tOUT\n\tHLT\n";
    let first = assemble_program(source).unwrap();
    let second = assemble_program(source).unwrap();

    assert_eq!(first, second);
}

#[test]
fn undefined_label_names_label_and_line() {
    let err = assemble_program("BRA NOPE\n").unwrap_err();

    assert_eq!(
        err,
        AsmError::UndefinedLabel {
            line: 1,
            label: "NOPE".into()
        }
    );
    let message = err.to_string();
    assert!(message.contains("NOPE"));
    assert!(message.contains("line 1"));
}

#[test]
fn comments_and_blank_lines_do_not_change_the_image() {
    let bare = "\tLDA X\n\tOUT\n\tHLT\nX\tDAT 7\n";
    let commented = "// program header\n\n\tLDA X // load it\n\tOUT\n\n\tHLT\nX\tDAT 7\n";

    assert_eq!(
        assemble_program(bare).unwrap(),
        assemble_program(commented).unwrap()
    );
}
