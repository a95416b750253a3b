use liblmc::digits::NUM_MAILBOXES;

use crate::labels::LabelTable;
use crate::opcodes::Mnemonic;
use crate::scanner::{is_blank, is_label_char, Scanner};
use crate::AsmError;

#[derive(Debug)]
pub struct PassOne {
    pub labels: LabelTable,
    pub mailboxes: usize,
}

/// First pass: walk the source once, giving each statement the next
/// sequential mailbox address and recording label definitions. Operands
/// are skipped wholesale; validating them is the second pass's job.
pub fn pass_one(source: &str) -> Result<PassOne, AsmError> {
    let mut scanner = Scanner::new(source);
    let mut labels = LabelTable::new();
    let mut cur_addr = 0;

    while let Some(c) = scanner.peek() {
        if c == b'\n' {
            scanner.bump();
            continue;
        }

        if c == b'/' {
            scanner.finish_line(false)?;
            continue;
        }

        if !is_blank(c) {
            if !is_label_char(c) {
                // Stray punctuation; claim the address and let pass two
                // report the bad statement with its line number.
                cur_addr += 1;
                scanner.finish_line(true)?;
                continue;
            }

            let token = scanner.read_label()?;
            if Mnemonic::lookup(&token).is_some() {
                // An unindented opcode, not a label definition.
                cur_addr += 1;
                scanner.finish_line(true)?;
                continue;
            }

            // A label is bound to the address of the statement on its own
            // line, which is the current address either way.
            labels.define(token, cur_addr);
        }

        scanner.skip_blanks();
        match scanner.peek() {
            None => break,
            Some(b'\n') => {
                scanner.bump();
            }
            Some(b'/') => {
                scanner.finish_line(false)?;
            }
            Some(_) => {
                cur_addr += 1;
                scanner.finish_line(true)?;
            }
        }
    }

    if cur_addr > NUM_MAILBOXES {
        return Err(AsmError::ProgramTooLong {
            mailboxes: cur_addr,
        });
    }

    Ok(PassOne {
        labels,
        mailboxes: cur_addr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_addresses() {
        let source = "\tLDA FIVE\n\tOUT\n\tHLT\nFIVE\tDAT 5\n";
        let pass = pass_one(source).unwrap();

        assert_eq!(pass.mailboxes, 4);
        assert_eq!(pass.labels.resolve("FIVE"), Some(3));
    }

    #[test]
    fn unindented_opcodes_are_not_labels() {
        let source = "LDA FIVE\nOUT\nHLT\nFIVE DAT 5\n";
        let pass = pass_one(source).unwrap();

        assert_eq!(pass.mailboxes, 4);
        assert_eq!(pass.labels.resolve("FIVE"), Some(3));
        assert_eq!(pass.labels.resolve("LDA"), None);
    }

    #[test]
    fn label_only_line_binds_next_statement() {
        let source = "LOOP\n\tADD ONE\n\tBRA LOOP\nONE DAT 1\n";
        let pass = pass_one(source).unwrap();

        assert_eq!(pass.mailboxes, 3);
        assert_eq!(pass.labels.resolve("LOOP"), Some(0));
        assert_eq!(pass.labels.resolve("ONE"), Some(2));
    }

    #[test]
    fn blank_and_comment_lines_allocate_nothing() {
        let source = "// header\n\n   \n\tHLT\n   // indented comment\n";
        let pass = pass_one(source).unwrap();

        assert_eq!(pass.mailboxes, 1);
    }

    #[test]
    fn label_with_trailing_comment() {
        let source = "HERE // just a marker\n\tHLT\n";
        let pass = pass_one(source).unwrap();

        assert_eq!(pass.mailboxes, 1);
        assert_eq!(pass.labels.resolve("HERE"), Some(0));
    }

    #[test]
    fn malformed_operands_are_skipped() {
        // Pass one does not look at operands at all.
        let source = "\tADD !!! ??? junk\n";
        let pass = pass_one(source).unwrap();
        assert_eq!(pass.mailboxes, 1);
    }

    #[test]
    fn label_starting_with_digit_is_fatal() {
        let err = pass_one("9LIVES DAT 9\n").unwrap_err();
        assert_eq!(
            err,
            AsmError::Syntax {
                line: 1,
                message: "Label begins with digit"
            }
        );
    }

    #[test]
    fn lone_slash_is_fatal() {
        let err = pass_one("/ not a comment\n").unwrap_err();
        assert_eq!(
            err,
            AsmError::Syntax {
                line: 1,
                message: "Unexpected '/'"
            }
        );
    }

    #[test]
    fn program_too_long() {
        let mut source = String::new();
        for _ in 0..NUM_MAILBOXES + 1 {
            source.push_str("\tHLT\n");
        }

        let err = pass_one(&source).unwrap_err();
        assert_eq!(
            err,
            AsmError::ProgramTooLong {
                mailboxes: NUM_MAILBOXES + 1
            }
        );
    }

    #[test]
    fn program_filling_every_mailbox_is_legal() {
        let mut source = String::new();
        for _ in 0..NUM_MAILBOXES {
            source.push_str("\tHLT\n");
        }

        let pass = pass_one(&source).unwrap();
        assert_eq!(pass.mailboxes, NUM_MAILBOXES);
    }

    #[test]
    fn duplicate_labels_keep_first_address() {
        let source = "X DAT 1\nX DAT 2\n";
        let pass = pass_one(source).unwrap();

        assert_eq!(pass.labels.resolve("X"), Some(0));
    }
}
