use crate::labels::LabelTable;
use crate::opcodes::{Arity, Mnemonic, MNEMONIC_LEN};
use crate::scanner::{is_label_char, Scanner};
use crate::AsmError;

/// Second pass: scan the source again from the start, resolve operands
/// against the completed label table, and emit the digit image.
pub fn pass_two(source: &str, labels: &LabelTable) -> Result<Vec<u8>, AsmError> {
    let mut scanner = Scanner::new(source);
    let mut image = Vec::new();

    while let Some(c) = scanner.peek() {
        if c == b'\n' {
            scanner.bump();
            continue;
        }

        if c == b'/' {
            scanner.finish_line(false)?;
            continue;
        }

        let mut mnemonic = None;
        if is_label_char(c) {
            // Leading token: either an unindented opcode or a label that
            // pass one already recorded.
            let token = scanner.read_label()?;
            mnemonic = Mnemonic::lookup(&token);
        }

        let mnemonic = match mnemonic {
            Some(mnemonic) => mnemonic,
            None => {
                scanner.skip_blanks();
                match scanner.peek() {
                    None => break,
                    Some(b'\n') => {
                        scanner.bump();
                        continue;
                    }
                    Some(b'/') => {
                        scanner.finish_line(false)?;
                        continue;
                    }
                    Some(_) => read_mnemonic(&mut scanner)?,
                }
            }
        };

        scanner.skip_blanks();

        let value = match mnemonic.arity() {
            Arity::None => {
                scanner.finish_line(false)?;
                0
            }
            Arity::Optional => match scanner.peek() {
                None => 0,
                Some(c) if is_label_char(c) => parse_operand(&mut scanner, labels)?,
                _ => {
                    scanner.finish_line(false)?;
                    0
                }
            },
            Arity::Required => parse_operand(&mut scanner, labels)?,
        };

        mnemonic.encode(value, &mut image)?;
    }

    Ok(image)
}

/// Read exactly `MNEMONIC_LEN` characters and look them up in the catalog.
/// The character after the mnemonic must be whitespace or end-of-stream.
fn read_mnemonic(scanner: &mut Scanner) -> Result<Mnemonic, AsmError> {
    let line = scanner.line();

    let mut name = String::new();
    for _ in 0..MNEMONIC_LEN {
        match scanner.bump() {
            Some(c) => name.push(c as char),
            None => return Err(AsmError::UnexpectedEof),
        }
    }

    if matches!(scanner.peek(), Some(c) if !c.is_ascii_whitespace()) {
        return Err(AsmError::OpcodeTooLong { line });
    }

    Mnemonic::lookup(&name).ok_or(AsmError::UnknownOpcode {
        line,
        mnemonic: name,
    })
}

/// Parse an address/value operand: a decimal literal or a label reference.
fn parse_operand(scanner: &mut Scanner, labels: &LabelTable) -> Result<u64, AsmError> {
    let line = scanner.line();

    match scanner.peek() {
        Some(c) if c.is_ascii_digit() => {
            let mut value: u64 = 0;
            while let Some(c) = scanner.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                value = value.saturating_mul(10).saturating_add(u64::from(c - b'0'));
                scanner.bump();
            }

            if matches!(scanner.peek(), Some(c) if is_label_char(c)) {
                return Err(AsmError::Syntax {
                    line,
                    message: "Label begins with digit",
                });
            }

            scanner.finish_line(false)?;
            Ok(value)
        }
        Some(c) if is_label_char(c) => {
            let label = scanner.read_label()?;
            let addr = labels
                .resolve(&label)
                .ok_or(AsmError::UndefinedLabel { line, label })?;
            scanner.finish_line(false)?;
            Ok(addr as u64)
        }
        _ => Err(AsmError::Syntax {
            line,
            message: "Invalid or missing address field",
        }),
    }
}
