//! Decimal widths and digit codec for the machine.
//!
//! Every value the machine touches is a fixed-width decimal number. The
//! width is set at compile time; everything else is derived from it. With
//! the default 3 digits a mailbox holds 0-999, the leading digit is the
//! opcode, and the remaining two digits address one of 100 mailboxes.

/// Digits per mailbox. Changing this rescales the whole machine.
pub const NUM_DIGITS: usize = 3;

/// Number of addressable mailboxes, `10^(NUM_DIGITS - 1)`.
pub const NUM_MAILBOXES: usize = pow10(NUM_DIGITS - 1);

/// Highest valid mailbox address.
pub const MAX_ADDR: u32 = NUM_MAILBOXES as u32 - 1;

/// Highest value a mailbox (or the accumulator) can hold.
pub const MAX_VALUE: u32 = pow10(NUM_DIGITS) as u32 - 1;

const fn pow10(n: usize) -> usize {
    let mut value = 1;
    let mut i = 0;
    while i < n {
        value *= 10;
        i += 1;
    }
    value
}

/// Encode a value as big-endian decimal digits, one per byte.
pub fn encode_decimal(mut value: u32) -> [u8; NUM_DIGITS] {
    let mut buf = [0u8; NUM_DIGITS];
    for digit in buf.iter_mut().rev() {
        *digit = (value % 10) as u8;
        value /= 10;
    }
    buf
}

/// Split a mailbox value into its opcode digit and address field.
pub fn split_instruction(instruction: u32) -> (u32, usize) {
    let base = NUM_MAILBOXES as u32;
    (instruction / base, (instruction % base) as usize)
}
