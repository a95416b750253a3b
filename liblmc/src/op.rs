use num_derive::FromPrimitive;

use crate::digits::split_instruction;

/// Address-field value selecting the input sub-operation of [`Opcode::Io`].
pub const INPUT: usize = 1;
/// Address-field value selecting the output sub-operation of [`Opcode::Io`].
pub const OUTPUT: usize = 2;

/// The opcode digit of an instruction. There is no opcode 4 in the ISA, so
/// decoding a 4xx mailbox fails.
#[derive(FromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Halt = 0,
    Add = 1,
    Sub = 2,
    Store = 3,
    Load = 5,
    Branch = 6,
    BranchZero = 7,
    BranchPositive = 8,
    Io = 9,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Op {
    pub opcode: Opcode,
    pub addr: usize,
}

impl Op {
    pub fn from_mailbox(value: u32) -> Option<Self> {
        let (opcode, addr) = split_instruction(value);
        num::FromPrimitive::from_u32(opcode).map(|opcode| Self { opcode, addr })
    }
}

impl From<Op> for u32 {
    fn from(op: Op) -> u32 {
        op.opcode as u32 * crate::digits::NUM_MAILBOXES as u32 + op.addr as u32
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode() {
        let op = Op::from_mailbox(505).unwrap();
        assert_eq!(op.opcode, Opcode::Load);
        assert_eq!(op.addr, 5);

        let op = Op::from_mailbox(901).unwrap();
        assert_eq!(op.opcode, Opcode::Io);
        assert_eq!(op.addr, INPUT);

        let op = Op::from_mailbox(0).unwrap();
        assert_eq!(op.opcode, Opcode::Halt);
        assert_eq!(op.addr, 0);
    }

    #[test]
    fn no_opcode_four() {
        assert!(Op::from_mailbox(400).is_none());
        assert!(Op::from_mailbox(499).is_none());
    }

    #[test]
    fn roundtrip() {
        let op = Op {
            opcode: Opcode::Branch,
            addr: 42,
        };
        let value: u32 = op.into();
        assert_eq!(value, 642);
        assert_eq!(Op::from_mailbox(value), Some(op));
    }
}
