use std::fmt;

use thiserror::Error;

use crate::digits::{split_instruction, MAX_VALUE, NUM_MAILBOXES};
use crate::op::{Op, Opcode, INPUT, OUTPUT};
use crate::port::Port;

/// The whole register file plus the decode scratch fields, kept together
/// so a fault can dump everything the machine knew at the time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cpu {
    pub a: u32,
    pub pc: usize,
    pub instruction: u32,
    pub opcode: u32,
    pub addr: usize,
    pub neg: bool,
    pub halted: bool,
    pub error: bool,
}

impl fmt::Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "a  = {}", self.a)?;
        writeln!(f, "pc = {}", self.pc)?;
        writeln!(f, "opcode = {}", self.opcode)?;
        writeln!(f, "addr   = {}", self.addr)?;
        writeln!(f, "neg    = {}", u8::from(self.neg))?;
        write!(f, "halt   = {}", u8::from(self.halted))
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("Bad instruction! ({0})")]
    BadInstruction(u32),
    #[error("Program counter out of range! ({0})")]
    PcOutOfRange(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Halted,
    Faulted(Fault),
    CycleLimit,
}

pub struct Lmc {
    pub mailboxes: [u32; NUM_MAILBOXES],
    pub cpu: Cpu,
    port: Box<dyn Port>,
}

impl fmt::Debug for Lmc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lmc").field("cpu", &self.cpu).finish()
    }
}

impl Lmc {
    pub fn empty(port: Box<dyn Port>) -> Self {
        Self {
            mailboxes: [0; NUM_MAILBOXES],
            cpu: Cpu::default(),
            port,
        }
    }

    /// Copy a loaded image into the low mailboxes; the rest stay zero,
    /// which decodes as HLT.
    pub fn with_image(image: &[u32], port: Box<dyn Port>) -> Self {
        let mut lmc = Self::empty(port);
        lmc.mailboxes[..image.len()].copy_from_slice(image);
        lmc
    }

    fn fault(&mut self, fault: Fault) -> Fault {
        self.cpu.halted = true;
        self.cpu.error = true;
        fault
    }

    /// One fetch/decode/execute cycle. A fault halts the machine and sets
    /// the error flag before returning.
    pub fn step(&mut self) -> Result<(), Fault> {
        if self.cpu.pc >= NUM_MAILBOXES {
            let pc = self.cpu.pc;
            return Err(self.fault(Fault::PcOutOfRange(pc)));
        }

        let instruction = self.mailboxes[self.cpu.pc];
        self.cpu.instruction = instruction;
        self.cpu.pc += 1;

        let (opcode, addr) = split_instruction(instruction);
        self.cpu.opcode = opcode;
        self.cpu.addr = addr;

        let Some(op) = Op::from_mailbox(instruction) else {
            return Err(self.fault(Fault::BadInstruction(instruction)));
        };

        match op.opcode {
            Opcode::Halt => {
                self.cpu.halted = true;
            }
            Opcode::Add => {
                self.cpu.a += self.mailboxes[op.addr];
                self.cpu.neg = self.cpu.a > MAX_VALUE;
                if self.cpu.neg {
                    self.cpu.a -= MAX_VALUE + 1;
                }
            }
            Opcode::Sub => {
                // The negative flag models wraparound, not a signed value.
                let value = self.mailboxes[op.addr];
                self.cpu.neg = self.cpu.a < value;
                if self.cpu.neg {
                    self.cpu.a += MAX_VALUE + 1;
                }
                self.cpu.a -= value;
            }
            Opcode::Store => {
                // No protection: storing over upcoming instructions is legal.
                self.mailboxes[op.addr] = self.cpu.a;
            }
            Opcode::Load => {
                self.cpu.a = self.mailboxes[op.addr];
            }
            Opcode::Branch => {
                self.cpu.pc = op.addr;
            }
            Opcode::BranchZero => {
                if self.cpu.a == 0 {
                    self.cpu.pc = op.addr;
                }
            }
            Opcode::BranchPositive => {
                // Consults the flag, not the sign of the accumulator.
                if !self.cpu.neg {
                    self.cpu.pc = op.addr;
                }
            }
            Opcode::Io => match op.addr {
                INPUT => {
                    self.cpu.a = self.port.input();
                }
                OUTPUT => {
                    self.port.output(self.cpu.a);
                }
                _ => {
                    return Err(self.fault(Fault::BadInstruction(instruction)));
                }
            },
        }

        Ok(())
    }

    /// Run until the machine halts on its own.
    pub fn run(&mut self) -> Result<(), Fault> {
        while !self.cpu.halted {
            self.step()?;
        }
        Ok(())
    }

    /// Run with a cycle budget, for programs that might not terminate.
    pub fn run_until(&mut self, max_cycles: u64) -> StopReason {
        let mut cycles = 0;
        while !self.cpu.halted {
            if cycles >= max_cycles {
                return StopReason::CycleLimit;
            }
            if let Err(fault) = self.step() {
                return StopReason::Faulted(fault);
            }
            cycles += 1;
        }
        StopReason::Halted
    }
}
