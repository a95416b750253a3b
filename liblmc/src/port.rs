use std::{
    cell::RefCell,
    io::{self, BufRead, Write},
    rc::Rc,
};

use crate::digits::MAX_VALUE;

/// The machine's single I/O port. INP reads one value, OUT writes one.
pub trait Port {
    fn input(&mut self) -> u32;
    fn output(&mut self, value: u32);
}

/// Interactive port on stdin/stdout. Input re-prompts until a number
/// parses; there is no timeout and no range check on the parsed value.
pub struct ConsolePort;

impl Port for ConsolePort {
    fn input(&mut self) -> u32 {
        let stdin = io::stdin();
        loop {
            print!("Input number (0-{}): ", MAX_VALUE);
            let _ = io::stdout().flush();
            let mut line = String::new();
            if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
                continue;
            }
            if let Ok(value) = line.trim().parse::<u32>() {
                return value;
            }
        }
    }

    fn output(&mut self, value: u32) {
        println!("{}", value);
    }
}

/// Scripted port for tests: consumes preset inputs, collects outputs into
/// a shared buffer.
pub struct MemoryPort {
    inputs: Vec<u32>,
    outputs: Rc<RefCell<Vec<u32>>>,
}

impl MemoryPort {
    pub fn new(inputs: Vec<u32>) -> (Rc<RefCell<Vec<u32>>>, Self) {
        let outputs = Rc::new(RefCell::new(Vec::new()));
        let port = Self {
            inputs,
            outputs: Rc::clone(&outputs),
        };
        (outputs, port)
    }
}

impl Port for MemoryPort {
    fn input(&mut self) -> u32 {
        if self.inputs.is_empty() {
            0
        } else {
            self.inputs.remove(0)
        }
    }

    fn output(&mut self, value: u32) {
        self.outputs.borrow_mut().push(value);
    }
}
