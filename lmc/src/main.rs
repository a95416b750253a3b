use anyhow::{Context, Result};
use liblmc::{load::read_image, port::ConsolePort, Lmc};
use std::{env, fs::File, process::ExitCode};

fn main() -> Result<ExitCode> {
    let path: String = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::Error::msg("Usage: lmc <input>"))?;

    let file = File::open(&path).with_context(|| format!("Error opening {}", path))?;
    let image = read_image(file).with_context(|| format!("Error loading {}", path))?;

    println!("{} loaded. {} mailboxes.", path, image.len());

    let mut lmc = Lmc::with_image(&image, Box::new(ConsolePort));
    match lmc.run() {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(fault) => {
            eprintln!("{}", fault);
            eprintln!("{}", lmc.cpu);
            Ok(ExitCode::FAILURE)
        }
    }
}
