use anyhow::{Context, Result};
use liblmc::digits::{MAX_VALUE, NUM_DIGITS};
use lmasm::assemble_program;
use std::{env, fs};

fn main() -> Result<()> {
    let input: String = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::Error::msg("Usage: lmasm <input> <output>"))?;
    let output: String = env::args()
        .nth(2)
        .ok_or_else(|| anyhow::Error::msg("Usage: lmasm <input> <output>"))?;

    println!(
        "Assembling for a {}-digit system. Max value: {}",
        NUM_DIGITS, MAX_VALUE
    );

    let source =
        fs::read_to_string(&input).with_context(|| format!("Error opening {}", input))?;

    let image = assemble_program(&source)?;

    println!(
        "{} mailboxes, {} bytes on disk",
        image.len() / NUM_DIGITS,
        image.len()
    );

    fs::write(&output, &image).with_context(|| format!("Error writing to {}", output))?;

    Ok(())
}
