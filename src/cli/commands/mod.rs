pub mod generate;
pub mod review;
pub mod evaluate;
pub mod batch;
pub mod health;

use anyhow::Result;
use serde::Serialize;

/// Print `value` as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
