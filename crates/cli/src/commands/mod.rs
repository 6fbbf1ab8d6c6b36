pub(crate) mod check;
pub(crate) mod playlist;
pub(crate) mod reconcile;
pub(crate) mod seed;
pub(crate) mod user;

use anyhow::Result;
use serde::Serialize;

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
