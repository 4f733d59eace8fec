//! Administrative command handlers

use anyhow::{Context, Result};

use telly_core::{HttpApi, Synchronizer};

use crate::output::Output;
use crate::prompt::confirm;

/// Remove all tracked data for the current user
pub async fn clear(sync: &mut Synchronizer<HttpApi>, yes: bool, output: &Output) -> Result<()> {
    if !yes && output.should_prompt() {
        println!("This removes every tracked show and episode from the backend.");
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    sync.clear_all().await.context("Failed to clear data")?;

    output.success("All tracked data removed");
    Ok(())
}
