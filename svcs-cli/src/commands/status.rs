use anyhow::Result;
use colored::Colorize;
use svcs_core::{FileState, Repository};

pub fn run(repo: &Repository) -> Result<()> {
    let entries = repo.status()?;

    if entries.is_empty() {
        println!("Add a file to the index.");
        return Ok(());
    }

    match repo.history()?.first() {
        Some(latest) => println!("{} {}", "On commit".bold(), latest.hash.yellow()),
        None => println!("{}", "No commits yet".bold()),
    }
    println!();

    for entry in &entries {
        let label = match entry.state {
            FileState::Unchanged => entry.state.as_str().normal(),
            FileState::Modified => entry.state.as_str().yellow(),
            FileState::New => entry.state.as_str().green(),
            FileState::Missing => entry.state.as_str().red(),
        };
        println!("  {:<10} {}", label, entry.path);
    }

    if entries
        .iter()
        .all(|entry| entry.state == FileState::Unchanged)
    {
        println!();
        println!("Nothing to commit.");
    }

    Ok(())
}
