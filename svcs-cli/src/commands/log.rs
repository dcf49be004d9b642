use anyhow::Result;
use svcs_core::Repository;

pub fn run(repo: &Repository, limit: Option<usize>, json: bool) -> Result<()> {
    if json {
        let mut history = repo.history()?;
        if let Some(limit) = limit {
            history.truncate(limit);
        }
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    let text = match limit {
        Some(limit) => repo
            .history()?
            .iter()
            .take(limit)
            .map(|record| record.render())
            .collect::<String>(),
        None => repo.log_text()?,
    };

    if text.trim().is_empty() {
        println!("No commits yet.");
    } else {
        println!("{}", text.trim_end_matches('\n'));
    }

    Ok(())
}
