use anyhow::Result;
use svcs_core::Repository;

pub fn run(repo: &Repository, path: Option<String>) -> Result<()> {
    let Some(path) = path else {
        let tracked = repo.tracked_files()?;
        if tracked.is_empty() {
            println!("Add a file to the index.");
        } else {
            println!("Tracked files:");
            for path in tracked {
                println!("{}", path);
            }
        }
        return Ok(());
    };

    super::report(repo.add(&path), |_| {
        println!("The file '{}' is tracked.", path)
    })
}
