use anyhow::Result;
use svcs_core::Repository;

pub fn run(repo: &Repository, commit_id: Option<String>) -> Result<()> {
    let result = super::required(commit_id, "commit id")
        .and_then(|commit_id| repo.checkout(&commit_id).map(|_| commit_id));

    super::report(result, |commit_id| {
        println!("Switched to commit {}.", commit_id)
    })
}
