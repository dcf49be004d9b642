use anyhow::Result;
use svcs_core::Repository;

pub fn run(repo: &Repository, message: Option<String>) -> Result<()> {
    let result = super::required(message, "message").and_then(|message| repo.commit(&message));

    super::report(result, |_| println!("Changes are committed."))
}
