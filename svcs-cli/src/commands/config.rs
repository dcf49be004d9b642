use anyhow::Result;
use svcs_core::Repository;

pub fn run(repo: &Repository, name: Vec<String>) -> Result<()> {
    if name.is_empty() {
        match repo.identity()? {
            Some(name) => println!("The username is {}.", name),
            None => println!("Please, tell me who you are."),
        }
        return Ok(());
    }

    super::report(repo.set_identity(&name), |name| {
        println!("The username is {}.", name)
    })
}
