use super::EXIT_SUCCESS;
use flotilla_core::{CancelToken, Deployer, Options};

pub fn run(
    deployer: &dyn Deployer,
    token: &CancelToken,
    files: &[String],
    options: &Options,
) -> Result<u8, String> {
    deployer
        .remove(token, files, options)
        .map_err(|e| e.to_string())?;
    println!("stack removed");
    Ok(EXIT_SUCCESS)
}
