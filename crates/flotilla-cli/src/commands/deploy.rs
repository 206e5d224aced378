use super::EXIT_SUCCESS;
use flotilla_core::{CancelToken, DeployOptions, Deployer};

pub fn run(
    deployer: &dyn Deployer,
    token: &CancelToken,
    files: &[String],
    options: &DeployOptions,
) -> Result<u8, String> {
    deployer
        .deploy(token, files, options)
        .map_err(|e| e.to_string())?;
    println!("stack deployed");
    Ok(EXIT_SUCCESS)
}
