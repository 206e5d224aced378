use super::EXIT_SUCCESS;
use flotilla_core::{CancelToken, Deployer};

pub fn run(
    deployer: &dyn Deployer,
    token: &CancelToken,
    project: &str,
    json: bool,
) -> Result<u8, String> {
    let report = deployer
        .status(token, project)
        .map_err(|e| e.to_string())?;

    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{rendered}");
    } else {
        println!("{project}: {}", report.status);
        if !report.message.is_empty() {
            println!("{}", report.message);
        }
    }
    Ok(EXIT_SUCCESS)
}
