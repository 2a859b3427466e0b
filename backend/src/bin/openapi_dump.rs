//! Write the OpenAPI document to stdout as YAML.

use std::io::Write;

use hostel::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let yaml = ApiDoc::openapi().to_yaml()?;
    std::io::stdout().write_all(yaml.as_bytes())?;
    Ok(())
}
