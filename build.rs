use anyhow::Result;
use vergen::EmitBuilder;

// Git SHA and commit date are logged by the CLI at startup
fn main() -> Result<()> {
    EmitBuilder::builder().git_sha(true).git_commit_date().emit()?;
    Ok(())
}
