//! Retrieves information about the version of the crate from Git and the build
//! environment. It is accessible at runtime through [`shadow_rs`] constants and
//! printed by the command-line front end in verbose mode.

fn main() -> shadow_rs::SdResult<()> {
    let _shadow = shadow_rs::ShadowBuilder::builder().build()?;
    Ok(())
}
