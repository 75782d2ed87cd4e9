use crate::core::context::GateContext;
use crate::core::error::GateResult;

/// Run the validate command
pub fn run_validate(ctx: &GateContext) -> GateResult<()> {
  let vcs = ctx.open_vcs()?;
  println!("🔍 Checking {} repository at {}", vcs.name(), vcs.path().display());
  vcs.validate_repostate()?;
  println!("✅ Repository is ready to release");
  Ok(())
}
