use crate::core::context::GateContext;
use crate::core::error::GateResult;
use crate::core::vcs::TagOutcome;

/// Run the tag command
pub fn run_tag(ctx: &GateContext, name: &str, message: Option<&str>) -> GateResult<()> {
  match ctx.open_vcs()?.create_release_tag(name, message)? {
    TagOutcome::AlreadyExists => {}
    TagOutcome::Created => println!("✅ Created tag {} (no upstream, not pushed)", name),
    TagOutcome::Pushed { remote } => println!("✅ Created tag {} and pushed it to {}", name, remote),
  }
  Ok(())
}

/// Run the commit command
pub fn run_commit(ctx: &GateContext, add_all: bool, message: Option<&str>) -> GateResult<()> {
  ctx.open_git()?.commit(add_all, message)?;
  println!("✅ Committed");
  Ok(())
}
