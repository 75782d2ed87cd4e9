use crate::core::context::GateContext;
use crate::core::error::GateResult;
use crate::core::vcs::RevisionRecord;

/// Run the revision command
pub fn run_revision(ctx: &GateContext, json: bool) -> GateResult<()> {
  let record = ctx.open_vcs()?.get_current_revision()?;

  if json {
    println!("{}", serde_json::to_string_pretty(&record)?);
  } else {
    print_revision(&record);
  }

  Ok(())
}

pub(crate) fn print_revision(record: &RevisionRecord) {
  let fields = [
    ("commit", &record.commit),
    ("branch", &record.branch),
    ("tracking", &record.tracking_branch),
    ("fetch url", &record.fetch_url),
    ("push url", &record.push_url),
  ];

  println!("📌 Revision");
  for (label, value) in fields {
    if let Some(value) = value {
      println!("   {:<10} {}", format!("{}:", label), value);
    }
  }
}
