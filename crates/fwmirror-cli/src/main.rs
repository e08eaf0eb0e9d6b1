use fwmirror_lib::cli::{parse_args, resolve_command, run_mirror};
use fwmirror_lib::error::FwMirrorError;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), FwMirrorError> {
    color_eyre::install()?;

    let args = parse_args();
    let params = resolve_command(args.command)?;

    let summary = run_mirror(params).await?;
    if !summary.is_complete() {
        tracing::warn!(
            "{} of {} images are not verified; run again to retry them",
            summary.total() - summary.already_satisfied() - summary.verified(),
            summary.total()
        );
    }

    Ok(())
}
