//! Helpers shared by the binaries.

use lumina_interface::PreflightReport;
use lumina_video::CancellationToken;

/// Print a pre-flight checklist. Returns whether every check passed.
pub fn report_preflight(title: &str, report: &PreflightReport) -> bool {
    println!("{}", title);
    println!("{}\n", report);
    if !report.valid() {
        for check in report.failures() {
            tracing::error!(check = %check.name(), "{}", check.message());
        }
    }
    report.valid()
}

/// Token cancelled on the first Ctrl-C.
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted; stopping after the current poll");
            child.cancel();
        }
    });
    token
}
