//! Termination signal handling.

use std::future::Future;

use tracing::info;

/// Register for termination signals and return a future that resolves once
/// the process is asked to stop.
///
/// Handlers are installed when this is called, not when the future is first
/// polled, so a signal that arrives during startup is held until the future
/// is awaited. Must be called from within a Tokio runtime.
///
/// Listens for SIGINT and SIGTERM on Unix (so `docker stop` is graceful as
/// well as Ctrl+C).
#[cfg(unix)]
pub fn shutdown_signal() -> impl Future<Output = ()> + Send + 'static {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt()).expect("failed to register SIGINT");
    let mut sigterm = signal(SignalKind::terminate()).expect("failed to register SIGTERM");

    async move {
        tokio::select! {
            _ = sigint.recv() => info!(signal = "SIGINT", "received interrupt"),
            _ = sigterm.recv() => info!(signal = "SIGTERM", "received terminate"),
        }
    }
}

/// Register for Ctrl+C and return a future that resolves once it is pressed.
#[cfg(windows)]
pub fn shutdown_signal() -> impl Future<Output = ()> + Send + 'static {
    let mut ctrl_c = tokio::signal::windows::ctrl_c().expect("failed to register Ctrl+C");

    async move {
        ctrl_c.recv().await;
        info!("received interrupt");
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::process::Command;
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn signal_sent_before_first_poll_is_not_lost() {
        let shutdown = shutdown_signal();

        let status = Command::new("sh")
            .args(["-c", "kill -TERM \"$PPID\""])
            .status()
            .unwrap();
        assert!(status.success());

        tokio::time::timeout(Duration::from_secs(5), shutdown)
            .await
            .expect("pending SIGTERM should resolve the shutdown future");
    }
}
