//! Process signal handling for graceful shutdown

use tokio::signal::unix::{signal, SignalKind};

/// Resolves once SIGTERM or SIGINT arrives.
///
/// If a handler cannot be installed the error is logged and that signal is
/// ignored; the other one still triggers shutdown.
pub async fn shutdown_signal() {
    let sigterm = signal(SignalKind::terminate());
    let sigint = signal(SignalKind::interrupt());

    let terminate = async {
        match sigterm {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    let interrupt = async {
        match sigint {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGINT handler");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        () = terminate => {
            tracing::info!("Received SIGTERM - shutting down");
        }
        () = interrupt => {
            tracing::info!("Received SIGINT - shutting down");
        }
    }
}
