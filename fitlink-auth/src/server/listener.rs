use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::AuthError;

/// Local HTTP server receiving the provider redirect.
///
/// Runs as a spawned task from `start` until `shutdown` or drop.
pub struct CallbackListener {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl CallbackListener {
    pub async fn start(addr: &str, app: Router) -> Result<Self, AuthError> {
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            AuthError::Listener(format!("Failed to bind callback listener on {}: {}", addr, e))
        })?;

        let local_addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
            {
                tracing::error!("Callback listener error: {}", e);
            }
        });

        tracing::info!("Callback listener running on {}", local_addr);

        Ok(Self {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn shutdown(mut self) -> Result<(), AuthError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    return Err(AuthError::Listener(format!(
                        "Callback listener panicked: {}",
                        e
                    )));
                }
            }
        }

        tracing::info!("Callback listener on {} stopped", self.local_addr);
        Ok(())
    }
}

impl Drop for CallbackListener {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                handle.abort();
            }
        }
    }
}
