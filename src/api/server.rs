use axum::Router;
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;

/// Serves `app` until `shutdown` resolves, then drains in-flight requests
///
/// Draining is bounded by `deadline`. Requests still running when it passes
/// are abandoned and the call returns `Ok(())`.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    deadline: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            let _ = signalled_tx.send(());
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result,
        _ = signalled_rx => match tokio::time::timeout(deadline, &mut server).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Shutdown deadline of {:?} passed, closing anyway", deadline);
                Ok(())
            }
        },
    }
}
