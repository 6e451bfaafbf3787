use std::path::Path;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

/// Router serving the files of the output directory
pub fn router(output: &Path) -> Router {
    Router::new().fallback_service(ServeDir::new(output))
}

/// Serve the output directory on `listener` until `shutdown` resolves
pub async fn serve_on<F>(listener: TcpListener, output: &Path, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(output))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Serve the generated report until Ctrl+C
pub async fn serve(output: &Path, port: u16) -> anyhow::Result<()> {
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, output = %output.display(), "report server listening");

    println!("Report available at http://localhost:{port}/index.html");
    println!("Press Ctrl+C to stop");

    serve_on(listener, output, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    async fn get(addr: std::net::SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn serves_files_from_output_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>report</h1>").unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();
        let output = dir.path().to_path_buf();
        let server = tokio::spawn(async move {
            serve_on(listener, &output, async {
                let _ = stopped.await;
            })
            .await
        });

        let found = get(addr, "/index.html").await;
        assert!(found.starts_with("HTTP/1.1 200"));
        assert!(found.contains("<h1>report</h1>"));

        let missing = get(addr, "/nope.svg").await;
        assert!(missing.starts_with("HTTP/1.1 404"));

        let _ = stop.send(());
        server.await.unwrap().unwrap();
    }
}
