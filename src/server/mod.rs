pub mod api;

use crate::agent::ChatAgent;
use crate::cli::Args;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use log::{ info, error };

pub struct Server {
    addr: String,
    agent: Arc<ChatAgent>,
    args: Args,
}

impl Server {
    pub fn new(addr: String, agent: Arc<ChatAgent>, args: Args) -> Self {
        Self { addr, agent, args }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.addr.parse::<SocketAddr>()?;
        let app = api::router(Arc::clone(&self.agent), self.args.static_dir.as_deref());

        if self.args.enable_tls {
            let (cert_path, key_path) = match
                (&self.args.tls_cert_path, &self.args.tls_key_path)
            {
                (Some(cert_path), Some(key_path)) => (cert_path, key_path),
                (Some(_), None) | (None, Some(_)) => {
                    error!(
                        "Both --tls-cert-path and --tls-key-path must be provided to enable TLS."
                    );
                    return Err("Missing TLS certificate or key path".into());
                }
                (None, None) => {
                    error!("--enable-tls was set but no certificate/key paths provided.");
                    return Err("TLS enabled without cert/key".into());
                }
            };
            info!(
                "TLS enabled. Loading certificate from '{}' and key from '{}'",
                cert_path,
                key_path
            );
            let tls_config = axum_server::tls_rustls::RustlsConfig
                ::from_pem_file(cert_path, key_path).await
                .map_err(|e| format!("Failed to load TLS certificate/key: {}", e))?;

            info!("HTTPS server listening on: https://{}", addr);
            axum_server::bind_rustls(addr, tls_config).serve(app.into_make_service()).await?;
        } else {
            let listener = tokio::net::TcpListener
                ::bind(addr).await
                .map_err(|e| format!("Failed to bind HTTP server to {}: {}", addr, e))?;
            info!("HTTP server listening on: http://{}", addr);
            axum::serve(listener, app.into_make_service()).await?;
        }

        Ok(())
    }
}
