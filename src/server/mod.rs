pub mod error;
pub mod handlers;
pub mod routes;

#[cfg(test)]
mod tests;

use crate::config::ItemPolicy;
use crate::themes::{ThemeRepository, ThemeStore};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use warp::filters::BoxedFilter;
use warp::reply::Response;

/// State shared by every request handler.
pub struct ApiContext {
    pub repository: ThemeRepository<dyn ThemeStore>,
    pub item_policy: ItemPolicy,
}

impl ApiContext {
    pub fn new(store: Arc<dyn ThemeStore>, item_policy: ItemPolicy) -> Self {
        Self {
            repository: ThemeRepository::new(store),
            item_policy,
        }
    }
}

/// HTTP front end for the theme repository.
/// Serves the REST API at `http://{addr}/api/...`.
pub struct ThemeServer {
    pub port: u16,
    context: Arc<ApiContext>,
    cors: bool,
}

impl ThemeServer {
    pub fn new(context: ApiContext, cors: bool) -> Self {
        Self {
            port: 0, // assigned after bind
            context: Arc::new(context),
            cors,
        }
    }

    pub fn filter(&self) -> BoxedFilter<(Response,)> {
        routes::routes(self.context.clone(), self.cors)
    }

    /// Bind a random loopback port and serve in the background. Stores the actual port.
    pub async fn start(&mut self) -> Result<SocketAddr, warp::Error> {
        let (addr, fut) = warp::serve(self.filter()).try_bind_ephemeral(([127, 0, 0, 1], 0))?;
        self.port = addr.port();
        info!(%addr, "[HTTP] Theme server started");
        tokio::spawn(fut);
        Ok(addr)
    }

    /// Serve on `addr` until `shutdown` resolves.
    pub async fn serve<F>(&mut self, addr: SocketAddr, shutdown: F) -> Result<(), warp::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (addr, fut) =
            warp::serve(self.filter()).try_bind_with_graceful_shutdown(addr, shutdown)?;
        self.port = addr.port();
        info!(%addr, cors = self.cors, "[HTTP] Listening");
        fut.await;
        info!("[HTTP] Shut down");
        Ok(())
    }
}
