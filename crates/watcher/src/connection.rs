use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::OnceCell;

type ConnectFn<P> = Box<dyn Fn() -> BoxFuture<'static, anyhow::Result<P>> + Send + Sync>;

/// A chain node handle which is established on first use and kept for the
/// lifetime of its owner.
///
/// Concurrent first uses share a single connection attempt. A failed attempt
/// leaves the connection unestablished so the next use tries again.
pub struct Connection<P> {
    handle: OnceCell<P>,
    connect: ConnectFn<P>,
}

impl<P: Send + Sync + 'static> Connection<P> {
    pub fn lazy<F, Fut>(connect: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<P>> + Send + 'static,
    {
        Self {
            handle: OnceCell::new(),
            connect: Box::new(move || connect().boxed()),
        }
    }

    /// A connection which is already established with `handle`.
    pub fn established(handle: P) -> Self {
        Self {
            handle: OnceCell::from(handle),
            connect: Box::new(already_established),
        }
    }

    pub async fn get(&self) -> anyhow::Result<&P> {
        self.handle.get_or_try_init(|| (self.connect)()).await
    }

    pub fn is_established(&self) -> bool {
        self.handle.initialized()
    }
}

fn already_established<P: Send + 'static>() -> BoxFuture<'static, anyhow::Result<P>> {
    async { Err(anyhow::anyhow!("Connection is already established")) }.boxed()
}

impl<P> std::fmt::Debug for Connection<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("established", &self.handle.initialized())
            .finish()
    }
}
