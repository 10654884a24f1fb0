//! Runtime abstraction layer for async operations
//!
//! The map core never blocks on its collaborators. Work such as a geolocation
//! lookup is handed to whatever runtime the host runs; with the
//! `tokio-runtime` feature that is the ambient tokio runtime.

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task
    fn cancel(&self);
}

/// Spawns `future` on the ambient tokio runtime.
///
/// Panics when called outside a tokio runtime, like `tokio::spawn`.
#[cfg(feature = "tokio-runtime")]
pub fn spawn<F>(future: F) -> Box<dyn AsyncHandle>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    Box::new(tokio_impl::TokioHandle(::tokio::spawn(future)))
}

#[cfg(feature = "tokio-runtime")]
mod tokio_impl {
    use super::AsyncHandle;
    use ::tokio::task::JoinHandle;

    pub(super) struct TokioHandle(pub(super) JoinHandle<()>);

    impl AsyncHandle for TokioHandle {
        fn is_finished(&self) -> bool {
            self.0.is_finished()
        }

        fn cancel(&self) {
            self.0.abort();
        }
    }
}

#[cfg(all(test, feature = "tokio-runtime"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawned_task_finishes() {
        let (tx, rx) = ::tokio::sync::oneshot::channel();
        let handle = spawn(async move {
            let _ = tx.send(42);
        });
        assert_eq!(rx.await.unwrap(), 42);
        ::tokio::task::yield_now().await;
        handle.cancel();
    }
}
