use futures::future::{self, FutureExt, LocalBoxFuture};
use std::{cell::RefCell, fmt, future::Future, rc::Rc};
use thiserror::Error;
use tracing::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("View '{view}' failed to load: {reason}")]
pub struct LoadError {
    view: String,
    reason: String,
}

impl LoadError {
    pub fn new(view: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            reason: reason.into(),
        }
    }

    pub fn view(&self) -> &str {
        &self.view
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

type Factory<V> = dyn Fn() -> LocalBoxFuture<'static, Result<V, LoadError>>;

/// A view that is produced on first activation and kept afterwards.
///
/// Failed loads are not remembered, the next `load` runs the factory again.
pub struct Deferred<V> {
    factory: Rc<Factory<V>>,
    loaded: Rc<RefCell<Option<V>>>,
}

impl<V> Clone for Deferred<V> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
            loaded: Rc::clone(&self.loaded),
        }
    }
}

impl<V: Clone + 'static> Deferred<V> {
    pub fn new<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<V, LoadError>> + 'static,
    {
        Self {
            factory: Rc::new(move || factory().boxed_local()),
            loaded: Default::default(),
        }
    }

    pub fn ready(&self) -> Option<V> {
        self.loaded.borrow().clone()
    }

    pub fn load(&self) -> LocalBoxFuture<'static, Result<V, LoadError>> {
        if let Some(view) = self.ready() {
            return future::ready(Ok(view)).boxed_local();
        }

        let pending = (self.factory)();
        let loaded = Rc::clone(&self.loaded);

        async move {
            match pending.await {
                Ok(view) => {
                    *loaded.borrow_mut() = Some(view.clone());
                    Ok(view)
                }
                Err(e) => {
                    warn!("{}", e);
                    Err(e)
                }
            }
        }
        .boxed_local()
    }
}

/// How a route obtains its view: bound up front or resolved on demand.
#[derive(Clone)]
pub enum ViewProvider<V> {
    Eager(V),
    Deferred(Deferred<V>),
}

impl<V> ViewProvider<V> {
    pub fn is_lazy(&self) -> bool {
        matches!(self, ViewProvider::Deferred(_))
    }
}

impl<V: Clone + 'static> ViewProvider<V> {
    pub fn eager(view: V) -> Self {
        Self::Eager(view)
    }

    pub fn deferred<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<V, LoadError>> + 'static,
    {
        Self::Deferred(Deferred::new(factory))
    }

    /// The view, if it can be rendered without suspending.
    pub fn ready(&self) -> Option<V> {
        match self {
            ViewProvider::Eager(view) => Some(view.clone()),
            ViewProvider::Deferred(deferred) => deferred.ready(),
        }
    }

    pub fn load(&self) -> LocalBoxFuture<'static, Result<V, LoadError>> {
        match self {
            ViewProvider::Eager(view) => future::ready(Ok(view.clone())).boxed_local(),
            ViewProvider::Deferred(deferred) => deferred.load(),
        }
    }
}

impl<V> fmt::Debug for ViewProvider<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewProvider::Eager(_) => f.write_str("Eager"),
            ViewProvider::Deferred(deferred) => f
                .debug_struct("Deferred")
                .field("loaded", &deferred.loaded.borrow().is_some())
                .finish(),
        }
    }
}
