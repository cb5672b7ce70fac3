//! Handler trait and type erasure.
//!
//! The router keeps handlers of different concrete types in one radix tree
//! per method, so each one is boxed behind [`ErasedHandler`]:
//!
//! ```text
//! async fn list_posts(req: Request) -> Response { … }
//!        ↓ router.on(Method::Get, "/api/posts", list_posts)
//! list_posts.into_boxed_handler()        Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(list_posts))        stored as BoxedHandler
//!        ↓
//! handler.call(req)                      one vtable dispatch per request
//! ```
//!
//! Closures qualify too, which is how handlers that share application state
//! are registered: capture an `Arc` and clone it into each future.

use std::future::{self, Future};
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` because it appears in the return type of the public
/// `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid route handler.
///
/// Never implemented by hand. Any `Fn(Request) -> impl Future<Output = impl
/// IntoResponse>` satisfies it, including `async fn` items and closures
/// returning `async move` blocks or `std::future::ready(..)`.
///
/// Sealed through the private `Sealed` supertrait.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

/// Holds a concrete handler `F` and bridges it to [`ErasedHandler`].
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// Turns a synchronous operation on shared state into a [`Handler`].
///
/// The lock is held for the whole operation, so requests against the same
/// state run one after another. A poisoned lock is recovered: operations
/// only mutate after all of their checks have passed.
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use postboard::{locked, Method, Request, Response, Router};
///
/// let hits = Arc::new(Mutex::new(0u32));
/// let app = Router::new().on(Method::Get, "/hits", locked(&hits, |n: &mut u32, _: &Request| {
///     *n += 1;
///     Response::text(n.to_string())
/// }));
/// ```
pub fn locked<S, F, R>(state: &Arc<Mutex<S>>, op: F) -> impl Handler + use<S, F, R>
where
    S: Send + 'static,
    F: Fn(&mut S, &Request) -> R + Send + Sync + 'static,
    R: IntoResponse + Send + 'static,
{
    let state = Arc::clone(state);
    move |req: Request| {
        let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
        future::ready(op(&mut *guard, &req))
    }
}
