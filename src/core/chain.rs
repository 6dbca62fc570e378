//! Composable success/failure chains.
//!
//! The synchronous side is plain `Result` plus the [`FanOut`] extension and
//! [`attempt`]. The asynchronous side is [`Chain`], a boxed future of a
//! `Result` with the same `map` / `and_then` / `map_err` vocabulary.
//!
//! Expected failures travel as `Err`. Panics are only converted into a
//! failure at the terminal boundary ([`attempt`] or [`Chain::run`]), so a
//! chain never lets a panic cross it.
//!
//! ## Fan-out
//!
//! Both variants support fanning a `Vec` out into one sub-operation per
//! element. When more than one sub-operation fails, the failure with the
//! lowest input index is reported. The async variant returns as soon as a
//! failure has settled and every lower index has succeeded, dropping the
//! sub-operations still pending. The choice never depends on settle order.

use std::{
    any::Any,
    future::Future,
    panic::{self, AssertUnwindSafe},
};

use futures::{
    StreamExt,
    future::{self, BoxFuture, FutureExt},
    stream::FuturesUnordered,
};

/// Error types that can represent a caught panic.
pub trait FromPanic {
    fn from_panic(message: String) -> Self;
}

impl FromPanic for anyhow::Error {
    fn from_panic(message: String) -> Self {
        anyhow::anyhow!("panicked: {}", message)
    }
}

impl FromPanic for String {
    fn from_panic(message: String) -> Self {
        message
    }
}

/// Extract a readable message from a panic payload.
pub fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run a synchronous step, converting a panic into a failure.
pub fn attempt<T, E, F>(f: F) -> Result<T, E>
where
    E: FromPanic,
    F: FnOnce() -> Result<T, E>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(E::from_panic(panic_message(payload))),
    }
}

/// Fan-out combinators for a `Result` holding a list.
pub trait FanOut<T, E> {
    /// Apply `f` to every element; `Ok` with all values only if every call succeeds.
    ///
    /// Elements are processed in order and processing stops at the first failure.
    fn fan_out<U, F>(self, f: F) -> Result<Vec<U>, E>
    where
        F: FnMut(T) -> Result<U, E>;

    /// Like [`FanOut::fan_out`] but discards the values and passes the input through.
    fn fan_out_void<U, F>(self, f: F) -> Result<Vec<T>, E>
    where
        F: FnMut(&T) -> Result<U, E>;
}

impl<T, E> FanOut<T, E> for Result<Vec<T>, E> {
    fn fan_out<U, F>(self, f: F) -> Result<Vec<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        self?.into_iter().map(f).collect()
    }

    fn fan_out_void<U, F>(self, mut f: F) -> Result<Vec<T>, E>
    where
        F: FnMut(&T) -> Result<U, E>,
    {
        let items = self?;
        for item in &items {
            f(item)?;
        }
        Ok(items)
    }
}

/// An asynchronous computation that yields `Ok(T)` or `Err(E)`.
///
/// Nothing runs until the chain is awaited through [`Chain::run`].
#[must_use = "a chain does nothing until `run` is awaited"]
pub struct Chain<'a, T, E> {
    future: BoxFuture<'a, Result<T, E>>,
}

impl<'a, T, E> Chain<'a, T, E>
where
    T: Send + 'a,
    E: Send + 'a,
{
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'a,
    {
        Self {
            future: future.boxed(),
        }
    }

    pub fn from_result(result: Result<T, E>) -> Self {
        Self::new(future::ready(result))
    }

    pub fn ok(value: T) -> Self {
        Self::from_result(Ok(value))
    }

    pub fn err(error: E) -> Self {
        Self::from_result(Err(error))
    }

    /// Transform the success value; failures pass through untouched.
    pub fn map<U, F>(self, f: F) -> Chain<'a, U, E>
    where
        U: Send + 'a,
        F: FnOnce(T) -> U + Send + 'a,
    {
        Chain::new(async move { self.future.await.map(f) })
    }

    /// Continue with another chain built from the success value.
    pub fn and_then<U, F>(self, f: F) -> Chain<'a, U, E>
    where
        U: Send + 'a,
        F: FnOnce(T) -> Chain<'a, U, E> + Send + 'a,
    {
        Chain::new(async move {
            match self.future.await {
                Ok(value) => f(value).future.await,
                Err(error) => Err(error),
            }
        })
    }

    /// Transform the failure payload; successes pass through untouched.
    pub fn map_err<E2, F>(self, f: F) -> Chain<'a, T, E2>
    where
        E2: Send + 'a,
        F: FnOnce(E) -> E2 + Send + 'a,
    {
        Chain::new(async move { self.future.await.map_err(f) })
    }

    /// Drive the chain to completion, converting a panic into a failure.
    pub async fn run(self) -> Result<T, E>
    where
        E: FromPanic,
    {
        match AssertUnwindSafe(self.future).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(E::from_panic(panic_message(payload))),
        }
    }
}

impl<'a, T, E> Chain<'a, Vec<T>, E>
where
    T: Send + 'a,
    E: Send + 'a,
{
    /// Run `f` for every element concurrently and collect the values in input order.
    pub fn fan_out<U, F>(self, f: F) -> Chain<'a, Vec<U>, E>
    where
        U: Send + 'a,
        F: Fn(T) -> Chain<'a, U, E> + Send + 'a,
    {
        self.and_then(move |items| Chain::new(settle_all(items.into_iter().map(f).collect())))
    }

    /// Run `f` for every element concurrently, then pass the input list through.
    pub fn fan_out_void<U, F>(self, f: F) -> Chain<'a, Vec<T>, E>
    where
        T: Clone,
        U: Send + 'a,
        F: Fn(T) -> Chain<'a, U, E> + Send + 'a,
    {
        self.and_then(move |items| {
            let chains = items.iter().cloned().map(f).collect();
            Chain::new(async move { settle_all(chains).await.map(|_| items) })
        })
    }
}

/// Drive the chains concurrently and report the lowest-index failure.
///
/// Returns as soon as that failure is certain; pending chains are dropped.
async fn settle_all<U, E>(chains: Vec<Chain<'_, U, E>>) -> Result<Vec<U>, E> {
    let mut pending: FuturesUnordered<_> = chains
        .into_iter()
        .enumerate()
        .map(|(index, chain)| chain.future.map(move |result| (index, result)))
        .collect();
    let mut values: Vec<Option<U>> = std::iter::repeat_with(|| None)
        .take(pending.len())
        .collect();
    let mut failure: Option<(usize, E)> = None;

    while let Some((index, result)) = pending.next().await {
        match result {
            Ok(value) => values[index] = Some(value),
            Err(error) => {
                if failure.as_ref().is_none_or(|(lowest, _)| index < *lowest) {
                    failure = Some((index, error));
                }
            }
        }

        let lowest = failure.as_ref().map(|(lowest, _)| *lowest);
        if let Some(lowest) = lowest
            && values[..lowest].iter().all(Option::is_some)
            && let Some((_, error)) = failure.take()
        {
            return Err(error);
        }
    }

    Ok(values.into_iter().flatten().collect())
}
