//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants from reducers.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use storefront_core::async_effect;
///
/// async_effect! {
///     let hits = search_api.search(&query, &token).await;
///     Some(SearchAction::SuggestionsLoaded { query, result: hits })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create a delayed action that a later `Effect::Cancel` with the same id aborts
///
/// This is the building block for trailing debounce: every new input cancels
/// the previous timer and schedules a fresh one under the same id.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_core::debounce;
/// use std::time::Duration;
///
/// debounce! {
///     id: "suggestions",
///     duration: Duration::from_millis(300),
///     action: SearchAction::DebounceElapsed { generation: 4 }
/// }
/// ```
#[macro_export]
macro_rules! debounce {
    (
        id: $id:expr,
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $crate::effect::EffectId::new($id),
            effect: ::std::boxed::Box::new($crate::effect::Effect::Delay {
                duration: $duration,
                action: ::std::boxed::Box::new($action),
            }),
        }
    };
}
