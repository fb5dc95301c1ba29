/// Declare program-lifetime exception categories.
///
/// Each category gets its identifier as exception name and the given string
/// as display text (the default message). Its identity is minted on first use.
///
/// ```
/// use unwinder::exception_category;
///
/// exception_category! {
///     pub NOT_ENOUGH_MEMORY = "Not enough memory";
///     PET_NOT_FOUND = "Pet not found";
/// }
///
/// assert_eq!(PET_NOT_FOUND.name(), "PET_NOT_FOUND");
/// assert_eq!(PET_NOT_FOUND.display(), "Pet not found");
/// assert_ne!(*PET_NOT_FOUND, *NOT_ENOUGH_MEMORY);
/// ```
#[macro_export]
macro_rules! exception_category {
    ($($(#[$meta:meta])* $vis:vis $name:ident = $display:expr;)+) => {
        $(
            $(#[$meta])*
            $vis static $name: ::std::sync::LazyLock<$crate::Category> =
                ::std::sync::LazyLock::new(|| {
                    $crate::Category::named(::core::stringify!($name), $display)
                });
        )+
    };
}

/// Throw from a function returning [`Outcome`](crate::Outcome).
///
/// `throw!(ctx, CATEGORY)` uses the category's display text as message;
/// `throw!(ctx, CATEGORY, "format {}", args..)` formats one. Either way the
/// enclosing function returns `Err(Thrown)`.
///
/// ```
/// use unwinder::{exception_category, throw, Context, Outcome};
///
/// exception_category! { OOPS = "Oops"; }
///
/// fn check(ctx: &mut Context, value: i32) -> Outcome<i32> {
///     if value < 0 {
///         throw!(ctx, OOPS, "negative value {}", value);
///     }
///     Ok(value)
/// }
///
/// let mut ctx = Context::new();
/// ctx.attempt(|ctx| check(ctx, -1).map(drop))
///     .catch(&OOPS, |ctx| {
///         assert_eq!(ctx.exception().message(), "negative value -1");
///         Ok(())
///     })
///     .end()
///     .unwrap();
/// ```
#[macro_export]
macro_rules! throw {
    ($ctx:expr, $category:expr $(,)?) => {
        return ::core::result::Result::Err($ctx.throw_default(&$category))
    };
    ($ctx:expr, $category:expr, $($arg:tt)+) => {
        return ::core::result::Result::Err(
            $ctx.throw_fmt(&$category, ::core::format_args!($($arg)+))
        )
    };
}
