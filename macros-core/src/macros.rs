/// Returns early with a parse error at the given span.
#[macro_export]
macro_rules! parse_error {
    ($span:expr, $fmt:expr, $($args:tt)*) => {
        return Err(::syn::Error::new($span, format!($fmt, $($args)*)))
    };
    ($span:expr, $fmt:expr) => {
        $crate::parse_error!($span, $fmt,)
    };
}
