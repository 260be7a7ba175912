// Logging shims over `tracing`.
//
// With the `tracing` feature enabled these forward to `tracing::trace!` and
// `tracing::debug!`. Without it they compile to nothing, but the format
// arguments are still type-checked so both builds stay warning-free.

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {
        if false {
            let _ = format!($($arg)*);
        }
    };
}

#[cfg(feature = "tracing")]
macro_rules! debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {
        if false {
            let _ = format!($($arg)*);
        }
    };
}
