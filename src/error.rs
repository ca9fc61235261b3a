//! Macros for reporting errors.
//!
//! Library code returns `io::Result` and leaves it to the command line layer
//! to decide how a failure is reported. The `exit_*` macros print a message to
//! standard error and terminate with exit code 1, or panic when the
//! `for-testing` feature is enabled so that tests can catch the failure.

#[cfg(not(feature = "for-testing"))]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        eprintln!($($print_arg)*);
        quit::with_code(1);
    }};
}

#[cfg(feature = "for-testing")]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        panic!($($print_arg)*);
    }};
}

/// Unwraps the given result, or exits with a message formatted with the error
/// as the last argument.
#[macro_export]
macro_rules! exit_on_error {
    ($result:expr, $($print_arg:tt)*) => {
        match $result {
            Ok(value) => value,
            Err(err) => {
                $crate::exit_with_error!($($print_arg)*, err)
            }
        }
    };
}

#[macro_export]
macro_rules! exit_on_false {
    ($logic:expr, $($print_arg:tt)*) => {
        if !$logic {
            $crate::exit_with_error!($($print_arg)*)
        }
    };
}

#[macro_export]
macro_rules! exit_on_none {
    ($option:expr, $($print_arg:tt)*) => {
        $option.unwrap_or_else(|| $crate::exit_with_error!($($print_arg)*))
    };
}

/// Converts the error of a foreign result into an `io::Error` of kind `Other`.
#[macro_export]
macro_rules! io_result {
    ($result:expr) => {
        $result.map_err(|err| ::std::io::Error::new(::std::io::ErrorKind::Other, err.to_string()))
    };
}
