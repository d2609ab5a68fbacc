//! Errors that carry only a message and the place they were raised.
//!
//! Used where the underlying library error is already descriptive: a failed
//! HTTP exchange, a document that would not (de)serialize, a bad setting.

macro_rules! message_error {
    ($(#[$meta:meta])* $name:ident, $label:literal, $example:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, derive_more::Error)]
        pub struct $name {
            /// What went wrong
            pub message: String,
            /// Line where the error was raised
            pub line: u32,
            /// File where the error was raised
            pub file: &'static str,
        }

        impl $name {
            #[doc = concat!("Create a `", stringify!($name), "` located at the caller.")]
            ///
            /// ```
            #[doc = concat!("let err = lumina_error::", stringify!($name), "::new(\"", $example, "\");")]
            #[doc = concat!("assert_eq!(err.message, \"", $example, "\");")]
            /// ```
            #[track_caller]
            pub fn new(message: impl Into<String>) -> Self {
                let location = std::panic::Location::caller();
                Self {
                    message: message.into(),
                    line: location.line(),
                    file: location.file(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}: {} at line {} in {}", $label, self.message, self.line, self.file)
            }
        }
    };
}

message_error!(
    /// A request to a provider or store endpoint failed.
    HttpError,
    "HTTP Error",
    "https://example.org: HTTP 503"
);

message_error!(
    /// A payload could not be encoded or decoded.
    JsonError,
    "JSON Error",
    "missing field `operation`"
);

message_error!(
    /// A setting is missing or malformed.
    ConfigError,
    "Configuration Error",
    "MAX_WORKERS must be a number"
);
