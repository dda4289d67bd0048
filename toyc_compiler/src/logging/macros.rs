//! Logging macros
//!
//! Context pairs are written `"key" => value`; any `Display` value works.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_event {
    ($event:expr $(, $key:expr => $value:expr)*) => {{
        let event = $event;
        $( let event = event.with_context($key, &format!("{}", $value)); )*
        $crate::logging::dispatch(event)
    }};
}

/// `log_error!(code, "message" [, span = s] [, "key" => value]*)`
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, span = $span:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!(
            $crate::logging::LogEvent::error($code, $message).with_span($span)
            $(, $key => $value)*
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!($crate::logging::LogEvent::error($code, $message) $(, $key => $value)*)
    };
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!($crate::logging::LogEvent::success($code, $message) $(, $key => $value)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!($crate::logging::LogEvent::info($message) $(, $key => $value)*)
    };
}

/// The `code = ...` arm comes first so a plain message is never parsed as
/// an assignment expression
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!(
            $crate::logging::LogEvent::warning(Some($code), $message)
            $(, $key => $value)*
        )
    };

    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!($crate::logging::LogEvent::warning(None, $message) $(, $key => $value)*)
    };
}

/// Context values are only formatted when debug output is enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::__log_event!($crate::logging::LogEvent::debug($message) $(, $key => $value)*)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;
    use crate::utils::{Position, Span};

    #[test]
    fn test_every_macro_arm_expands() {
        // Must not panic whether or not the global logger is initialised
        crate::log_error!(codes::lexical::UNTERMINATED_STRING, "error");
        crate::log_error!(codes::lexical::MALFORMED_INTEGER, "error", "line" => 3);
        crate::log_error!(codes::lexical::INVALID_CHARACTER, "error",
            span = Span::single(Position::start()), "character" => '@');
        crate::log_success!(codes::success::TOKENIZATION_COMPLETE, "ok", "tokens" => 12);
        crate::log_info!("info", "stage" => "lexer");
        crate::log_warning!("warning");
        crate::log_warning!(code = codes::comments::STRAY_TERMINATOR, "stray", "line" => 1);
        crate::log_debug!("debug", "value" => 1.5);
    }
}
