//! Error types shared by the game core and the browser adapter.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must be a positive finite number, got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("dot size {0} is not a usable radius")]
    InvalidDotSize(f64),

    #[error("surface {width}x{height} cannot hold a dot of radius {radius}")]
    SurfaceTooSmall { width: f64, height: f64, radius: f64 },

    #[error("a round needs at least one dot")]
    EmptyRound,

    #[error("unknown input mode {0:?} (expected \"click\" or \"crosshair\")")]
    UnknownMode(String),

    #[error("missing element #{0}")]
    MissingElement(&'static str),

    #[error("browser error: {0}")]
    Dom(String),

    #[cfg(feature = "serde_json")]
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Wrap a thrown JS value. Only meaningful on wasm32 where `JsValue` is live.
    pub fn from_js(value: JsValue) -> Self {
        Error::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_field() {
        let err = Error::InvalidNumber {
            field: "dpi",
            value: "abc".into(),
        };
        assert_eq!(err.to_string(), "dpi must be a number, got \"abc\"");

        let err = Error::OutOfRange {
            field: "sensitivity",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "sensitivity must be a positive finite number, got -1"
        );
    }

    #[test]
    fn unknown_mode_lists_the_choices() {
        let msg = Error::UnknownMode("mouse".into()).to_string();
        assert!(msg.contains("\"mouse\""));
        assert!(msg.contains("crosshair"));
    }
}
