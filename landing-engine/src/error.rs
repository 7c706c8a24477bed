// error.rs - Failure taxonomy
//
// Missing markup and malformed ranges are startup faults. Asset failures
// are logged by the scene and never reach the caller.

use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, LandingError>;

#[derive(thiserror::Error, Debug)]
pub enum LandingError {
    #[error("missing element: {0}")]
    MissingElement(String),

    #[error("invalid scroll range: start {start} is after end {end}")]
    InvalidRange { start: f64, end: f64 },

    #[error("invalid scroll edge '{0}'")]
    InvalidEdge(String),

    #[error("asset load failed for {path}: {reason}")]
    AssetLoad { path: String, reason: String },

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("js error: {0}")]
    Js(String),
}

impl LandingError {
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement(selector.into())
    }

    pub fn asset(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AssetLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<JsValue> for LandingError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(s) => Self::Js(s),
            None => Self::Js(format!("{value:?}")),
        }
    }
}

impl From<LandingError> for JsValue {
    fn from(err: LandingError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            LandingError::missing("#intro")
                .to_string()
                .contains("missing element: #intro")
        );
        assert!(
            LandingError::asset("assets/avatar.glb", "404")
                .to_string()
                .contains("asset load failed for assets/avatar.glb")
        );
        assert!(
            LandingError::InvalidRange {
                start: 100.0,
                end: 0.0
            }
            .to_string()
            .contains("start 100 is after end 0")
        );
    }

    #[test]
    fn config_errors_convert() {
        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LandingError = bad.into();
        assert!(matches!(err, LandingError::Config(_)));
    }
}
