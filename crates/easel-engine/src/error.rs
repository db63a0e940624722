use thiserror::Error;

use crate::paint::ColorError;

/// Errors surfaced by canvas creation and the sketch loop.
///
/// All of them are programming or environment errors detected eagerly; none
/// is retried.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("window system initialization failed: {reason}")]
    Init { reason: String },

    #[error("window creation failed ({width}x{height})")]
    WindowCreation { width: u32, height: u32 },

    #[error("no canvas attached; call create_canvas() or pass a canvas to the sketch first")]
    NoCanvas,

    #[error(transparent)]
    Color(#[from] ColorError),
}

pub type Result<T, E = SketchError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    fn opaque_gray(value: i64) -> Result<Color> {
        Ok(Color::try_from([value, value, value, 255])?)
    }

    #[test]
    fn color_errors_convert_with_question_mark() {
        assert_eq!(opaque_gray(51).unwrap(), Color::new(51, 51, 51, 255));

        let err = opaque_gray(300).unwrap_err();
        assert!(matches!(err, SketchError::Color(ColorError::OutOfRange { value: 300 })));
        assert_eq!(err.to_string(), ColorError::OutOfRange { value: 300 }.to_string());
    }
}
