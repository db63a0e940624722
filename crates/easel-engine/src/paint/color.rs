use thiserror::Error;

/// A color channel expressed as a `0.0..=1.0` fraction of full intensity.
pub type Ratio = f32;

/// Error raised when a color channel does not fit in a byte.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum ColorError {
    #[error("expected a channel value in 0..=255, {value} given")]
    OutOfRange { value: i64 },
}

/// An integer checked to lie in `0..=255`.
///
/// Useful at API edges that receive wider integers (computed channels,
/// user input). Direct `u8` construction never needs it.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ByteInt(u8);

impl ByteInt {
    /// Validates `value` against the byte range.
    pub fn new(value: i64) -> Result<Self, ColorError> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| ColorError::OutOfRange { value })
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for ByteInt {
    type Error = ColorError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i32> for ByteInt {
    type Error = ColorError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value.into())
    }
}

impl From<u8> for ByteInt {
    #[inline]
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<ByteInt> for u8 {
    #[inline]
    fn from(value: ByteInt) -> Self {
        value.0
    }
}

/// Straight-alpha RGBA color with one byte per channel.
///
/// Immutable value type: two colors are equal iff all four channels match.
/// Renderers consume [`ratios`](Self::ratios), the `0.0..=1.0` view of the
/// same channels.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from red, green and blue bytes.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Builds a color from wide integers, rejecting any channel outside `0..=255`.
    pub fn try_new(r: i64, g: i64, b: i64, a: i64) -> Result<Self, ColorError> {
        Ok(Self::new(
            ByteInt::new(r)?.get(),
            ByteInt::new(g)?.get(),
            ByteInt::new(b)?.get(),
            ByteInt::new(a)?.get(),
        ))
    }

    /// Opaque gray: `value` is replicated across red, green and blue.
    #[inline]
    pub const fn from_unit(value: u8) -> Self {
        Self::new(value, value, value, 255)
    }

    /// Channels in `[r, g, b, a]` order.
    #[inline]
    pub const fn values(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Channels divided by 255, in `[r, g, b, a]` order.
    #[inline]
    pub fn ratios(self) -> [Ratio; 4] {
        self.values().map(|c| c as Ratio / 255.0)
    }

    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<u8> for Color {
    #[inline]
    fn from(value: u8) -> Self {
        Self::from_unit(value)
    }
}

impl From<ByteInt> for Color {
    #[inline]
    fn from(value: ByteInt) -> Self {
        Self::from_unit(value.get())
    }
}

impl From<[u8; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl TryFrom<[i64; 4]> for Color {
    type Error = ColorError;

    fn try_from([r, g, b, a]: [i64; 4]) -> Result<Self, Self::Error> {
        Self::try_new(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn default_is_opaque_white() {
        assert_eq!(Color::default(), Color::new(255, 255, 255, 255));
    }

    #[test]
    fn from_unit_matches_explicit_gray_for_every_byte() {
        for v in 0..=255u8 {
            assert_eq!(Color::new(v, v, v, 255), Color::from_unit(v));
            assert_eq!(Color::from(v), Color::from_unit(v));
        }
    }

    #[test]
    fn byte_int_accepts_bounds() {
        assert_eq!(ByteInt::new(0).unwrap().get(), 0);
        assert_eq!(ByteInt::new(255).unwrap().get(), 255);
        assert_eq!(ByteInt::try_from(128i32).unwrap().get(), 128);
    }

    #[test]
    fn byte_int_rejects_out_of_range() {
        for v in [-1i64, 256, 1000, i64::MIN, i64::MAX] {
            assert_eq!(ByteInt::new(v), Err(ColorError::OutOfRange { value: v }));
        }
    }

    #[test]
    fn try_new_reports_offending_channel() {
        assert_eq!(
            Color::try_new(10, 300, 0, 255),
            Err(ColorError::OutOfRange { value: 300 })
        );
        assert_eq!(
            Color::try_from([0i64, 0, 0, -5]),
            Err(ColorError::OutOfRange { value: -5 })
        );
        assert_eq!(Color::try_new(1, 2, 3, 4), Ok(Color::new(1, 2, 3, 4)));
    }

    #[test]
    fn ratios_divide_by_255_in_order() {
        let [r, g, b, a] = Color::new(200, 40, 0, 180).ratios();
        assert!(approx(r, 0.7843));
        assert!(approx(g, 0.1569));
        assert!(approx(b, 0.0));
        assert!(approx(a, 0.7059));
    }

    #[test]
    fn ratios_hit_exact_endpoints() {
        assert_eq!(Color::WHITE.ratios(), [1.0; 4]);
        assert_eq!(Color::TRANSPARENT.ratios(), [0.0; 4]);
    }

    #[test]
    fn values_preserve_order() {
        assert_eq!(Color::new(1, 2, 3, 4).values(), [1, 2, 3, 4]);
    }

    #[test]
    fn error_message_names_value() {
        let err = ByteInt::new(-3).unwrap_err();
        assert_eq!(err.to_string(), "expected a channel value in 0..=255, -3 given");
    }
}
