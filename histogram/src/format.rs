//! Number formatting used by the histogram report.

use core::fmt;
use core::fmt::Write;

/// Displays a float the way the histogram report has always printed numbers.
///
/// Zero and magnitudes in `1e-3..1e7` use plain decimal notation with at
/// least one fractional digit (`2.0`, `0.33333334`). Other finite values use
/// scientific notation with an upper case exponent marker (`1.0E-4`, `1.5E8`).
/// In both cases the digits are the shortest that round-trip at the precision
/// of `T`, so `Decimal(x as f32)` prints fewer digits than `Decimal(x)`.
pub(crate) struct Decimal<T>(pub T);

impl<T> fmt::Display for Decimal<T>
where
    T: Copy + Into<f64> + fmt::Debug + fmt::LowerExp,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wide: f64 = self.0.into();

        if wide.is_nan() {
            return f.write_str("NaN");
        }

        if wide.is_infinite() {
            return f.write_str(if wide > 0.0 { "Infinity" } else { "-Infinity" });
        }

        let magnitude = wide.abs();
        if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
            // debug output keeps a trailing `.0` on integral values
            return write!(f, "{:?}", self.0);
        }

        let mut scientific = StackBuffer::new();
        write!(scientific, "{:e}", self.0)?;
        let scientific = scientific.as_str();
        let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific, "0"));

        if mantissa.contains('.') {
            write!(f, "{mantissa}E{exponent}")
        } else {
            write!(f, "{mantissa}.0E{exponent}")
        }
    }
}

/// A fixed-capacity text buffer so formatting a number does not allocate.
/// The longest `{:e}` output of an `f64` is 24 bytes.
struct StackBuffer {
    bytes: [u8; 32],
    len: usize,
}

impl StackBuffer {
    fn new() -> Self {
        Self {
            bytes: [0; 32],
            len: 0,
        }
    }

    fn as_str(&self) -> &str {
        // only whole `&str`s are ever copied in
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }
}

impl fmt::Write for StackBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        let dest = self.bytes.get_mut(self.len..end).ok_or(fmt::Error)?;
        dest.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}
