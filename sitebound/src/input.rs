//! Typed exact-distance entry.
//!
//! The buffer holds text, not a number, so partial input such as `"10."` is
//! representable. Parsing happens only on commit.

use crate::error::InputError;
use crate::geometry::geodesic::{destination, nearest_right_angle};
use crate::geometry::limits::MAX_INPUT_CHARS;
use crate::model::LatLng;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> InputBuffer {
        InputBuffer::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Appends an ASCII digit. Returns false when the character was refused.
    pub fn append_digit(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() || self.text.len() >= MAX_INPUT_CHARS {
            return false;
        }
        self.text.push(c);
        true
    }

    /// Appends a decimal point unless one is already present.
    pub fn append_decimal(&mut self) -> bool {
        if self.text.contains('.') || self.text.len() >= MAX_INPUT_CHARS {
            return false;
        }
        self.text.push('.');
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    pub fn discard(&mut self) {
        self.text.clear();
    }

    /// Parsed value if the text is a positive finite number.
    pub fn value(&self) -> Result<f64, InputError> {
        if self.text.is_empty() {
            return Err(InputError::Empty);
        }
        let v: f64 = self
            .text
            .parse()
            .map_err(|_| InputError::NotNumeric(self.text.clone()))?;
        if !v.is_finite() {
            return Err(InputError::NotNumeric(self.text.clone()));
        }
        if v <= 0.0 {
            return Err(InputError::NonPositive(v));
        }
        Ok(v)
    }

    /// Places a vertex `value()` meters from `last` along `preview_bearing`
    /// (or its nearest right angle when snapping) and empties the buffer.
    /// On error the text is left as typed.
    pub fn commit(&mut self, last: LatLng, preview_bearing: f64, orthogonal_snap: bool) -> Result<LatLng, InputError> {
        let d = self.value()?;
        let b = if orthogonal_snap { nearest_right_angle(preview_bearing) } else { preview_bearing };
        self.text.clear();
        Ok(destination(last, d, b))
    }
}
