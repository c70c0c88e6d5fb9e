//! Property editor model: the form backing the "Properties" panel.

use crate::shapes::{Circle, Rectangle, Shape, ShapeColor, ShapeId, ShapeKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors committing a property edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Exactly one shape must be selected to edit properties (selected: {0})")]
    NotSingleSelection(usize),
    #[error("Shape not found: {0}")]
    ShapeNotFound(ShapeId),
}

/// Editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Width,
    Height,
    Radius,
    FillColor,
}

/// Raw text of the property inputs for one shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyForm {
    /// Kind of the shape the form was opened for.
    pub kind: Option<ShapeKind>,
    pub width: String,
    pub height: String,
    pub radius: String,
    pub fill_color: String,
}

impl PropertyForm {
    /// Fill the inputs from a shape; fields that do not apply stay blank.
    pub fn from_shape(shape: &Shape) -> Self {
        match shape {
            Shape::Rectangle(r) => Self {
                kind: Some(ShapeKind::Rectangle),
                width: format_number(r.width),
                height: format_number(r.height),
                radius: String::new(),
                fill_color: r.fill_color.to_hex(),
            },
            Shape::Circle(c) => Self {
                kind: Some(ShapeKind::Circle),
                width: String::new(),
                height: String::new(),
                radius: format_number(c.radius),
                fill_color: c.fill_color.to_hex(),
            },
        }
    }

    /// Whether an input is editable for the form's shape kind.
    pub fn field_enabled(&self, field: Field) -> bool {
        match (self.kind, field) {
            (_, Field::FillColor) => true,
            (Some(ShapeKind::Rectangle), Field::Width | Field::Height) => true,
            (Some(ShapeKind::Circle), Field::Radius) => true,
            _ => false,
        }
    }

    /// Set the text of one input.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Width => self.width = value,
            Field::Height => self.height = value,
            Field::Radius => self.radius = value,
            Field::FillColor => self.fill_color = value,
        }
    }

    /// Build the replacement record for `base`.
    ///
    /// Position, id and kind come from `base`. Numbers that fail to parse
    /// become `0`; a fill color that fails to parse keeps `base`'s color.
    pub fn commit(&self, base: &Shape) -> Shape {
        let fill = ShapeColor::from_hex(&self.fill_color).unwrap_or_else(|| {
            log::warn!("Ignoring unparseable fill color {:?}", self.fill_color);
            base.fill_color()
        });
        match base {
            Shape::Rectangle(r) => Shape::Rectangle(Rectangle {
                width: parse_number_or_zero(&self.width),
                height: parse_number_or_zero(&self.height),
                fill_color: fill,
                ..r.clone()
            }),
            Shape::Circle(c) => Shape::Circle(Circle {
                radius: parse_number_or_zero(&self.radius),
                fill_color: fill,
                ..c.clone()
            }),
        }
    }
}

/// Parse the longest leading decimal number in `input`, or `0` when there is none.
///
/// Accepts an optional sign, digits, a fraction and an exponent, so `"12px"`
/// reads as `12` and `"1e3"` as `1000`. Non-finite results also become `0`.
pub fn parse_number_or_zero(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

fn format_number(value: f64) -> String {
    // `{}` prints 175.0 as "175"
    format!("{value}")
}
