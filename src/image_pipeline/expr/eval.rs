//! Elementwise evaluation of band-arithmetic expressions.

use std::path::Path;

use tracing::info;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::dat::types::FloatImage;
use crate::image_pipeline::dat::BandReader;
use crate::image_pipeline::expr::parser::{BinaryOp, Expr, Parser};
use crate::image_pipeline::expr::resolver::{BandTable, resolve_band_table};

/// An intermediate operand: a whole plane or a broadcastable scalar.
#[derive(Debug)]
enum Value {
    Image(FloatImage),
    Scalar(f32),
}

fn op_fn(operator: BinaryOp) -> fn(f32, f32) -> f32 {
    match operator {
        BinaryOp::Add => |a, b| a + b,
        BinaryOp::Subtract => |a, b| a - b,
        BinaryOp::Multiply => |a, b| a * b,
        BinaryOp::Divide => |a, b| a / b,
    }
}

/// Combine two operands elementwise. Scalars broadcast against planes;
/// planes must agree in shape.
fn apply(operator: BinaryOp, left: Value, right: Value) -> Result<Value> {
    let op = op_fn(operator);
    match (left, right) {
        (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(op(a, b))),
        (Value::Scalar(a), Value::Image(b)) => Ok(Value::Image(FloatImage::new(
            b.width,
            b.height,
            b.data.iter().map(|&v| op(a, v)).collect(),
        ))),
        (Value::Image(a), Value::Scalar(b)) => Ok(Value::Image(FloatImage::new(
            a.width,
            a.height,
            a.data.iter().map(|&v| op(v, b)).collect(),
        ))),
        (Value::Image(a), Value::Image(b)) => {
            if a.width != b.width || a.height != b.height {
                return Err(ConversionError::ShapeMismatch(
                    a.width, a.height, b.width, b.height,
                ));
            }
            Ok(Value::Image(FloatImage::new(
                a.width,
                a.height,
                a.data
                    .iter()
                    .zip(b.data.iter())
                    .map(|(&va, &vb)| op(va, vb))
                    .collect(),
            )))
        }
    }
}

fn evaluate(expr: &Expr, table: &BandTable) -> Result<Value> {
    match expr {
        Expr::Number(value) => Ok(Value::Scalar(*value)),
        Expr::BandRef(name) => table
            .get(name)
            .map(|image| Value::Image(image.clone()))
            .ok_or_else(|| ConversionError::NameResolutionError(name.clone())),
        Expr::Negate(operand) => match evaluate(operand, table)? {
            Value::Scalar(v) => Ok(Value::Scalar(-v)),
            Value::Image(image) => Ok(Value::Image(FloatImage::new(
                image.width,
                image.height,
                image.data.iter().map(|&v| -v).collect(),
            ))),
        },
        Expr::Binary {
            left,
            operator,
            right,
        } => {
            let left = evaluate(left, table)?;
            let right = evaluate(right, table)?;
            apply(*operator, left, right)
        }
    }
}

/// Replace NaN and infinite results with 0.
fn scrub(image: &mut FloatImage) {
    for v in &mut image.data {
        if !v.is_finite() {
            *v = 0.0;
        }
    }
}

/// Evaluate a band-arithmetic expression against the captures next to
/// `reference_path`.
///
/// Band references are resolved best-effort (see the resolver); the
/// expression itself must parse, and every reference it actually uses as an
/// operand must have resolved. Division by zero and other non-finite
/// results are scrubbed to 0 in the returned plane.
pub fn evaluate_expression<R: BandReader>(
    reader: &R,
    expression: &str,
    reference_path: &Path,
    dims: (usize, usize),
) -> Result<FloatImage> {
    info!(
        "Evaluating '{}' against {}",
        expression,
        reference_path.display()
    );

    let table = resolve_band_table(reader, expression, reference_path, dims);
    let ast = Parser::new(expression)?.parse()?;

    let mut image = match evaluate(&ast, &table)? {
        Value::Image(image) => image,
        // A constant expression still yields a plane of the requested shape.
        Value::Scalar(v) => FloatImage::splat(dims.0, dims.1, v),
    };
    scrub(&mut image);
    Ok(image)
}
