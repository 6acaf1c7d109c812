/*
 * ==========================================================================
 * LANADA - Lua-Flavored Scripting, Straight From Source
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the Lanada scripting language project.
 *
 * Lanada is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

//! The `math` table: rounding, powers and roots, magnitude, aggregates,
//! randomness, plus the constants `pi` and `huge`.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::LanadaError;
use crate::interpreter::helpers::{expect_integer, expect_number};
use crate::value::{NativeResult, Value};

/// Creates the global `math` table.
///
/// `seed` fixes the sequence produced by `math.random`; without one the
/// generator is seeded from the operating system.
pub fn create_global_math_value(seed: Option<u64>) -> Value {
    let rng = Rc::new(RefCell::new(match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }));

    Value::table_from([
        // -----------------------------------------------------------------
        // Constants
        // -----------------------------------------------------------------
        ("pi", Value::Number(std::f64::consts::PI)),
        ("huge", Value::Number(f64::INFINITY)),
        // -----------------------------------------------------------------
        // Rounding, powers and magnitude
        // -----------------------------------------------------------------
        ("floor", Value::native("floor", math_floor)),
        ("ceil", Value::native("ceil", math_ceil)),
        ("pow", Value::native("pow", math_pow)),
        ("sqrt", Value::native("sqrt", math_sqrt)),
        ("abs", Value::native("abs", math_abs)),
        // -----------------------------------------------------------------
        // Aggregates
        // -----------------------------------------------------------------
        ("min", Value::native("min", math_min)),
        ("max", Value::native("max", math_max)),
        // -----------------------------------------------------------------
        // Randomness
        // -----------------------------------------------------------------
        (
            "random",
            Value::native("random", move |args| math_random(&mut rng.borrow_mut(), args)),
        ),
    ])
}

pub fn math_floor(args: Vec<Value>) -> NativeResult {
    Ok(Value::Number(expect_number(&args, 0, "floor")?.floor()))
}

pub fn math_ceil(args: Vec<Value>) -> NativeResult {
    Ok(Value::Number(expect_number(&args, 0, "ceil")?.ceil()))
}

pub fn math_pow(args: Vec<Value>) -> NativeResult {
    let base = expect_number(&args, 0, "pow")?;
    let exponent = expect_number(&args, 1, "pow")?;
    Ok(Value::Number(base.powf(exponent)))
}

/// Square roots of negative numbers are NaN, as in the host arithmetic.
pub fn math_sqrt(args: Vec<Value>) -> NativeResult {
    Ok(Value::Number(expect_number(&args, 0, "sqrt")?.sqrt()))
}

pub fn math_abs(args: Vec<Value>) -> NativeResult {
    Ok(Value::Number(expect_number(&args, 0, "abs")?.abs()))
}

pub fn math_min(args: Vec<Value>) -> NativeResult {
    fold_numbers(&args, "min", f64::min)
}

pub fn math_max(args: Vec<Value>) -> NativeResult {
    fold_numbers(&args, "max", f64::max)
}

/// At least one argument; every argument must be a number.
fn fold_numbers(args: &[Value], name: &str, pick: fn(f64, f64) -> f64) -> NativeResult {
    let mut acc = expect_number(args, 0, name)?;
    for i in 1..args.len() {
        acc = pick(acc, expect_number(args, i, name)?);
    }
    Ok(Value::Number(acc))
}

/// `random()` → float in [0, 1)
/// `random(m)` → integer in [1, m]
/// `random(a, b)` → integer in [a, b]
pub fn math_random(rng: &mut StdRng, args: Vec<Value>) -> NativeResult {
    let (low, high) = match args.len() {
        0 => return Ok(Value::Number(rng.gen::<f64>())),
        1 => (1, expect_integer(&args, 0, "random")?),
        _ => (
            expect_integer(&args, 0, "random")?,
            expect_integer(&args, 1, "random")?,
        ),
    };

    if low > high {
        let position = if args.len() == 1 { 1 } else { 2 };
        return Err(LanadaError::type_error(
            format!("bad argument #{} to 'random' (interval is empty)", position),
            Default::default(),
        ));
    }

    Ok(Value::Number(rng.gen_range(low..=high) as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(x: f64) -> Value {
        Value::from(x)
    }

    #[test]
    fn rounding_and_magnitude() {
        assert_eq!(math_floor(vec![n(4.9)]).unwrap(), n(4.0));
        assert_eq!(math_ceil(vec![n(4.1)]).unwrap(), n(5.0));
        assert_eq!(math_abs(vec![n(-3.0)]).unwrap(), n(3.0));
        assert_eq!(math_pow(vec![n(2.0), n(8.0)]).unwrap(), n(256.0));
        assert_eq!(math_sqrt(vec![n(81.0)]).unwrap(), n(9.0));
    }

    #[test]
    fn aggregates_take_any_number_of_arguments() {
        assert_eq!(math_min(vec![n(3.0), n(-1.0), n(2.0)]).unwrap(), n(-1.0));
        assert_eq!(math_max(vec![n(3.0)]).unwrap(), n(3.0));

        let err = math_max(vec![]).unwrap_err();
        assert_eq!(err.message, "bad argument #1 to 'max' (number expected, got no value)");
    }

    #[test]
    fn random_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let Value::Number(x) = math_random(&mut rng, vec![]).unwrap() else {
                panic!("random() returned a non-number");
            };
            assert!((0.0..1.0).contains(&x));

            let Value::Number(y) = math_random(&mut rng, vec![n(3.0), n(5.0)]).unwrap() else {
                panic!("random(a, b) returned a non-number");
            };
            assert!([3.0, 4.0, 5.0].contains(&y));
        }

        assert!(math_random(&mut rng, vec![n(0.0)]).is_err());
    }

    #[test]
    fn seeded_generators_repeat() {
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..5)
                .map(|_| math_random(&mut rng, vec![n(100.0)]).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }
}
