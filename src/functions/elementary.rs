use nuclide_macros::builtin_fn;

#[builtin_fn]
fn exp(x: f64) -> f64 {
    x.exp()
}

/// Natural logarithm.
#[builtin_fn]
fn ln(x: f64) -> f64 {
    x.ln()
}

/// Alias of `ln`.
#[builtin_fn]
fn log(x: f64) -> f64 {
    x.ln()
}

#[builtin_fn]
fn log10(x: f64) -> f64 {
    x.log10()
}

#[builtin_fn]
fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[builtin_fn]
fn sin(x: f64) -> f64 {
    x.sin()
}

#[builtin_fn]
fn cos(x: f64) -> f64 {
    x.cos()
}

#[builtin_fn]
fn tan(x: f64) -> f64 {
    x.tan()
}

#[builtin_fn]
fn abs(x: f64) -> f64 {
    x.abs()
}

#[builtin_fn]
fn min(a: f64, b: f64) -> f64 {
    a.min(b)
}

#[builtin_fn]
fn max(a: f64, b: f64) -> f64 {
    a.max(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logarithms() {
        assert_eq!(ln(&[1.0]), Ok(0.0));
        assert!((log(&[std::f64::consts::E]).unwrap() - 1.0).abs() < 1e-15);
        assert!((log10(&[1000.0]).unwrap() - 3.0).abs() < 1e-15);
        assert_eq!(ln(&[0.0]), Ok(f64::NEG_INFINITY));
        assert!(ln(&[-1.0]).unwrap().is_nan());
    }

    #[test]
    fn test_two_argument_functions() {
        assert_eq!(MIN_ARITY, 2);
        assert_eq!(min(&[-1.0, 4.0]), Ok(-1.0));
        assert_eq!(max(&[-1.0, 4.0]), Ok(4.0));
    }

    #[test]
    fn test_arity_is_checked() {
        assert!(exp(&[]).is_err());
        assert!(abs(&[1.0, 2.0]).is_err());
        assert_eq!(abs(&[-2.5]), Ok(2.5));
    }
}
