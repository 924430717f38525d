use num_traits::Zero;
use sturm_roots::config;
use sturm_roots::prelude::*;

fn poly(coefficients: &[f64]) -> Polynomial {
    Polynomial::try_from(coefficients).unwrap()
}

#[test]
fn quadratics_from_the_documentation() {
    let tolerance = Tolerance::default();
    assert_eq!(Ok(2), count_positive_roots(&poly(&[1.0, -3.0, 2.0]), tolerance));
    assert_eq!(Ok(1), count_positive_roots(&poly(&[1.0, 1.0, -2.0]), tolerance));
    assert_eq!(Ok(0), count_positive_roots(&poly(&[1.0, 0.0, 1.0]), tolerance));
}

#[test]
fn characteristic_polynomial_of_stable_system_has_no_positive_roots() {
    // (x + 1)(x + 2)(x + 3)
    let p = poly(&[1.0, 6.0, 11.0, 6.0]);
    assert_eq!(Ok(0), p.count_positive_roots(Tolerance::default()));

    // (x + 1)(x - 0.5)(x^2 + x + 1)
    let q = poly(&[1.0, 1.0]) * poly(&[1.0, -0.5]) * poly(&[1.0, 1.0, 1.0]);
    assert_eq!(Ok(1), q.count_positive_roots(Tolerance::default()));
}

#[test]
fn failures_propagate_to_the_caller() {
    let tolerance = Tolerance::default();

    let err = poly(&[1.0, 2.0, 3.0]).remainder(&poly(&[0.0, 5.0]), tolerance);
    assert!(matches!(err, Err(PolynomialError::DivisionByZero { .. })));

    let err = count_positive_roots(&poly(&[5.0]), tolerance);
    assert_eq!(Err(PolynomialError::DegenerateInput { length: 1 }), err);

    let err = poly(&[5.0]).derivative();
    assert_eq!(Err(PolynomialError::InvalidDegree), err);
}

#[test]
fn errors_have_readable_messages() {
    let err = poly(&[1.0]).remainder(&poly(&[0.0, 1.0]), Tolerance::EXACT);
    let message = err.unwrap_err().to_string();
    assert!(message.contains("leading coefficient"), "{message}");
}

#[test]
fn division_identity_holds_for_documented_example() {
    let u = poly(&[3.0, -2.0, 0.0, 7.0, 1.0]);
    let v = poly(&[2.0, 1.0, -1.0]);
    let (quotient, remainder) = u.divide(&v, Tolerance::default()).unwrap();

    assert_eq!(2, quotient.degree());
    assert!(remainder.degree() < v.degree());
    let recombined = quotient * v + remainder;
    assert!(u.approx_eq(&recombined, Tolerance::new(1e-12).unwrap()));
}

#[test]
fn tolerance_is_configurable_per_thread() {
    let handle = std::thread::spawn(|| {
        config::set_remainder_tolerance(0.5).unwrap();
        let tolerance = Tolerance::default();

        // (x^2 + 0.1x - 1) mod x^2: with a coarse tolerance, the
        // remainder's linear term is dropped
        let u = poly(&[1.0, 0.1, -1.0]);
        let v = poly(&[1.0, 0.0, 0.0]);
        u.remainder(&v, tolerance).unwrap()
    });
    let remainder = handle.join().unwrap();
    assert_eq!([-1.0], remainder.coefficients());
}

#[test]
fn sturm_sequence_is_exposed_for_inspection() {
    let sequence = build_sturm_sequence(&poly(&[1.0, 1.0, -2.0]), Tolerance::default()).unwrap();
    assert_eq!(3, sequence.len());
    assert_eq!(1, sequence.sign_changes_at_zero());
    assert_eq!(0, sequence.sign_changes_at_infinity());

    let polynomials = sequence.into_polynomials();
    assert!(!polynomials.last().unwrap().is_zero());
}

#[test]
fn independent_polynomials_can_be_counted_in_parallel() {
    let handles = (1..=4)
        .map(|num_positive_roots| {
            std::thread::spawn(move || {
                let p = (0..num_positive_roots)
                    .map(|i| poly(&[1.0, -f64::from(i + 1)]))
                    .fold(poly(&[1.0, 10.0]), |acc, factor| acc * factor);
                let tolerance = Tolerance::new(1e-9).unwrap();
                (num_positive_roots, p.count_positive_roots(tolerance))
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let (expected, count) = handle.join().unwrap();
        assert_eq!(Ok(expected as usize), count);
    }
}
