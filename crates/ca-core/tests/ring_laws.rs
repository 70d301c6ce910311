//! Ring-law properties of `Element` arithmetic: commutativity, associativity,
//! distributivity, identities and inverses, checked over the rationals and
//! over single-generator algebraic fields.
//!
//! `arith::inv` computes exact inverses for `NumberField` elements too, via
//! extended Euclid against the field's minimal polynomial, so the
//! multiplicative-inverse law is checked for algebraic roots as well as
//! rationals below.

use ca_core::context::Context;
use ca_core::element::Element;
use ca_core::field::QQ;
use ca_core::number::QRat;
use ca_core::{arith, functions};

fn q(n: i64, d: i64) -> Element {
    Element::rational(QQ, QRat::from((n, d)))
}

// ---------------------------------------------------------------------------
// Rationals
// ---------------------------------------------------------------------------

#[test]
fn addition_is_commutative_over_rationals() {
    let mut ctx = Context::new();
    let a = q(2, 3);
    let b = q(-5, 7);
    assert!(arith::equals(&mut ctx, &arith::add(&mut ctx, &a, &b), &arith::add(&mut ctx, &b, &a)));
}

#[test]
fn multiplication_is_commutative_over_rationals() {
    let mut ctx = Context::new();
    let a = q(4, 9);
    let b = q(-2, 5);
    assert!(arith::equals(&mut ctx, &arith::mul(&mut ctx, &a, &b), &arith::mul(&mut ctx, &b, &a)));
}

#[test]
fn addition_is_associative_over_rationals() {
    let mut ctx = Context::new();
    let a = q(1, 2);
    let b = q(1, 3);
    let c = q(1, 5);
    let left = arith::add(&mut ctx, &arith::add(&mut ctx, &a, &b), &c);
    let right = arith::add(&mut ctx, &a, &arith::add(&mut ctx, &b, &c));
    assert!(arith::equals(&mut ctx, &left, &right));
}

#[test]
fn multiplication_is_associative_over_rationals() {
    let mut ctx = Context::new();
    let a = q(2, 3);
    let b = q(5, 7);
    let c = q(-3, 4);
    let left = arith::mul(&mut ctx, &arith::mul(&mut ctx, &a, &b), &c);
    let right = arith::mul(&mut ctx, &a, &arith::mul(&mut ctx, &b, &c));
    assert!(arith::equals(&mut ctx, &left, &right));
}

#[test]
fn multiplication_distributes_over_addition() {
    let mut ctx = Context::new();
    let a = q(3, 2);
    let b = q(1, 4);
    let c = q(-1, 3);
    let left = arith::mul(&mut ctx, &a, &arith::add(&mut ctx, &b, &c));
    let right = arith::add(&mut ctx, &arith::mul(&mut ctx, &a, &b), &arith::mul(&mut ctx, &a, &c));
    assert!(arith::equals(&mut ctx, &left, &right));
}

#[test]
fn zero_is_the_additive_identity() {
    let mut ctx = Context::new();
    let a = q(7, 11);
    let zero = q(0, 1);
    assert!(arith::equals(&mut ctx, &arith::add(&mut ctx, &a, &zero), &a));
}

#[test]
fn one_is_the_multiplicative_identity() {
    let mut ctx = Context::new();
    let a = q(7, 11);
    let one = q(1, 1);
    assert!(arith::equals(&mut ctx, &arith::mul(&mut ctx, &a, &one), &a));
}

#[test]
fn negation_is_the_additive_inverse() {
    let mut ctx = Context::new();
    let a = q(13, 17);
    let sum = arith::add(&mut ctx, &a, &arith::neg(&a));
    assert!(arith::is_zero(&ctx, &sum));
}

#[test]
fn reciprocal_is_the_multiplicative_inverse_for_nonzero_rationals() {
    let mut ctx = Context::new();
    let a = q(13, 17);
    let a_inv = arith::inv(&ctx, &a);
    let product = arith::mul(&mut ctx, &a, &a_inv);
    assert!(arith::is_one(&product));
}

#[test]
fn reciprocal_is_the_multiplicative_inverse_for_an_algebraic_root() {
    let mut ctx = Context::new();
    let root = functions::sqrt(&mut ctx, &q(3, 1));
    let root_inv = arith::inv(&ctx, &root);
    let product = arith::mul(&mut ctx, &root, &root_inv);
    assert!(arith::is_one(&product));
}

#[test]
fn division_then_multiplication_round_trips_for_rationals() {
    let mut ctx = Context::new();
    let a = q(22, 7);
    let b = q(-3, 5);
    let quotient = arith::div(&mut ctx, &a, &b);
    let back = arith::mul(&mut ctx, &quotient, &b);
    assert!(arith::equals(&mut ctx, &back, &a));
}

#[test]
fn subtraction_is_addition_of_the_negation() {
    let mut ctx = Context::new();
    let a = q(5, 6);
    let b = q(1, 6);
    assert!(arith::equals(&mut ctx, &arith::sub(&mut ctx, &a, &b), &arith::add(&mut ctx, &a, &arith::neg(&b))));
}

#[test]
fn pow_u32_matches_repeated_multiplication() {
    let mut ctx = Context::new();
    let a = q(3, 2);
    let cubed = arith::pow_u32(&mut ctx, &a, 3);
    let by_hand = arith::mul(&mut ctx, &arith::mul(&mut ctx, &a, &a), &a);
    assert!(arith::equals(&mut ctx, &cubed, &by_hand));
}

#[test]
fn pow_u32_zero_is_one() {
    let mut ctx = Context::new();
    let a = q(5, 9);
    assert!(arith::is_one(&arith::pow_u32(&mut ctx, &a, 0)));
}

// ---------------------------------------------------------------------------
// Single-generator algebraic fields
// ---------------------------------------------------------------------------

#[test]
fn addition_is_commutative_for_algebraic_elements() {
    let mut ctx = Context::new();
    let a = functions::sqrt(&mut ctx, &q(2, 1));
    let b = functions::sqrt(&mut ctx, &q(3, 1));
    let left = arith::add(&mut ctx, &a, &b);
    let right = arith::add(&mut ctx, &b, &a);
    assert!(arith::equals(&mut ctx, &left, &right));
}

#[test]
fn squaring_a_root_recovers_the_radicand() {
    let mut ctx = Context::new();
    let two = q(2, 1);
    let root = functions::sqrt(&mut ctx, &two);
    let squared = arith::mul(&mut ctx, &root, &root);
    assert!(arith::equals(&mut ctx, &squared, &two));
}

#[test]
fn negative_of_a_root_is_its_additive_inverse() {
    let mut ctx = Context::new();
    let root = functions::sqrt(&mut ctx, &q(5, 1));
    let sum = arith::add(&mut ctx, &root, &arith::neg(&root));
    assert!(arith::is_zero(&ctx, &sum));
}

#[test]
fn algebraic_addition_distributes_with_a_rational_scalar() {
    let mut ctx = Context::new();
    let root = functions::sqrt(&mut ctx, &q(7, 1));
    let scalar = q(4, 1);
    let sum = arith::add(&mut ctx, &root, &root);
    let scaled_sum = arith::mul(&mut ctx, &scalar, &sum);
    let scaled_twice = arith::add(
        &mut ctx,
        &arith::mul(&mut ctx, &scalar, &root),
        &arith::mul(&mut ctx, &scalar, &root),
    );
    assert!(arith::equals(&mut ctx, &scaled_sum, &scaled_twice));
}

#[test]
fn i_squared_is_negative_one() {
    let mut ctx = Context::new();
    let i = functions::sqrt(&mut ctx, &q(-1, 1));
    let squared = arith::mul(&mut ctx, &i, &i);
    assert!(arith::equals(&mut ctx, &squared, &q(-1, 1)));
}
