//! Binary operator semantics, following script-engine coercion rules.
use crate::ast::BinaryOperator;
use crate::value::Operand;
use std::cmp::Ordering;

pub fn apply<'a>(op: BinaryOperator, left: Operand<'a>, right: Operand<'a>) -> Operand<'a> {
    match op {
        BinaryOperator::Or => {
            if left.is_truthy() {
                left
            } else {
                right
            }
        }
        BinaryOperator::And => {
            if left.is_truthy() {
                right
            } else {
                left
            }
        }
        BinaryOperator::Equals => Operand::Bool(loose_equals(&left, &right)),
        BinaryOperator::NotEquals => Operand::Bool(!loose_equals(&left, &right)),
        BinaryOperator::StrictEquals => Operand::Bool(strict_equals(&left, &right)),
        BinaryOperator::StrictNotEquals => Operand::Bool(!strict_equals(&left, &right)),
        BinaryOperator::LessThan => compare(&left, &right, |o| o == Ordering::Less),
        BinaryOperator::LessThanOrEqual => compare(&left, &right, |o| o != Ordering::Greater),
        BinaryOperator::GreaterThan => compare(&left, &right, |o| o == Ordering::Greater),
        BinaryOperator::GreaterThanOrEqual => compare(&left, &right, |o| o != Ordering::Less),
        BinaryOperator::Plus => add(&left, &right),
        BinaryOperator::Minus => Operand::Number(left.to_number() - right.to_number()),
        BinaryOperator::Multiply => Operand::Number(left.to_number() * right.to_number()),
        BinaryOperator::Divide => Operand::Number(left.to_number() / right.to_number()),
        BinaryOperator::Modulo => Operand::Number(left.to_number() % right.to_number()),
    }
}

/// `==`: nodes compare structurally with nodes, otherwise as their JSON text.
pub fn loose_equals(left: &Operand, right: &Operand) -> bool {
    match (left, right) {
        (Operand::Node(a), Operand::Node(b)) => a == b,
        (Operand::Node(_), _) | (_, Operand::Node(_)) => {
            loose_equals(&left.to_primitive(), &right.to_primitive())
        }
        (Operand::Null, Operand::Null) => true,
        (Operand::Null, _) | (_, Operand::Null) => false,
        (Operand::Bool(a), Operand::Bool(b)) => a == b,
        (Operand::Text(a), Operand::Text(b)) => a == b,
        _ => left.to_number() == right.to_number(),
    }
}

/// `===`: no coercion; operands of different kinds are never equal.
pub fn strict_equals(left: &Operand, right: &Operand) -> bool {
    match (left, right) {
        (Operand::Node(a), Operand::Node(b)) => a == b,
        (Operand::Null, Operand::Null) => true,
        (Operand::Bool(a), Operand::Bool(b)) => a == b,
        (Operand::Number(a), Operand::Number(b)) => a == b,
        (Operand::Text(a), Operand::Text(b)) => a == b,
        _ => false,
    }
}

fn compare<'a>(left: &Operand, right: &Operand, accept: impl Fn(Ordering) -> bool) -> Operand<'a> {
    let ordering = match (left.to_primitive(), right.to_primitive()) {
        (Operand::Text(a), Operand::Text(b)) => Some(a.cmp(&b)),
        (a, b) => a.to_number().partial_cmp(&b.to_number()),
    };
    Operand::Bool(ordering.is_some_and(accept))
}

fn add<'a>(left: &Operand, right: &Operand) -> Operand<'a> {
    let (left, right) = (left.to_primitive(), right.to_primitive());
    match (&left, &right) {
        (Operand::Text(_), _) | (_, Operand::Text(_)) => Operand::Text(format!("{}{}", left, right)),
        _ => Operand::Number(left.to_number() + right.to_number()),
    }
}
