//! The evaluator for parsed filter expressions.
use crate::ast::{BinaryOperator, Expression, UnaryOperator};
use crate::bindings::{Bindings, VALUE_VARIABLE, default_bindings};
use crate::cache::RegexCache;
use crate::error::FilterError;
use crate::functions::FunctionRegistry;
use crate::value::Operand;
use crate::{methods, operators};
use serde_json::Value;

const DEFAULT_REGEX_CACHE_CAPACITY: usize = 64;

/// Everything a filter can see besides the candidate itself.
#[derive(Debug, Clone)]
pub struct Environment {
    pub functions: FunctionRegistry,
    pub bindings: Bindings,
    regexes: RegexCache,
}

impl Environment {
    pub fn new(functions: FunctionRegistry, bindings: Bindings) -> Self {
        Self {
            functions,
            bindings,
            regexes: RegexCache::new(DEFAULT_REGEX_CACHE_CAPACITY),
        }
    }

    pub fn with_regex_cache_capacity(mut self, capacity: usize) -> Self {
        self.regexes = RegexCache::new(capacity);
        self
    }

    pub fn regexes(&self) -> &RegexCache {
        &self.regexes
    }
}

impl Default for Environment {
    /// The built-in functions and the character-class constants.
    fn default() -> Self {
        Self::new(FunctionRegistry::default(), default_bindings())
    }
}

/// The state passed down during evaluation of one candidate.
pub struct EvaluationContext<'a> {
    pub value: &'a Value,
    pub environment: &'a Environment,
}

impl<'a> EvaluationContext<'a> {
    fn lookup(&self, name: &str) -> Result<Operand<'a>, FilterError> {
        if name == VALUE_VARIABLE {
            return Ok(Operand::Node(self.value));
        }
        self.environment
            .bindings
            .get(name)
            .map(Operand::from_binding)
            .ok_or_else(|| FilterError::UnknownVariable(name.to_string()))
    }
}

/// Evaluates an expression to an operand.
pub fn evaluate<'a>(expr: &Expression, e_ctx: &EvaluationContext<'a>) -> Result<Operand<'a>, FilterError> {
    match expr {
        Expression::Literal(literal) => Ok(Operand::from(literal)),
        Expression::Variable(name) => e_ctx.lookup(name),
        Expression::FunctionCall { name, args } => {
            let func = e_ctx
                .environment
                .functions
                .get(name)
                .ok_or_else(|| FilterError::UnknownFunction(name.clone()))?;
            let evaluated_args = evaluate_all(args, e_ctx)?;
            func(evaluated_args)
        }
        Expression::Member { receiver, name, args } => {
            let receiver = evaluate(receiver, e_ctx)?;
            let args = args.as_deref().map(|args| evaluate_all(args, e_ctx)).transpose()?;
            methods::call(receiver, name, args, e_ctx.environment.regexes())
        }
        Expression::Index { receiver, index } => {
            let receiver = evaluate(receiver, e_ctx)?;
            let index = evaluate(index, e_ctx)?;
            methods::index(receiver, index)
        }
        Expression::UnaryOp { op, expr } => {
            let operand = evaluate(expr, e_ctx)?;
            Ok(match op {
                UnaryOperator::Not => Operand::Bool(!operand.is_truthy()),
                UnaryOperator::Minus => Operand::Number(-operand.to_number()),
            })
        }
        Expression::BinaryOp { left, op, right } => {
            let left = evaluate(left, e_ctx)?;
            // Short-circuit: the right side is not evaluated when the left decides.
            match op {
                BinaryOperator::And if !left.is_truthy() => return Ok(left),
                BinaryOperator::Or if left.is_truthy() => return Ok(left),
                _ => {}
            }
            let right = evaluate(right, e_ctx)?;
            Ok(operators::apply(*op, left, right))
        }
    }
}

/// Evaluates an expression as a predicate. Only a boolean `true` accepts.
pub fn evaluate_predicate(expr: &Expression, e_ctx: &EvaluationContext) -> Result<bool, FilterError> {
    match evaluate(expr, e_ctx)? {
        Operand::Bool(b) => Ok(b),
        other => {
            log::debug!(
                "Filter produced a {} instead of a boolean; treating it as no match",
                other.type_name()
            );
            Ok(false)
        }
    }
}

fn evaluate_all<'a>(args: &[Expression], e_ctx: &EvaluationContext<'a>) -> Result<Vec<Operand<'a>>, FilterError> {
    args.iter().map(|arg| evaluate(arg, e_ctx)).collect()
}
