use crate::{
    compile::SourceDirective,
    element::Element,
    request::{CompareOp, ComparePredicate, OrderByKey, OrderDirection, Predicate},
    row::{ProjectError, SequenceOps},
    value::{Value, canonical_cmp},
};
use std::cmp::Ordering;

///
/// NaiveOps
///
/// Test-only operator builder: evaluates forwarded directives directly
/// over in-memory elements. Real engines translate directives into
/// their own operator trees; this one exists so compiled plans can be
/// driven end-to-end in tests.
///

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct NaiveOps;

impl SequenceOps for NaiveOps {
    fn apply(
        &self,
        mut elements: Vec<Element>,
        directive: &SourceDirective,
    ) -> Result<Vec<Element>, ProjectError> {
        match directive {
            SourceDirective::Filter(predicate) => {
                elements.retain(|element| eval_predicate(predicate, element));
            }
            SourceDirective::OrderBy(keys) => {
                elements.sort_by(|left, right| order_cmp(keys, left, right));
            }
            SourceDirective::Skip(n) => {
                let n = usize::try_from(*n).unwrap_or(usize::MAX);
                if n < elements.len() {
                    elements.drain(..n);
                } else {
                    elements.clear();
                }
            }
            SourceDirective::Take(n) => {
                elements.truncate(usize::try_from(*n).unwrap_or(usize::MAX));
            }
        }

        Ok(elements)
    }
}

fn eval_predicate(predicate: &Predicate, element: &Element) -> bool {
    match predicate {
        Predicate::True => true,
        Predicate::False => false,
        Predicate::And(children) => children.iter().all(|child| eval_predicate(child, element)),
        Predicate::Or(children) => children.iter().any(|child| eval_predicate(child, element)),
        Predicate::Not(inner) => !eval_predicate(inner, element),
        Predicate::Compare(compare) => eval_compare(compare, element),
    }
}

fn eval_compare(compare: &ComparePredicate, element: &Element) -> bool {
    let Some(actual) = element.scalar(compare.member.member) else {
        return false;
    };

    match compare.op {
        CompareOp::Eq => actual == &compare.value,
        CompareOp::Ne => actual != &compare.value,
        CompareOp::Lt => canonical_cmp(actual, &compare.value) == Ordering::Less,
        CompareOp::Lte => canonical_cmp(actual, &compare.value) != Ordering::Greater,
        CompareOp::Gt => canonical_cmp(actual, &compare.value) == Ordering::Greater,
        CompareOp::Gte => canonical_cmp(actual, &compare.value) != Ordering::Less,
        CompareOp::In => match &compare.value {
            Value::List(values) => values.contains(actual),
            _ => false,
        },
        CompareOp::NotIn => match &compare.value {
            Value::List(values) => !values.contains(actual),
            _ => false,
        },
        CompareOp::Contains => text_pair(actual, &compare.value)
            .is_some_and(|(actual, expected)| actual.contains(expected)),
        CompareOp::StartsWith => text_pair(actual, &compare.value)
            .is_some_and(|(actual, expected)| actual.starts_with(expected)),
        CompareOp::EndsWith => text_pair(actual, &compare.value)
            .is_some_and(|(actual, expected)| actual.ends_with(expected)),
    }
}

fn text_pair<'v>(actual: &'v Value, expected: &'v Value) -> Option<(&'v str, &'v str)> {
    match (actual, expected) {
        (Value::Text(actual), Value::Text(expected)) => Some((actual, expected)),
        _ => None,
    }
}

fn order_cmp(keys: &[OrderByKey], left: &Element, right: &Element) -> Ordering {
    for key in keys {
        let left_value = left.scalar(key.member.member).unwrap_or(&Value::Null);
        let right_value = right.scalar(key.member.member).unwrap_or(&Value::Null);

        let cmp = match key.direction {
            OrderDirection::Asc => canonical_cmp(left_value, right_value),
            OrderDirection::Desc => canonical_cmp(right_value, left_value),
        };
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    Ordering::Equal
}
