use super::{Formatter, ToCql};

use cql_manager_core::stmt;

/// Collects the values bound to a statement's `?` markers.
pub trait Params {
    fn push(&mut self, param: &stmt::Value) -> Placeholder;
}

/// Position (1-based) of a bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<stmt::Value> {
    fn push(&mut self, value: &stmt::Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl ToCql for Placeholder {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push('?');
    }
}
