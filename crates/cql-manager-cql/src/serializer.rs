#[macro_use]
mod fmt;
use fmt::ToCql;

mod delim;
use delim::{Comma, Delimited};

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod expr;
mod statement;

use cql_manager_core::{driver::Operation, schema::Model};

/// Serialize an operation to a CQL string
#[derive(Debug)]
pub struct Serializer<'a> {
    /// Model whose table the operation targets
    model: &'a Model,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized CQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl<'a> Serializer<'a> {
    pub fn new(model: &'a Model) -> Self {
        Self { model }
    }

    /// Renders `op` as a single CQL statement. Every value is replaced by a
    /// `?` bind marker and pushed to `params` in order.
    pub fn serialize(&self, op: &Operation, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        op.to_cql(&mut fmt);

        ret.push(';');
        ret
    }

    fn table_name(&self) -> Ident<&'a str> {
        Ident(&self.model.table)
    }
}
