use super::{Comma, Delimited, Ident, Params, ToCql};

use cql_manager_core::{
    driver::operation::{DeleteByKey, Insert, Operation, Select, UpdateByKey},
    stmt::{Expr, Record, Value},
};

impl ToCql for &Operation {
    fn to_cql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            Operation::Select(stmt) => stmt.to_cql(f),
            Operation::Insert(stmt) => stmt.to_cql(f),
            Operation::Update(stmt) => stmt.to_cql(f),
            Operation::Delete(stmt) => stmt.to_cql(f),
        }
    }
}

impl ToCql for &Select {
    fn to_cql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let model = f.serializer.model;
        let columns = Comma(model.columns.iter().map(|column| Ident(&column.name)));
        let table_name = f.serializer.table_name();

        fmt!(f, "SELECT " columns " FROM " table_name);

        if !self.filter.is_empty() {
            fmt!(f, " WHERE " Delimited(&self.filter, " AND "));
        }

        if !self.order_by.is_empty() {
            fmt!(f, " ORDER BY " Comma(&self.order_by));
        }

        if let Some(limit) = self.limit {
            fmt!(f, " LIMIT " limit);
        }

        if self.allow_filtering {
            fmt!(f, " ALLOW FILTERING");
        }
    }
}

impl ToCql for &Insert {
    fn to_cql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table_name = f.serializer.table_name();
        let columns = Comma(self.values.names().map(Ident));
        let values = Comma(self.values.iter().map(|(_, value)| Bind(value)));

        fmt!(f, "INSERT INTO " table_name " (" columns ") VALUES (" values ")");

        if self.if_not_exists {
            fmt!(f, " IF NOT EXISTS");
        }
    }
}

impl ToCql for &UpdateByKey {
    fn to_cql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table_name = f.serializer.table_name();

        let assignments = Comma(
            self.assignments
                .iter()
                .map(|(name, value)| Assignment(name, value)),
        );

        fmt!(f, "UPDATE " table_name " SET " assignments " WHERE " KeyFilter(&self.key));
    }
}

impl ToCql for &DeleteByKey {
    fn to_cql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table_name = f.serializer.table_name();

        fmt!(f, "DELETE FROM " table_name " WHERE " KeyFilter(&self.key));
    }
}

/// A value rendered as a bind marker.
struct Bind<'a>(&'a Value);

impl ToCql for Bind<'_> {
    fn to_cql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let placeholder = f.params.push(self.0);
        fmt!(f, placeholder);
    }
}

/// `"col" = ?`
struct Assignment<'a>(&'a str, &'a Value);

impl ToCql for Assignment<'_> {
    fn to_cql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, Ident(self.0) " = " Bind(self.1));
    }
}

/// Conjunction of equalities on the primary key columns.
struct KeyFilter<'a>(&'a Record);

impl ToCql for KeyFilter<'_> {
    fn to_cql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let filter: Vec<Expr> = self
            .0
            .iter()
            .map(|(name, value)| Expr::eq(Expr::column(name), value))
            .collect();

        fmt!(f, Delimited(&filter, " AND "));
    }
}
