use super::{Formatter, Params, ToCql};

/// A double-quoted identifier. Quoting keeps the name's case and lets
/// reserved words be used as column names.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToCql for Ident<S> {
    fn to_cql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push('"');
        for ch in self.0.as_ref().chars() {
            if ch == '"' {
                f.dst.push('"');
            }
            f.dst.push(ch);
        }
        f.dst.push('"');
    }
}
