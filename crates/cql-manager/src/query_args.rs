use cql_manager_core::stmt::Value;

use indexmap::IndexMap;
use std::fmt;

/// Request arguments: filters plus the pagination controls.
///
/// Insertion ordered, so continuation tokens built from it are stable. A
/// name given more than once holds a list of its values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QueryArgs {
    args: IndexMap<String, Value>,
}

impl QueryArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the `key=value&key=value` form of a continuation token.
    ///
    /// Values are kept as strings; they are cast to column types when the
    /// query is built. A repeated key collects its values into a list, in
    /// order.
    ///
    /// ```
    /// # use cql_manager::{QueryArgs, Value};
    /// let args = QueryArgs::parse("count=2&sensor=a&page=a&page=3");
    ///
    /// assert_eq!(args.get("count"), Some(&Value::from("2")));
    /// assert_eq!(
    ///     args.get("page"),
    ///     Some(&Value::List(vec![Value::from("a"), Value::from("3")]))
    /// );
    /// ```
    pub fn parse(src: &str) -> QueryArgs {
        let mut args = QueryArgs::new();

        for pair in src.split('&').filter(|pair| !pair.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            args.append(name, Value::from(value));
        }

        args
    }

    /// Sets `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.args.insert(name.into(), value.into())
    }

    /// Adds a value for `name`, turning the entry into a list if the name
    /// is already set.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let value = value.into();

        match self.args.entry(name.into()) {
            indexmap::map::Entry::Occupied(mut entry) => match entry.get_mut() {
                Value::List(items) => items.push(value),
                existing => {
                    let first = std::mem::take(existing);
                    *existing = Value::List(vec![first, value]);
                }
            },
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    /// Removes `name`, preserving the order of the remaining arguments.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.args.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.args.iter()
    }
}

/// Renders the token form. Lists expand to one `name=item` pair per item.
impl fmt::Display for QueryArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = "";
        for (name, value) in &self.args {
            match value {
                Value::List(items) => {
                    for item in items {
                        write!(f, "{s}{name}={item}")?;
                        s = "&";
                    }
                }
                value => {
                    write!(f, "{s}{name}={value}")?;
                    s = "&";
                }
            }
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for QueryArgs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            args: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl From<IndexMap<String, Value>> for QueryArgs {
    fn from(args: IndexMap<String, Value>) -> Self {
        Self { args }
    }
}

impl<'a> IntoIterator for &'a QueryArgs {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.iter()
    }
}
