/// Builds a [`Record`](crate::stmt::Record) from `name => value` pairs.
///
/// ```
/// # use cql_manager_core::record;
/// let record = record! { "id" => "a", "seq" => 1i32 };
/// assert_eq!(record.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::stmt::Record::new()
    };
    ( $( $name:expr => $value:expr ),+ $(,)? ) => {
        [ $( ($name.to_string(), $crate::stmt::Value::from($value)), )+ ]
            .into_iter()
            .collect::<$crate::stmt::Record>()
    };
}
