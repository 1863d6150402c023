use serde::Deserialize;

/// Per-resource manager settings.
///
/// Deserializable so resources can be configured from JSON; missing keys
/// take their default.
///
/// ```
/// # use cql_manager::ManagerConfig;
/// let config: ManagerConfig = serde_json::from_str(r#"{
///     "fields": ["id", "first_name"],
///     "paginate_by": 25
/// }"#).unwrap();
///
/// assert_eq!(config.paginate_by, 25);
/// assert!(config.fail_create_if_exists);
/// assert_eq!(config.listable(), ["id", "first_name"]);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Fields exposed by serialization. Empty means every model column.
    pub fields: Vec<String>,

    /// Fields accepted by `create`. Empty means `fields`.
    pub create_fields: Vec<String>,

    /// Fields accepted by `update`. Empty means `fields`.
    pub update_fields: Vec<String>,

    /// Fields exposed by `retrieve_list`. Empty means `fields`.
    pub list_fields: Vec<String>,

    /// Clustering order override, `"column"` or `"-column"`.
    pub order_by: Option<String>,

    /// Let list and lookup queries filter on non-key columns.
    pub allow_filtering: bool,

    /// Make `create` fail instead of overwriting an existing record.
    pub fail_create_if_exists: bool,

    /// Page size when the request does not name one.
    pub paginate_by: u64,

    /// Query argument carrying the cursor, one entry per key column.
    pub pagination_pk_query_arg: String,

    /// Query argument carrying the page size.
    pub pagination_count_query_arg: String,

    /// Metadata key of the continuation token.
    pub pagination_next: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            fields: vec![],
            create_fields: vec![],
            update_fields: vec![],
            list_fields: vec![],
            order_by: None,
            allow_filtering: false,
            fail_create_if_exists: true,
            paginate_by: 10000,
            pagination_pk_query_arg: "page".to_string(),
            pagination_count_query_arg: "count".to_string(),
            pagination_next: "next".to_string(),
        }
    }
}

impl ManagerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn create_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.create_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn update_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn list_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn allow_filtering(mut self, allow_filtering: bool) -> Self {
        self.allow_filtering = allow_filtering;
        self
    }

    pub fn fail_create_if_exists(mut self, fail_create_if_exists: bool) -> Self {
        self.fail_create_if_exists = fail_create_if_exists;
        self
    }

    pub fn paginate_by(mut self, paginate_by: u64) -> Self {
        self.paginate_by = paginate_by;
        self
    }

    pub fn pagination_pk_query_arg(mut self, name: impl Into<String>) -> Self {
        self.pagination_pk_query_arg = name.into();
        self
    }

    pub fn pagination_count_query_arg(mut self, name: impl Into<String>) -> Self {
        self.pagination_count_query_arg = name.into();
        self
    }

    pub fn pagination_next(mut self, name: impl Into<String>) -> Self {
        self.pagination_next = name.into();
        self
    }

    pub fn creatable(&self) -> &[String] {
        or_fields(&self.create_fields, &self.fields)
    }

    pub fn updatable(&self) -> &[String] {
        or_fields(&self.update_fields, &self.fields)
    }

    pub fn listable(&self) -> &[String] {
        or_fields(&self.list_fields, &self.fields)
    }
}

fn or_fields<'a>(list: &'a [String], fields: &'a [String]) -> &'a [String] {
    if list.is_empty() {
        fields
    } else {
        list
    }
}
