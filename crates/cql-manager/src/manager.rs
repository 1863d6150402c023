use crate::{
    sanitize, to_safe_representation, Field, FieldKind, ManagerConfig, PageDescriptor,
    PagedQueryTranslator, QueryArgs,
};

use cql_manager_core::{
    driver::{
        operation::{DeleteByKey, Insert, Operation, Select, UpdateByKey},
        Driver,
    },
    err,
    schema::Model,
    stmt::{Attributes, Record, Value},
    Error, Result,
};
use cql_manager_cql::Serializer;

use serde_json::{Map, Value as Json};
use std::sync::Arc;

/// CRUD access to the records of one model.
///
/// One manager serves one resource type. It holds no mutable state, so a
/// single instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Manager {
    model: Arc<Model>,
    config: ManagerConfig,
    driver: Arc<dyn Driver>,
}

impl Manager {
    /// Creates a manager. An empty `fields` list in `config` exposes every
    /// column of the model.
    pub fn new(
        model: impl Into<Arc<Model>>,
        driver: Arc<dyn Driver>,
        mut config: ManagerConfig,
    ) -> Self {
        let model = model.into();

        if config.fields.is_empty() {
            config.fields = model
                .columns
                .iter()
                .map(|column| column.name.clone())
                .collect();
        }

        Self {
            model,
            config,
            driver,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn translator(&self) -> PagedQueryTranslator<'_> {
        PagedQueryTranslator::new(&self.model, &self.config)
    }

    /// Maps a column's store type to the field kind the API framework
    /// validates it as.
    pub fn get_field_type(&self, name: &str) -> Result<Field> {
        let column = self.model.expect_column(name)?;

        Ok(Field {
            name: column.name.clone(),
            kind: FieldKind::from_column_type(&column.ty),
        })
    }

    /// Creates a record from the creatable fields of `values` and returns it
    /// serialized, generated columns included.
    pub async fn create<I, K>(&self, values: I) -> Result<Map<String, Json>>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        log::info!("creating record; model={}", self.model.name);

        let values = sanitize(values, self.config.creatable());

        let mut record = Record::new();
        for column in &self.model.columns {
            let value = match values.get(&column.name) {
                Some(value) if !value.is_null() => value.clone().cast(&column.ty)?,
                _ => match column.auto {
                    Some(auto) => auto.generate(&column.ty)?,
                    None => Value::Null,
                },
            };
            record.insert(&column.name, value);
        }

        self.model
            .key_of(&record)
            .map_err(|e| e.context(err!("{}.create()", self.model.name)))?;

        let if_not_exists = self.config.fail_create_if_exists;
        if if_not_exists && !self.driver.capability().conditional_insert {
            return Err(Error::unsupported_feature(
                "conditional inserts are not supported by this driver",
            ));
        }

        // Unset columns are left out of the write
        let insert = Insert {
            values: record
                .iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            if_not_exists,
        };

        self.exec(insert.into()).await?;
        Ok(self.serialize_model(&record, None))
    }

    /// Returns the single record matching `lookup_keys`.
    pub async fn retrieve(&self, lookup_keys: &QueryArgs) -> Result<Map<String, Json>> {
        log::info!("retrieving record; model={}", self.model.name);

        let record = self.get_model(lookup_keys).await?;
        Ok(self.serialize_model(&record, None))
    }

    /// Returns one page of records matching `filters`, which may carry the
    /// page size and cursor arguments.
    pub async fn retrieve_list(
        &self,
        filters: QueryArgs,
    ) -> Result<(Vec<Map<String, Json>>, PageDescriptor)> {
        log::info!(
            "retrieving list; model={}; filters={}",
            self.model.name,
            filters
        );

        if self.config.allow_filtering {
            log::debug!("allowing filtering on list retrieval");
        }

        let (records, page) = self
            .translator()
            .paginate(self.driver.as_ref(), filters)
            .await?;

        let fields = self.config.listable();
        let records = records
            .iter()
            .map(|record| self.serialize_model(record, Some(fields)))
            .collect();

        Ok((records, page))
    }

    /// Applies the updatable fields of `updates` to the record matching
    /// `lookup_keys`. Other fields are ignored.
    pub async fn update<I, K>(
        &self,
        lookup_keys: &QueryArgs,
        updates: I,
    ) -> Result<Map<String, Json>>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        log::info!("updating record; model={}", self.model.name);

        let mut record = self.get_model(lookup_keys).await?;
        let updates = sanitize(updates, self.config.updatable());

        let mut assignments = Record::new();
        for (name, value) in updates {
            let column = self.model.expect_column(&name)?;
            let value = value.cast(&column.ty)?;

            // Rewriting a key column with its current value is a no-op
            if self.model.is_primary_key(&name) && record.get(&name) == Some(&value) {
                continue;
            }

            record.set(&name, value.clone());
            assignments.insert(name, value);
        }

        if !assignments.is_empty() {
            let update = UpdateByKey {
                key: self.key_record(&record)?,
                assignments,
            };
            self.exec(update.into()).await?;
        }

        Ok(self.serialize_model(&record, None))
    }

    /// Deletes the record matching `lookup_keys`.
    pub async fn delete(&self, lookup_keys: &QueryArgs) -> Result<Map<String, Json>> {
        log::info!("deleting record; model={}", self.model.name);

        let record = self.get_model(lookup_keys).await?;
        let delete = DeleteByKey {
            key: self.key_record(&record)?,
        };
        self.exec(delete.into()).await?;

        Ok(Map::new())
    }

    /// Projects `record` onto `fields` (the configured fields by default)
    /// as plain JSON.
    pub fn serialize_model(
        &self,
        record: &Record,
        fields: Option<&[String]>,
    ) -> Map<String, Json> {
        let fields = fields.unwrap_or(&self.config.fields);
        let projected = sanitize(
            record.iter().map(|(name, value)| (name.clone(), value.clone())),
            fields,
        );
        to_safe_representation(&projected)
    }

    /// Fetches the one record matching `lookup_keys`.
    async fn get_model(&self, lookup_keys: &QueryArgs) -> Result<Record> {
        let mut select = Select::new()
            .allow_filtering(self.config.allow_filtering)
            .limit(2);

        for (name, value) in lookup_keys {
            let column = self.model.expect_column(name)?;
            select = select.filter_eq(name, value.clone().cast(&column.ty)?);
        }

        let mut records = self.exec(select.into()).await?.into_values()?;

        match records.len() {
            1 => Ok(records.remove(0)),
            0 => Err(Error::record_not_found(format!(
                "model={}; lookup_keys={}",
                self.model.name, lookup_keys
            ))),
            _ => Err(Error::too_many_records(format!(
                "model={}; lookup_keys={}",
                self.model.name, lookup_keys
            ))),
        }
    }

    fn key_record(&self, record: &Record) -> Result<Record> {
        let key = self.model.key_of(record)?;

        Ok(self
            .model
            .primary_key_columns()
            .zip(key)
            .map(|(column, value)| (column.name.clone(), value))
            .collect())
    }

    async fn exec(&self, op: Operation) -> Result<cql_manager_core::driver::Response> {
        if log::log_enabled!(log::Level::Debug) {
            let mut params = vec![];
            let cql = Serializer::new(&self.model).serialize(&op, &mut params);
            log::debug!("exec; cql={cql}; params={params:?}");
        }

        self.driver.exec(&self.model, op).await
    }
}
