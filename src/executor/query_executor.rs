use std::cmp::Ordering;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use crate::executor::{Filter, FilterBuilder, StoredObject, DEFAULT_SCORE};
use crate::query::{QueryError, QueryObject, Selector};
use crate::types::{Config, IdManager, TypeCatalog};

/// Result key for an unaliased `SCORE()`.
pub const SCORE_COLUMN: &str = "SEARCH_SCORE";

/// Runs resolved queries over objects held in memory.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    objects: IndexMap<String, StoredObject>,
    ids: IdManager,
}

impl Default for QueryExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryExecutor {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self { objects: IndexMap::new(), ids: IdManager::new(config.id_type, &config.id_prefix) }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&StoredObject> {
        self.objects.get(id)
    }

    /// Store an object, generating its id when empty. Returns the id.
    pub fn insert(&mut self, mut object: StoredObject) -> Result<String, QueryError> {
        if object.id.is_empty() {
            object.id = self.ids.next_id()
                .ok_or_else(|| QueryError::Processor(format!("Object of type {} has no id.", object.type_id)))?;
        }
        let id = object.id.clone();
        debug!("insert object {} of type {}", id, object.type_id);
        self.objects.insert(id.clone(), object);
        Ok(id)
    }

    /// Deserialize a JSON array of objects and insert them in order.
    pub fn load_from_json(&mut self, value: Value) -> Result<usize, QueryError> {
        let objects: Vec<StoredObject> = serde_json::from_value(value)
            .map_err(|e| QueryError::Processor(format!("Invalid objects: {e}")))?;
        let count = objects.len();
        for object in objects {
            self.insert(object)?;
        }
        Ok(count)
    }

    /// Parse, resolve and run `statement`.
    pub fn query(&self, statement: &str, catalog: &dyn TypeCatalog) -> Result<Vec<Value>, QueryError> {
        let query = QueryObject::analyze(statement, catalog)?;
        self.execute(&query)
    }

    pub fn execute(&self, query: &QueryObject) -> Result<Vec<Value>, QueryError> {
        if query.types().len() > 1 {
            return QueryError::Processor("JOINs are not supported.".into()).err();
        }
        let main = query.main_from_type().ok_or(QueryError::NoSourceType)?;
        let filter = FilterBuilder::build(query)?;
        let catalog = query.catalog();

        let mut matches: Vec<&StoredObject> = self.objects.values()
            .filter(|obj| catalog.is_subtype_of(&obj.type_id, main.id()))
            .filter(|obj| filter.as_ref().is_none_or(|f| f.matches(obj, &self.objects).is_true()))
            .collect();
        debug!("query on {} matched {} of {} objects", main.query_name(), matches.len(), self.objects.len());

        let order = query.order_by();
        if !order.is_empty() {
            matches.sort_by(|a, b| Self::compare_rows(a, b, &order));
        }

        let selected = query.select_references();
        Ok(matches.into_iter()
            .map(|obj| Self::project(obj, &selected, catalog))
            .collect())
    }

    fn sort_value(obj: &StoredObject, selector: &Selector) -> Value {
        match selector {
            Selector::Column(col) => col.property_id()
                .map(|id| obj.property(id).clone())
                .unwrap_or(Value::Null),
            Selector::Function(_) => Value::from(DEFAULT_SCORE),
        }
    }

    fn compare_rows(a: &StoredObject, b: &StoredObject, order: &[(&Selector, bool)]) -> Ordering {
        for (selector, ascending) in order {
            let (va, vb) = (Self::sort_value(a, selector), Self::sort_value(b, selector));
            let ord = match (va.is_null(), vb.is_null()) {
                (false, false) if !ascending => Filter::sort_order(&vb, &va),
                _ => Filter::sort_order(&va, &vb),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    fn project(obj: &StoredObject, selected: &[&Selector], catalog: &dyn TypeCatalog) -> Value {
        let mut row = Map::new();
        for selector in selected {
            match selector {
                Selector::Column(col) if col.is_wildcard() => {
                    let td = catalog.type_by_id(&obj.type_id);
                    for (id, value) in &obj.properties {
                        let key = td.and_then(|td| catalog.property_definition(td, id))
                            .map(|pd| pd.query_name().to_string())
                            .unwrap_or_else(|| id.clone());
                        row.insert(key, value.clone());
                    }
                }
                Selector::Column(col) => {
                    let key = col.alias_name.clone().unwrap_or_else(|| col.property_query_name.clone());
                    let value = col.property_id().map(|id| obj.property(id).clone()).unwrap_or(Value::Null);
                    row.insert(key, value);
                }
                Selector::Function(func) => {
                    let key = func.alias_name.clone().unwrap_or_else(|| SCORE_COLUMN.to_string());
                    row.insert(key, Value::from(DEFAULT_SCORE));
                }
            }
        }
        Value::Object(row)
    }
}
