use std::collections::HashMap;

use serde_json::Value as JsonValue;

use super::params::ParamStore;
use crate::db::Row;

/// State threaded through one request's pipeline and dropped with it.
pub struct RequestContext {
    pub params: ParamStore,
    path: HashMap<String, String>,
    body: JsonValue,
    records: HashMap<&'static str, Row>,
    collections: HashMap<&'static str, Vec<Row>>,
}

impl RequestContext {
    pub fn new(path: HashMap<String, String>, body: JsonValue) -> Self {
        Self {
            params: ParamStore::new(),
            path,
            body,
            records: HashMap::new(),
            collections: HashMap::new(),
        }
    }

    /// Builds a context from a raw request body. An empty or unparsable body
    /// becomes `null` and is rejected later by validation.
    pub fn from_raw(path: HashMap<String, String>, body: &[u8]) -> Self {
        let body = serde_json::from_slice(body).unwrap_or(JsonValue::Null);
        Self::new(path, body)
    }

    pub fn path_value(&self, name: &str) -> Option<&str> {
        self.path.get(name).map(String::as_str)
    }

    pub fn body(&self) -> &JsonValue {
        &self.body
    }

    pub fn attach(&mut self, slot: &'static str, row: Row) {
        self.records.insert(slot, row);
    }

    pub fn record(&self, slot: &str) -> Option<&Row> {
        self.records.get(slot)
    }

    pub fn attach_all(&mut self, slot: &'static str, rows: Vec<Row>) {
        self.collections.insert(slot, rows);
    }

    pub fn records(&self, slot: &str) -> Option<&[Row]> {
        self.collections.get(slot).map(Vec::as_slice)
    }
}
