//! JSON documents addressed with JSONPath (RFC 9535, via `serde_json_path`).

use hartig_core::value::Value;
use serde_json::Value as Json;
use serde_json_path::JsonPath;

use super::{QueryLanguage, SourceOperator};
use crate::traits::OpError;

pub struct JsonPathLanguage;

impl QueryLanguage for JsonPathLanguage {
    const CLASS: &'static str = "JsonSourceOperator";

    type Document = Json;
    type Query = JsonPath;

    fn compile(text: &str) -> Result<JsonPath, OpError> {
        JsonPath::parse(text).map_err(|source| OpError::Query {
            query: text.to_string(),
            source,
        })
    }

    fn iterate<'d>(document: &'d Json, query: &JsonPath) -> Vec<&'d Json> {
        query.query(document).all()
    }

    fn extract(context: &Json, query: &JsonPath) -> Vec<Value> {
        query
            .query(context)
            .into_iter()
            .map(Value::from_json)
            .collect()
    }
}

pub type JsonSourceOperator = SourceOperator<JsonPathLanguage>;
