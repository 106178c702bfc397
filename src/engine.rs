//! Query entry point: query text and decoded document in, selected value out.

use thiserror::Error;
use tracing::debug;

use crate::{
    document::Document,
    evaluator::{EvalError, Evaluator, MergeStrategy},
    parser::{self, ParseError},
    value::Value,
};

/// Errors returned by [`Engine::run`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The query text does not follow the grammar
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The document's top level is not an object
    #[error("unable to use the provided object: top-level value must be an object")]
    InvalidObject,

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// How multiple selected fields are merged into the result
    pub merge: MergeStrategy,
}

/// Runs queries against decoded documents.
///
/// Holds no per-query state; one engine can serve any number of runs.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Engine { options }
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Run `query` against `document`.
    ///
    /// Returns `Ok(None)` when the `where` condition does not hold.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldq::{Engine, Value};
    /// use std::collections::HashMap;
    ///
    /// let mut data = HashMap::new();
    /// data.insert("id".to_string(), Value::Integer(1));
    /// data.insert("name".to_string(), Value::String("Vincent".to_string()));
    /// let mut doc = HashMap::new();
    /// doc.insert("data".to_string(), Value::Object(data));
    ///
    /// let engine = Engine::default();
    /// let result = engine
    ///     .run(".data.name where (.data.id == 1)", &Value::Object(doc))
    ///     .unwrap();
    /// assert_eq!(result, Some(Value::String("Vincent".to_string())));
    /// ```
    pub fn run(&self, query: &str, document: &Value) -> Result<Option<Value>, Error> {
        let ast = parser::parse(query)?;
        debug!(query, "query parsed");

        let doc = Document::build(document).ok_or(Error::InvalidObject)?;
        debug!(nodes = doc.len(), "document built");

        let outcome = Evaluator::with_merge(self.options.merge).run(&ast, &doc)?;
        Ok(outcome.into_option())
    }

    /// Like [`Engine::run`], for documents decoded by serde_json.
    pub fn run_json(
        &self,
        query: &str,
        document: &serde_json::Value,
    ) -> Result<Option<serde_json::Value>, Error> {
        let document = Value::from(document.clone());
        Ok(self.run(query, &document)?.map(serde_json::Value::from))
    }
}

/// Run `query` against `document` with default options.
pub fn run(query: &str, document: &Value) -> Result<Option<Value>, Error> {
    Engine::default().run(query, document)
}
