//! Ad-hoc query facade over a fixed station set
//!
//! A schema is built for every request around the stations that request
//! already resolved. It exposes one root field, `list`, returning those
//! stations unchanged; the caller's query only selects fields from them.
//! Building per request costs a schema construction each time and keeps the
//! facade free of shared state.

use std::{fmt, sync::Arc};

use async_graphql::{
    Number, Request, Value, Variables,
    dynamic::{Field, FieldFuture, FieldValue, Object, Schema, TypeRef},
};
use domain::Station;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{ApplicationError, QueryError, SourceLocation};

const ROOT_QUERY: &str = "RootQuery";
const STATION_TYPE: &str = "Station";
const LIST_FIELD: &str = "list";

/// A caller-supplied query
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryDocument {
    pub query: String,
    /// Operation to run when the document defines several
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub variables: Option<serde_json::Map<String, serde_json::Value>>,
}

impl QueryDocument {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    #[must_use]
    pub fn with_variables(mut self, variables: serde_json::Map<String, serde_json::Value>) -> Self {
        self.variables = Some(variables);
        self
    }
}

/// Outcome of an executed query
///
/// Execution-time faults are carried in `errors` next to whatever data was
/// resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub data: serde_json::Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<QueryError>,
}

/// Request-scoped schema wrapping a captured station sequence
pub struct StationSchema {
    schema: Schema,
    station_count: usize,
}

impl fmt::Debug for StationSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StationSchema")
            .field("station_count", &self.station_count)
            .finish_non_exhaustive()
    }
}

/// Non-finite coordinates have no GraphQL representation and fail the field
fn float(field: &str, value: f64) -> async_graphql::Result<Value> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| async_graphql::Error::new(format!("{field} is not a finite number")))
}

fn station_field(
    name: &'static str,
    type_name: &'static str,
    read: fn(&Station) -> async_graphql::Result<Value>,
) -> Field {
    Field::new(name, TypeRef::named(type_name), move |ctx| {
        FieldFuture::new(async move {
            let station = ctx.parent_value.try_downcast_ref::<Station>()?;
            read(station).map(Some)
        })
    })
}

impl StationSchema {
    /// Build a schema whose `list` field resolves to `stations`
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Internal` if the schema fails to assemble
    pub fn build(stations: Vec<Station>) -> Result<Self, ApplicationError> {
        let station_count = stations.len();
        let stations: Arc<[Station]> = stations.into();

        let station_type = Object::new(STATION_TYPE)
            .field(station_field("station_id", TypeRef::INT, |s| {
                Ok(Value::Number(Number::from(s.id.as_i64())))
            }))
            .field(station_field("name", TypeRef::STRING, |s| {
                Ok(Value::String(s.name.clone()))
            }))
            .field(station_field("lat", TypeRef::FLOAT, |s| float("lat", s.latitude)))
            .field(station_field("lng", TypeRef::FLOAT, |s| float("lng", s.longitude)))
            .field(station_field("provider", TypeRef::STRING, |s| {
                Ok(Value::String(s.provider.clone()))
            }));

        let root = Object::new(ROOT_QUERY).field(Field::new(
            LIST_FIELD,
            TypeRef::named_list(STATION_TYPE),
            move |_| {
                let stations = Arc::clone(&stations);
                FieldFuture::new(async move {
                    Ok(Some(FieldValue::list(
                        stations.iter().cloned().map(FieldValue::owned_any),
                    )))
                })
            },
        ));

        let schema = Schema::build(ROOT_QUERY, None, None)
            .register(station_type)
            .register(root)
            .finish()
            .map_err(|e| ApplicationError::Internal(format!("Failed to build query schema: {e}")))?;

        Ok(Self {
            schema,
            station_count,
        })
    }

    /// Schema definition in SDL form
    #[must_use]
    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }

    /// Run a query document against this schema
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::QueryDocument` when the document does not
    /// parse or validate, including an unknown operation name
    #[instrument(skip(self, document), fields(stations = self.station_count))]
    pub async fn execute(&self, document: QueryDocument) -> Result<QueryResult, ApplicationError> {
        let mut request = Request::new(document.query);
        if let Some(operation) = document.operation.filter(|op| !op.is_empty()) {
            request = request.operation_name(operation);
        }
        if let Some(variables) = document.variables {
            request = request.variables(Variables::from_json(serde_json::Value::Object(variables)));
        }

        let response = self.schema.execute(request).await;

        let errors: Vec<QueryError> = response
            .errors
            .into_iter()
            .map(|err| QueryError {
                message: err.message,
                locations: err
                    .locations
                    .into_iter()
                    .map(|pos| SourceLocation {
                        line: pos.line,
                        column: pos.column,
                    })
                    .collect(),
            })
            .collect();

        if matches!(response.data, Value::Null) && !errors.is_empty() {
            debug!(count = errors.len(), "Query document rejected");
            return Err(ApplicationError::QueryDocument(errors));
        }

        let data = response
            .data
            .into_json()
            .map_err(|e| ApplicationError::Internal(format!("Failed to encode query result: {e}")))?;

        Ok(QueryResult { data, errors })
    }
}

/// Entry point used by the HTTP layer
#[derive(Debug, Clone, Copy, Default)]
pub struct StationQueryFacade;

impl StationQueryFacade {
    /// Build a request-scoped schema over `stations`
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Internal` if the schema fails to assemble
    pub fn build_schema(stations: Vec<Station>) -> Result<StationSchema, ApplicationError> {
        StationSchema::build(stations)
    }

    /// Build a schema over `stations` and execute `document` against it
    ///
    /// # Errors
    ///
    /// See [`StationSchema::execute`]
    pub async fn run(
        stations: Vec<Station>,
        document: QueryDocument,
    ) -> Result<QueryResult, ApplicationError> {
        Self::build_schema(stations)?.execute(document).await
    }
}
