//! Declarative form validation.
//!
//! A [`Schema`] lists the rules each field must satisfy. Field-level checks run
//! synchronously inside the reducer; whole-form and multi-entity checks run
//! as effects so a batch of forms can be validated concurrently.

use std::borrow::Cow;

use futures::future::join_all;

use etl_console_domain::{
    Database, DatabaseField, DatabaseRequest, EntityField, ErrorMap, LocalId, Mapping,
    MappingField, MappingRequest,
};

use crate::messages::{FIELD_REQUIRED, WHOLE_NUMBER_REQUIRED};

/// Read access to an entity's raw field text.
pub trait FieldSource<F> {
    fn field_text(&self, field: F) -> Cow<'_, str>;
}

impl FieldSource<MappingField> for Mapping {
    fn field_text(&self, field: MappingField) -> Cow<'_, str> {
        Cow::Owned(self.field_value(field))
    }
}

impl FieldSource<DatabaseField> for Database {
    fn field_text(&self, field: DatabaseField) -> Cow<'_, str> {
        Cow::Borrowed(self.field_value(field))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Required,
    WholeNumber,
}

#[derive(Debug, Clone)]
pub struct Schema<F> {
    rules: Vec<(F, Rule)>,
}

impl<F: EntityField> Default for Schema<F> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<F: EntityField> Schema<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field must be non-empty after trimming.
    pub fn required(mut self, field: F) -> Self {
        self.rules.push((field, Rule::Required));
        self
    }

    /// Field must parse as a non-negative integer.
    pub fn whole_number(mut self, field: F) -> Self {
        self.rules.push((field, Rule::WholeNumber));
        self
    }

    /// Fields without a rule always pass.
    pub fn validate_field(&self, field: F, value: &str) -> Result<(), String> {
        for (f, rule) in &self.rules {
            if *f != field {
                continue;
            }
            match rule {
                Rule::Required if value.trim().is_empty() => {
                    return Err(FIELD_REQUIRED.to_string());
                }
                Rule::WholeNumber if value.trim().parse::<u32>().is_err() => {
                    return Err(WHOLE_NUMBER_REQUIRED.to_string());
                }
                Rule::Required | Rule::WholeNumber => {}
            }
        }
        Ok(())
    }

    pub fn validate<S: FieldSource<F>>(&self, source: &S) -> Result<(), ErrorMap<F>> {
        let errors: ErrorMap<F> = self
            .rules
            .iter()
            .filter_map(|(field, _)| {
                self.validate_field(*field, &source.field_text(*field))
                    .err()
                    .map(|message| (*field, message))
            })
            .collect();
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

pub fn mapping_schema() -> Schema<MappingField> {
    MappingField::all()
        .iter()
        .filter(|field| field.is_numeric())
        .fold(
            Schema::new()
                .required(MappingField::Name)
                .required(MappingField::Source),
            |schema, field| schema.whole_number(*field),
        )
}

/// Password is only required until the server has accepted the connection.
pub fn database_schema(database: &Database) -> Schema<DatabaseField> {
    let schema = Schema::new()
        .required(DatabaseField::Name)
        .required(DatabaseField::User)
        .required(DatabaseField::Type)
        .required(DatabaseField::Url);
    if database.is_confirmed() {
        schema
    } else {
        schema.required(DatabaseField::Password)
    }
}

/// Validates a mapping snapshot and returns the payload it would submit.
pub async fn validate_mapping(mapping: &Mapping) -> Result<MappingRequest, ErrorMap<MappingField>> {
    mapping_schema().validate(mapping)?;
    Ok(mapping.to_request())
}

pub async fn validate_database(
    database: &Database,
) -> Result<DatabaseRequest, ErrorMap<DatabaseField>> {
    database_schema(database).validate(database)?;
    Ok(database.to_request())
}

/// Validates every database concurrently. Output order follows input order.
pub async fn validate_databases(
    databases: &[Database],
) -> Vec<(LocalId, Result<DatabaseRequest, ErrorMap<DatabaseField>>)> {
    let outcomes = join_all(databases.iter().map(validate_database)).await;
    databases
        .iter()
        .map(|database| database.local_id)
        .zip(outcomes)
        .collect()
}
