//! The query executor: renders typed parameters into SQL templates, runs
//! them on a [`MetadataSource`] and manages the schema lifecycle.
pub mod options;
#[cfg(all(test, feature = "sqlite"))]
mod tests;

use self::options::{ListOperationOptions, NextPageToken, OrderByField};
use crate::errors::QueryError;
use crate::metadata::{
    ArtifactState, ArtifactStructType, EventStep, EventType, ExecutionState, PropertyType,
    TypeKind, Value,
};
use crate::query::Query;
use crate::record_set::RecordSet;
use crate::source::MetadataSource;
use log::{debug, warn};

/// Executes the fixed metadata-access API against one [`MetadataSource`].
///
/// The executor is a value object: it carries an immutable [`Query`] config
/// and a non-owning reference to the source, and is not internally
/// concurrent. Apart from the schema-lifecycle entry points, every operation
/// must run inside a transaction the caller has begun on the same source.
pub struct QueryExecutor<'a> {
    config: Query,
    source: &'a mut dyn MetadataSource,
}

enum SchemaVersionProbe {
    Version(i64),
    EmptyTable,
    MissingTable,
    TooManyRows(usize),
}

impl<'a> QueryExecutor<'a> {
    pub fn new(config: Query, source: &'a mut dyn MetadataSource) -> Self {
        Self { config, source }
    }

    // -- artifact types ------------------------------------------------------

    pub fn insert_artifact_type(
        &mut self,
        name: &str,
        version: Option<&str>,
        description: Option<&str>,
    ) -> Result<i64, QueryError> {
        self.ensure_type_is_new(name, version, TypeKind::Artifact)?;
        let parameters = vec![
            self.bind_str(name),
            self.bind_opt_str(version),
            self.bind_opt_str(description),
        ];
        self.execute_returning_id(self.config.insert_artifact_type(), &parameters)
    }

    pub fn insert_execution_type(
        &mut self,
        name: &str,
        version: Option<&str>,
        description: Option<&str>,
        input_type: Option<&ArtifactStructType>,
        output_type: Option<&ArtifactStructType>,
    ) -> Result<i64, QueryError> {
        self.ensure_type_is_new(name, version, TypeKind::Execution)?;
        let parameters = vec![
            self.bind_str(name),
            self.bind_opt_str(version),
            self.bind_opt_str(description),
            self.bind_opt_struct_type(input_type)?,
            self.bind_opt_struct_type(output_type)?,
        ];
        self.execute_returning_id(self.config.insert_execution_type(), &parameters)
    }

    pub fn insert_context_type(
        &mut self,
        name: &str,
        version: Option<&str>,
        description: Option<&str>,
    ) -> Result<i64, QueryError> {
        self.ensure_type_is_new(name, version, TypeKind::Context)?;
        let parameters = vec![
            self.bind_str(name),
            self.bind_opt_str(version),
            self.bind_opt_str(description),
        ];
        self.execute_returning_id(self.config.insert_context_type(), &parameters)
    }

    /// Rows whose stored kind differs from `type_kind` are silently filtered.
    pub fn select_types_by_id(
        &mut self,
        type_ids: &[i64],
        type_kind: TypeKind,
    ) -> Result<RecordSet, QueryError> {
        if type_ids.is_empty() {
            return Ok(RecordSet::default());
        }
        let parameters = vec![self.bind_id_list(type_ids), self.bind_type_kind(type_kind)];
        self.execute(self.config.select_types_by_id(type_kind), &parameters)
    }

    pub fn select_type_by_id(
        &mut self,
        type_id: i64,
        type_kind: TypeKind,
    ) -> Result<RecordSet, QueryError> {
        let record_set = self.select_types_by_id(&[type_id], type_kind)?;
        if record_set.is_empty() {
            return Err(QueryError::NotFound {
                message: format!("{type_kind} type {type_id} is not found"),
            });
        }
        Ok(record_set)
    }

    /// An absent version is a distinct key from any stored version and is
    /// compared with `IS NULL`.
    pub fn select_type_by_name_and_version(
        &mut self,
        name: &str,
        version: Option<&str>,
        type_kind: TypeKind,
    ) -> Result<RecordSet, QueryError> {
        match version {
            Some(version) => {
                let parameters = vec![
                    self.bind_str(name),
                    self.bind_str(version),
                    self.bind_type_kind(type_kind),
                ];
                self.execute(
                    self.config.select_type_by_name_and_version(type_kind),
                    &parameters,
                )
            }
            None => {
                let parameters = vec![self.bind_str(name), self.bind_type_kind(type_kind)];
                self.execute(self.config.select_type_by_name(type_kind), &parameters)
            }
        }
    }

    pub fn select_all_types(&mut self, type_kind: TypeKind) -> Result<RecordSet, QueryError> {
        let parameters = vec![self.bind_type_kind(type_kind)];
        self.execute(self.config.select_all_types(type_kind), &parameters)
    }

    pub fn insert_type_property(
        &mut self,
        type_id: i64,
        property_name: &str,
        property_type: PropertyType,
    ) -> Result<(), QueryError> {
        let parameters = vec![
            self.bind_i64(type_id),
            self.bind_str(property_name),
            self.bind_i64(property_type as i64),
        ];
        self.execute(self.config.insert_type_property(), &parameters)?;
        Ok(())
    }

    pub fn select_property_by_type_id(&mut self, type_id: i64) -> Result<RecordSet, QueryError> {
        let parameters = vec![self.bind_i64(type_id)];
        self.execute(self.config.select_property_by_type_id(), &parameters)
    }

    // -- parent types --------------------------------------------------------

    /// Parent links are soft: neither id is checked against the Type table.
    pub fn insert_parent_type(
        &mut self,
        type_id: i64,
        parent_type_id: i64,
    ) -> Result<(), QueryError> {
        let parameters = vec![self.bind_i64(type_id), self.bind_i64(parent_type_id)];
        self.execute(self.config.insert_parent_type(), &parameters)?;
        Ok(())
    }

    pub fn delete_parent_type(
        &mut self,
        type_id: i64,
        parent_type_id: i64,
    ) -> Result<(), QueryError> {
        let parameters = vec![self.bind_i64(type_id), self.bind_i64(parent_type_id)];
        self.execute(self.config.delete_parent_type(), &parameters)?;
        Ok(())
    }

    /// Returns `(type_id, parent_type_id)` rows for every stored link whose
    /// child is in `type_ids`, whether or not the parent still exists.
    pub fn select_parent_types_by_type_id(
        &mut self,
        type_ids: &[i64],
    ) -> Result<RecordSet, QueryError> {
        if type_ids.is_empty() {
            return Ok(RecordSet::default());
        }
        let parameters = vec![self.bind_id_list(type_ids)];
        self.execute(self.config.select_parent_type_by_type_id(), &parameters)
    }

    // -- artifacts -----------------------------------------------------------

    pub fn insert_artifact(
        &mut self,
        type_id: i64,
        uri: &str,
        state: Option<ArtifactState>,
        name: Option<&str>,
        create_time_ms: i64,
        update_time_ms: i64,
    ) -> Result<i64, QueryError> {
        let parameters = vec![
            self.bind_i64(type_id),
            self.bind_str(uri),
            self.bind_opt_enum(state.map(|s| s as i64)),
            self.bind_opt_str(name),
            self.bind_i64(create_time_ms),
            self.bind_i64(update_time_ms),
        ];
        self.execute_returning_id(self.config.insert_artifact(), &parameters)
    }

    pub fn select_artifacts_by_id(&mut self, artifact_ids: &[i64]) -> Result<RecordSet, QueryError> {
        if artifact_ids.is_empty() {
            return Ok(RecordSet::default());
        }
        let parameters = vec![self.bind_id_list(artifact_ids)];
        self.execute(self.config.select_artifact_by_id(), &parameters)
    }

    pub fn select_artifact_by_type_id_and_name(
        &mut self,
        type_id: i64,
        name: &str,
    ) -> Result<RecordSet, QueryError> {
        let parameters = vec![self.bind_i64(type_id), self.bind_str(name)];
        self.execute(self.config.select_artifact_by_type_id_and_name(), &parameters)
    }

    pub fn select_artifacts_by_type_id(&mut self, type_id: i64) -> Result<RecordSet, QueryError> {
        let parameters = vec![self.bind_i64(type_id)];
        self.execute(self.config.select_artifacts_by_type_id(), &parameters)
    }

    pub fn select_artifacts_by_uri(&mut self, uri: &str) -> Result<RecordSet, QueryError> {
        let parameters = vec![self.bind_str(uri)];
        self.execute(self.config.select_artifacts_by_uri(), &parameters)
    }

    pub fn update_artifact(
        &mut self,
        artifact_id: i64,
        type_id: i64,
        uri: &str,
        state: Option<ArtifactState>,
        update_time_ms: i64,
    ) -> Result<(), QueryError> {
        let parameters = vec![
            self.bind_i64(artifact_id),
            self.bind_i64(type_id),
            self.bind_str(uri),
            self.bind_opt_enum(state.map(|s| s as i64)),
            self.bind_i64(update_time_ms),
        ];
        self.execute(self.config.update_artifact(), &parameters)?;
        Ok(())
    }

    pub fn insert_artifact_property(
        &mut self,
        artifact_id: i64,
        property_name: &str,
        is_custom_property: bool,
        value: &Value,
    ) -> Result<(), QueryError> {
        self.insert_item_property(
            TypeKind::Artifact,
            artifact_id,
            property_name,
            is_custom_property,
            value,
        )
    }

    pub fn select_artifact_property_by_artifact_id(
        &mut self,
        artifact_ids: &[i64],
    ) -> Result<RecordSet, QueryError> {
        self.select_item_property_by_item_id(TypeKind::Artifact, artifact_ids)
    }

    pub fn update_artifact_property(
        &mut self,
        artifact_id: i64,
        property_name: &str,
        value: &Value,
    ) -> Result<(), QueryError> {
        self.update_item_property(TypeKind::Artifact, artifact_id, property_name, value)
    }

    pub fn delete_artifact_property(
        &mut self,
        artifact_id: i64,
        property_name: &str,
    ) -> Result<(), QueryError> {
        self.delete_item_property(TypeKind::Artifact, artifact_id, property_name)
    }

    // -- executions ----------------------------------------------------------

    pub fn insert_execution(
        &mut self,
        type_id: i64,
        last_known_state: Option<ExecutionState>,
        name: Option<&str>,
        create_time_ms: i64,
        update_time_ms: i64,
    ) -> Result<i64, QueryError> {
        let parameters = vec![
            self.bind_i64(type_id),
            self.bind_opt_enum(last_known_state.map(|s| s as i64)),
            self.bind_opt_str(name),
            self.bind_i64(create_time_ms),
            self.bind_i64(update_time_ms),
        ];
        self.execute_returning_id(self.config.insert_execution(), &parameters)
    }

    pub fn select_executions_by_id(
        &mut self,
        execution_ids: &[i64],
    ) -> Result<RecordSet, QueryError> {
        if execution_ids.is_empty() {
            return Ok(RecordSet::default());
        }
        let parameters = vec![self.bind_id_list(execution_ids)];
        self.execute(self.config.select_execution_by_id(), &parameters)
    }

    pub fn select_execution_by_type_id_and_name(
        &mut self,
        type_id: i64,
        name: &str,
    ) -> Result<RecordSet, QueryError> {
        let parameters = vec![self.bind_i64(type_id), self.bind_str(name)];
        self.execute(
            self.config.select_execution_by_type_id_and_name(),
            &parameters,
        )
    }

    pub fn select_executions_by_type_id(&mut self, type_id: i64) -> Result<RecordSet, QueryError> {
        let parameters = vec![self.bind_i64(type_id)];
        self.execute(self.config.select_executions_by_type_id(), &parameters)
    }

    pub fn update_execution(
        &mut self,
        execution_id: i64,
        type_id: i64,
        last_known_state: Option<ExecutionState>,
        update_time_ms: i64,
    ) -> Result<(), QueryError> {
        let parameters = vec![
            self.bind_i64(execution_id),
            self.bind_i64(type_id),
            self.bind_opt_enum(last_known_state.map(|s| s as i64)),
            self.bind_i64(update_time_ms),
        ];
        self.execute(self.config.update_execution(), &parameters)?;
        Ok(())
    }

    pub fn insert_execution_property(
        &mut self,
        execution_id: i64,
        property_name: &str,
        is_custom_property: bool,
        value: &Value,
    ) -> Result<(), QueryError> {
        self.insert_item_property(
            TypeKind::Execution,
            execution_id,
            property_name,
            is_custom_property,
            value,
        )
    }

    pub fn select_execution_property_by_execution_id(
        &mut self,
        execution_ids: &[i64],
    ) -> Result<RecordSet, QueryError> {
        self.select_item_property_by_item_id(TypeKind::Execution, execution_ids)
    }

    pub fn update_execution_property(
        &mut self,
        execution_id: i64,
        property_name: &str,
        value: &Value,
    ) -> Result<(), QueryError> {
        self.update_item_property(TypeKind::Execution, execution_id, property_name, value)
    }

    pub fn delete_execution_property(
        &mut self,
        execution_id: i64,
        property_name: &str,
    ) -> Result<(), QueryError> {
        self.delete_item_property(TypeKind::Execution, execution_id, property_name)
    }

    // -- contexts ------------------------------------------------------------

    pub fn insert_context(
        &mut self,
        type_id: i64,
        name: &str,
        create_time_ms: i64,
        update_time_ms: i64,
    ) -> Result<i64, QueryError> {
        let parameters = vec![
            self.bind_i64(type_id),
            self.bind_str(name),
            self.bind_i64(create_time_ms),
            self.bind_i64(update_time_ms),
        ];
        self.execute_returning_id(self.config.insert_context(), &parameters)
    }

    pub fn select_contexts_by_id(&mut self, context_ids: &[i64]) -> Result<RecordSet, QueryError> {
        if context_ids.is_empty() {
            return Ok(RecordSet::default());
        }
        let parameters = vec![self.bind_id_list(context_ids)];
        self.execute(self.config.select_context_by_id(), &parameters)
    }

    pub fn select_context_by_type_id_and_name(
        &mut self,
        type_id: i64,
        name: &str,
    ) -> Result<RecordSet, QueryError> {
        let parameters = vec![self.bind_i64(type_id), self.bind_str(name)];
        self.execute(self.config.select_context_by_type_id_and_name(), &parameters)
    }

    pub fn select_contexts_by_type_id(&mut self, type_id: i64) -> Result<RecordSet, QueryError> {
        let parameters = vec![self.bind_i64(type_id)];
        self.execute(self.config.select_contexts_by_type_id(), &parameters)
    }

    pub fn update_context(
        &mut self,
        context_id: i64,
        type_id: i64,
        name: &str,
        update_time_ms: i64,
    ) -> Result<(), QueryError> {
        let parameters = vec![
            self.bind_i64(context_id),
            self.bind_i64(type_id),
            self.bind_str(name),
            self.bind_i64(update_time_ms),
        ];
        self.execute(self.config.update_context(), &parameters)?;
        Ok(())
    }

    pub fn insert_context_property(
        &mut self,
        context_id: i64,
        property_name: &str,
        is_custom_property: bool,
        value: &Value,
    ) -> Result<(), QueryError> {
        self.insert_item_property(
            TypeKind::Context,
            context_id,
            property_name,
            is_custom_property,
            value,
        )
    }

    pub fn select_context_property_by_context_id(
        &mut self,
        context_ids: &[i64],
    ) -> Result<RecordSet, QueryError> {
        self.select_item_property_by_item_id(TypeKind::Context, context_ids)
    }

    pub fn update_context_property(
        &mut self,
        context_id: i64,
        property_name: &str,
        value: &Value,
    ) -> Result<(), QueryError> {
        self.update_item_property(TypeKind::Context, context_id, property_name, value)
    }

    pub fn delete_context_property(
        &mut self,
        context_id: i64,
        property_name: &str,
    ) -> Result<(), QueryError> {
        self.delete_item_property(TypeKind::Context, context_id, property_name)
    }

    // -- events --------------------------------------------------------------

    pub fn insert_event(
        &mut self,
        artifact_id: i64,
        execution_id: i64,
        event_type: EventType,
        event_time_ms: i64,
    ) -> Result<i64, QueryError> {
        let parameters = vec![
            self.bind_i64(artifact_id),
            self.bind_i64(execution_id),
            self.bind_i64(event_type as i64),
            self.bind_i64(event_time_ms),
        ];
        self.execute_returning_id(self.config.insert_event(), &parameters)
    }

    /// Each step row carries either an index or a key; the other column
    /// stays NULL.
    pub fn insert_event_path(&mut self, event_id: i64, step: &EventStep) -> Result<(), QueryError> {
        let (template, step_parameter) = match step {
            EventStep::Index(index) => (self.config.insert_event_path_index(), self.bind_i64(*index)),
            EventStep::Key(key) => (self.config.insert_event_path_key(), self.bind_str(key)),
        };
        let parameters = vec![self.bind_i64(event_id), step_parameter];
        self.execute(template, &parameters)?;
        Ok(())
    }

    pub fn select_event_by_artifact_ids(
        &mut self,
        artifact_ids: &[i64],
    ) -> Result<RecordSet, QueryError> {
        if artifact_ids.is_empty() {
            return Ok(RecordSet::default());
        }
        let parameters = vec![self.bind_id_list(artifact_ids)];
        self.execute(self.config.select_event_by_artifact_ids(), &parameters)
    }

    pub fn select_event_by_execution_ids(
        &mut self,
        execution_ids: &[i64],
    ) -> Result<RecordSet, QueryError> {
        if execution_ids.is_empty() {
            return Ok(RecordSet::default());
        }
        let parameters = vec![self.bind_id_list(execution_ids)];
        self.execute(self.config.select_event_by_execution_ids(), &parameters)
    }

    pub fn select_event_path_by_event_ids(
        &mut self,
        event_ids: &[i64],
    ) -> Result<RecordSet, QueryError> {
        if event_ids.is_empty() {
            return Ok(RecordSet::default());
        }
        let parameters = vec![self.bind_id_list(event_ids)];
        self.execute(self.config.select_event_path_by_event_ids(), &parameters)
    }

    // -- context links -------------------------------------------------------

    pub fn insert_association(
        &mut self,
        context_id: i64,
        execution_id: i64,
    ) -> Result<i64, QueryError> {
        let parameters = vec![self.bind_i64(context_id), self.bind_i64(execution_id)];
        self.execute_returning_id(self.config.insert_association(), &parameters)
    }

    pub fn select_association_by_context_ids(
        &mut self,
        context_ids: &[i64],
    ) -> Result<RecordSet, QueryError> {
        if context_ids.is_empty() {
            return Ok(RecordSet::default());
        }
        let parameters = vec![self.bind_id_list(context_ids)];
        self.execute(self.config.select_association_by_context_ids(), &parameters)
    }

    pub fn select_association_by_execution_id(
        &mut self,
        execution_id: i64,
    ) -> Result<RecordSet, QueryError> {
        let parameters = vec![self.bind_i64(execution_id)];
        self.execute(
            self.config.select_association_by_execution_id(),
            &parameters,
        )
    }

    pub fn insert_attribution(
        &mut self,
        context_id: i64,
        artifact_id: i64,
    ) -> Result<i64, QueryError> {
        let parameters = vec![self.bind_i64(context_id), self.bind_i64(artifact_id)];
        self.execute_returning_id(self.config.insert_attribution(), &parameters)
    }

    pub fn select_attribution_by_context_id(
        &mut self,
        context_id: i64,
    ) -> Result<RecordSet, QueryError> {
        let parameters = vec![self.bind_i64(context_id)];
        self.execute(self.config.select_attribution_by_context_id(), &parameters)
    }

    pub fn select_attribution_by_artifact_id(
        &mut self,
        artifact_id: i64,
    ) -> Result<RecordSet, QueryError> {
        let parameters = vec![self.bind_i64(artifact_id)];
        self.execute(self.config.select_attribution_by_artifact_id(), &parameters)
    }

    pub fn insert_parent_context(
        &mut self,
        parent_context_id: i64,
        context_id: i64,
    ) -> Result<(), QueryError> {
        let parameters = vec![self.bind_i64(context_id), self.bind_i64(parent_context_id)];
        self.execute(self.config.insert_parent_context(), &parameters)?;
        Ok(())
    }

    pub fn select_parent_contexts_by_context_id(
        &mut self,
        context_id: i64,
    ) -> Result<RecordSet, QueryError> {
        let parameters = vec![self.bind_i64(context_id)];
        self.execute(
            self.config.select_parent_context_by_context_id(),
            &parameters,
        )
    }

    pub fn select_child_contexts_by_context_id(
        &mut self,
        context_id: i64,
    ) -> Result<RecordSet, QueryError> {
        let parameters = vec![self.bind_i64(context_id)];
        self.execute(
            self.config.select_parent_context_by_parent_id(),
            &parameters,
        )
    }

    // -- deletions -----------------------------------------------------------
    //
    // Deletes are idempotent: unknown ids and empty id lists are plain
    // success. Each operation removes exactly its own rows; the caller
    // composes them to express the cascade it wants.

    /// Deletes the artifacts and their property rows. Events and
    /// attributions referencing them are left in place.
    pub fn delete_artifacts_by_id(&mut self, artifact_ids: &[i64]) -> Result<(), QueryError> {
        self.delete_items_and_properties(TypeKind::Artifact, artifact_ids)
    }

    /// Deletes the executions and their property rows. Events and
    /// associations referencing them are left in place.
    pub fn delete_executions_by_id(&mut self, execution_ids: &[i64]) -> Result<(), QueryError> {
        self.delete_items_and_properties(TypeKind::Execution, execution_ids)
    }

    /// Deletes the contexts and their property rows. Attributions,
    /// associations and parent links referencing them are left in place.
    pub fn delete_contexts_by_id(&mut self, context_ids: &[i64]) -> Result<(), QueryError> {
        self.delete_items_and_properties(TypeKind::Context, context_ids)
    }

    pub fn delete_events_by_artifacts_id(
        &mut self,
        artifact_ids: &[i64],
    ) -> Result<(), QueryError> {
        if artifact_ids.is_empty() {
            return Ok(());
        }
        let parameters = vec![self.bind_id_list(artifact_ids)];
        self.execute(self.config.delete_events_by_artifact_ids(), &parameters)?;
        self.execute(self.config.delete_orphan_event_paths(), &[])?;
        Ok(())
    }

    pub fn delete_events_by_executions_id(
        &mut self,
        execution_ids: &[i64],
    ) -> Result<(), QueryError> {
        if execution_ids.is_empty() {
            return Ok(());
        }
        let parameters = vec![self.bind_id_list(execution_ids)];
        self.execute(self.config.delete_events_by_execution_ids(), &parameters)?;
        self.execute(self.config.delete_orphan_event_paths(), &[])?;
        Ok(())
    }

    pub fn delete_associations_by_contexts_id(
        &mut self,
        context_ids: &[i64],
    ) -> Result<(), QueryError> {
        if context_ids.is_empty() {
            return Ok(());
        }
        let parameters = vec![self.bind_id_list(context_ids)];
        self.execute(self.config.delete_associations_by_context_ids(), &parameters)?;
        Ok(())
    }

    pub fn delete_associations_by_executions_id(
        &mut self,
        execution_ids: &[i64],
    ) -> Result<(), QueryError> {
        if execution_ids.is_empty() {
            return Ok(());
        }
        let parameters = vec![self.bind_id_list(execution_ids)];
        self.execute(
            self.config.delete_associations_by_execution_ids(),
            &parameters,
        )?;
        Ok(())
    }

    pub fn delete_attributions_by_contexts_id(
        &mut self,
        context_ids: &[i64],
    ) -> Result<(), QueryError> {
        if context_ids.is_empty() {
            return Ok(());
        }
        let parameters = vec![self.bind_id_list(context_ids)];
        self.execute(self.config.delete_attributions_by_context_ids(), &parameters)?;
        Ok(())
    }

    pub fn delete_attributions_by_artifacts_id(
        &mut self,
        artifact_ids: &[i64],
    ) -> Result<(), QueryError> {
        if artifact_ids.is_empty() {
            return Ok(());
        }
        let parameters = vec![self.bind_id_list(artifact_ids)];
        self.execute(
            self.config.delete_attributions_by_artifact_ids(),
            &parameters,
        )?;
        Ok(())
    }

    pub fn delete_parent_contexts_by_parent_ids(
        &mut self,
        parent_context_ids: &[i64],
    ) -> Result<(), QueryError> {
        if parent_context_ids.is_empty() {
            return Ok(());
        }
        let parameters = vec![self.bind_id_list(parent_context_ids)];
        self.execute(
            self.config.delete_parent_contexts_by_parent_ids(),
            &parameters,
        )?;
        Ok(())
    }

    pub fn delete_parent_contexts_by_child_ids(
        &mut self,
        child_context_ids: &[i64],
    ) -> Result<(), QueryError> {
        if child_context_ids.is_empty() {
            return Ok(());
        }
        let parameters = vec![self.bind_id_list(child_context_ids)];
        self.execute(
            self.config.delete_parent_contexts_by_child_ids(),
            &parameters,
        )?;
        Ok(())
    }

    // -- id listing ----------------------------------------------------------

    pub fn list_artifact_ids(
        &mut self,
        options: &ListOperationOptions,
        candidate_ids: Option<&[i64]>,
    ) -> Result<(RecordSet, Option<String>), QueryError> {
        self.list_node_ids(TypeKind::Artifact, options, candidate_ids)
    }

    pub fn list_execution_ids(
        &mut self,
        options: &ListOperationOptions,
        candidate_ids: Option<&[i64]>,
    ) -> Result<(RecordSet, Option<String>), QueryError> {
        self.list_node_ids(TypeKind::Execution, options, candidate_ids)
    }

    pub fn list_context_ids(
        &mut self,
        options: &ListOperationOptions,
        candidate_ids: Option<&[i64]>,
    ) -> Result<(RecordSet, Option<String>), QueryError> {
        self.list_node_ids(TypeKind::Context, options, candidate_ids)
    }

    // -- schema lifecycle ----------------------------------------------------

    pub fn get_library_version(&self) -> i64 {
        self.config.schema_version()
    }

    pub fn get_schema_version(&mut self) -> Result<i64, QueryError> {
        match self.probe_schema_version()? {
            SchemaVersionProbe::Version(version) => Ok(version),
            SchemaVersionProbe::MissingTable => Err(QueryError::NotFound {
                message: "the schema version table does not exist; the database is not initialised"
                    .to_owned(),
            }),
            SchemaVersionProbe::EmptyTable => Err(QueryError::DataLoss {
                message: "the schema version table exists but holds no value".to_owned(),
            }),
            SchemaVersionProbe::TooManyRows(count) => Err(QueryError::DataLoss {
                message: format!("{count} schema version rows found (exactly one expected)"),
            }),
        }
    }

    pub fn insert_schema_version(&mut self, schema_version: i64) -> Result<(), QueryError> {
        let parameters = vec![self.bind_i64(schema_version)];
        self.execute(self.config.insert_schema_version(), &parameters)?;
        Ok(())
    }

    pub fn update_schema_version(&mut self, schema_version: i64) -> Result<(), QueryError> {
        let parameters = vec![self.bind_i64(schema_version)];
        self.execute(self.config.update_schema_version(), &parameters)?;
        Ok(())
    }

    /// Runs every table-presence probe of the current schema.
    pub fn check_tables(&mut self) -> Result<(), QueryError> {
        for statement in self.config.check_table_queries() {
            self.execute_sql(statement)?;
        }
        Ok(())
    }

    /// Creates any missing tables at the library schema version and records
    /// that version. Re-running on an initialised database is a no-op.
    pub fn init_metadata_source(&mut self) -> Result<(), QueryError> {
        self.with_own_transaction(|this| {
            this.create_new_store()?;
            let lib_version = this.config.schema_version();
            match this.probe_schema_version()? {
                SchemaVersionProbe::Version(version) if version == lib_version => Ok(()),
                SchemaVersionProbe::Version(version) => Err(QueryError::FailedPrecondition {
                    message: format!(
                        "the database is at schema version {version}, not {lib_version}"
                    ),
                }),
                _ => this.insert_schema_version(lib_version),
            }
        })
    }

    /// Brings the database to the library schema version.
    ///
    /// An empty database gets all tables created; a database at an earlier
    /// version is migrated step by step when `enable_migration` is set; a
    /// database at a later version is refused since downgrading may lose
    /// data.
    pub fn init_metadata_source_if_not_exists(
        &mut self,
        enable_migration: bool,
    ) -> Result<(), QueryError> {
        self.with_own_transaction(|this| this.init_if_not_exists_inner(enable_migration))
    }

    /// Administrative downgrade to `to_schema_version`. Runs the reverse
    /// migration scripts, which may drop columns and tables.
    pub fn downgrade_metadata_source(&mut self, to_schema_version: i64) -> Result<(), QueryError> {
        let lib_version = self.config.schema_version();
        if to_schema_version < 0 {
            return Err(QueryError::InvalidArgument {
                message: "cannot downgrade to a negative schema version".to_owned(),
            });
        }
        if to_schema_version >= lib_version {
            return Err(QueryError::InvalidArgument {
                message: format!(
                    "downgrade target {to_schema_version} must be below the library version {lib_version}"
                ),
            });
        }
        self.with_own_transaction(|this| {
            let db_version = match this.probe_schema_version()? {
                SchemaVersionProbe::Version(version) => version,
                _ => {
                    return Err(QueryError::FailedPrecondition {
                        message: "the database is not initialised; nothing to downgrade".to_owned(),
                    })
                }
            };
            if db_version > lib_version {
                return Err(QueryError::FailedPrecondition {
                    message: format!(
                        "the database is at schema version {db_version}, newer than the library \
                         version {lib_version}; upgrade the library instead"
                    ),
                });
            }
            if db_version < to_schema_version {
                return Err(QueryError::InvalidArgument {
                    message: format!(
                        "the database is already at schema version {db_version}, below the \
                         requested {to_schema_version}"
                    ),
                });
            }
            if db_version > to_schema_version {
                warn!(
                    "downgrading schema from version {db_version} to {to_schema_version}; \
                     data may be lost"
                );
            }
            for version in (to_schema_version + 1..=db_version).rev() {
                run_migration_step(this, version, MigrationDirection::Down)?;
            }
            Ok(())
        })
    }

    pub fn delete_metadata_source(&mut self) -> Result<(), QueryError> {
        Err(QueryError::Unimplemented {
            operation: "DeleteMetadataSource".to_owned(),
        })
    }

    // -- shared property plumbing --------------------------------------------

    fn insert_item_property(
        &mut self,
        type_kind: TypeKind,
        item_id: i64,
        property_name: &str,
        is_custom_property: bool,
        value: &Value,
    ) -> Result<(), QueryError> {
        let parameters = vec![
            bind_data_type(value).to_owned(),
            self.bind_i64(item_id),
            self.bind_str(property_name),
            self.bind_bool(is_custom_property),
            self.bind_value(value),
        ];
        self.execute(self.config.insert_item_property(type_kind), &parameters)?;
        Ok(())
    }

    fn update_item_property(
        &mut self,
        type_kind: TypeKind,
        item_id: i64,
        property_name: &str,
        value: &Value,
    ) -> Result<(), QueryError> {
        let [int_value, double_value, string_value] = self.bind_value_columns(value);
        let parameters = vec![
            int_value,
            double_value,
            string_value,
            self.bind_i64(item_id),
            self.bind_str(property_name),
        ];
        self.execute(self.config.update_item_property(type_kind), &parameters)?;
        Ok(())
    }

    fn delete_item_property(
        &mut self,
        type_kind: TypeKind,
        item_id: i64,
        property_name: &str,
    ) -> Result<(), QueryError> {
        let parameters = vec![self.bind_i64(item_id), self.bind_str(property_name)];
        self.execute(self.config.delete_item_property(type_kind), &parameters)?;
        Ok(())
    }

    fn select_item_property_by_item_id(
        &mut self,
        type_kind: TypeKind,
        item_ids: &[i64],
    ) -> Result<RecordSet, QueryError> {
        if item_ids.is_empty() {
            return Ok(RecordSet::default());
        }
        let parameters = vec![self.bind_id_list(item_ids)];
        self.execute(
            self.config.select_item_property_by_item_id(type_kind),
            &parameters,
        )
    }

    fn delete_items_and_properties(
        &mut self,
        type_kind: TypeKind,
        item_ids: &[i64],
    ) -> Result<(), QueryError> {
        if item_ids.is_empty() {
            return Ok(());
        }
        let id_list = self.bind_id_list(item_ids);
        self.execute(
            self.config.delete_item_properties_by_item_ids(type_kind),
            std::slice::from_ref(&id_list),
        )?;
        self.execute(
            self.config.delete_items_by_id(type_kind),
            std::slice::from_ref(&id_list),
        )?;
        Ok(())
    }

    // -- list planner --------------------------------------------------------

    fn list_node_ids(
        &mut self,
        type_kind: TypeKind,
        options: &ListOperationOptions,
        candidate_ids: Option<&[i64]>,
    ) -> Result<(RecordSet, Option<String>), QueryError> {
        if options.max_result_size <= 0 {
            return Err(QueryError::InvalidArgument {
                message: format!(
                    "max_result_size must be positive, got {}",
                    options.max_result_size
                ),
            });
        }
        if options.filter_query.is_some() && type_kind != TypeKind::Artifact {
            return Err(QueryError::InvalidArgument {
                message: format!("filter_query is not supported when listing {type_kind}s"),
            });
        }
        if let Some(ids) = candidate_ids {
            if ids.is_empty() {
                return Ok((RecordSet::default(), None));
            }
        }

        let order_field = options.order_by_field;
        let order_column = order_field.column_name();
        let mut sql = if order_field == OrderByField::Id {
            format!("SELECT `id` FROM `{}`", type_kind.item_table_name())
        } else {
            format!(
                "SELECT `id`, `{order_column}` FROM `{}`",
                type_kind.item_table_name()
            )
        };

        let mut conditions = Vec::new();
        if let Some(ids) = candidate_ids {
            conditions.push(format!("`id` IN ({})", self.bind_id_list(ids)));
        }
        if let Some(token) = &options.next_page_token {
            let token = NextPageToken::decode(token)?;
            token.validate_against(options)?;
            let comparator = if options.is_asc { ">" } else { "<" };
            if order_field == OrderByField::Id {
                conditions.push(format!("`id` {comparator} {}", token.id_offset));
            } else {
                conditions.push(format!(
                    "(`{order_column}` {comparator} {field_offset} OR \
                     (`{order_column}` = {field_offset} AND `id` {comparator} {id_offset}))",
                    field_offset = token.field_offset,
                    id_offset = token.id_offset,
                ));
            }
        }
        if let Some(filter) = &options.filter_query {
            validate_filter_query(filter)?;
            conditions.push(format!("({})", filter.trim()));
        }
        if !conditions.is_empty() {
            sql += &format!(" WHERE {}", conditions.join(" AND "));
        }

        let direction = if options.is_asc { "ASC" } else { "DESC" };
        if order_field == OrderByField::Id {
            sql += &format!(" ORDER BY `id` {direction}");
        } else {
            sql += &format!(" ORDER BY `{order_column}` {direction}, `id` {direction}");
        }
        sql += &format!(" LIMIT {}", options.max_result_size + 1);

        let mut record_set = self.execute_sql(&sql)?;
        let page_size = options.max_result_size as usize;
        let next_page_token = if record_set.records.len() > page_size {
            record_set.records.truncate(page_size);
            let last = &record_set.records[page_size - 1];
            let id_offset = parse_i64_cell(cell(&record_set, last, "id")?)?;
            let field_offset = if order_field == OrderByField::Id {
                id_offset
            } else {
                parse_i64_cell(cell(&record_set, last, order_column)?)?
            };
            Some(
                NextPageToken {
                    field: order_field,
                    is_asc: options.is_asc,
                    field_offset,
                    id_offset,
                }
                .encode()?,
            )
        } else {
            None
        };
        Ok((record_set, next_page_token))
    }

    // -- schema lifecycle internals ------------------------------------------

    fn init_if_not_exists_inner(&mut self, enable_migration: bool) -> Result<(), QueryError> {
        let lib_version = self.config.schema_version();
        let db_version = match self.probe_schema_version()? {
            SchemaVersionProbe::Version(version) => version,
            SchemaVersionProbe::EmptyTable => {
                return Err(QueryError::DataLoss {
                    message: "the schema version table exists but holds no value".to_owned(),
                })
            }
            SchemaVersionProbe::TooManyRows(count) => {
                return Err(QueryError::DataLoss {
                    message: format!("{count} schema version rows found (exactly one expected)"),
                })
            }
            SchemaVersionProbe::MissingTable => match self.probe_v0_13_2_tables()? {
                LegacySchemaProbe::AllPresent => 0,
                LegacySchemaProbe::NonePresent => {
                    debug!("initialising an empty database at schema version {lib_version}");
                    self.create_new_store()?;
                    return self.insert_schema_version(lib_version);
                }
                LegacySchemaProbe::Partial => {
                    return Err(QueryError::DataLoss {
                        message: "only part of the 0.13.2 legacy tables are present; the \
                                  database cannot be interpreted safely"
                            .to_owned(),
                    })
                }
            },
        };

        match db_version.cmp(&lib_version) {
            std::cmp::Ordering::Equal => self.check_tables(),
            std::cmp::Ordering::Greater => Err(QueryError::FailedPrecondition {
                message: format!(
                    "the database is at schema version {db_version}, newer than the library \
                     version {lib_version}; downgrading may lose data, upgrade the library \
                     instead"
                ),
            }),
            std::cmp::Ordering::Less => {
                if !enable_migration {
                    return Err(QueryError::FailedPrecondition {
                        message: format!(
                            "the database is at schema version {db_version} and the library \
                             expects {lib_version}; enable upgrade migration to proceed"
                        ),
                    });
                }
                for version in db_version..lib_version {
                    run_migration_step(self, version + 1, MigrationDirection::Up)?;
                }
                self.check_tables()
            }
        }
    }

    fn create_new_store(&mut self) -> Result<(), QueryError> {
        for statement in self.config.create_tables() {
            self.execute_sql(statement)?;
        }
        Ok(())
    }

    fn probe_schema_version(&mut self) -> Result<SchemaVersionProbe, QueryError> {
        let record_set = match self.execute(self.config.select_schema_version(), &[]) {
            Ok(record_set) => record_set,
            Err(QueryError::Internal { .. }) => return Ok(SchemaVersionProbe::MissingTable),
            Err(error) => return Err(error),
        };
        match record_set.len() {
            0 => Ok(SchemaVersionProbe::EmptyTable),
            1 => {
                let cell = record_set.value(0, "schema_version").ok_or_else(|| {
                    QueryError::Internal {
                        message: "the schema version query returned no schema_version column"
                            .to_owned(),
                    }
                })?;
                Ok(SchemaVersionProbe::Version(parse_i64_cell(cell)?))
            }
            count => Ok(SchemaVersionProbe::TooManyRows(count)),
        }
    }

    fn probe_v0_13_2_tables(&mut self) -> Result<LegacySchemaProbe, QueryError> {
        let probes = self.config.check_v0_13_2_queries();
        let mut present = 0;
        for probe in probes {
            match self.execute_sql(probe) {
                Ok(_) => present += 1,
                Err(QueryError::Internal { .. }) => {}
                Err(error) => return Err(error),
            }
        }
        Ok(if present == probes.len() {
            LegacySchemaProbe::AllPresent
        } else if present == 0 {
            LegacySchemaProbe::NonePresent
        } else {
            LegacySchemaProbe::Partial
        })
    }

    fn with_own_transaction<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<T, QueryError>,
    ) -> Result<T, QueryError> {
        if !self.source.is_connected() {
            return Err(QueryError::FailedPrecondition {
                message: "the metadata source connection is closed".to_owned(),
            });
        }
        let owns_transaction = !self.source.in_transaction();
        if owns_transaction {
            self.source.begin().map_err(QueryError::from)?;
        }
        let result = body(self);
        if owns_transaction {
            match &result {
                Ok(_) => self.source.commit().map_err(QueryError::from)?,
                Err(_) => {
                    let _ = self.source.rollback();
                }
            }
        }
        result
    }

    // -- binding and execution -----------------------------------------------

    fn execute(
        &mut self,
        template: &'static str,
        parameters: &[String],
    ) -> Result<RecordSet, QueryError> {
        let sql = substitute(template, parameters);
        self.execute_sql(&sql)
    }

    fn execute_sql(&mut self, sql: &str) -> Result<RecordSet, QueryError> {
        if !self.source.is_connected() {
            return Err(QueryError::FailedPrecondition {
                message: "the metadata source connection is closed".to_owned(),
            });
        }
        if !self.source.in_transaction() {
            return Err(QueryError::FailedPrecondition {
                message: "no transaction is open on the metadata source".to_owned(),
            });
        }
        self.source.execute(sql).map_err(QueryError::from)
    }

    fn execute_returning_id(
        &mut self,
        template: &'static str,
        parameters: &[String],
    ) -> Result<i64, QueryError> {
        self.execute(template, parameters)?;
        self.source.last_insert_id().map_err(QueryError::from)
    }

    fn ensure_type_is_new(
        &mut self,
        name: &str,
        version: Option<&str>,
        type_kind: TypeKind,
    ) -> Result<(), QueryError> {
        // Unique indexes treat NULL versions as distinct values, so the
        // version-less key has to be probed explicitly.
        if version.is_some() {
            return Ok(());
        }
        let existing = self.select_type_by_name_and_version(name, None, type_kind)?;
        if !existing.is_empty() {
            return Err(QueryError::AlreadyExists {
                message: format!("{type_kind} type with the name {name:?} already exists"),
            });
        }
        Ok(())
    }

    fn bind_str(&self, value: &str) -> String {
        format!("'{}'", self.source.escape_string(value))
    }

    fn bind_opt_str(&self, value: Option<&str>) -> String {
        match value {
            Some(value) => self.bind_str(value),
            None => "NULL".to_owned(),
        }
    }

    fn bind_i64(&self, value: i64) -> String {
        value.to_string()
    }

    fn bind_f64(&self, value: f64) -> String {
        value.to_string()
    }

    fn bind_bool(&self, value: bool) -> String {
        self.config.bool_literal(value).to_owned()
    }

    fn bind_type_kind(&self, type_kind: TypeKind) -> String {
        (type_kind as i64).to_string()
    }

    fn bind_opt_enum(&self, value: Option<i64>) -> String {
        match value {
            Some(value) => value.to_string(),
            None => "NULL".to_owned(),
        }
    }

    /// Comma-joined literals for an `IN (...)` clause. Callers short-circuit
    /// on empty input, so the slice is never empty here.
    fn bind_id_list(&self, ids: &[i64]) -> String {
        ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn bind_value(&self, value: &Value) -> String {
        match value {
            Value::Int(v) => self.bind_i64(*v),
            Value::Double(v) => self.bind_f64(*v),
            Value::String(v) => self.bind_str(v),
        }
    }

    /// One literal per value column, with `NULL` for the two unpopulated
    /// ones.
    fn bind_value_columns(&self, value: &Value) -> [String; 3] {
        [
            value
                .as_int()
                .map(|v| self.bind_i64(v))
                .unwrap_or_else(|| "NULL".to_owned()),
            value
                .as_double()
                .map(|v| self.bind_f64(v))
                .unwrap_or_else(|| "NULL".to_owned()),
            value
                .as_string()
                .map(|v| self.bind_str(v))
                .unwrap_or_else(|| "NULL".to_owned()),
        ]
    }

    fn bind_struct_type(&self, struct_type: &ArtifactStructType) -> Result<String, QueryError> {
        let serialized = serde_json::to_string(struct_type).map_err(|e| QueryError::Internal {
            message: format!("cannot serialize the artifact struct type: {e}"),
        })?;
        Ok(self.bind_str(&serialized))
    }

    fn bind_opt_struct_type(
        &self,
        struct_type: Option<&ArtifactStructType>,
    ) -> Result<String, QueryError> {
        match struct_type {
            Some(struct_type) => self.bind_struct_type(struct_type),
            None => Ok("NULL".to_owned()),
        }
    }
}

enum LegacySchemaProbe {
    AllPresent,
    NonePresent,
    Partial,
}

enum MigrationDirection {
    Up,
    Down,
}

/// Runs one migration step inside its own savepoint and records the reached
/// version. `Up` migrates `version - 1 -> version`, `Down` migrates
/// `version -> version - 1`.
fn run_migration_step(
    executor: &mut QueryExecutor<'_>,
    version: i64,
    direction: MigrationDirection,
) -> Result<(), QueryError> {
    executor.execute_sql(executor.config.savepoint())?;
    let result = (|| {
        let (scripts, reached) = match direction {
            MigrationDirection::Up => (executor.config.upgrade_queries(version - 1), version),
            MigrationDirection::Down => (executor.config.downgrade_queries(version), version - 1),
        };
        let scripts = scripts.ok_or_else(|| QueryError::Internal {
            message: format!("no migration script covers schema version {version}"),
        })?;
        debug!(
            "migrating schema {} version {reached}",
            match direction {
                MigrationDirection::Up => "up to",
                MigrationDirection::Down => "down to",
            }
        );
        for statement in scripts {
            executor.execute_sql(statement)?;
        }
        // Downgrading past version 1 removes the version table itself.
        if reached > 0 {
            executor.update_schema_version(reached)?;
        }
        Ok(())
    })();
    match result {
        Ok(()) => {
            executor.execute_sql(executor.config.release_savepoint())?;
            Ok(())
        }
        Err(error) => {
            let _ = executor.execute_sql(executor.config.rollback_to_savepoint());
            let _ = executor.execute_sql(executor.config.release_savepoint());
            Err(error)
        }
    }
}

/// Replaces `$N` placeholders with the corresponding parameter in a single
/// pass, so placeholder-like text inside bound literals is never touched.
fn substitute(template: &str, parameters: &[String]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '$' {
            if let Some(index) = chars.peek().and_then(|next| next.to_digit(10)) {
                chars.next();
                match parameters.get(index as usize) {
                    Some(parameter) => rendered.push_str(parameter),
                    None => {
                        rendered.push('$');
                        rendered.push_str(&index.to_string());
                    }
                }
                continue;
            }
        }
        rendered.push(c);
    }
    rendered
}

/// The integer discriminator column prefix naming which value column a
/// property write populates.
fn bind_data_type(value: &Value) -> &'static str {
    match value {
        Value::Int(_) => "int",
        Value::Double(_) => "double",
        Value::String(_) => "string",
    }
}

fn parse_i64_cell(cell: &str) -> Result<i64, QueryError> {
    cell.parse().map_err(|_| QueryError::Internal {
        message: format!("expected an integer cell, got {cell:?}"),
    })
}

fn cell<'r>(
    record_set: &'r RecordSet,
    record: &'r crate::record_set::Record,
    column: &str,
) -> Result<&'r str, QueryError> {
    let index = record_set
        .column_index(column)
        .ok_or_else(|| QueryError::Internal {
            message: format!("column {column:?} is missing from the result"),
        })?;
    record
        .values
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| QueryError::Internal {
            message: format!("row is shorter than the column list at {column:?}"),
        })
}

fn validate_filter_query(filter: &str) -> Result<(), QueryError> {
    let trimmed = filter.trim();
    if trimmed.is_empty() {
        return Err(QueryError::InvalidArgument {
            message: "filter_query must not be empty".to_owned(),
        });
    }
    if trimmed.contains(';') {
        return Err(QueryError::InvalidArgument {
            message: "filter_query must be a single predicate".to_owned(),
        });
    }
    let mut depth = 0i64;
    let mut in_string = false;
    for c in trimmed.chars() {
        match c {
            '\'' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => {
                depth -= 1;
                if depth < 0 {
                    break;
                }
            }
            _ => {}
        }
    }
    if depth != 0 || in_string {
        return Err(QueryError::InvalidArgument {
            message: "filter_query has unbalanced quotes or parentheses".to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod template_tests {
    use super::*;

    #[test]
    fn substitute_replaces_each_placeholder_once() {
        let rendered = substitute(
            "INSERT INTO `T` (`a`, `b`) VALUES ($0, $1)",
            &["1".to_owned(), "'x'".to_owned()],
        );
        assert_eq!(rendered, "INSERT INTO `T` (`a`, `b`) VALUES (1, 'x')");
    }

    #[test]
    fn substitute_ignores_placeholders_inside_bound_literals() {
        let rendered = substitute(
            "UPDATE `T` SET `a` = $0, `b` = $1",
            &["'costs $1.50'".to_owned(), "2".to_owned()],
        );
        assert_eq!(rendered, "UPDATE `T` SET `a` = 'costs $1.50', `b` = 2");
    }

    #[test]
    fn substitute_renders_discriminator_column_names() {
        let rendered = substitute(
            "INSERT INTO `P` (`$0_value`) VALUES ($1)",
            &["int".to_owned(), "3".to_owned()],
        );
        assert_eq!(rendered, "INSERT INTO `P` (`int_value`) VALUES (3)");
    }

    #[test]
    fn data_type_discriminates_by_populated_variant() {
        assert_eq!(bind_data_type(&Value::Int(1)), "int");
        assert_eq!(bind_data_type(&Value::Double(0.5)), "double");
        assert_eq!(bind_data_type(&Value::String("s".to_owned())), "string");
    }

    #[test]
    fn filter_validation_rejects_malformed_predicates() {
        assert!(validate_filter_query("uri = 'path'").is_ok());
        assert!(validate_filter_query("(state = 2 OR state = 1)").is_ok());
        assert!(validate_filter_query("  ").is_err());
        assert!(validate_filter_query("uri = 'path'; DROP TABLE Artifact").is_err());
        assert!(validate_filter_query("(state = 2").is_err());
        assert!(validate_filter_query("uri = 'unterminated").is_err());
    }
}
