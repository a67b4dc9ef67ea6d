use super::*;
use crate::metadata::{ArtifactState, ArtifactStructType, EventStep, EventType, ExecutionState};
use crate::query::SCHEMA_VERSION;
use crate::record_set::NULL_VALUE;
use crate::source::{SourceError, SqliteMetadataSource};
use tempfile::NamedTempFile;

#[test]
fn schema_init_round_trip() -> anyhow::Result<()> {
    let file = NamedTempFile::new()?;
    {
        let mut source = SqliteMetadataSource::open(file.path())?;
        let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
        executor.init_metadata_source_if_not_exists(false)?;
        source.begin()?;
        let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
        assert_eq!(executor.get_schema_version()?, SCHEMA_VERSION);
        assert_eq!(executor.get_library_version(), SCHEMA_VERSION);
        executor.check_tables()?;
        source.commit()?;
    }

    // Re-opening and initialising again is a no-op that succeeds.
    let mut source = SqliteMetadataSource::open(file.path())?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.init_metadata_source_if_not_exists(false)?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.init_metadata_source()?;
    source.begin()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    assert_eq!(executor.get_schema_version()?, SCHEMA_VERSION);
    Ok(())
}

#[test]
fn operations_require_a_transaction() -> anyhow::Result<()> {
    let file = NamedTempFile::new()?;
    let mut source = SqliteMetadataSource::open(file.path())?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.init_metadata_source_if_not_exists(false)?;

    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    assert!(matches!(
        executor.select_all_types(TypeKind::Artifact),
        Err(QueryError::FailedPrecondition { .. })
    ));
    Ok(())
}

#[test]
fn select_types_by_id_works() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let type_id_1 = executor.insert_artifact_type("artifact_type_1", None, None)?;
    let type_id_2 = executor.insert_artifact_type("artifact_type_2", None, None)?;
    let input_type = ArtifactStructType::Any;
    let output_type = ArtifactStructType::None;
    let type_id_3 = executor.insert_execution_type(
        "execution_type_1",
        None,
        None,
        Some(&input_type),
        Some(&output_type),
    )?;
    let type_id_4 = executor.insert_execution_type(
        "execution_type_2",
        None,
        None,
        Some(&input_type),
        Some(&output_type),
    )?;
    let type_id_5 = executor.insert_context_type("context_type_1", None, None)?;
    assert_eq!(
        [type_id_1, type_id_2, type_id_3, type_id_4, type_id_5],
        [1, 2, 3, 4, 5]
    );

    let artifacts = executor.select_types_by_id(&[type_id_1, type_id_2], TypeKind::Artifact)?;
    assert_eq!(artifacts.len(), 2);
    assert_eq!(
        artifacts.column_values("name"),
        ["artifact_type_1", "artifact_type_2"]
    );
    assert_eq!(artifacts.value(0, "version"), Some(NULL_VALUE));
    assert_eq!(artifacts.value(0, "description"), Some(NULL_VALUE));
    assert_eq!(artifacts.column_index("input_type"), None);

    let executions = executor.select_types_by_id(&[type_id_3, type_id_4], TypeKind::Execution)?;
    assert_eq!(executions.len(), 2);
    assert_eq!(
        executions.column_values("name"),
        ["execution_type_1", "execution_type_2"]
    );
    assert_eq!(executions.value(0, "version"), Some(NULL_VALUE));
    // Execution types carry their serialized input and output signatures.
    assert_ne!(executions.value(0, "input_type"), Some(NULL_VALUE));
    assert_ne!(executions.value(0, "output_type"), Some(NULL_VALUE));

    let contexts = executor.select_types_by_id(&[type_id_5], TypeKind::Context)?;
    assert_eq!(contexts.len(), 1);
    assert_eq!(contexts.value(0, "name"), Some("context_type_1"));

    // Empty input short-circuits to an empty record set.
    assert!(executor
        .select_types_by_id(&[], TypeKind::Artifact)?
        .is_empty());
    Ok(())
}

#[test]
fn select_types_by_id_filters_mixed_kinds() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let type_id_1 = executor.insert_artifact_type("artifact_type_1", None, None)?;
    let _type_id_2 = executor.insert_artifact_type("artifact_type_2", None, None)?;
    let type_id_3 = executor.insert_context_type("context_type_1", None, None)?;

    let record_set = executor.select_types_by_id(&[type_id_1, type_id_3], TypeKind::Artifact)?;
    assert_eq!(record_set.len(), 1);
    assert_eq!(record_set.value(0, "name"), Some("artifact_type_1"));
    Ok(())
}

#[test]
fn select_type_by_name_distinguishes_null_versions() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let unversioned = executor.insert_artifact_type("t0", None, None)?;
    let versioned = executor.insert_artifact_type("t0", Some("v1"), None)?;
    assert_ne!(unversioned, versioned);

    assert!(matches!(
        executor.insert_artifact_type("t0", None, None),
        Err(QueryError::AlreadyExists { .. })
    ));
    assert!(matches!(
        executor.insert_artifact_type("t0", Some("v1"), None),
        Err(QueryError::AlreadyExists { .. })
    ));

    let by_null = executor.select_type_by_name_and_version("t0", None, TypeKind::Artifact)?;
    assert_eq!(by_null.len(), 1);
    assert_eq!(by_null.value(0, "id"), Some(unversioned.to_string().as_str()));

    let by_version =
        executor.select_type_by_name_and_version("t0", Some("v1"), TypeKind::Artifact)?;
    assert_eq!(by_version.len(), 1);
    assert_eq!(by_version.value(0, "id"), Some(versioned.to_string().as_str()));

    // The same name is free under a different kind.
    executor.insert_context_type("t0", None, None)?;
    Ok(())
}

#[test]
fn select_type_by_id_reports_not_found() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let type_id = executor.insert_artifact_type("t0", None, None)?;
    assert_eq!(
        executor
            .select_type_by_id(type_id, TypeKind::Artifact)?
            .len(),
        1
    );
    assert!(matches!(
        executor.select_type_by_id(type_id + 100, TypeKind::Artifact),
        Err(QueryError::NotFound { .. })
    ));
    // A correct id under the wrong kind is also absent.
    assert!(matches!(
        executor.select_type_by_id(type_id, TypeKind::Context),
        Err(QueryError::NotFound { .. })
    ));
    Ok(())
}

#[test]
fn type_properties_round_trip() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let type_id = executor.insert_artifact_type("t0", None, None)?;
    executor.insert_type_property(type_id, "day", PropertyType::Int)?;
    executor.insert_type_property(type_id, "split", PropertyType::String)?;

    let record_set = executor.select_property_by_type_id(type_id)?;
    assert_eq!(record_set.len(), 2);
    assert_eq!(record_set.column_values("name"), ["day", "split"]);
    assert_eq!(
        record_set.column_values("data_type"),
        [
            (PropertyType::Int as i64).to_string(),
            (PropertyType::String as i64).to_string()
        ]
    );

    assert!(matches!(
        executor.insert_type_property(type_id, "day", PropertyType::Double),
        Err(QueryError::AlreadyExists { .. })
    ));
    Ok(())
}

#[test]
fn select_parent_types_by_type_id_works() -> anyhow::Result<()> {
    let file = NamedTempFile::new()?;
    let mut source = CountingSource {
        inner: SqliteMetadataSource::open(file.path())?,
        executed: 0,
    };
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.init_metadata_source_if_not_exists(false)?;
    source.begin()?;

    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    let context_type_id = executor.insert_context_type("context_type", None, None)?;
    executor.insert_type_property(context_type_id, "property_1", PropertyType::Int)?;
    let artifact_type_id = executor.insert_artifact_type("artifact_type", None, None)?;
    let parent_artifact_type_id = executor.insert_artifact_type("parent_artifact_type", None, None)?;
    let input_type = ArtifactStructType::Any;
    let output_type = ArtifactStructType::None;
    let execution_type_id = executor.insert_execution_type(
        "execution_type",
        None,
        None,
        Some(&input_type),
        Some(&output_type),
    )?;
    let parent_execution_type_id = executor.insert_execution_type(
        "parent_execution_type",
        None,
        None,
        Some(&input_type),
        Some(&output_type),
    )?;
    // An id that names no Type row at all.
    let non_exist_parent_type_id = parent_execution_type_id + execution_type_id;

    executor.insert_parent_type(artifact_type_id, parent_artifact_type_id)?;
    executor.insert_parent_type(execution_type_id, parent_execution_type_id)?;
    executor.insert_parent_type(execution_type_id, non_exist_parent_type_id)?;
    drop(executor);

    // Empty input returns an empty record set without touching the driver.
    let executed_before = source.executed;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    assert!(executor.select_parent_types_by_type_id(&[])?.is_empty());
    drop(executor);
    assert_eq!(source.executed, executed_before);

    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    // A type without parents yields nothing.
    assert!(executor
        .select_parent_types_by_type_id(&[context_type_id])?
        .is_empty());

    // Dangling parents are returned: the link table stores bare ids.
    let record_set = executor.select_parent_types_by_type_id(&[execution_type_id])?;
    assert_eq!(
        parent_link_pairs(&record_set)?,
        [
            (execution_type_id, parent_execution_type_id),
            (execution_type_id, non_exist_parent_type_id)
        ]
    );

    // Mixed kinds are returned together.
    let record_set = executor.select_parent_types_by_type_id(&[
        context_type_id,
        artifact_type_id,
        execution_type_id,
    ])?;
    assert_eq!(
        parent_link_pairs(&record_set)?,
        [
            (artifact_type_id, parent_artifact_type_id),
            (execution_type_id, parent_execution_type_id),
            (execution_type_id, non_exist_parent_type_id)
        ]
    );

    // Deleting one link leaves the others.
    executor.delete_parent_type(execution_type_id, non_exist_parent_type_id)?;
    let record_set = executor.select_parent_types_by_type_id(&[execution_type_id])?;
    assert_eq!(
        parent_link_pairs(&record_set)?,
        [(execution_type_id, parent_execution_type_id)]
    );
    Ok(())
}

#[test]
fn artifact_null_name_round_trips() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let type_id = executor.insert_artifact_type("t0", None, None)?;
    let artifact_id = executor.insert_artifact(type_id, "/foo/bar", None, None, 1000, 1000)?;

    let record_set = executor.select_artifacts_by_id(&[artifact_id])?;
    assert_eq!(record_set.len(), 1);
    assert_eq!(
        record_set.value(0, "id"),
        Some(artifact_id.to_string().as_str())
    );
    assert_eq!(record_set.value(0, "uri"), Some("/foo/bar"));
    assert_eq!(record_set.value(0, "name"), Some(NULL_VALUE));
    assert_eq!(record_set.value(0, "state"), Some(NULL_VALUE));
    assert_eq!(record_set.value(0, "create_time_since_epoch"), Some("1000"));
    Ok(())
}

#[test]
fn artifact_updates_and_lookups_work() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let type_id = executor.insert_artifact_type("t0", None, None)?;
    let artifact_id = executor.insert_artifact(
        type_id,
        "path/to/data",
        Some(ArtifactState::Pending),
        Some("a0"),
        100,
        100,
    )?;

    assert_eq!(
        executor
            .select_artifact_by_type_id_and_name(type_id, "a0")?
            .len(),
        1
    );
    assert_eq!(executor.select_artifacts_by_type_id(type_id)?.len(), 1);
    assert_eq!(executor.select_artifacts_by_uri("path/to/data")?.len(), 1);
    assert!(executor.select_artifacts_by_uri("missing")?.is_empty());

    executor.update_artifact(
        artifact_id,
        type_id,
        "path/to/data2",
        Some(ArtifactState::Live),
        200,
    )?;
    let record_set = executor.select_artifacts_by_id(&[artifact_id])?;
    assert_eq!(record_set.value(0, "uri"), Some("path/to/data2"));
    assert_eq!(
        record_set.value(0, "state"),
        Some((ArtifactState::Live as i64).to_string().as_str())
    );
    assert_eq!(record_set.value(0, "last_update_time_since_epoch"), Some("200"));
    assert_eq!(record_set.value(0, "create_time_since_epoch"), Some("100"));

    // Duplicate names within a type are refused.
    assert!(matches!(
        executor.insert_artifact(type_id, "other", None, Some("a0"), 1, 1),
        Err(QueryError::AlreadyExists { .. })
    ));
    Ok(())
}

#[test]
fn typed_properties_keep_exactly_one_value_column() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let type_id = executor.insert_artifact_type("t0", None, None)?;
    let artifact_id = executor.insert_artifact(type_id, "uri", None, None, 1, 1)?;

    executor.insert_artifact_property(artifact_id, "day", false, &Value::Int(7))?;
    executor.insert_artifact_property(artifact_id, "ratio", false, &Value::Double(0.25))?;
    executor.insert_artifact_property(
        artifact_id,
        "split",
        true,
        &Value::String("train's".to_owned()),
    )?;

    let record_set = executor.select_artifact_property_by_artifact_id(&[artifact_id])?;
    assert_eq!(record_set.len(), 3);

    let day = property_row(&record_set, "day")?;
    assert_eq!(record_set.value(day, "int_value"), Some("7"));
    assert_eq!(record_set.value(day, "double_value"), Some(NULL_VALUE));
    assert_eq!(record_set.value(day, "string_value"), Some(NULL_VALUE));
    assert_eq!(record_set.value(day, "is_custom_property"), Some("0"));

    let ratio = property_row(&record_set, "ratio")?;
    assert_eq!(record_set.value(ratio, "double_value"), Some("0.25"));
    assert_eq!(record_set.value(ratio, "int_value"), Some(NULL_VALUE));

    // The escaped quote survives the round trip.
    let split = property_row(&record_set, "split")?;
    assert_eq!(record_set.value(split, "string_value"), Some("train's"));
    assert_eq!(record_set.value(split, "is_custom_property"), Some("1"));

    // An update that changes the value type moves the populated column.
    executor.update_artifact_property(artifact_id, "day", &Value::String("mon".to_owned()))?;
    let record_set = executor.select_artifact_property_by_artifact_id(&[artifact_id])?;
    let day = property_row(&record_set, "day")?;
    assert_eq!(record_set.value(day, "int_value"), Some(NULL_VALUE));
    assert_eq!(record_set.value(day, "string_value"), Some("mon"));

    executor.delete_artifact_property(artifact_id, "ratio")?;
    assert_eq!(
        executor
            .select_artifact_property_by_artifact_id(&[artifact_id])?
            .len(),
        2
    );
    Ok(())
}

#[test]
fn delete_contexts_by_id_works() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let context_type_id = executor.insert_context_type("context_type", None, None)?;
    executor.insert_type_property(context_type_id, "property_1", PropertyType::Int)?;
    let artifact_type_id = executor.insert_artifact_type("artifact_type", None, None)?;
    let input_type = ArtifactStructType::Any;
    let output_type = ArtifactStructType::None;
    let execution_type_id = executor.insert_execution_type(
        "execution_type",
        None,
        None,
        Some(&input_type),
        Some(&output_type),
    )?;

    let context_id_1 =
        executor.insert_context(context_type_id, "delete_contexts_by_id_test_1", 1, 1)?;
    let context_id_2 =
        executor.insert_context(context_type_id, "delete_contexts_by_id_test_2", 1, 1)?;
    executor.insert_context_property(context_id_1, "property_1", false, &Value::Int(3))?;
    executor.insert_context_property(context_id_2, "property_1", false, &Value::Int(3))?;

    let artifact_id = executor.insert_artifact(
        artifact_type_id,
        "/foo/bar",
        None,
        Some("artifact"),
        1,
        1,
    )?;
    let execution_id =
        executor.insert_execution(execution_type_id, None, Some("execution"), 1, 1)?;
    executor.insert_attribution(context_id_1, artifact_id)?;
    executor.insert_association(context_id_1, execution_id)?;

    // Empty ids leave everything untouched.
    executor.delete_contexts_by_id(&[])?;
    assert_eq!(
        executor
            .select_contexts_by_id(&[context_id_1, context_id_2])?
            .len(),
        2
    );

    // Deleting context1 removes it and its properties, nothing else.
    executor.delete_contexts_by_id(&[context_id_1])?;
    let record_set = executor.select_contexts_by_id(&[context_id_1, context_id_2])?;
    assert_eq!(record_set.len(), 1);
    assert_eq!(
        record_set.value(0, "id"),
        Some(context_id_2.to_string().as_str())
    );
    assert!(executor
        .select_context_property_by_context_id(&[context_id_1])?
        .is_empty());
    assert_eq!(
        executor.select_attribution_by_context_id(context_id_1)?.len(),
        1
    );
    assert_eq!(
        executor
            .select_association_by_context_ids(&[context_id_1])?
            .len(),
        1
    );

    // Deleting an unknown id succeeds and changes nothing.
    executor.delete_contexts_by_id(&[context_id_2 + 1])?;
    let record_set = executor.select_contexts_by_id(&[context_id_2])?;
    assert_eq!(record_set.len(), 1);
    assert_eq!(
        record_set.value(0, "id"),
        Some(context_id_2.to_string().as_str())
    );
    assert_eq!(
        executor
            .select_context_property_by_context_id(&[context_id_2])?
            .len(),
        1
    );
    Ok(())
}

#[test]
fn delete_artifacts_and_links_compose() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let artifact_type_id = executor.insert_artifact_type("artifact_type", None, None)?;
    let input_type = ArtifactStructType::Any;
    let execution_type_id = executor.insert_execution_type(
        "execution_type",
        None,
        None,
        Some(&input_type),
        None,
    )?;
    let context_type_id = executor.insert_context_type("context_type", None, None)?;

    let artifact_id = executor.insert_artifact(artifact_type_id, "uri", None, None, 1, 1)?;
    let execution_id = executor.insert_execution(execution_type_id, None, None, 1, 1)?;
    let context_id = executor.insert_context(context_type_id, "ctx", 1, 1)?;
    executor.insert_artifact_property(artifact_id, "day", false, &Value::Int(1))?;
    let event_id = executor.insert_event(artifact_id, execution_id, EventType::Output, 42)?;
    executor.insert_event_path(event_id, &EventStep::Index(0))?;
    executor.insert_attribution(context_id, artifact_id)?;

    // Deleting the artifact removes it and its properties only.
    executor.delete_artifacts_by_id(&[artifact_id])?;
    assert!(executor.select_artifacts_by_id(&[artifact_id])?.is_empty());
    assert!(executor
        .select_artifact_property_by_artifact_id(&[artifact_id])?
        .is_empty());
    assert_eq!(executor.select_event_by_artifact_ids(&[artifact_id])?.len(), 1);
    assert_eq!(
        executor.select_attribution_by_artifact_id(artifact_id)?.len(),
        1
    );

    // The caller composes the link deletions it wants.
    executor.delete_events_by_artifacts_id(&[artifact_id])?;
    assert!(executor
        .select_event_by_artifact_ids(&[artifact_id])?
        .is_empty());
    assert!(executor
        .select_event_path_by_event_ids(&[event_id])?
        .is_empty());
    executor.delete_attributions_by_artifacts_id(&[artifact_id])?;
    assert!(executor
        .select_attribution_by_artifact_id(artifact_id)?
        .is_empty());

    // Executions follow the same discipline.
    executor.insert_execution_property(execution_id, "step", false, &Value::Int(2))?;
    executor.insert_association(context_id, execution_id)?;
    executor.delete_executions_by_id(&[execution_id])?;
    assert!(executor.select_executions_by_id(&[execution_id])?.is_empty());
    assert!(executor
        .select_execution_property_by_execution_id(&[execution_id])?
        .is_empty());
    assert_eq!(
        executor
            .select_association_by_execution_id(execution_id)?
            .len(),
        1
    );
    executor.delete_associations_by_executions_id(&[execution_id])?;
    assert!(executor
        .select_association_by_execution_id(execution_id)?
        .is_empty());

    // Idempotent: a second pass over the same ids is still success.
    executor.delete_artifacts_by_id(&[artifact_id])?;
    executor.delete_executions_by_id(&[execution_id])?;
    Ok(())
}

#[test]
fn events_and_paths_round_trip() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let artifact_type_id = executor.insert_artifact_type("t0", None, None)?;
    let execution_type_id =
        executor.insert_execution_type("t1", None, None, None, None)?;
    let artifact_id = executor.insert_artifact(artifact_type_id, "uri", None, None, 1, 1)?;
    let execution_id = executor.insert_execution(execution_type_id, None, None, 1, 1)?;

    let event_id =
        executor.insert_event(artifact_id, execution_id, EventType::DeclaredOutput, 1234)?;
    executor.insert_event_path(event_id, &EventStep::Index(30))?;
    executor.insert_event_path(event_id, &EventStep::Key("output".to_owned()))?;

    let events = executor.select_event_by_artifact_ids(&[artifact_id])?;
    assert_eq!(events.len(), 1);
    assert_eq!(
        events.value(0, "type"),
        Some((EventType::DeclaredOutput as i64).to_string().as_str())
    );
    assert_eq!(events.value(0, "milliseconds_since_epoch"), Some("1234"));

    let events = executor.select_event_by_execution_ids(&[execution_id])?;
    assert_eq!(events.len(), 1);

    let paths = executor.select_event_path_by_event_ids(&[event_id])?;
    assert_eq!(paths.len(), 2);
    assert_eq!(paths.value(0, "is_index_step"), Some("1"));
    assert_eq!(paths.value(0, "step_index"), Some("30"));
    assert_eq!(paths.value(0, "step_key"), Some(NULL_VALUE));
    assert_eq!(paths.value(1, "is_index_step"), Some("0"));
    assert_eq!(paths.value(1, "step_index"), Some(NULL_VALUE));
    assert_eq!(paths.value(1, "step_key"), Some("output"));
    Ok(())
}

#[test]
fn duplicate_links_are_already_exists() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let artifact_type_id = executor.insert_artifact_type("t0", None, None)?;
    let execution_type_id = executor.insert_execution_type("t1", None, None, None, None)?;
    let context_type_id = executor.insert_context_type("t2", None, None)?;
    let artifact_id = executor.insert_artifact(artifact_type_id, "uri", None, None, 1, 1)?;
    let execution_id = executor.insert_execution(execution_type_id, None, None, 1, 1)?;
    let context_id = executor.insert_context(context_type_id, "ctx", 1, 1)?;

    executor.insert_attribution(context_id, artifact_id)?;
    assert!(matches!(
        executor.insert_attribution(context_id, artifact_id),
        Err(QueryError::AlreadyExists { .. })
    ));
    executor.insert_association(context_id, execution_id)?;
    assert!(matches!(
        executor.insert_association(context_id, execution_id),
        Err(QueryError::AlreadyExists { .. })
    ));

    // Context names are unique per type.
    assert!(matches!(
        executor.insert_context(context_type_id, "ctx", 1, 1),
        Err(QueryError::AlreadyExists { .. })
    ));
    Ok(())
}

#[test]
fn parent_context_links_work() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let context_type_id = executor.insert_context_type("t0", None, None)?;
    let parent_id = executor.insert_context(context_type_id, "pipeline", 1, 1)?;
    let child_id = executor.insert_context(context_type_id, "run", 1, 1)?;

    executor.insert_parent_context(parent_id, child_id)?;

    let parents = executor.select_parent_contexts_by_context_id(child_id)?;
    assert_eq!(parents.len(), 1);
    assert_eq!(
        parents.value(0, "parent_context_id"),
        Some(parent_id.to_string().as_str())
    );

    let children = executor.select_child_contexts_by_context_id(parent_id)?;
    assert_eq!(children.len(), 1);
    assert_eq!(
        children.value(0, "context_id"),
        Some(child_id.to_string().as_str())
    );

    executor.delete_parent_contexts_by_parent_ids(&[parent_id])?;
    assert!(executor
        .select_parent_contexts_by_context_id(child_id)?
        .is_empty());

    executor.insert_parent_context(parent_id, child_id)?;
    executor.delete_parent_contexts_by_child_ids(&[child_id])?;
    assert!(executor
        .select_child_contexts_by_context_id(parent_id)?
        .is_empty());
    Ok(())
}

#[test]
fn execution_updates_work() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let type_id = executor.insert_execution_type("t0", None, None, None, None)?;
    let execution_id =
        executor.insert_execution(type_id, Some(ExecutionState::Running), Some("run"), 1, 1)?;
    assert_eq!(
        executor
            .select_execution_by_type_id_and_name(type_id, "run")?
            .len(),
        1
    );
    assert_eq!(executor.select_executions_by_type_id(type_id)?.len(), 1);

    executor.update_execution(execution_id, type_id, Some(ExecutionState::Complete), 9)?;
    let record_set = executor.select_executions_by_id(&[execution_id])?;
    assert_eq!(
        record_set.value(0, "last_known_state"),
        Some((ExecutionState::Complete as i64).to_string().as_str())
    );

    let context_type_id = executor.insert_context_type("t1", None, None)?;
    let context_id = executor.insert_context(context_type_id, "before", 1, 1)?;
    executor.update_context(context_id, context_type_id, "after", 9)?;
    let record_set = executor.select_context_by_type_id_and_name(context_type_id, "after")?;
    assert_eq!(record_set.len(), 1);
    assert_eq!(record_set.value(0, "last_update_time_since_epoch"), Some("9"));
    Ok(())
}

#[test]
fn list_artifact_ids_paginates_with_token() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let type_id = executor.insert_artifact_type("t0", None, None)?;
    for index in 1..=5i64 {
        executor.insert_artifact(
            type_id,
            &format!("uri_{index}"),
            None,
            None,
            index * 100,
            index * 100,
        )?;
    }

    let options = ListOperationOptions::default()
        .max_result_size(2)
        .ordered_by(OrderByField::CreateTime, false);
    let (page, token) = executor.list_artifact_ids(&options, None)?;
    assert_eq!(page.column_values("id"), ["5", "4"]);
    let token = token.expect("a full page must produce a token");

    let (page, token) = executor.list_artifact_ids(&options.clone().page_token(&token), None)?;
    assert_eq!(page.column_values("id"), ["3", "2"]);
    let token = token.expect("a full page must produce a token");

    let (page, token) = executor.list_artifact_ids(&options.clone().page_token(&token), None)?;
    assert_eq!(page.column_values("id"), ["1"]);
    assert!(token.is_none());
    Ok(())
}

#[test]
fn list_ids_breaks_ties_by_id() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let type_id = executor.insert_context_type("t0", None, None)?;
    for index in 1..=5i64 {
        executor.insert_context(type_id, &format!("ctx_{index}"), 100, 100)?;
    }

    // Identical timestamps: the id tiebreak keeps pagination stable.
    let options = ListOperationOptions::default()
        .max_result_size(2)
        .ordered_by(OrderByField::UpdateTime, true);
    let (page, token) = executor.list_context_ids(&options, None)?;
    assert_eq!(page.column_values("id"), ["1", "2"]);
    let token = token.expect("a full page must produce a token");

    let (page, _) = executor.list_context_ids(&options.clone().page_token(&token), None)?;
    assert_eq!(page.column_values("id"), ["3", "4"]);
    Ok(())
}

#[test]
fn list_ids_respects_candidates_and_filters() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let type_id = executor.insert_artifact_type("t0", None, None)?;
    for index in 1..=4i64 {
        executor.insert_artifact(type_id, &format!("uri_{index}"), None, None, index, index)?;
    }

    let options = ListOperationOptions::default().max_result_size(10);
    let (page, token) = executor.list_artifact_ids(&options, Some(&[2, 4]))?;
    assert_eq!(page.column_values("id"), ["2", "4"]);
    assert!(token.is_none());

    // Provided-but-empty candidates produce an empty page without querying.
    let (page, token) = executor.list_artifact_ids(&options, Some(&[]))?;
    assert!(page.is_empty());
    assert!(token.is_none());

    let filtered = ListOperationOptions::default()
        .max_result_size(10)
        .filter("uri = 'uri_3'");
    let (page, _) = executor.list_artifact_ids(&filtered, None)?;
    assert_eq!(page.column_values("id"), ["3"]);

    // The filter composes with candidate restriction via AND.
    let (page, _) = executor.list_artifact_ids(&filtered, Some(&[1, 2]))?;
    assert!(page.is_empty());
    Ok(())
}

#[test]
fn list_ids_rejects_bad_options() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);

    let options = ListOperationOptions::default().max_result_size(0);
    assert!(matches!(
        executor.list_artifact_ids(&options, None),
        Err(QueryError::InvalidArgument { .. })
    ));

    let options = ListOperationOptions::default().filter("uri = 'x'");
    assert!(matches!(
        executor.list_execution_ids(&options, None),
        Err(QueryError::InvalidArgument { .. })
    ));
    assert!(matches!(
        executor.list_context_ids(&options, None),
        Err(QueryError::InvalidArgument { .. })
    ));

    let options = ListOperationOptions::default().filter("uri = 'x'; DROP TABLE Artifact");
    assert!(matches!(
        executor.list_artifact_ids(&options, None),
        Err(QueryError::InvalidArgument { .. })
    ));

    let options = ListOperationOptions::default().page_token("not a token");
    assert!(matches!(
        executor.list_artifact_ids(&options, None),
        Err(QueryError::InvalidArgument { .. })
    ));

    // A token produced under one ordering is rejected under another.
    let type_id = executor.insert_artifact_type("t0", None, None)?;
    for index in 1..=3i64 {
        executor.insert_artifact(type_id, "uri", None, None, index, index)?;
    }
    let by_create = ListOperationOptions::default()
        .max_result_size(1)
        .ordered_by(OrderByField::CreateTime, true);
    let (_, token) = executor.list_artifact_ids(&by_create, None)?;
    let token = token.expect("a full page must produce a token");
    let by_id = ListOperationOptions::default()
        .max_result_size(1)
        .ordered_by(OrderByField::Id, true)
        .page_token(&token);
    assert!(matches!(
        executor.list_artifact_ids(&by_id, None),
        Err(QueryError::InvalidArgument { .. })
    ));
    Ok(())
}

#[test]
fn downgrade_and_migrate_round_trip() -> anyhow::Result<()> {
    let file = NamedTempFile::new()?;
    let mut source = SqliteMetadataSource::open(file.path())?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.init_metadata_source_if_not_exists(false)?;

    // Seed a row that must survive the round trip.
    source.begin()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    let type_id = executor.insert_artifact_type("t0", None, None)?;
    source.commit()?;

    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.downgrade_metadata_source(0)?;

    // The version table is gone in the 0.13.2 layout.
    source.begin()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    assert!(matches!(
        executor.get_schema_version(),
        Err(QueryError::NotFound { .. })
    ));
    source.rollback()?;

    // Without migration enabled the old database is refused.
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    assert!(matches!(
        executor.init_metadata_source_if_not_exists(false),
        Err(QueryError::FailedPrecondition { .. })
    ));

    // With migration enabled it is brought back up, step by step.
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.init_metadata_source_if_not_exists(true)?;

    source.begin()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    assert_eq!(executor.get_schema_version()?, SCHEMA_VERSION);
    let record_set = executor.select_type_by_name_and_version("t0", None, TypeKind::Artifact)?;
    assert_eq!(record_set.len(), 1);
    assert_eq!(record_set.value(0, "id"), Some(type_id.to_string().as_str()));
    Ok(())
}

#[test]
fn downgrade_to_intermediate_version_is_recorded() -> anyhow::Result<()> {
    let file = NamedTempFile::new()?;
    let mut source = SqliteMetadataSource::open(file.path())?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.init_metadata_source_if_not_exists(false)?;

    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.downgrade_metadata_source(3)?;

    source.begin()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    assert_eq!(executor.get_schema_version()?, 3);
    source.rollback()?;

    // Downgrading to the version already reached is a no-op.
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.downgrade_metadata_source(3)?;

    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.init_metadata_source_if_not_exists(true)?;
    source.begin()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    assert_eq!(executor.get_schema_version()?, SCHEMA_VERSION);
    Ok(())
}

#[test]
fn downgrade_validates_its_target() -> anyhow::Result<()> {
    let file = NamedTempFile::new()?;
    let mut source = SqliteMetadataSource::open(file.path())?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.init_metadata_source_if_not_exists(false)?;

    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    assert!(matches!(
        executor.downgrade_metadata_source(-1),
        Err(QueryError::InvalidArgument { .. })
    ));
    assert!(matches!(
        executor.downgrade_metadata_source(SCHEMA_VERSION),
        Err(QueryError::InvalidArgument { .. })
    ));
    Ok(())
}

#[test]
fn partial_legacy_schema_is_data_loss() -> anyhow::Result<()> {
    let file = NamedTempFile::new()?;
    let mut source = SqliteMetadataSource::open(file.path())?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.init_metadata_source_if_not_exists(false)?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.downgrade_metadata_source(0)?;

    // Losing one of the legacy tables leaves an ambiguous layout.
    source.execute("DROP TABLE `EventPath`")?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    assert!(matches!(
        executor.init_metadata_source_if_not_exists(true),
        Err(QueryError::DataLoss { .. })
    ));
    Ok(())
}

#[test]
fn newer_schema_is_refused() -> anyhow::Result<()> {
    let file = NamedTempFile::new()?;
    let mut source = SqliteMetadataSource::open(file.path())?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.init_metadata_source_if_not_exists(false)?;

    source.execute("UPDATE `MLMDEnv` SET `schema_version` = 99")?;

    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    assert!(matches!(
        executor.init_metadata_source_if_not_exists(true),
        Err(QueryError::FailedPrecondition { .. })
    ));
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    assert!(matches!(
        executor.downgrade_metadata_source(3),
        Err(QueryError::FailedPrecondition { .. })
    ));
    Ok(())
}

#[test]
fn delete_metadata_source_is_unimplemented() -> anyhow::Result<()> {
    let (_file, mut source) = new_store()?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    assert!(matches!(
        executor.delete_metadata_source(),
        Err(QueryError::Unimplemented { .. })
    ));
    Ok(())
}

/// Opens a fresh on-disk store, initialises the schema and leaves an open
/// transaction for the test body.
fn new_store() -> anyhow::Result<(NamedTempFile, SqliteMetadataSource)> {
    let file = NamedTempFile::new()?;
    let mut source = SqliteMetadataSource::open(file.path())?;
    let mut executor = QueryExecutor::new(Query::sqlite(), &mut source);
    executor.init_metadata_source_if_not_exists(false)?;
    source.begin()?;
    Ok((file, source))
}

fn parent_link_pairs(record_set: &RecordSet) -> anyhow::Result<Vec<(i64, i64)>> {
    let type_id = record_set
        .column_index("type_id")
        .ok_or_else(|| anyhow::anyhow!("missing type_id column"))?;
    let parent_type_id = record_set
        .column_index("parent_type_id")
        .ok_or_else(|| anyhow::anyhow!("missing parent_type_id column"))?;
    let mut pairs = Vec::new();
    for record in &record_set.records {
        pairs.push((
            record.values[type_id].parse()?,
            record.values[parent_type_id].parse()?,
        ));
    }
    pairs.sort_unstable();
    Ok(pairs)
}

/// Row index of the property with the given name, located by column name.
fn property_row(record_set: &RecordSet, property_name: &str) -> anyhow::Result<usize> {
    let name = record_set
        .column_index("name")
        .ok_or_else(|| anyhow::anyhow!("missing name column"))?;
    record_set
        .records
        .iter()
        .position(|record| record.values[name] == property_name)
        .ok_or_else(|| anyhow::anyhow!("property {property_name} not found"))
}

/// Wraps a source and counts `execute` calls, to observe short-circuits.
struct CountingSource {
    inner: SqliteMetadataSource,
    executed: usize,
}

impl MetadataSource for CountingSource {
    fn begin(&mut self) -> Result<(), SourceError> {
        self.inner.begin()
    }

    fn commit(&mut self) -> Result<(), SourceError> {
        self.inner.commit()
    }

    fn rollback(&mut self) -> Result<(), SourceError> {
        self.inner.rollback()
    }

    fn execute(&mut self, sql: &str) -> Result<RecordSet, SourceError> {
        self.executed += 1;
        self.inner.execute(sql)
    }

    fn escape_string(&self, value: &str) -> String {
        self.inner.escape_string(value)
    }

    fn last_insert_id(&mut self) -> Result<i64, SourceError> {
        self.inner.last_insert_id()
    }

    fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    fn in_transaction(&self) -> bool {
        self.inner.in_transaction()
    }
}
