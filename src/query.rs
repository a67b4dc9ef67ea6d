//! SQL templates, schema DDL and migration scripts per supported dialect.
//!
//! The table layout and version chain follow the ml-metadata storage
//! conventions (<https://github.com/google/ml-metadata>), schema version 6.
//!
//! Templates carry `$0`, `$1`, ... placeholders that the executor replaces
//! with already-bound literals; the config itself holds no logic beyond
//! dialect selection.
use crate::metadata::TypeKind;

/// The schema version this library was built against.
pub const SCHEMA_VERSION: i64 = 6;

#[derive(Debug, Clone)]
pub enum Query {
    Sqlite(SqliteQuery),
    Mysql(MysqlQuery),
}

impl Query {
    pub fn sqlite() -> Self {
        Self::Sqlite(SqliteQuery)
    }

    pub fn mysql() -> Self {
        Self::Mysql(MysqlQuery)
    }

    pub fn schema_version(&self) -> i64 {
        SCHEMA_VERSION
    }

    pub fn bool_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    pub fn create_tables(&self) -> &'static [&'static str] {
        match self {
            Self::Sqlite(x) => x.create_tables(),
            Self::Mysql(x) => x.create_tables(),
        }
    }

    /// Statements migrating the stored schema from `from_version` to
    /// `from_version + 1`, or `None` when the pair is unknown.
    pub fn upgrade_queries(&self, from_version: i64) -> Option<&'static [&'static str]> {
        match self {
            Self::Sqlite(x) => x.upgrade_queries(from_version),
            Self::Mysql(x) => x.upgrade_queries(from_version),
        }
    }

    /// Statements migrating the stored schema from `from_version` down to
    /// `from_version - 1`. These may drop columns and tables.
    pub fn downgrade_queries(&self, from_version: i64) -> Option<&'static [&'static str]> {
        match self {
            Self::Sqlite(x) => x.downgrade_queries(from_version),
            Self::Mysql(x) => x.downgrade_queries(from_version),
        }
    }

    // -- schema version bookkeeping ------------------------------------------

    pub fn select_schema_version(&self) -> &'static str {
        "SELECT `schema_version` FROM `MLMDEnv`"
    }

    pub fn insert_schema_version(&self) -> &'static str {
        "INSERT INTO `MLMDEnv` (`schema_version`) VALUES ($0)"
    }

    pub fn update_schema_version(&self) -> &'static str {
        "UPDATE `MLMDEnv` SET `schema_version` = $0"
    }

    pub fn savepoint(&self) -> &'static str {
        "SAVEPOINT schema_migration_step"
    }

    pub fn release_savepoint(&self) -> &'static str {
        "RELEASE SAVEPOINT schema_migration_step"
    }

    pub fn rollback_to_savepoint(&self) -> &'static str {
        "ROLLBACK TO SAVEPOINT schema_migration_step"
    }

    /// One probe per table of the current schema; each must succeed on a
    /// database at [`SCHEMA_VERSION`].
    pub fn check_table_queries(&self) -> &'static [&'static str] {
        &[
            concat!(
                "SELECT `id`, `name`, `version`, `type_kind`, `description`, ",
                "`input_type`, `output_type` FROM `Type` LIMIT 1"
            ),
            "SELECT `type_id`, `name`, `data_type` FROM `TypeProperty` LIMIT 1",
            "SELECT `type_id`, `parent_type_id` FROM `ParentType` LIMIT 1",
            concat!(
                "SELECT `id`, `type_id`, `uri`, `state`, `name`, `create_time_since_epoch`, ",
                "`last_update_time_since_epoch` FROM `Artifact` LIMIT 1"
            ),
            concat!(
                "SELECT `artifact_id`, `name`, `is_custom_property`, `int_value`, ",
                "`double_value`, `string_value` FROM `ArtifactProperty` LIMIT 1"
            ),
            concat!(
                "SELECT `id`, `type_id`, `last_known_state`, `name`, `create_time_since_epoch`, ",
                "`last_update_time_since_epoch` FROM `Execution` LIMIT 1"
            ),
            concat!(
                "SELECT `execution_id`, `name`, `is_custom_property`, `int_value`, ",
                "`double_value`, `string_value` FROM `ExecutionProperty` LIMIT 1"
            ),
            concat!(
                "SELECT `id`, `type_id`, `name`, `create_time_since_epoch`, ",
                "`last_update_time_since_epoch` FROM `Context` LIMIT 1"
            ),
            concat!(
                "SELECT `context_id`, `name`, `is_custom_property`, `int_value`, ",
                "`double_value`, `string_value` FROM `ContextProperty` LIMIT 1"
            ),
            "SELECT `context_id`, `parent_context_id` FROM `ParentContext` LIMIT 1",
            concat!(
                "SELECT `id`, `artifact_id`, `execution_id`, `type`, ",
                "`milliseconds_since_epoch` FROM `Event` LIMIT 1"
            ),
            "SELECT `event_id`, `is_index_step`, `step_index`, `step_key` FROM `EventPath` LIMIT 1",
            "SELECT `id`, `context_id`, `execution_id` FROM `Association` LIMIT 1",
            "SELECT `id`, `context_id`, `artifact_id` FROM `Attribution` LIMIT 1",
            "SELECT `schema_version` FROM `MLMDEnv` LIMIT 1",
        ]
    }

    /// Probes for the characteristic tables of the 0.13.2 legacy layout,
    /// which predates `MLMDEnv`.
    pub fn check_v0_13_2_queries(&self) -> &'static [&'static str] {
        &[
            "SELECT `id`, `name`, `is_artifact_type` FROM `Type` LIMIT 1",
            "SELECT `id`, `type_id`, `uri` FROM `Artifact` LIMIT 1",
            concat!(
                "SELECT `artifact_id`, `name`, `is_custom_property`, `int_value`, ",
                "`double_value`, `string_value` FROM `ArtifactProperty` LIMIT 1"
            ),
            "SELECT `id`, `type_id` FROM `Execution` LIMIT 1",
            concat!(
                "SELECT `execution_id`, `name`, `is_custom_property`, `int_value`, ",
                "`double_value`, `string_value` FROM `ExecutionProperty` LIMIT 1"
            ),
            concat!(
                "SELECT `id`, `artifact_id`, `execution_id`, `type`, ",
                "`milliseconds_since_epoch` FROM `Event` LIMIT 1"
            ),
            "SELECT `event_id`, `is_index_step`, `step_index`, `step_key` FROM `EventPath` LIMIT 1",
        ]
    }

    // -- types ---------------------------------------------------------------

    pub fn insert_artifact_type(&self) -> &'static str {
        "INSERT INTO `Type` (`name`, `version`, `type_kind`, `description`) VALUES ($0, $1, 1, $2)"
    }

    pub fn insert_execution_type(&self) -> &'static str {
        concat!(
            "INSERT INTO `Type` (`name`, `version`, `type_kind`, `description`, ",
            "`input_type`, `output_type`) VALUES ($0, $1, 0, $2, $3, $4)"
        )
    }

    pub fn insert_context_type(&self) -> &'static str {
        "INSERT INTO `Type` (`name`, `version`, `type_kind`, `description`) VALUES ($0, $1, 2, $2)"
    }

    /// Execution types additionally expose their serialized input and output
    /// signatures.
    pub fn select_types_by_id(&self, type_kind: TypeKind) -> &'static str {
        match type_kind {
            TypeKind::Execution => concat!(
                "SELECT `id`, `name`, `version`, `description`, `input_type`, `output_type` ",
                "FROM `Type` WHERE `id` IN ($0) AND `type_kind` = $1"
            ),
            _ => concat!(
                "SELECT `id`, `name`, `version`, `description` ",
                "FROM `Type` WHERE `id` IN ($0) AND `type_kind` = $1"
            ),
        }
    }

    pub fn select_type_by_name(&self, type_kind: TypeKind) -> &'static str {
        match type_kind {
            TypeKind::Execution => concat!(
                "SELECT `id`, `name`, `version`, `description`, `input_type`, `output_type` ",
                "FROM `Type` WHERE `name` = $0 AND `version` IS NULL AND `type_kind` = $1"
            ),
            _ => concat!(
                "SELECT `id`, `name`, `version`, `description` ",
                "FROM `Type` WHERE `name` = $0 AND `version` IS NULL AND `type_kind` = $1"
            ),
        }
    }

    pub fn select_type_by_name_and_version(&self, type_kind: TypeKind) -> &'static str {
        match type_kind {
            TypeKind::Execution => concat!(
                "SELECT `id`, `name`, `version`, `description`, `input_type`, `output_type` ",
                "FROM `Type` WHERE `name` = $0 AND `version` = $1 AND `type_kind` = $2"
            ),
            _ => concat!(
                "SELECT `id`, `name`, `version`, `description` ",
                "FROM `Type` WHERE `name` = $0 AND `version` = $1 AND `type_kind` = $2"
            ),
        }
    }

    pub fn select_all_types(&self, type_kind: TypeKind) -> &'static str {
        match type_kind {
            TypeKind::Execution => concat!(
                "SELECT `id`, `name`, `version`, `description`, `input_type`, `output_type` ",
                "FROM `Type` WHERE `type_kind` = $0"
            ),
            _ => concat!(
                "SELECT `id`, `name`, `version`, `description` ",
                "FROM `Type` WHERE `type_kind` = $0"
            ),
        }
    }

    pub fn insert_type_property(&self) -> &'static str {
        "INSERT INTO `TypeProperty` (`type_id`, `name`, `data_type`) VALUES ($0, $1, $2)"
    }

    pub fn select_property_by_type_id(&self) -> &'static str {
        "SELECT `type_id`, `name`, `data_type` FROM `TypeProperty` WHERE `type_id` = $0"
    }

    pub fn insert_parent_type(&self) -> &'static str {
        "INSERT INTO `ParentType` (`type_id`, `parent_type_id`) VALUES ($0, $1)"
    }

    pub fn delete_parent_type(&self) -> &'static str {
        "DELETE FROM `ParentType` WHERE `type_id` = $0 AND `parent_type_id` = $1"
    }

    pub fn select_parent_type_by_type_id(&self) -> &'static str {
        "SELECT `type_id`, `parent_type_id` FROM `ParentType` WHERE `type_id` IN ($0)"
    }

    // -- artifacts -----------------------------------------------------------

    pub fn insert_artifact(&self) -> &'static str {
        concat!(
            "INSERT INTO `Artifact` (`type_id`, `uri`, `state`, `name`, ",
            "`create_time_since_epoch`, `last_update_time_since_epoch`) ",
            "VALUES ($0, $1, $2, $3, $4, $5)"
        )
    }

    pub fn select_artifact_by_id(&self) -> &'static str {
        concat!(
            "SELECT `id`, `type_id`, `uri`, `state`, `name`, `create_time_since_epoch`, ",
            "`last_update_time_since_epoch` FROM `Artifact` WHERE `id` IN ($0)"
        )
    }

    pub fn select_artifact_by_type_id_and_name(&self) -> &'static str {
        concat!(
            "SELECT `id`, `type_id`, `uri`, `state`, `name`, `create_time_since_epoch`, ",
            "`last_update_time_since_epoch` FROM `Artifact` WHERE `type_id` = $0 AND `name` = $1"
        )
    }

    pub fn select_artifacts_by_type_id(&self) -> &'static str {
        concat!(
            "SELECT `id`, `type_id`, `uri`, `state`, `name`, `create_time_since_epoch`, ",
            "`last_update_time_since_epoch` FROM `Artifact` WHERE `type_id` = $0"
        )
    }

    pub fn select_artifacts_by_uri(&self) -> &'static str {
        concat!(
            "SELECT `id`, `type_id`, `uri`, `state`, `name`, `create_time_since_epoch`, ",
            "`last_update_time_since_epoch` FROM `Artifact` WHERE `uri` = $0"
        )
    }

    pub fn update_artifact(&self) -> &'static str {
        concat!(
            "UPDATE `Artifact` SET `type_id` = $1, `uri` = $2, `state` = $3, ",
            "`last_update_time_since_epoch` = $4 WHERE `id` = $0"
        )
    }

    // -- executions ----------------------------------------------------------

    pub fn insert_execution(&self) -> &'static str {
        concat!(
            "INSERT INTO `Execution` (`type_id`, `last_known_state`, `name`, ",
            "`create_time_since_epoch`, `last_update_time_since_epoch`) ",
            "VALUES ($0, $1, $2, $3, $4)"
        )
    }

    pub fn select_execution_by_id(&self) -> &'static str {
        concat!(
            "SELECT `id`, `type_id`, `last_known_state`, `name`, `create_time_since_epoch`, ",
            "`last_update_time_since_epoch` FROM `Execution` WHERE `id` IN ($0)"
        )
    }

    pub fn select_execution_by_type_id_and_name(&self) -> &'static str {
        concat!(
            "SELECT `id`, `type_id`, `last_known_state`, `name`, `create_time_since_epoch`, ",
            "`last_update_time_since_epoch` FROM `Execution` WHERE `type_id` = $0 AND `name` = $1"
        )
    }

    pub fn select_executions_by_type_id(&self) -> &'static str {
        concat!(
            "SELECT `id`, `type_id`, `last_known_state`, `name`, `create_time_since_epoch`, ",
            "`last_update_time_since_epoch` FROM `Execution` WHERE `type_id` = $0"
        )
    }

    pub fn update_execution(&self) -> &'static str {
        concat!(
            "UPDATE `Execution` SET `type_id` = $1, `last_known_state` = $2, ",
            "`last_update_time_since_epoch` = $3 WHERE `id` = $0"
        )
    }

    // -- contexts ------------------------------------------------------------

    pub fn insert_context(&self) -> &'static str {
        concat!(
            "INSERT INTO `Context` (`type_id`, `name`, `create_time_since_epoch`, ",
            "`last_update_time_since_epoch`) VALUES ($0, $1, $2, $3)"
        )
    }

    pub fn select_context_by_id(&self) -> &'static str {
        concat!(
            "SELECT `id`, `type_id`, `name`, `create_time_since_epoch`, ",
            "`last_update_time_since_epoch` FROM `Context` WHERE `id` IN ($0)"
        )
    }

    pub fn select_context_by_type_id_and_name(&self) -> &'static str {
        concat!(
            "SELECT `id`, `type_id`, `name`, `create_time_since_epoch`, ",
            "`last_update_time_since_epoch` FROM `Context` WHERE `type_id` = $0 AND `name` = $1"
        )
    }

    pub fn select_contexts_by_type_id(&self) -> &'static str {
        concat!(
            "SELECT `id`, `type_id`, `name`, `create_time_since_epoch`, ",
            "`last_update_time_since_epoch` FROM `Context` WHERE `type_id` = $0"
        )
    }

    pub fn update_context(&self) -> &'static str {
        concat!(
            "UPDATE `Context` SET `type_id` = $1, `name` = $2, ",
            "`last_update_time_since_epoch` = $3 WHERE `id` = $0"
        )
    }

    // -- typed properties ----------------------------------------------------

    /// `$0` is the data-type discriminator selecting the populated value
    /// column; the other value columns stay NULL.
    pub fn insert_item_property(&self, type_kind: TypeKind) -> &'static str {
        match type_kind {
            TypeKind::Artifact => concat!(
                "INSERT INTO `ArtifactProperty` (`artifact_id`, `name`, `is_custom_property`, ",
                "`$0_value`) VALUES ($1, $2, $3, $4)"
            ),
            TypeKind::Execution => concat!(
                "INSERT INTO `ExecutionProperty` (`execution_id`, `name`, `is_custom_property`, ",
                "`$0_value`) VALUES ($1, $2, $3, $4)"
            ),
            TypeKind::Context => concat!(
                "INSERT INTO `ContextProperty` (`context_id`, `name`, `is_custom_property`, ",
                "`$0_value`) VALUES ($1, $2, $3, $4)"
            ),
        }
    }

    /// Updates rewrite all three value columns so that exactly one stays
    /// populated even when the property changes type.
    pub fn update_item_property(&self, type_kind: TypeKind) -> &'static str {
        match type_kind {
            TypeKind::Artifact => concat!(
                "UPDATE `ArtifactProperty` SET `int_value` = $0, `double_value` = $1, ",
                "`string_value` = $2 WHERE `artifact_id` = $3 AND `name` = $4"
            ),
            TypeKind::Execution => concat!(
                "UPDATE `ExecutionProperty` SET `int_value` = $0, `double_value` = $1, ",
                "`string_value` = $2 WHERE `execution_id` = $3 AND `name` = $4"
            ),
            TypeKind::Context => concat!(
                "UPDATE `ContextProperty` SET `int_value` = $0, `double_value` = $1, ",
                "`string_value` = $2 WHERE `context_id` = $3 AND `name` = $4"
            ),
        }
    }

    pub fn delete_item_property(&self, type_kind: TypeKind) -> &'static str {
        match type_kind {
            TypeKind::Artifact => {
                "DELETE FROM `ArtifactProperty` WHERE `artifact_id` = $0 AND `name` = $1"
            }
            TypeKind::Execution => {
                "DELETE FROM `ExecutionProperty` WHERE `execution_id` = $0 AND `name` = $1"
            }
            TypeKind::Context => {
                "DELETE FROM `ContextProperty` WHERE `context_id` = $0 AND `name` = $1"
            }
        }
    }

    pub fn select_item_property_by_item_id(&self, type_kind: TypeKind) -> &'static str {
        match type_kind {
            TypeKind::Artifact => concat!(
                "SELECT `artifact_id`, `name`, `is_custom_property`, `int_value`, ",
                "`double_value`, `string_value` FROM `ArtifactProperty` ",
                "WHERE `artifact_id` IN ($0)"
            ),
            TypeKind::Execution => concat!(
                "SELECT `execution_id`, `name`, `is_custom_property`, `int_value`, ",
                "`double_value`, `string_value` FROM `ExecutionProperty` ",
                "WHERE `execution_id` IN ($0)"
            ),
            TypeKind::Context => concat!(
                "SELECT `context_id`, `name`, `is_custom_property`, `int_value`, ",
                "`double_value`, `string_value` FROM `ContextProperty` ",
                "WHERE `context_id` IN ($0)"
            ),
        }
    }

    // -- events --------------------------------------------------------------

    pub fn insert_event(&self) -> &'static str {
        concat!(
            "INSERT INTO `Event` (`artifact_id`, `execution_id`, `type`, ",
            "`milliseconds_since_epoch`) VALUES ($0, $1, $2, $3)"
        )
    }

    pub fn select_event_by_artifact_ids(&self) -> &'static str {
        concat!(
            "SELECT `id`, `artifact_id`, `execution_id`, `type`, `milliseconds_since_epoch` ",
            "FROM `Event` WHERE `artifact_id` IN ($0)"
        )
    }

    pub fn select_event_by_execution_ids(&self) -> &'static str {
        concat!(
            "SELECT `id`, `artifact_id`, `execution_id`, `type`, `milliseconds_since_epoch` ",
            "FROM `Event` WHERE `execution_id` IN ($0)"
        )
    }

    pub fn insert_event_path_index(&self) -> &'static str {
        "INSERT INTO `EventPath` (`event_id`, `is_index_step`, `step_index`) VALUES ($0, 1, $1)"
    }

    pub fn insert_event_path_key(&self) -> &'static str {
        "INSERT INTO `EventPath` (`event_id`, `is_index_step`, `step_key`) VALUES ($0, 0, $1)"
    }

    pub fn select_event_path_by_event_ids(&self) -> &'static str {
        concat!(
            "SELECT `event_id`, `is_index_step`, `step_index`, `step_key` ",
            "FROM `EventPath` WHERE `event_id` IN ($0)"
        )
    }

    // -- context links -------------------------------------------------------

    pub fn insert_association(&self) -> &'static str {
        "INSERT INTO `Association` (`context_id`, `execution_id`) VALUES ($0, $1)"
    }

    pub fn select_association_by_context_ids(&self) -> &'static str {
        "SELECT `id`, `context_id`, `execution_id` FROM `Association` WHERE `context_id` IN ($0)"
    }

    pub fn select_association_by_execution_id(&self) -> &'static str {
        "SELECT `id`, `context_id`, `execution_id` FROM `Association` WHERE `execution_id` = $0"
    }

    pub fn insert_attribution(&self) -> &'static str {
        "INSERT INTO `Attribution` (`context_id`, `artifact_id`) VALUES ($0, $1)"
    }

    pub fn select_attribution_by_context_id(&self) -> &'static str {
        "SELECT `id`, `context_id`, `artifact_id` FROM `Attribution` WHERE `context_id` = $0"
    }

    pub fn select_attribution_by_artifact_id(&self) -> &'static str {
        "SELECT `id`, `context_id`, `artifact_id` FROM `Attribution` WHERE `artifact_id` = $0"
    }

    pub fn insert_parent_context(&self) -> &'static str {
        "INSERT INTO `ParentContext` (`context_id`, `parent_context_id`) VALUES ($0, $1)"
    }

    pub fn select_parent_context_by_context_id(&self) -> &'static str {
        "SELECT `context_id`, `parent_context_id` FROM `ParentContext` WHERE `context_id` = $0"
    }

    pub fn select_parent_context_by_parent_id(&self) -> &'static str {
        "SELECT `context_id`, `parent_context_id` FROM `ParentContext` WHERE `parent_context_id` = $0"
    }

    // -- deletions -----------------------------------------------------------

    pub fn delete_items_by_id(&self, type_kind: TypeKind) -> &'static str {
        match type_kind {
            TypeKind::Artifact => "DELETE FROM `Artifact` WHERE `id` IN ($0)",
            TypeKind::Execution => "DELETE FROM `Execution` WHERE `id` IN ($0)",
            TypeKind::Context => "DELETE FROM `Context` WHERE `id` IN ($0)",
        }
    }

    pub fn delete_item_properties_by_item_ids(&self, type_kind: TypeKind) -> &'static str {
        match type_kind {
            TypeKind::Artifact => "DELETE FROM `ArtifactProperty` WHERE `artifact_id` IN ($0)",
            TypeKind::Execution => "DELETE FROM `ExecutionProperty` WHERE `execution_id` IN ($0)",
            TypeKind::Context => "DELETE FROM `ContextProperty` WHERE `context_id` IN ($0)",
        }
    }

    pub fn delete_events_by_artifact_ids(&self) -> &'static str {
        "DELETE FROM `Event` WHERE `artifact_id` IN ($0)"
    }

    pub fn delete_events_by_execution_ids(&self) -> &'static str {
        "DELETE FROM `Event` WHERE `execution_id` IN ($0)"
    }

    /// Sweeps path steps whose event no longer exists.
    pub fn delete_orphan_event_paths(&self) -> &'static str {
        "DELETE FROM `EventPath` WHERE `event_id` NOT IN (SELECT `id` FROM `Event`)"
    }

    pub fn delete_associations_by_context_ids(&self) -> &'static str {
        "DELETE FROM `Association` WHERE `context_id` IN ($0)"
    }

    pub fn delete_associations_by_execution_ids(&self) -> &'static str {
        "DELETE FROM `Association` WHERE `execution_id` IN ($0)"
    }

    pub fn delete_attributions_by_context_ids(&self) -> &'static str {
        "DELETE FROM `Attribution` WHERE `context_id` IN ($0)"
    }

    pub fn delete_attributions_by_artifact_ids(&self) -> &'static str {
        "DELETE FROM `Attribution` WHERE `artifact_id` IN ($0)"
    }

    pub fn delete_parent_contexts_by_parent_ids(&self) -> &'static str {
        "DELETE FROM `ParentContext` WHERE `parent_context_id` IN ($0)"
    }

    pub fn delete_parent_contexts_by_child_ids(&self) -> &'static str {
        "DELETE FROM `ParentContext` WHERE `context_id` IN ($0)"
    }
}

#[derive(Debug, Clone)]
pub struct SqliteQuery;

impl SqliteQuery {
    fn create_tables(&self) -> &'static [&'static str] {
        &[
            concat!(
                " CREATE TABLE IF NOT EXISTS `Type` ( ",
                "   `id` INTEGER PRIMARY KEY AUTOINCREMENT, ",
                "   `name` VARCHAR(255) NOT NULL, ",
                "   `version` VARCHAR(255), ",
                "   `type_kind` TINYINT(1) NOT NULL, ",
                "   `description` TEXT, ",
                "   `input_type` TEXT, ",
                "   `output_type` TEXT, ",
                "   UNIQUE(`name`, `version`, `type_kind`) ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `TypeProperty` ( ",
                "   `type_id` INT NOT NULL, ",
                "   `name` VARCHAR(255) NOT NULL, ",
                "   `data_type` INT NULL, ",
                " PRIMARY KEY (`type_id`, `name`)); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `ParentType` ( ",
                "   `type_id` INT NOT NULL, ",
                "   `parent_type_id` INT NOT NULL, ",
                " PRIMARY KEY (`type_id`, `parent_type_id`));"
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `Artifact` ( ",
                "   `id` INTEGER PRIMARY KEY AUTOINCREMENT, ",
                "   `type_id` INT NOT NULL, ",
                "   `uri` TEXT, ",
                "   `state` INT, ",
                "   `name` VARCHAR(255), ",
                "   `create_time_since_epoch` INT NOT NULL DEFAULT 0, ",
                "   `last_update_time_since_epoch` INT NOT NULL DEFAULT 0, ",
                "   UNIQUE(`type_id`, `name`) ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `ArtifactProperty` ( ",
                "   `artifact_id` INT NOT NULL, ",
                "   `name` VARCHAR(255) NOT NULL, ",
                "   `is_custom_property` TINYINT(1) NOT NULL, ",
                "   `int_value` INT, ",
                "   `double_value` DOUBLE, ",
                "   `string_value` TEXT, ",
                " PRIMARY KEY (`artifact_id`, `name`)); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `Execution` ( ",
                "   `id` INTEGER PRIMARY KEY AUTOINCREMENT, ",
                "   `type_id` INT NOT NULL, ",
                "   `last_known_state` INT, ",
                "   `name` VARCHAR(255), ",
                "   `create_time_since_epoch` INT NOT NULL DEFAULT 0, ",
                "   `last_update_time_since_epoch` INT NOT NULL DEFAULT 0, ",
                "   UNIQUE(`type_id`, `name`) ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `ExecutionProperty` ( ",
                "   `execution_id` INT NOT NULL, ",
                "   `name` VARCHAR(255) NOT NULL, ",
                "   `is_custom_property` TINYINT(1) NOT NULL, ",
                "   `int_value` INT, ",
                "   `double_value` DOUBLE, ",
                "   `string_value` TEXT, ",
                " PRIMARY KEY (`execution_id`, `name`)); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `Context` ( ",
                "   `id` INTEGER PRIMARY KEY AUTOINCREMENT, ",
                "   `type_id` INT NOT NULL, ",
                "   `name` VARCHAR(255) NOT NULL, ",
                "   `create_time_since_epoch` INT NOT NULL DEFAULT 0, ",
                "   `last_update_time_since_epoch` INT NOT NULL DEFAULT 0, ",
                "   UNIQUE(`type_id`, `name`) ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `ContextProperty` ( ",
                "   `context_id` INT NOT NULL, ",
                "   `name` VARCHAR(255) NOT NULL, ",
                "   `is_custom_property` TINYINT(1) NOT NULL, ",
                "   `int_value` INT, ",
                "   `double_value` DOUBLE, ",
                "   `string_value` TEXT, ",
                " PRIMARY KEY (`context_id`, `name`)); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `ParentContext` ( ",
                "   `context_id` INT NOT NULL, ",
                "   `parent_context_id` INT NOT NULL, ",
                " PRIMARY KEY (`context_id`, `parent_context_id`)); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `Event` ( ",
                "   `id` INTEGER PRIMARY KEY AUTOINCREMENT, ",
                "   `artifact_id` INT NOT NULL, ",
                "   `execution_id` INT NOT NULL, ",
                "   `type` INT NOT NULL, ",
                "   `milliseconds_since_epoch` INT ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `EventPath` ( ",
                "   `event_id` INT NOT NULL, ",
                "   `is_index_step` TINYINT(1) NOT NULL, ",
                "   `step_index` INT, ",
                "   `step_key` TEXT ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `Association` ( ",
                "   `id` INTEGER PRIMARY KEY AUTOINCREMENT, ",
                "   `context_id` INT NOT NULL, ",
                "   `execution_id` INT NOT NULL, ",
                "   UNIQUE(`context_id`, `execution_id`) ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `Attribution` ( ",
                "   `id` INTEGER PRIMARY KEY AUTOINCREMENT, ",
                "   `context_id` INT NOT NULL, ",
                "   `artifact_id` INT NOT NULL, ",
                "   UNIQUE(`context_id`, `artifact_id`) ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `MLMDEnv` ( ",
                "   `schema_version` INTEGER PRIMARY KEY ",
                " ); "
            ),
            " CREATE INDEX IF NOT EXISTS `idx_artifact_uri` ON `Artifact`(`uri`); ",
            concat!(
                " CREATE INDEX IF NOT EXISTS `idx_artifact_create_time_since_epoch` ",
                " ON `Artifact`(`create_time_since_epoch`); "
            ),
            concat!(
                " CREATE INDEX IF NOT EXISTS `idx_artifact_last_update_time_since_epoch` ",
                " ON `Artifact`(`last_update_time_since_epoch`); "
            ),
            " CREATE INDEX IF NOT EXISTS `idx_event_artifact_id` ON `Event`(`artifact_id`); ",
            " CREATE INDEX IF NOT EXISTS `idx_event_execution_id` ON `Event`(`execution_id`); ",
            concat!(
                " CREATE INDEX IF NOT EXISTS `idx_parentcontext_parent_context_id` ",
                " ON `ParentContext`(`parent_context_id`); "
            ),
            " CREATE INDEX IF NOT EXISTS `idx_type_name` ON `Type`(`name`); ",
            concat!(
                " CREATE INDEX IF NOT EXISTS `idx_execution_create_time_since_epoch` ",
                " ON `Execution`(`create_time_since_epoch`); "
            ),
            concat!(
                " CREATE INDEX IF NOT EXISTS `idx_execution_last_update_time_since_epoch` ",
                " ON `Execution`(`last_update_time_since_epoch`); "
            ),
            concat!(
                " CREATE INDEX IF NOT EXISTS `idx_context_create_time_since_epoch` ",
                " ON `Context`(`create_time_since_epoch`); "
            ),
            concat!(
                " CREATE INDEX IF NOT EXISTS `idx_context_last_update_time_since_epoch` ",
                " ON `Context`(`last_update_time_since_epoch`); "
            ),
        ]
    }

    fn upgrade_queries(&self, from_version: i64) -> Option<&'static [&'static str]> {
        match from_version {
            0 => Some(&[
                "CREATE TABLE IF NOT EXISTS `MLMDEnv` (`schema_version` INTEGER PRIMARY KEY)",
                "INSERT INTO `MLMDEnv` (`schema_version`) VALUES (0)",
                "ALTER TABLE `Type` RENAME TO `TypeTemp`",
                concat!(
                    "CREATE TABLE `Type` (`id` INTEGER PRIMARY KEY AUTOINCREMENT, ",
                    "`name` VARCHAR(255) NOT NULL, `type_kind` TINYINT(1) NOT NULL)"
                ),
                concat!(
                    "INSERT INTO `Type` (`id`, `name`, `type_kind`) ",
                    "SELECT `id`, `name`, `is_artifact_type` FROM `TypeTemp`"
                ),
                "DROP TABLE `TypeTemp`",
                concat!(
                    "CREATE TABLE IF NOT EXISTS `Context` (`id` INTEGER PRIMARY KEY AUTOINCREMENT, ",
                    "`type_id` INT NOT NULL, `name` VARCHAR(255) NOT NULL, ",
                    "UNIQUE(`type_id`, `name`))"
                ),
                concat!(
                    "CREATE TABLE IF NOT EXISTS `ContextProperty` (`context_id` INT NOT NULL, ",
                    "`name` VARCHAR(255) NOT NULL, `is_custom_property` TINYINT(1) NOT NULL, ",
                    "`int_value` INT, `double_value` DOUBLE, `string_value` TEXT, ",
                    "PRIMARY KEY (`context_id`, `name`))"
                ),
                concat!(
                    "CREATE TABLE IF NOT EXISTS `Association` (`id` INTEGER PRIMARY KEY AUTOINCREMENT, ",
                    "`context_id` INT NOT NULL, `execution_id` INT NOT NULL, ",
                    "UNIQUE(`context_id`, `execution_id`))"
                ),
                concat!(
                    "CREATE TABLE IF NOT EXISTS `Attribution` (`id` INTEGER PRIMARY KEY AUTOINCREMENT, ",
                    "`context_id` INT NOT NULL, `artifact_id` INT NOT NULL, ",
                    "UNIQUE(`context_id`, `artifact_id`))"
                ),
            ]),
            1 => Some(&[
                "ALTER TABLE `Type` ADD COLUMN `input_type` TEXT",
                "ALTER TABLE `Type` ADD COLUMN `output_type` TEXT",
            ]),
            2 => Some(&[
                concat!(
                    "CREATE TABLE IF NOT EXISTS `ParentType` (`type_id` INT NOT NULL, ",
                    "`parent_type_id` INT NOT NULL, PRIMARY KEY (`type_id`, `parent_type_id`))"
                ),
                concat!(
                    "CREATE TABLE IF NOT EXISTS `ParentContext` (`context_id` INT NOT NULL, ",
                    "`parent_context_id` INT NOT NULL, ",
                    "PRIMARY KEY (`context_id`, `parent_context_id`))"
                ),
                concat!(
                    "CREATE INDEX IF NOT EXISTS `idx_parentcontext_parent_context_id` ",
                    "ON `ParentContext`(`parent_context_id`)"
                ),
            ]),
            3 => Some(&[
                "ALTER TABLE `Artifact` ADD COLUMN `state` INT",
                "ALTER TABLE `Artifact` ADD COLUMN `name` VARCHAR(255)",
                "ALTER TABLE `Execution` ADD COLUMN `last_known_state` INT",
                "ALTER TABLE `Execution` ADD COLUMN `name` VARCHAR(255)",
                concat!(
                    "CREATE UNIQUE INDEX IF NOT EXISTS `UniqueArtifactTypeName` ",
                    "ON `Artifact`(`type_id`, `name`)"
                ),
                concat!(
                    "CREATE UNIQUE INDEX IF NOT EXISTS `UniqueExecutionTypeName` ",
                    "ON `Execution`(`type_id`, `name`)"
                ),
            ]),
            4 => Some(&[
                "ALTER TABLE `Artifact` ADD COLUMN `create_time_since_epoch` INT NOT NULL DEFAULT 0",
                "ALTER TABLE `Artifact` ADD COLUMN `last_update_time_since_epoch` INT NOT NULL DEFAULT 0",
                "ALTER TABLE `Execution` ADD COLUMN `create_time_since_epoch` INT NOT NULL DEFAULT 0",
                "ALTER TABLE `Execution` ADD COLUMN `last_update_time_since_epoch` INT NOT NULL DEFAULT 0",
                "ALTER TABLE `Context` ADD COLUMN `create_time_since_epoch` INT NOT NULL DEFAULT 0",
                "ALTER TABLE `Context` ADD COLUMN `last_update_time_since_epoch` INT NOT NULL DEFAULT 0",
                "CREATE INDEX IF NOT EXISTS `idx_artifact_uri` ON `Artifact`(`uri`)",
                concat!(
                    "CREATE INDEX IF NOT EXISTS `idx_artifact_create_time_since_epoch` ",
                    "ON `Artifact`(`create_time_since_epoch`)"
                ),
                concat!(
                    "CREATE INDEX IF NOT EXISTS `idx_artifact_last_update_time_since_epoch` ",
                    "ON `Artifact`(`last_update_time_since_epoch`)"
                ),
                "CREATE INDEX IF NOT EXISTS `idx_event_artifact_id` ON `Event`(`artifact_id`)",
                "CREATE INDEX IF NOT EXISTS `idx_event_execution_id` ON `Event`(`execution_id`)",
                concat!(
                    "CREATE INDEX IF NOT EXISTS `idx_execution_create_time_since_epoch` ",
                    "ON `Execution`(`create_time_since_epoch`)"
                ),
                concat!(
                    "CREATE INDEX IF NOT EXISTS `idx_execution_last_update_time_since_epoch` ",
                    "ON `Execution`(`last_update_time_since_epoch`)"
                ),
                concat!(
                    "CREATE INDEX IF NOT EXISTS `idx_context_create_time_since_epoch` ",
                    "ON `Context`(`create_time_since_epoch`)"
                ),
                concat!(
                    "CREATE INDEX IF NOT EXISTS `idx_context_last_update_time_since_epoch` ",
                    "ON `Context`(`last_update_time_since_epoch`)"
                ),
            ]),
            5 => Some(&[
                "ALTER TABLE `Type` ADD COLUMN `version` VARCHAR(255)",
                "ALTER TABLE `Type` ADD COLUMN `description` TEXT",
                "CREATE INDEX IF NOT EXISTS `idx_type_name` ON `Type`(`name`)",
            ]),
            _ => None,
        }
    }

    fn downgrade_queries(&self, from_version: i64) -> Option<&'static [&'static str]> {
        match from_version {
            6 => Some(&[
                "DROP INDEX IF EXISTS `idx_type_name`",
                "ALTER TABLE `Type` RENAME TO `TypeTemp`",
                concat!(
                    "CREATE TABLE `Type` (`id` INTEGER PRIMARY KEY AUTOINCREMENT, ",
                    "`name` VARCHAR(255) NOT NULL, `type_kind` TINYINT(1) NOT NULL, ",
                    "`input_type` TEXT, `output_type` TEXT)"
                ),
                concat!(
                    "INSERT INTO `Type` (`id`, `name`, `type_kind`, `input_type`, `output_type`) ",
                    "SELECT `id`, `name`, `type_kind`, `input_type`, `output_type` FROM `TypeTemp`"
                ),
                "DROP TABLE `TypeTemp`",
            ]),
            5 => Some(&[
                "DROP INDEX IF EXISTS `idx_artifact_uri`",
                "DROP INDEX IF EXISTS `idx_artifact_create_time_since_epoch`",
                "DROP INDEX IF EXISTS `idx_artifact_last_update_time_since_epoch`",
                "DROP INDEX IF EXISTS `idx_event_artifact_id`",
                "DROP INDEX IF EXISTS `idx_event_execution_id`",
                "DROP INDEX IF EXISTS `idx_execution_create_time_since_epoch`",
                "DROP INDEX IF EXISTS `idx_execution_last_update_time_since_epoch`",
                "DROP INDEX IF EXISTS `idx_context_create_time_since_epoch`",
                "DROP INDEX IF EXISTS `idx_context_last_update_time_since_epoch`",
                "ALTER TABLE `Artifact` DROP COLUMN `create_time_since_epoch`",
                "ALTER TABLE `Artifact` DROP COLUMN `last_update_time_since_epoch`",
                "ALTER TABLE `Execution` DROP COLUMN `create_time_since_epoch`",
                "ALTER TABLE `Execution` DROP COLUMN `last_update_time_since_epoch`",
                "ALTER TABLE `Context` DROP COLUMN `create_time_since_epoch`",
                "ALTER TABLE `Context` DROP COLUMN `last_update_time_since_epoch`",
            ]),
            4 => Some(&[
                "DROP INDEX IF EXISTS `UniqueArtifactTypeName`",
                "DROP INDEX IF EXISTS `UniqueExecutionTypeName`",
                "ALTER TABLE `Artifact` RENAME TO `ArtifactTemp`",
                concat!(
                    "CREATE TABLE `Artifact` (`id` INTEGER PRIMARY KEY AUTOINCREMENT, ",
                    "`type_id` INT NOT NULL, `uri` TEXT)"
                ),
                "INSERT INTO `Artifact` (`id`, `type_id`, `uri`) SELECT `id`, `type_id`, `uri` FROM `ArtifactTemp`",
                "DROP TABLE `ArtifactTemp`",
                "ALTER TABLE `Execution` RENAME TO `ExecutionTemp`",
                concat!(
                    "CREATE TABLE `Execution` (`id` INTEGER PRIMARY KEY AUTOINCREMENT, ",
                    "`type_id` INT NOT NULL)"
                ),
                "INSERT INTO `Execution` (`id`, `type_id`) SELECT `id`, `type_id` FROM `ExecutionTemp`",
                "DROP TABLE `ExecutionTemp`",
            ]),
            3 => Some(&[
                "DROP TABLE IF EXISTS `ParentType`",
                "DROP TABLE IF EXISTS `ParentContext`",
            ]),
            2 => Some(&[
                "ALTER TABLE `Type` DROP COLUMN `input_type`",
                "ALTER TABLE `Type` DROP COLUMN `output_type`",
            ]),
            1 => Some(&[
                "ALTER TABLE `Type` RENAME TO `TypeTemp`",
                concat!(
                    "CREATE TABLE `Type` (`id` INTEGER PRIMARY KEY AUTOINCREMENT, ",
                    "`name` VARCHAR(255) NOT NULL, `is_artifact_type` TINYINT(1) NOT NULL)"
                ),
                concat!(
                    "INSERT INTO `Type` (`id`, `name`, `is_artifact_type`) ",
                    "SELECT `id`, `name`, `type_kind` FROM `TypeTemp`"
                ),
                "DROP TABLE `TypeTemp`",
                "DROP TABLE IF EXISTS `ContextProperty`",
                "DROP TABLE IF EXISTS `Association`",
                "DROP TABLE IF EXISTS `Attribution`",
                "DROP TABLE IF EXISTS `Context`",
                "DROP TABLE IF EXISTS `MLMDEnv`",
            ]),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MysqlQuery;

impl MysqlQuery {
    fn create_tables(&self) -> &'static [&'static str] {
        &[
            concat!(
                " CREATE TABLE IF NOT EXISTS `Type` ( ",
                "   `id` INT PRIMARY KEY AUTO_INCREMENT, ",
                "   `name` VARCHAR(255) NOT NULL, ",
                "   `version` VARCHAR(255), ",
                "   `type_kind` TINYINT(1) NOT NULL, ",
                "   `description` TEXT, ",
                "   `input_type` TEXT, ",
                "   `output_type` TEXT, ",
                "   CONSTRAINT UniqueTypeNameVersionKind UNIQUE(`name`, `version`, `type_kind`) ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `TypeProperty` ( ",
                "   `type_id` INT NOT NULL, ",
                "   `name` VARCHAR(255) NOT NULL, ",
                "   `data_type` INT NULL, ",
                " PRIMARY KEY (`type_id`, `name`)); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `ParentType` ( ",
                "   `type_id` INT NOT NULL, ",
                "   `parent_type_id` INT NOT NULL, ",
                " PRIMARY KEY (`type_id`, `parent_type_id`));"
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `Artifact` ( ",
                "   `id` INTEGER PRIMARY KEY AUTO_INCREMENT, ",
                "   `type_id` INT NOT NULL, ",
                "   `uri` TEXT, ",
                "   `state` INT, ",
                "   `name` VARCHAR(255), ",
                "   `create_time_since_epoch` BIGINT NOT NULL DEFAULT 0, ",
                "   `last_update_time_since_epoch` BIGINT NOT NULL DEFAULT 0, ",
                "   CONSTRAINT UniqueArtifactTypeName UNIQUE(`type_id`, `name`) ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `ArtifactProperty` ( ",
                "   `artifact_id` INT NOT NULL, ",
                "   `name` VARCHAR(255) NOT NULL, ",
                "   `is_custom_property` TINYINT(1) NOT NULL, ",
                "   `int_value` BIGINT, ",
                "   `double_value` DOUBLE, ",
                "   `string_value` TEXT, ",
                " PRIMARY KEY (`artifact_id`, `name`)); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `Execution` ( ",
                "   `id` INTEGER PRIMARY KEY AUTO_INCREMENT, ",
                "   `type_id` INT NOT NULL, ",
                "   `last_known_state` INT, ",
                "   `name` VARCHAR(255), ",
                "   `create_time_since_epoch` BIGINT NOT NULL DEFAULT 0, ",
                "   `last_update_time_since_epoch` BIGINT NOT NULL DEFAULT 0, ",
                "   CONSTRAINT UniqueExecutionTypeName UNIQUE(`type_id`, `name`) ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `ExecutionProperty` ( ",
                "   `execution_id` INT NOT NULL, ",
                "   `name` VARCHAR(255) NOT NULL, ",
                "   `is_custom_property` TINYINT(1) NOT NULL, ",
                "   `int_value` BIGINT, ",
                "   `double_value` DOUBLE, ",
                "   `string_value` TEXT, ",
                " PRIMARY KEY (`execution_id`, `name`)); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `Context` ( ",
                "   `id` INTEGER PRIMARY KEY AUTO_INCREMENT, ",
                "   `type_id` INT NOT NULL, ",
                "   `name` VARCHAR(255) NOT NULL, ",
                "   `create_time_since_epoch` BIGINT NOT NULL DEFAULT 0, ",
                "   `last_update_time_since_epoch` BIGINT NOT NULL DEFAULT 0, ",
                "   UNIQUE(`type_id`, `name`) ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `ContextProperty` ( ",
                "   `context_id` INT NOT NULL, ",
                "   `name` VARCHAR(255) NOT NULL, ",
                "   `is_custom_property` TINYINT(1) NOT NULL, ",
                "   `int_value` BIGINT, ",
                "   `double_value` DOUBLE, ",
                "   `string_value` TEXT, ",
                " PRIMARY KEY (`context_id`, `name`)); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `ParentContext` ( ",
                "   `context_id` INT NOT NULL, ",
                "   `parent_context_id` INT NOT NULL, ",
                " PRIMARY KEY (`context_id`, `parent_context_id`)); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `Event` ( ",
                "   `id` INTEGER PRIMARY KEY AUTO_INCREMENT, ",
                "   `artifact_id` INT NOT NULL, ",
                "   `execution_id` INT NOT NULL, ",
                "   `type` INT NOT NULL, ",
                "   `milliseconds_since_epoch` BIGINT ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `EventPath` ( ",
                "   `event_id` INT NOT NULL, ",
                "   `is_index_step` TINYINT(1) NOT NULL, ",
                "   `step_index` INT, ",
                "   `step_key` TEXT ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `Association` ( ",
                "   `id` INTEGER PRIMARY KEY AUTO_INCREMENT, ",
                "   `context_id` INT NOT NULL, ",
                "   `execution_id` INT NOT NULL, ",
                "   UNIQUE(`context_id`, `execution_id`) ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `Attribution` ( ",
                "   `id` INTEGER PRIMARY KEY AUTO_INCREMENT, ",
                "   `context_id` INT NOT NULL, ",
                "   `artifact_id` INT NOT NULL, ",
                "   UNIQUE(`context_id`, `artifact_id`) ",
                " ); "
            ),
            concat!(
                " CREATE TABLE IF NOT EXISTS `MLMDEnv` ( ",
                "   `schema_version` INTEGER PRIMARY KEY ",
                " ); "
            ),
            concat!(
                " ALTER TABLE `Artifact` ",
                "  ADD INDEX `idx_artifact_uri`(`uri`(255)), ",
                "  ADD INDEX `idx_artifact_create_time_since_epoch` (`create_time_since_epoch`), ",
                "  ADD INDEX `idx_artifact_last_update_time_since_epoch` ",
                "             (`last_update_time_since_epoch`); "
            ),
            concat!(
                " ALTER TABLE `Event` ",
                " ADD INDEX `idx_event_artifact_id` (`artifact_id`), ",
                " ADD INDEX `idx_event_execution_id` (`execution_id`); "
            ),
            concat!(
                " ALTER TABLE `ParentContext` ",
                " ADD INDEX `idx_parentcontext_parent_context_id` (`parent_context_id`); "
            ),
            " ALTER TABLE `Type` ADD INDEX `idx_type_name` (`name`); ",
            concat!(
                " ALTER TABLE `Execution` ",
                "  ADD INDEX `idx_execution_create_time_since_epoch` (`create_time_since_epoch`), ",
                "  ADD INDEX `idx_execution_last_update_time_since_epoch` ",
                "             (`last_update_time_since_epoch`); "
            ),
            concat!(
                " ALTER TABLE `Context` ",
                "  ADD INDEX `idx_context_create_time_since_epoch` (`create_time_since_epoch`), ",
                "  ADD INDEX `idx_context_last_update_time_since_epoch` ",
                "             (`last_update_time_since_epoch`); "
            ),
        ]
    }

    fn upgrade_queries(&self, from_version: i64) -> Option<&'static [&'static str]> {
        match from_version {
            0 => Some(&[
                "CREATE TABLE IF NOT EXISTS `MLMDEnv` (`schema_version` INTEGER PRIMARY KEY)",
                "INSERT INTO `MLMDEnv` (`schema_version`) VALUES (0)",
                "ALTER TABLE `Type` CHANGE COLUMN `is_artifact_type` `type_kind` TINYINT(1) NOT NULL",
                concat!(
                    "CREATE TABLE IF NOT EXISTS `Context` (`id` INTEGER PRIMARY KEY AUTO_INCREMENT, ",
                    "`type_id` INT NOT NULL, `name` VARCHAR(255) NOT NULL, ",
                    "UNIQUE(`type_id`, `name`))"
                ),
                concat!(
                    "CREATE TABLE IF NOT EXISTS `ContextProperty` (`context_id` INT NOT NULL, ",
                    "`name` VARCHAR(255) NOT NULL, `is_custom_property` TINYINT(1) NOT NULL, ",
                    "`int_value` BIGINT, `double_value` DOUBLE, `string_value` TEXT, ",
                    "PRIMARY KEY (`context_id`, `name`))"
                ),
                concat!(
                    "CREATE TABLE IF NOT EXISTS `Association` (`id` INTEGER PRIMARY KEY AUTO_INCREMENT, ",
                    "`context_id` INT NOT NULL, `execution_id` INT NOT NULL, ",
                    "UNIQUE(`context_id`, `execution_id`))"
                ),
                concat!(
                    "CREATE TABLE IF NOT EXISTS `Attribution` (`id` INTEGER PRIMARY KEY AUTO_INCREMENT, ",
                    "`context_id` INT NOT NULL, `artifact_id` INT NOT NULL, ",
                    "UNIQUE(`context_id`, `artifact_id`))"
                ),
            ]),
            1 => Some(&[
                "ALTER TABLE `Type` ADD COLUMN `input_type` TEXT",
                "ALTER TABLE `Type` ADD COLUMN `output_type` TEXT",
            ]),
            2 => Some(&[
                concat!(
                    "CREATE TABLE IF NOT EXISTS `ParentType` (`type_id` INT NOT NULL, ",
                    "`parent_type_id` INT NOT NULL, PRIMARY KEY (`type_id`, `parent_type_id`))"
                ),
                concat!(
                    "CREATE TABLE IF NOT EXISTS `ParentContext` (`context_id` INT NOT NULL, ",
                    "`parent_context_id` INT NOT NULL, ",
                    "PRIMARY KEY (`context_id`, `parent_context_id`))"
                ),
                concat!(
                    "ALTER TABLE `ParentContext` ",
                    "ADD INDEX `idx_parentcontext_parent_context_id` (`parent_context_id`)"
                ),
            ]),
            3 => Some(&[
                "ALTER TABLE `Artifact` ADD COLUMN `state` INT",
                "ALTER TABLE `Artifact` ADD COLUMN `name` VARCHAR(255)",
                "ALTER TABLE `Execution` ADD COLUMN `last_known_state` INT",
                "ALTER TABLE `Execution` ADD COLUMN `name` VARCHAR(255)",
                concat!(
                    "ALTER TABLE `Artifact` ",
                    "ADD CONSTRAINT UniqueArtifactTypeName UNIQUE(`type_id`, `name`)"
                ),
                concat!(
                    "ALTER TABLE `Execution` ",
                    "ADD CONSTRAINT UniqueExecutionTypeName UNIQUE(`type_id`, `name`)"
                ),
            ]),
            4 => Some(&[
                "ALTER TABLE `Artifact` ADD COLUMN `create_time_since_epoch` BIGINT NOT NULL DEFAULT 0",
                "ALTER TABLE `Artifact` ADD COLUMN `last_update_time_since_epoch` BIGINT NOT NULL DEFAULT 0",
                "ALTER TABLE `Execution` ADD COLUMN `create_time_since_epoch` BIGINT NOT NULL DEFAULT 0",
                "ALTER TABLE `Execution` ADD COLUMN `last_update_time_since_epoch` BIGINT NOT NULL DEFAULT 0",
                "ALTER TABLE `Context` ADD COLUMN `create_time_since_epoch` BIGINT NOT NULL DEFAULT 0",
                "ALTER TABLE `Context` ADD COLUMN `last_update_time_since_epoch` BIGINT NOT NULL DEFAULT 0",
                concat!(
                    "ALTER TABLE `Artifact` ",
                    " ADD INDEX `idx_artifact_uri`(`uri`(255)), ",
                    " ADD INDEX `idx_artifact_create_time_since_epoch` (`create_time_since_epoch`), ",
                    " ADD INDEX `idx_artifact_last_update_time_since_epoch` ",
                    "            (`last_update_time_since_epoch`)"
                ),
                concat!(
                    "ALTER TABLE `Event` ",
                    " ADD INDEX `idx_event_artifact_id` (`artifact_id`), ",
                    " ADD INDEX `idx_event_execution_id` (`execution_id`)"
                ),
                concat!(
                    "ALTER TABLE `Execution` ",
                    " ADD INDEX `idx_execution_create_time_since_epoch` (`create_time_since_epoch`), ",
                    " ADD INDEX `idx_execution_last_update_time_since_epoch` ",
                    "            (`last_update_time_since_epoch`)"
                ),
                concat!(
                    "ALTER TABLE `Context` ",
                    " ADD INDEX `idx_context_create_time_since_epoch` (`create_time_since_epoch`), ",
                    " ADD INDEX `idx_context_last_update_time_since_epoch` ",
                    "            (`last_update_time_since_epoch`)"
                ),
            ]),
            5 => Some(&[
                "ALTER TABLE `Type` ADD COLUMN `version` VARCHAR(255)",
                "ALTER TABLE `Type` ADD COLUMN `description` TEXT",
                "ALTER TABLE `Type` ADD INDEX `idx_type_name` (`name`)",
            ]),
            _ => None,
        }
    }

    fn downgrade_queries(&self, from_version: i64) -> Option<&'static [&'static str]> {
        match from_version {
            6 => Some(&[
                "DROP INDEX `idx_type_name` ON `Type`",
                "ALTER TABLE `Type` DROP COLUMN `version`",
                "ALTER TABLE `Type` DROP COLUMN `description`",
            ]),
            5 => Some(&[
                "DROP INDEX `idx_artifact_uri` ON `Artifact`",
                "DROP INDEX `idx_artifact_create_time_since_epoch` ON `Artifact`",
                "DROP INDEX `idx_artifact_last_update_time_since_epoch` ON `Artifact`",
                "DROP INDEX `idx_event_artifact_id` ON `Event`",
                "DROP INDEX `idx_event_execution_id` ON `Event`",
                "DROP INDEX `idx_execution_create_time_since_epoch` ON `Execution`",
                "DROP INDEX `idx_execution_last_update_time_since_epoch` ON `Execution`",
                "DROP INDEX `idx_context_create_time_since_epoch` ON `Context`",
                "DROP INDEX `idx_context_last_update_time_since_epoch` ON `Context`",
                "ALTER TABLE `Artifact` DROP COLUMN `create_time_since_epoch`",
                "ALTER TABLE `Artifact` DROP COLUMN `last_update_time_since_epoch`",
                "ALTER TABLE `Execution` DROP COLUMN `create_time_since_epoch`",
                "ALTER TABLE `Execution` DROP COLUMN `last_update_time_since_epoch`",
                "ALTER TABLE `Context` DROP COLUMN `create_time_since_epoch`",
                "ALTER TABLE `Context` DROP COLUMN `last_update_time_since_epoch`",
            ]),
            4 => Some(&[
                "ALTER TABLE `Artifact` DROP INDEX UniqueArtifactTypeName",
                "ALTER TABLE `Execution` DROP INDEX UniqueExecutionTypeName",
                "ALTER TABLE `Artifact` DROP COLUMN `state`",
                "ALTER TABLE `Artifact` DROP COLUMN `name`",
                "ALTER TABLE `Execution` DROP COLUMN `last_known_state`",
                "ALTER TABLE `Execution` DROP COLUMN `name`",
            ]),
            3 => Some(&[
                "DROP TABLE IF EXISTS `ParentType`",
                "DROP TABLE IF EXISTS `ParentContext`",
            ]),
            2 => Some(&[
                "ALTER TABLE `Type` DROP COLUMN `input_type`",
                "ALTER TABLE `Type` DROP COLUMN `output_type`",
            ]),
            1 => Some(&[
                "ALTER TABLE `Type` CHANGE COLUMN `type_kind` `is_artifact_type` TINYINT(1) NOT NULL",
                "DROP TABLE IF EXISTS `ContextProperty`",
                "DROP TABLE IF EXISTS `Association`",
                "DROP TABLE IF EXISTS `Attribution`",
                "DROP TABLE IF EXISTS `Context`",
                "DROP TABLE IF EXISTS `MLMDEnv`",
            ]),
            _ => None,
        }
    }
}
