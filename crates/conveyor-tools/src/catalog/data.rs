//! Data structures, data stores and data store records.

use conveyor_client::ConveyorClient;
use conveyor_client::api::{
    CreateDataStore, CreateDataStructure, CreateRecord, DeleteRecords, UpdateDataStore,
    UpdateDataStructure,
};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::descriptor::{ToolAnnotations, ToolDescriptor, ToolOutput};
use crate::error::{Result, ToolError};
use crate::params::{ParamExt, ParameterValidationError};
use crate::schema::{Schema, any, boolean, columns, integer, integers, object, string, strings};

pub(super) fn tools() -> Vec<ToolDescriptor> {
    let structure_id = || Schema::new().required("dataStructureId", integer("Data structure ID"));
    let store_id = || Schema::new().required("dataStoreId", integer("Data store ID"));
    vec![
        ToolDescriptor::new(
            "data_structures_list",
            "List data structures",
            "List data structures in a team.",
            "data_structures",
            data_structures_list,
        )
        .scope("udts:read")
        .input(Schema::new().required("teamId", integer("Team ID")).paged()),
        ToolDescriptor::new(
            "data_structures_get",
            "Get data structure",
            "Get a data structure and its field specification.",
            "data_structures",
            data_structures_get,
        )
        .scope("udts:read")
        .identifier("dataStructureId")
        .input(structure_id().optional("cols", columns())),
        ToolDescriptor::new(
            "data_structures_create",
            "Create data structure",
            "Create a data structure describing record fields.",
            "data_structures",
            data_structures_create,
        )
        .scope("udts:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("teamId", integer("Team ID"))
                .required("name", string("Data structure name"))
                .required(
                    "spec",
                    any("Field specifications, an array of {name, type, ...}"),
                )
                .optional("strict", boolean("Reject fields not in the spec")),
        ),
        ToolDescriptor::new(
            "data_structures_update",
            "Update data structure",
            "Change a data structure's name, fields or strictness.",
            "data_structures",
            data_structures_update,
        )
        .scope("udts:write")
        .identifier("dataStructureId")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            structure_id()
                .optional("name", string("New name"))
                .optional("spec", any("New field specifications"))
                .optional("strict", boolean("Reject fields not in the spec")),
        ),
        ToolDescriptor::new(
            "data_structures_clone",
            "Clone data structure",
            "Copy a data structure, possibly into another team.",
            "data_structures",
            data_structures_clone,
        )
        .scope("udts:write")
        .identifier("dataStructureId")
        .annotations(ToolAnnotations::WRITE)
        .input(
            structure_id()
                .required("name", string("Name of the copy"))
                .required("targetTeamId", integer("Team to copy into")),
        ),
        ToolDescriptor::new(
            "data_structures_delete",
            "Delete data structure",
            "Delete a data structure.",
            "data_structures",
            data_structures_delete,
        )
        .scope("udts:write")
        .identifier("dataStructureId")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(structure_id()),
        ToolDescriptor::new(
            "data_stores_list",
            "List data stores",
            "List data stores in a team.",
            "data_stores",
            data_stores_list,
        )
        .scope("datastores:read")
        .input(Schema::new().required("teamId", integer("Team ID")).paged()),
        ToolDescriptor::new(
            "data_stores_get",
            "Get data store",
            "Get details of a data store.",
            "data_stores",
            data_stores_get,
        )
        .scope("datastores:read")
        .identifier("dataStoreId")
        .input(store_id().optional("cols", columns())),
        ToolDescriptor::new(
            "data_stores_create",
            "Create data store",
            "Create a data store, optionally validated by a data structure.",
            "data_stores",
            data_stores_create,
        )
        .scope("datastores:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("teamId", integer("Team ID"))
                .required("name", string("Data store name"))
                .required("maxSizeMB", integer("Storage limit in megabytes"))
                .optional("dataStructureId", integer("Data structure for records")),
        ),
        ToolDescriptor::new(
            "data_stores_update",
            "Update data store",
            "Change a data store's name, structure or size limit.",
            "data_stores",
            data_stores_update,
        )
        .scope("datastores:write")
        .identifier("dataStoreId")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            store_id()
                .optional("name", string("New name"))
                .optional("dataStructureId", integer("New data structure"))
                .optional("maxSizeMB", integer("New storage limit in megabytes")),
        ),
        ToolDescriptor::new(
            "data_stores_delete",
            "Delete data stores",
            "Delete one or more data stores of a team.",
            "data_stores",
            data_stores_delete,
        )
        .scope("datastores:write")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(
            Schema::new()
                .required("teamId", integer("Team ID"))
                .required("ids", integers("Data store IDs")),
        ),
        ToolDescriptor::new(
            "data_store_records_list",
            "List records",
            "List records in a data store.",
            "data_store_records",
            data_store_records_list,
        )
        .scope("datastores:read")
        .identifier("dataStoreId")
        .input(store_id().paged()),
        ToolDescriptor::new(
            "data_store_records_create",
            "Create record",
            "Add a record to a data store. A key is generated when none is given.",
            "data_store_records",
            data_store_records_create,
        )
        .scope("datastores:write")
        .identifier("dataStoreId")
        .annotations(ToolAnnotations::WRITE)
        .input(
            store_id()
                .optional("key", string("Record key"))
                .required("data", object("Record fields")),
        ),
        ToolDescriptor::new(
            "data_store_records_replace",
            "Replace record",
            "Replace a record, creating it when the key is new.",
            "data_store_records",
            data_store_records_replace,
        )
        .scope("datastores:write")
        .identifier("dataStoreId")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            store_id()
                .required("key", string("Record key"))
                .required("data", object("Record fields")),
        ),
        ToolDescriptor::new(
            "data_store_records_update",
            "Update record",
            "Merge fields into an existing record.",
            "data_store_records",
            data_store_records_update,
        )
        .scope("datastores:write")
        .identifier("dataStoreId")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            store_id()
                .required("key", string("Record key"))
                .required("data", object("Fields to change")),
        ),
        ToolDescriptor::new(
            "data_store_records_delete",
            "Delete records",
            "Delete records by key, or every record when `all` is true.",
            "data_store_records",
            data_store_records_delete,
        )
        .scope("datastores:write")
        .identifier("dataStoreId")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(
            store_id()
                .optional("keys", strings("Keys of the records to delete"))
                .optional("all", boolean("Delete every record")),
        ),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Data structures
// ─────────────────────────────────────────────────────────────────────────────

fn data_structures_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let team_id = args.required_u64("teamId", "ID of the team")?;
        let options = args.list_options()?;
        let value = client.data_structures().list(team_id, &options).await?;
        Ok(value.into())
    }
    .boxed()
}

fn data_structures_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("dataStructureId", "ID of the data structure")?;
        let cols = args.string_list("cols")?;
        Ok(client.data_structures().get(id, &cols).await?.into())
    }
    .boxed()
}

fn data_structures_create(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let request = CreateDataStructure {
            name: args.required_str("name", "name of the data structure")?.to_string(),
            team_id: args.required_u64("teamId", "ID of the team")?,
            spec: args.required_value("spec", "field specifications")?.clone(),
            strict: args.get("strict").and_then(Value::as_bool),
        };
        Ok(client.data_structures().create(&request).await?.into())
    }
    .boxed()
}

fn data_structures_update(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("dataStructureId", "ID of the data structure")?;
        let request = UpdateDataStructure {
            name: args.optional_str("name").map(str::to_string),
            spec: args.optional_value("spec").cloned(),
            strict: args.get("strict").and_then(Value::as_bool),
        };
        Ok(client.data_structures().update(id, &request).await?.into())
    }
    .boxed()
}

fn data_structures_clone(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("dataStructureId", "ID of the data structure")?;
        let name = args.required_str("name", "name of the copy")?;
        let target = args.required_u64("targetTeamId", "team to copy into")?;
        let value = client.data_structures().clone_to(id, name, target).await?;
        Ok(value.into())
    }
    .boxed()
}

fn data_structures_delete(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("dataStructureId", "ID of the data structure")?;
        client.data_structures().delete(id).await?;
        Ok(ToolOutput::text("Data structure has been deleted."))
    }
    .boxed()
}

// ─────────────────────────────────────────────────────────────────────────────
// Data stores
// ─────────────────────────────────────────────────────────────────────────────

fn data_stores_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let team_id = args.required_u64("teamId", "ID of the team")?;
        let options = args.list_options()?;
        Ok(client.data_stores().list(team_id, &options).await?.into())
    }
    .boxed()
}

fn data_stores_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("dataStoreId", "ID of the data store")?;
        let cols = args.string_list("cols")?;
        Ok(client.data_stores().get(id, &cols).await?.into())
    }
    .boxed()
}

fn data_stores_create(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let request = CreateDataStore {
            name: args.required_str("name", "name of the data store")?.to_string(),
            team_id: args.required_u64("teamId", "ID of the team")?,
            data_structure_id: args.optional_u64("dataStructureId")?,
            max_size_mb: args.required_u64("maxSizeMB", "storage limit in megabytes")?,
        };
        Ok(client.data_stores().create(&request).await?.into())
    }
    .boxed()
}

fn data_stores_update(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("dataStoreId", "ID of the data store")?;
        let request = UpdateDataStore {
            name: args.optional_str("name").map(str::to_string),
            data_structure_id: args.optional_u64("dataStructureId")?,
            max_size_mb: args.optional_u64("maxSizeMB")?,
        };
        Ok(client.data_stores().update(id, &request).await?.into())
    }
    .boxed()
}

fn data_stores_delete(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let team_id = args.required_u64("teamId", "ID of the team")?;
        let ids: Vec<u64> = args
            .required_value("ids", "IDs of the data stores to delete")?
            .as_array()
            .map(|items| items.iter().filter_map(Value::as_u64).collect())
            .unwrap_or_default();
        if ids.is_empty() {
            return Err(ToolError::from(ParameterValidationError::invalid_value(
                "ids",
                "[]",
                "provide at least one data store ID",
            )));
        }
        client.data_stores().delete(team_id, &ids).await?;
        Ok(ToolOutput::text("Data stores have been deleted."))
    }
    .boxed()
}

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

fn data_store_records_list(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("dataStoreId", "ID of the data store")?;
        let options = args.list_options()?;
        Ok(client.data_store_records().list(id, &options).await?.into())
    }
    .boxed()
}

fn data_store_records_create(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("dataStoreId", "ID of the data store")?;
        let record = CreateRecord {
            key: args.optional_str("key").map(str::to_string),
            data: args.required_value("data", "record fields")?.clone(),
        };
        let value = client.data_store_records().create(id, &record).await?;
        Ok(value.into())
    }
    .boxed()
}

fn data_store_records_replace(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("dataStoreId", "ID of the data store")?;
        let key = args.required_str("key", "key of the record")?;
        let data = args.required_value("data", "record fields")?;
        let value = client.data_store_records().replace(id, key, data).await?;
        Ok(value.into())
    }
    .boxed()
}

fn data_store_records_update(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("dataStoreId", "ID of the data store")?;
        let key = args.required_str("key", "key of the record")?;
        let data = args.required_value("data", "fields to change")?;
        let value = client.data_store_records().update(id, key, data).await?;
        Ok(value.into())
    }
    .boxed()
}

fn data_store_records_delete(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("dataStoreId", "ID of the data store")?;
        let which = if args.optional_bool("all", false) {
            DeleteRecords::All
        } else {
            let keys = args.string_list("keys")?;
            if keys.is_empty() {
                return Err(ToolError::from(ParameterValidationError::missing(
                    "keys",
                    "list the record keys, or set all to true",
                )));
            }
            DeleteRecords::Keys(keys)
        };
        client.data_store_records().delete(id, &which).await?;
        Ok(ToolOutput::text("Records have been deleted."))
    }
    .boxed()
}
