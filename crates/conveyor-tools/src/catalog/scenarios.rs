//! Folders, scenarios, blueprints and scenario interfaces.

use conveyor_client::ConveyorClient;
use conveyor_client::api::{
    CloneScenario, CreateScenario, ListScenariosQuery, RunScenario, UpdateScenario,
};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::{Map, Value};

use crate::descriptor::{ToolAnnotations, ToolDescriptor, ToolOutput};
use crate::error::{Result, ToolError};
use crate::params::{ParamExt, ParameterValidationError};
use crate::schema::{Schema, any, boolean, columns, integer, object, string};

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "folders_list",
            "List folders",
            "List scenario folders in a team.",
            "folders",
            folders_list,
        )
        .scope("scenarios:read")
        .input(
            Schema::new()
                .required("teamId", integer("Team ID"))
                .optional("cols", columns()),
        ),
        ToolDescriptor::new(
            "folders_create",
            "Create folder",
            "Create a scenario folder in a team.",
            "folders",
            folders_create,
        )
        .scope("scenarios:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("teamId", integer("Team ID"))
                .required("name", string("Folder name")),
        ),
        ToolDescriptor::new(
            "folders_update",
            "Rename folder",
            "Rename a scenario folder.",
            "folders",
            folders_update,
        )
        .scope("scenarios:write")
        .identifier("folderId")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            Schema::new()
                .required("folderId", integer("Folder ID"))
                .required("name", string("New name")),
        ),
        ToolDescriptor::new(
            "folders_delete",
            "Delete folder",
            "Delete a scenario folder. Scenarios inside are kept.",
            "folders",
            folders_delete,
        )
        .scope("scenarios:write")
        .identifier("folderId")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(Schema::new().required("folderId", integer("Folder ID"))),
        ToolDescriptor::new(
            "scenarios_list",
            "List scenarios",
            "List scenarios in a team or organization, optionally filtered by folder or state.",
            "scenarios",
            scenarios_list,
        )
        .scope("scenarios:read")
        .input(
            Schema::new()
                .optional(
                    "teamId",
                    integer("Team ID; either this or organizationId is required"),
                )
                .optional("organizationId", integer("Organization ID"))
                .optional("folderId", integer("Only scenarios in this folder"))
                .optional(
                    "isActive",
                    boolean("Only active or only inactive scenarios"),
                )
                .paged(),
        ),
        ToolDescriptor::new(
            "scenarios_get",
            "Get scenario",
            "Get details of a scenario, optionally including its blueprint.",
            "scenarios",
            scenarios_get,
        )
        .scope("scenarios:read")
        .identifier("scenarioId")
        .input(
            Schema::new()
                .required("scenarioId", integer("Scenario ID"))
                .optional(
                    "includeBlueprint",
                    boolean("Also fetch the scenario blueprint"),
                )
                .optional("cols", columns()),
        ),
        ToolDescriptor::new(
            "scenarios_create",
            "Create scenario",
            "Create a scenario from a blueprint and scheduling settings.",
            "scenarios",
            scenarios_create,
        )
        .scope("scenarios:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("teamId", integer("Team ID"))
                .required(
                    "blueprint",
                    any("Scenario blueprint, as an object or JSON string"),
                )
                .required(
                    "scheduling",
                    any("Scheduling, e.g. {\"type\": \"on-demand\"}"),
                )
                .optional("folderId", integer("Folder to place the scenario in")),
        ),
        ToolDescriptor::new(
            "scenarios_update",
            "Update scenario",
            "Update a scenario's name, blueprint, scheduling or folder.",
            "scenarios",
            scenarios_update,
        )
        .scope("scenarios:write")
        .identifier("scenarioId")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            Schema::new()
                .required("scenarioId", integer("Scenario ID"))
                .optional("name", string("New name"))
                .optional("blueprint", any("New blueprint"))
                .optional("scheduling", any("New scheduling"))
                .optional("folderId", integer("New folder")),
        ),
        ToolDescriptor::new(
            "scenarios_delete",
            "Delete scenario",
            "Delete a scenario.",
            "scenarios",
            scenarios_delete,
        )
        .scope("scenarios:write")
        .identifier("scenarioId")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(Schema::new().required("scenarioId", integer("Scenario ID"))),
        ToolDescriptor::new(
            "scenarios_activate",
            "Activate scenario",
            "Activate a scenario so it runs on its schedule.",
            "scenarios",
            scenarios_activate,
        )
        .scope("scenarios:write")
        .identifier("scenarioId")
        .annotations(ToolAnnotations::UPDATE)
        .input(Schema::new().required("scenarioId", integer("Scenario ID"))),
        ToolDescriptor::new(
            "scenarios_deactivate",
            "Deactivate scenario",
            "Deactivate a scenario.",
            "scenarios",
            scenarios_deactivate,
        )
        .scope("scenarios:write")
        .identifier("scenarioId")
        .annotations(ToolAnnotations::UPDATE)
        .input(Schema::new().required("scenarioId", integer("Scenario ID"))),
        ToolDescriptor::new(
            "scenarios_run",
            "Run scenario",
            "Run a scenario immediately, optionally with input data.",
            "scenarios",
            scenarios_run,
        )
        .scope("scenarios:run")
        .identifier("scenarioId")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("scenarioId", integer("Scenario ID"))
                .optional("data", object("Input matching the scenario interface"))
                .optional("responsive", boolean("Wait for the run to finish")),
        ),
        ToolDescriptor::new(
            "scenarios_clone",
            "Clone scenario",
            "Copy a scenario into a team, remapping connections, keys and hooks.",
            "scenarios",
            scenarios_clone,
        )
        .scope("scenarios:write")
        .identifier("scenarioId")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("scenarioId", integer("Scenario to copy"))
                .required("organizationId", integer("Organization of the target team"))
                .required("teamId", integer("Target team ID"))
                .required("name", string("Name of the copy"))
                .optional("states", boolean("Copy module states"))
                .optional(
                    "account",
                    object("Map of old connection ID to new connection ID"),
                )
                .optional("key", object("Map of old key ID to new key ID"))
                .optional("hook", object("Map of old hook ID to new hook ID")),
        ),
        ToolDescriptor::new(
            "blueprints_get",
            "Get blueprint",
            "Get a scenario's blueprint, live, draft or a past version.",
            "blueprints",
            blueprints_get,
        )
        .scope("scenarios:read")
        .identifier("scenarioId")
        .input(
            Schema::new()
                .required("scenarioId", integer("Scenario ID"))
                .optional("blueprintId", integer("Past version to fetch"))
                .optional("draft", boolean("Fetch the unsaved draft")),
        ),
        ToolDescriptor::new(
            "blueprints_versions",
            "List blueprint versions",
            "List saved versions of a scenario's blueprint.",
            "blueprints",
            blueprints_versions,
        )
        .scope("scenarios:read")
        .identifier("scenarioId")
        .input(Schema::new().required("scenarioId", integer("Scenario ID"))),
        ToolDescriptor::new(
            "scenario_interface_get",
            "Get scenario interface",
            "Get the inputs and outputs a scenario declares.",
            "scenario_interface",
            scenario_interface_get,
        )
        .scope("scenarios:read")
        .identifier("scenarioId")
        .input(Schema::new().required("scenarioId", integer("Scenario ID"))),
        ToolDescriptor::new(
            "scenario_interface_update",
            "Update scenario interface",
            "Replace the inputs and outputs a scenario declares.",
            "scenario_interface",
            scenario_interface_update,
        )
        .scope("scenarios:write")
        .identifier("scenarioId")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            Schema::new()
                .required("scenarioId", integer("Scenario ID"))
                .required("interface", object("{\"input\": [...], \"output\": [...]}")),
        ),
    ]
}

fn folders_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let team_id = args.required_u64("teamId", "ID of the team")?;
        let cols = args.string_list("cols")?;
        Ok(client.folders().list(team_id, &cols).await?.into())
    }
    .boxed()
}

fn folders_create(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let team_id = args.required_u64("teamId", "ID of the team")?;
        let name = args.required_str("name", "name of the folder")?;
        Ok(client.folders().create(team_id, name).await?.into())
    }
    .boxed()
}

fn folders_update(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("folderId", "ID of the folder")?;
        let name = args.required_str("name", "new name of the folder")?;
        Ok(client.folders().update(id, name).await?.into())
    }
    .boxed()
}

fn folders_delete(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("folderId", "ID of the folder")?;
        client.folders().delete(id).await?;
        Ok(ToolOutput::text("Folder has been deleted."))
    }
    .boxed()
}

fn scenarios_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let team_id = args.optional_u64("teamId")?;
        let organization_id = args.optional_u64("organizationId")?;
        if team_id.is_none() && organization_id.is_none() {
            return Err(ToolError::from(ParameterValidationError::missing(
                "teamId",
                "provide teamId or organizationId",
            )));
        }
        let options = args.list_options()?;
        let query = ListScenariosQuery {
            team_id,
            organization_id,
            folder_id: args.optional_u64("folderId")?,
            is_active: args.get("isActive").and_then(Value::as_bool),
            pg: options.pg,
            cols: options.cols,
        };
        Ok(client.scenarios().list(&query).await?.into())
    }
    .boxed()
}

fn scenarios_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("scenarioId", "ID of the scenario")?;
        let cols = args.string_list("cols")?;
        let mut scenario = client.scenarios().get(id, &cols).await?;
        if args.optional_bool("includeBlueprint", false) {
            let blueprint = client.blueprints().get(id, None, false).await?;
            if let Value::Object(map) = &mut scenario {
                map.insert("blueprint".to_string(), blueprint);
            }
        }
        Ok(scenario.into())
    }
    .boxed()
}

fn scenarios_create(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let request = CreateScenario {
            team_id: args.required_u64("teamId", "ID of the team")?,
            blueprint: args
                .required_value("blueprint", "scenario blueprint")?
                .clone(),
            scheduling: args
                .required_value("scheduling", "e.g. {\"type\": \"on-demand\"}")?
                .clone(),
            folder_id: args.optional_u64("folderId")?,
            basedon: None,
        };
        Ok(client.scenarios().create(&request).await?.into())
    }
    .boxed()
}

fn scenarios_update(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("scenarioId", "ID of the scenario")?;
        let request = UpdateScenario {
            name: args.optional_str("name").map(str::to_string),
            blueprint: args.optional_value("blueprint").cloned(),
            scheduling: args.optional_value("scheduling").cloned(),
            folder_id: args.optional_u64("folderId")?,
        };
        Ok(client.scenarios().update(id, &request).await?.into())
    }
    .boxed()
}

fn scenarios_delete(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("scenarioId", "ID of the scenario")?;
        client.scenarios().delete(id).await?;
        Ok(ToolOutput::text("Scenario has been deleted."))
    }
    .boxed()
}

fn scenarios_activate(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("scenarioId", "ID of the scenario")?;
        client.scenarios().activate(id).await?;
        Ok(ToolOutput::text("Scenario has been activated."))
    }
    .boxed()
}

fn scenarios_deactivate(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("scenarioId", "ID of the scenario")?;
        client.scenarios().deactivate(id).await?;
        Ok(ToolOutput::text("Scenario has been deactivated."))
    }
    .boxed()
}

fn scenarios_run(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("scenarioId", "ID of the scenario")?;
        let request = RunScenario {
            data: args.optional_value("data").cloned(),
            responsive: args.optional_bool("responsive", false),
        };
        Ok(client.scenarios().run(id, &request).await?.into())
    }
    .boxed()
}

fn scenarios_clone(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("scenarioId", "ID of the scenario to copy")?;
        let organization_id =
            args.required_u64("organizationId", "organization of the target team")?;
        let request = CloneScenario {
            name: args.required_str("name", "name of the copy")?.to_string(),
            team_id: args.required_u64("teamId", "ID of the target team")?,
            states: args.optional_bool("states", false),
            account: id_map(&args, "account"),
            key: id_map(&args, "key"),
            hook: id_map(&args, "hook"),
        };
        Ok(client
            .scenarios()
            .clone_to(id, organization_id, &request)
            .await?
            .into())
    }
    .boxed()
}

fn id_map(args: &Value, name: &str) -> Map<String, Value> {
    args.get(name)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

fn blueprints_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("scenarioId", "ID of the scenario")?;
        let blueprint_id = args.optional_u64("blueprintId")?;
        let draft = args.optional_bool("draft", false);
        let value = client.blueprints().get(id, blueprint_id, draft).await?;
        Ok(value.into())
    }
    .boxed()
}

fn blueprints_versions(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("scenarioId", "ID of the scenario")?;
        Ok(client.blueprints().versions(id).await?.into())
    }
    .boxed()
}

fn scenario_interface_get(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("scenarioId", "ID of the scenario")?;
        Ok(client.scenario_interface().get(id).await?.into())
    }
    .boxed()
}

fn scenario_interface_update(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("scenarioId", "ID of the scenario")?;
        let interface = args.required_value("interface", "inputs and outputs")?;
        let value = client.scenario_interface().update(id, interface).await?;
        Ok(value.into())
    }
    .boxed()
}
