//! Custom functions.

use conveyor_client::ConveyorClient;
use conveyor_client::api::{CreateFunction, UpdateFunction};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::descriptor::{ToolAnnotations, ToolDescriptor, ToolOutput};
use crate::error::Result;
use crate::params::ParamExt;
use crate::schema::{Schema, columns, integer, string};

pub(super) fn tools() -> Vec<ToolDescriptor> {
    let function_id = || Schema::new().required("functionId", integer("Function ID"));
    vec![
        ToolDescriptor::new(
            "functions_list",
            "List functions",
            "List custom functions in a team.",
            "functions",
            functions_list,
        )
        .scope("functions:read")
        .input(Schema::new().required("teamId", integer("Team ID")).paged()),
        ToolDescriptor::new(
            "functions_get",
            "Get function",
            "Get a custom function and its source.",
            "functions",
            functions_get,
        )
        .scope("functions:read")
        .identifier("functionId")
        .input(function_id().optional("cols", columns())),
        ToolDescriptor::new(
            "functions_create",
            "Create function",
            "Create a custom JavaScript function usable in scenario mappings.",
            "functions",
            functions_create,
        )
        .scope("functions:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("teamId", integer("Team ID"))
                .required(
                    "name",
                    string("Function name, also the JavaScript function name"),
                )
                .required("description", string("What the function does"))
                .required("code", string("JavaScript source")),
        ),
        ToolDescriptor::new(
            "functions_update",
            "Update function",
            "Change a custom function's description or source.",
            "functions",
            functions_update,
        )
        .scope("functions:write")
        .identifier("functionId")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            function_id()
                .optional("description", string("New description"))
                .optional("code", string("New JavaScript source")),
        ),
        ToolDescriptor::new(
            "functions_delete",
            "Delete function",
            "Delete a custom function.",
            "functions",
            functions_delete,
        )
        .scope("functions:write")
        .identifier("functionId")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(function_id()),
        ToolDescriptor::new(
            "functions_check",
            "Check function",
            "Validate custom function source without saving it.",
            "functions",
            functions_check,
        )
        .scope("functions:read")
        .input(
            Schema::new()
                .required("teamId", integer("Team ID"))
                .required("code", string("JavaScript source")),
        ),
    ]
}

fn functions_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let team_id = args.required_u64("teamId", "ID of the team")?;
        let options = args.list_options()?;
        Ok(client.functions().list(team_id, &options).await?.into())
    }
    .boxed()
}

fn functions_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("functionId", "ID of the function")?;
        let cols = args.string_list("cols")?;
        Ok(client.functions().get(id, &cols).await?.into())
    }
    .boxed()
}

fn functions_create(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let team_id = args.required_u64("teamId", "ID of the team")?;
        let request = CreateFunction {
            name: args.required_str("name", "name of the function")?.to_string(),
            description: args.required_str("description", "what the function does")?.to_string(),
            code: args.required_str("code", "JavaScript source")?.to_string(),
        };
        Ok(client.functions().create(team_id, &request).await?.into())
    }
    .boxed()
}

fn functions_update(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("functionId", "ID of the function")?;
        let request = UpdateFunction {
            description: args.optional_str("description").map(str::to_string),
            code: args.optional_str("code").map(str::to_string),
        };
        Ok(client.functions().update(id, &request).await?.into())
    }
    .boxed()
}

fn functions_delete(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("functionId", "ID of the function")?;
        client.functions().delete(id).await?;
        Ok(ToolOutput::text("Function has been deleted."))
    }
    .boxed()
}

fn functions_check(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let team_id = args.required_u64("teamId", "ID of the team")?;
        let code = args.required_str("code", "JavaScript source")?;
        Ok(client.functions().check(team_id, code).await?.into())
    }
    .boxed()
}
