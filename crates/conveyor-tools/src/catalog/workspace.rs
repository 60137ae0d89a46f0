//! Templates, devices and notifications.

use conveyor_client::ConveyorClient;
use conveyor_client::api::ListTemplatesQuery;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::descriptor::{ToolAnnotations, ToolDescriptor, ToolOutput};
use crate::error::Result;
use crate::params::ParamExt;
use crate::schema::{Schema, boolean, columns, integer, strings};

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "templates_list",
            "List templates",
            "List scenario templates of a team, or public templates.",
            "templates",
            templates_list,
        )
        .scope("templates:read")
        .input(
            Schema::new()
                .optional("teamId", integer("Team ID"))
                .optional("public", boolean("List public templates"))
                .optional("usedApps", strings("Only templates using these apps"))
                .paged(),
        ),
        ToolDescriptor::new(
            "templates_get",
            "Get template",
            "Get details of a template.",
            "templates",
            templates_get,
        )
        .scope("templates:read")
        .identifier("templateId")
        .input(
            Schema::new()
                .required("templateId", integer("Template ID"))
                .optional("cols", columns()),
        ),
        ToolDescriptor::new(
            "templates_blueprint",
            "Get template blueprint",
            "Get the blueprint a template creates scenarios from.",
            "templates",
            templates_blueprint,
        )
        .scope("templates:read")
        .identifier("templateId")
        .input(Schema::new().required("templateId", integer("Template ID"))),
        ToolDescriptor::new(
            "devices_list",
            "List devices",
            "List devices registered in a team.",
            "devices",
            devices_list,
        )
        .scope("devices:read")
        .input(Schema::new().required("teamId", integer("Team ID")).paged()),
        ToolDescriptor::new(
            "devices_get",
            "Get device",
            "Get details of a device.",
            "devices",
            devices_get,
        )
        .scope("devices:read")
        .identifier("deviceId")
        .input(
            Schema::new()
                .required("deviceId", integer("Device ID"))
                .optional("cols", columns()),
        ),
        ToolDescriptor::new(
            "devices_delete",
            "Delete device",
            "Unregister a device.",
            "devices",
            devices_delete,
        )
        .scope("devices:write")
        .identifier("deviceId")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(Schema::new().required("deviceId", integer("Device ID"))),
        ToolDescriptor::new(
            "notifications_list",
            "List notifications",
            "List notifications of the current user.",
            "notifications",
            notifications_list,
        )
        .scope("notifications:read")
        .input(Schema::new().paged()),
    ]
}

fn templates_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let options = args.list_options()?;
        let query = ListTemplatesQuery {
            team_id: args.optional_u64("teamId")?,
            public: args.get("public").and_then(Value::as_bool),
            used_apps: args.string_list("usedApps")?,
            pg: options.pg,
            cols: options.cols,
        };
        Ok(client.templates().list(&query).await?.into())
    }
    .boxed()
}

fn templates_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("templateId", "ID of the template")?;
        let cols = args.string_list("cols")?;
        Ok(client.templates().get(id, &cols).await?.into())
    }
    .boxed()
}

fn templates_blueprint(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("templateId", "ID of the template")?;
        Ok(client.templates().blueprint(id).await?.into())
    }
    .boxed()
}

fn devices_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let team_id = args.required_u64("teamId", "ID of the team")?;
        let options = args.list_options()?;
        Ok(client.devices().list(team_id, &options).await?.into())
    }
    .boxed()
}

fn devices_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("deviceId", "ID of the device")?;
        let cols = args.string_list("cols")?;
        Ok(client.devices().get(id, &cols).await?.into())
    }
    .boxed()
}

fn devices_delete(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("deviceId", "ID of the device")?;
        client.devices().delete(id).await?;
        Ok(ToolOutput::text("Device has been deleted."))
    }
    .boxed()
}

fn notifications_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let options = args.list_options()?;
        Ok(client.notifications().list(&options).await?.into())
    }
    .boxed()
}
