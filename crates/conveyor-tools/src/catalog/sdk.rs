//! Custom app development: apps, their connections, webhooks, modules,
//! remote procedures and functions.

use conveyor_client::ConveyorClient;
use conveyor_client::api::{
    CreateApp, CreateAppConnection, CreateAppModule, CreateAppRpc, CreateAppWebhook, TestRpc,
    UpdateApp, UpdateAppModule, UpdateAppRpc,
};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::descriptor::{ToolAnnotations, ToolDescriptor, ToolOutput};
use crate::error::Result;
use crate::params::{ParamExt, ParamResult, ParameterValidationError};
use crate::schema::{Schema, any, boolean, integer, object, one_of, string, strings};

const APP_SECTIONS: &[&str] = &["base", "groups", "install", "installSpec"];
const CONNECTION_SECTIONS: &[&str] = &[
    "api",
    "parameters",
    "scopes",
    "scope",
    "install",
    "installSpec",
];
const WEBHOOK_SECTIONS: &[&str] = &["api", "parameters", "attach", "detach", "scope"];
const MODULE_SECTIONS: &[&str] = &[
    "api",
    "epoch",
    "parameters",
    "expect",
    "interface",
    "samples",
    "scope",
];
const RPC_SECTIONS: &[&str] = &["api", "parameters"];

pub(super) fn tools() -> Vec<ToolDescriptor> {
    let mut tools = app_tools();
    tools.extend(connection_tools());
    tools.extend(webhook_tools());
    tools.extend(module_tools());
    tools.extend(rpc_tools());
    tools.extend(function_tools());
    tools
}

fn app() -> Schema {
    Schema::new()
        .required("appName", string("App name"))
        .required("appVersion", integer("App version"))
}

fn app_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "sdk_apps_list",
            "List custom apps",
            "List custom apps owned by the user.",
            "sdk_apps",
            sdk_apps_list,
        )
        .scope("sdk-apps:read"),
        ToolDescriptor::new(
            "sdk_apps_get",
            "Get custom app",
            "Get one version of a custom app.",
            "sdk_apps",
            sdk_apps_get,
        )
        .scope("sdk-apps:read")
        .identifier("appName")
        .input(app()),
        ToolDescriptor::new(
            "sdk_apps_create",
            "Create custom app",
            "Create a custom app.",
            "sdk_apps",
            sdk_apps_create,
        )
        .scope("sdk-apps:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("name", string("Unique name, lowercase with dashes"))
                .required("label", string("Display name"))
                .optional("description", string("Description"))
                .required("theme", string("Hex color, e.g. \"#ff00ff\""))
                .required("language", string("Interface language code, e.g. \"en\""))
                .optional("countries", strings("Countries the app is available in"))
                .optional("private", boolean("Keep the app private"))
                .optional(
                    "audience",
                    one_of(&["countries", "global", "private"], "Audience"),
                ),
        ),
        ToolDescriptor::new(
            "sdk_apps_update",
            "Update custom app",
            "Update a custom app's metadata.",
            "sdk_apps",
            sdk_apps_update,
        )
        .scope("sdk-apps:write")
        .identifier("appName")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            app()
                .optional("label", string("Display name"))
                .optional("description", string("Description"))
                .optional("theme", string("Hex color"))
                .optional("language", string("Interface language code"))
                .optional("countries", strings("Countries the app is available in"))
                .optional(
                    "audience",
                    one_of(&["countries", "global", "private"], "Audience"),
                ),
        ),
        ToolDescriptor::new(
            "sdk_apps_delete",
            "Delete custom app",
            "Delete a custom app version.",
            "sdk_apps",
            sdk_apps_delete,
        )
        .scope("sdk-apps:write")
        .identifier("appName")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(app()),
        ToolDescriptor::new(
            "sdk_apps_get_section",
            "Get app section",
            "Get a section of a custom app's configuration.",
            "sdk_apps",
            sdk_apps_get_section,
        )
        .scope("sdk-apps:read")
        .identifier("appName")
        .input(app().required("section", one_of(APP_SECTIONS, "Section"))),
        ToolDescriptor::new(
            "sdk_apps_set_section",
            "Set app section",
            "Replace a section of a custom app's configuration.",
            "sdk_apps",
            sdk_apps_set_section,
        )
        .scope("sdk-apps:write")
        .identifier("appName")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            app()
                .required("section", one_of(APP_SECTIONS, "Section"))
                .required("body", any("Section content")),
        ),
        ToolDescriptor::new(
            "sdk_apps_get_docs",
            "Get app docs",
            "Get a custom app's Markdown readme.",
            "sdk_apps",
            sdk_apps_get_docs,
        )
        .scope("sdk-apps:read")
        .identifier("appName")
        .input(app()),
        ToolDescriptor::new(
            "sdk_apps_set_docs",
            "Set app docs",
            "Replace a custom app's Markdown readme.",
            "sdk_apps",
            sdk_apps_set_docs,
        )
        .scope("sdk-apps:write")
        .identifier("appName")
        .annotations(ToolAnnotations::UPDATE)
        .input(app().required("docs", string("Markdown content"))),
    ]
}

fn connection_tools() -> Vec<ToolDescriptor> {
    let name = || Schema::new().required("connectionName", string("App connection name"));
    vec![
        ToolDescriptor::new(
            "sdk_connections_list",
            "List app connections",
            "List connections defined by a custom app.",
            "sdk_connections",
            sdk_connections_list,
        )
        .scope("sdk-apps:read")
        .identifier("appName")
        .input(Schema::new().required("appName", string("App name"))),
        ToolDescriptor::new(
            "sdk_connections_get",
            "Get app connection",
            "Get a custom app connection.",
            "sdk_connections",
            sdk_connections_get,
        )
        .scope("sdk-apps:read")
        .identifier("connectionName")
        .input(name()),
        ToolDescriptor::new(
            "sdk_connections_create",
            "Create app connection",
            "Add a connection to a custom app.",
            "sdk_connections",
            sdk_connections_create,
        )
        .scope("sdk-apps:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("appName", string("App name"))
                .required(
                    "type",
                    one_of(
                        &["basic", "oauth", "oauth-refresh", "apikey", "other"],
                        "Connection type",
                    ),
                )
                .required("label", string("Display name")),
        ),
        ToolDescriptor::new(
            "sdk_connections_update",
            "Update app connection",
            "Relabel a custom app connection.",
            "sdk_connections",
            sdk_connections_update,
        )
        .scope("sdk-apps:write")
        .identifier("connectionName")
        .annotations(ToolAnnotations::UPDATE)
        .input(name().required("label", string("New display name"))),
        ToolDescriptor::new(
            "sdk_connections_delete",
            "Delete app connection",
            "Delete a custom app connection.",
            "sdk_connections",
            sdk_connections_delete,
        )
        .scope("sdk-apps:write")
        .identifier("connectionName")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(name()),
        ToolDescriptor::new(
            "sdk_connections_get_section",
            "Get app connection section",
            "Get a section of a custom app connection.",
            "sdk_connections",
            sdk_connections_get_section,
        )
        .scope("sdk-apps:read")
        .identifier("connectionName")
        .input(name().required("section", one_of(CONNECTION_SECTIONS, "Section"))),
        ToolDescriptor::new(
            "sdk_connections_set_section",
            "Set app connection section",
            "Replace a section of a custom app connection.",
            "sdk_connections",
            sdk_connections_set_section,
        )
        .scope("sdk-apps:write")
        .identifier("connectionName")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            name()
                .required("section", one_of(CONNECTION_SECTIONS, "Section"))
                .required("body", any("Section content")),
        ),
    ]
}

fn webhook_tools() -> Vec<ToolDescriptor> {
    let name = || Schema::new().required("webhookName", string("App webhook name"));
    vec![
        ToolDescriptor::new(
            "sdk_webhooks_list",
            "List app webhooks",
            "List webhooks defined by a custom app.",
            "sdk_webhooks",
            sdk_webhooks_list,
        )
        .scope("sdk-apps:read")
        .identifier("appName")
        .input(Schema::new().required("appName", string("App name"))),
        ToolDescriptor::new(
            "sdk_webhooks_get",
            "Get app webhook",
            "Get a custom app webhook.",
            "sdk_webhooks",
            sdk_webhooks_get,
        )
        .scope("sdk-apps:read")
        .identifier("webhookName")
        .input(name()),
        ToolDescriptor::new(
            "sdk_webhooks_create",
            "Create app webhook",
            "Add a webhook to a custom app.",
            "sdk_webhooks",
            sdk_webhooks_create,
        )
        .scope("sdk-apps:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("appName", string("App name"))
                .required(
                    "type",
                    one_of(&["web", "web-shared", "web-attached"], "Webhook type"),
                )
                .required("label", string("Display name")),
        ),
        ToolDescriptor::new(
            "sdk_webhooks_update",
            "Update app webhook",
            "Relabel a custom app webhook.",
            "sdk_webhooks",
            sdk_webhooks_update,
        )
        .scope("sdk-apps:write")
        .identifier("webhookName")
        .annotations(ToolAnnotations::UPDATE)
        .input(name().required("label", string("New display name"))),
        ToolDescriptor::new(
            "sdk_webhooks_delete",
            "Delete app webhook",
            "Delete a custom app webhook.",
            "sdk_webhooks",
            sdk_webhooks_delete,
        )
        .scope("sdk-apps:write")
        .identifier("webhookName")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(name()),
        ToolDescriptor::new(
            "sdk_webhooks_get_section",
            "Get app webhook section",
            "Get a section of a custom app webhook.",
            "sdk_webhooks",
            sdk_webhooks_get_section,
        )
        .scope("sdk-apps:read")
        .identifier("webhookName")
        .input(name().required("section", one_of(WEBHOOK_SECTIONS, "Section"))),
        ToolDescriptor::new(
            "sdk_webhooks_set_section",
            "Set app webhook section",
            "Replace a section of a custom app webhook.",
            "sdk_webhooks",
            sdk_webhooks_set_section,
        )
        .scope("sdk-apps:write")
        .identifier("webhookName")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            name()
                .required("section", one_of(WEBHOOK_SECTIONS, "Section"))
                .required("body", any("Section content")),
        ),
    ]
}

fn module_tools() -> Vec<ToolDescriptor> {
    let module = || app().required("moduleName", string("Module name"));
    vec![
        ToolDescriptor::new(
            "sdk_modules_list",
            "List app modules",
            "List modules of a custom app.",
            "sdk_modules",
            sdk_modules_list,
        )
        .scope("sdk-apps:read")
        .identifier("appName")
        .input(app()),
        ToolDescriptor::new(
            "sdk_modules_get",
            "Get app module",
            "Get a custom app module.",
            "sdk_modules",
            sdk_modules_get,
        )
        .scope("sdk-apps:read")
        .identifier("moduleName")
        .input(module()),
        ToolDescriptor::new(
            "sdk_modules_create",
            "Create app module",
            "Add a module to a custom app.",
            "sdk_modules",
            sdk_modules_create,
        )
        .scope("sdk-apps:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            app()
                .required("name", string("Module name"))
                .required(
                    "typeId",
                    integer("Module type (1 trigger, 4 action, 9 search, ...)"),
                )
                .required("label", string("Display name"))
                .required("description", string("Description"))
                .optional("connection", string("Connection used by the module"))
                .optional("webhook", string("Webhook for instant triggers")),
        ),
        ToolDescriptor::new(
            "sdk_modules_update",
            "Update app module",
            "Update a custom app module.",
            "sdk_modules",
            sdk_modules_update,
        )
        .scope("sdk-apps:write")
        .identifier("moduleName")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            module()
                .optional("label", string("Display name"))
                .optional("description", string("Description"))
                .optional("connection", string("Connection used by the module"))
                .optional("webhook", string("Webhook for instant triggers")),
        ),
        ToolDescriptor::new(
            "sdk_modules_delete",
            "Delete app module",
            "Delete a custom app module.",
            "sdk_modules",
            sdk_modules_delete,
        )
        .scope("sdk-apps:write")
        .identifier("moduleName")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(module()),
        ToolDescriptor::new(
            "sdk_modules_get_section",
            "Get app module section",
            "Get a section of a custom app module.",
            "sdk_modules",
            sdk_modules_get_section,
        )
        .scope("sdk-apps:read")
        .identifier("moduleName")
        .input(module().required("section", one_of(MODULE_SECTIONS, "Section"))),
        ToolDescriptor::new(
            "sdk_modules_set_section",
            "Set app module section",
            "Replace a section of a custom app module.",
            "sdk_modules",
            sdk_modules_set_section,
        )
        .scope("sdk-apps:write")
        .identifier("moduleName")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            module()
                .required("section", one_of(MODULE_SECTIONS, "Section"))
                .required("body", any("Section content")),
        ),
    ]
}

fn rpc_tools() -> Vec<ToolDescriptor> {
    let rpc = || app().required("rpcName", string("RPC name"));
    vec![
        ToolDescriptor::new(
            "sdk_rpcs_list",
            "List app RPCs",
            "List remote procedures of a custom app.",
            "sdk_rpcs",
            sdk_rpcs_list,
        )
        .scope("sdk-apps:read")
        .identifier("appName")
        .input(app()),
        ToolDescriptor::new(
            "sdk_rpcs_get",
            "Get app RPC",
            "Get a custom app remote procedure.",
            "sdk_rpcs",
            sdk_rpcs_get,
        )
        .scope("sdk-apps:read")
        .identifier("rpcName")
        .input(rpc()),
        ToolDescriptor::new(
            "sdk_rpcs_create",
            "Create app RPC",
            "Add a remote procedure to a custom app.",
            "sdk_rpcs",
            sdk_rpcs_create,
        )
        .scope("sdk-apps:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            app()
                .required("name", string("RPC name"))
                .required("label", string("Display name"))
                .optional("connection", string("Connection used by the RPC")),
        ),
        ToolDescriptor::new(
            "sdk_rpcs_update",
            "Update app RPC",
            "Update a custom app remote procedure.",
            "sdk_rpcs",
            sdk_rpcs_update,
        )
        .scope("sdk-apps:write")
        .identifier("rpcName")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            rpc()
                .optional("label", string("Display name"))
                .optional("connection", string("Connection used by the RPC")),
        ),
        ToolDescriptor::new(
            "sdk_rpcs_delete",
            "Delete app RPC",
            "Delete a custom app remote procedure.",
            "sdk_rpcs",
            sdk_rpcs_delete,
        )
        .scope("sdk-apps:write")
        .identifier("rpcName")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(rpc()),
        ToolDescriptor::new(
            "sdk_rpcs_get_section",
            "Get app RPC section",
            "Get a section of a custom app remote procedure.",
            "sdk_rpcs",
            sdk_rpcs_get_section,
        )
        .scope("sdk-apps:read")
        .identifier("rpcName")
        .input(rpc().required("section", one_of(RPC_SECTIONS, "Section"))),
        ToolDescriptor::new(
            "sdk_rpcs_set_section",
            "Set app RPC section",
            "Replace a section of a custom app remote procedure.",
            "sdk_rpcs",
            sdk_rpcs_set_section,
        )
        .scope("sdk-apps:write")
        .identifier("rpcName")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            rpc()
                .required("section", one_of(RPC_SECTIONS, "Section"))
                .required("body", any("Section content")),
        ),
        ToolDescriptor::new(
            "sdk_rpcs_test",
            "Test app RPC",
            "Run a remote procedure with sample inputs.",
            "sdk_rpcs",
            sdk_rpcs_test,
        )
        .scope("sdk-apps:write")
        .identifier("rpcName")
        .annotations(ToolAnnotations::WRITE)
        .input(
            rpc()
                .required("data", object("Parameters passed to the RPC"))
                .required("schema", any("Schema describing the parameters")),
        ),
    ]
}

fn function_tools() -> Vec<ToolDescriptor> {
    let function = || app().required("functionName", string("Function name"));
    vec![
        ToolDescriptor::new(
            "sdk_functions_list",
            "List app functions",
            "List IML functions of a custom app.",
            "sdk_functions",
            sdk_functions_list,
        )
        .scope("sdk-apps:read")
        .identifier("appName")
        .input(app()),
        ToolDescriptor::new(
            "sdk_functions_get",
            "Get app function",
            "Get a custom app IML function.",
            "sdk_functions",
            sdk_functions_get,
        )
        .scope("sdk-apps:read")
        .identifier("functionName")
        .input(function()),
        ToolDescriptor::new(
            "sdk_functions_create",
            "Create app function",
            "Add an empty IML function to a custom app.",
            "sdk_functions",
            sdk_functions_create,
        )
        .scope("sdk-apps:write")
        .annotations(ToolAnnotations::WRITE)
        .input(app().required("name", string("Function name"))),
        ToolDescriptor::new(
            "sdk_functions_delete",
            "Delete app function",
            "Delete a custom app IML function.",
            "sdk_functions",
            sdk_functions_delete,
        )
        .scope("sdk-apps:write")
        .identifier("functionName")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(function()),
        ToolDescriptor::new(
            "sdk_functions_get_code",
            "Get app function code",
            "Get the JavaScript source of a custom app IML function.",
            "sdk_functions",
            sdk_functions_get_code,
        )
        .scope("sdk-apps:read")
        .identifier("functionName")
        .input(function()),
        ToolDescriptor::new(
            "sdk_functions_set_code",
            "Set app function code",
            "Replace the JavaScript source of a custom app IML function.",
            "sdk_functions",
            sdk_functions_set_code,
        )
        .scope("sdk-apps:write")
        .identifier("functionName")
        .annotations(ToolAnnotations::UPDATE)
        .input(function().required("code", string("JavaScript source"))),
        ToolDescriptor::new(
            "sdk_functions_test",
            "Test app function",
            "Run test code against a custom app IML function.",
            "sdk_functions",
            sdk_functions_test,
        )
        .scope("sdk-apps:write")
        .identifier("functionName")
        .input(function().required("code", string("JavaScript test code"))),
    ]
}

/// App name and version, present on most SDK tools.
fn app_args(args: &Value) -> ParamResult<(&str, u32)> {
    let name = args.required_str("appName", "name of the custom app")?;
    let version = args.required_u64("appVersion", "version of the custom app, usually 1")?;
    let version = u32::try_from(version).map_err(|_| {
        ParameterValidationError::invalid_value(
            "appVersion",
            version.to_string(),
            "version is too large",
        )
    })?;
    Ok((name, version))
}

// ─────────────────────────────────────────────────────────────────────────────
// Apps
// ─────────────────────────────────────────────────────────────────────────────

fn sdk_apps_list(client: &ConveyorClient, _args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        Ok(client.sdk_apps().list().await?.into())
    }
    .boxed()
}

fn sdk_apps_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (name, version) = app_args(&args)?;
        Ok(client.sdk_apps().get(name, version).await?.into())
    }
    .boxed()
}

fn sdk_apps_create(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let request = CreateApp {
            name: args.required_str("name", "unique app name")?.to_string(),
            label: args.required_str("label", "display name")?.to_string(),
            description: args.optional_str("description").map(str::to_string),
            theme: args.required_str("theme", "hex color")?.to_string(),
            language: args.required_str("language", "language code, e.g. en")?.to_string(),
            countries: args.string_list("countries")?,
            private: args.optional_bool("private", false),
            audience: args.optional_str("audience").map(str::to_string),
        };
        Ok(client.sdk_apps().create(&request).await?.into())
    }
    .boxed()
}

fn sdk_apps_update(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (name, version) = app_args(&args)?;
        let countries = args.string_list("countries")?;
        let request = UpdateApp {
            label: args.optional_str("label").map(str::to_string),
            description: args.optional_str("description").map(str::to_string),
            theme: args.optional_str("theme").map(str::to_string),
            language: args.optional_str("language").map(str::to_string),
            countries: args.optional_value("countries").map(|_| countries),
            audience: args.optional_str("audience").map(str::to_string),
        };
        let value = client.sdk_apps().update(name, version, &request).await?;
        Ok(value.into())
    }
    .boxed()
}

fn sdk_apps_delete(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (name, version) = app_args(&args)?;
        client.sdk_apps().delete(name, version).await?;
        Ok(ToolOutput::text("App has been deleted."))
    }
    .boxed()
}

fn sdk_apps_get_section(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (name, version) = app_args(&args)?;
        let section = args.required_str("section", "configuration section")?;
        let value = client.sdk_apps().get_section(name, version, section).await?;
        Ok(value.into())
    }
    .boxed()
}

fn sdk_apps_set_section(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (name, version) = app_args(&args)?;
        let section = args.required_str("section", "configuration section")?;
        let body = args.required_value("body", "section content")?;
        client
            .sdk_apps()
            .set_section(name, version, section, body)
            .await?;
        Ok(ToolOutput::text("App section has been updated."))
    }
    .boxed()
}

fn sdk_apps_get_docs(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (name, version) = app_args(&args)?;
        Ok(ToolOutput::Text(client.sdk_apps().get_docs(name, version).await?))
    }
    .boxed()
}

fn sdk_apps_set_docs(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (name, version) = app_args(&args)?;
        let docs = args.required_str("docs", "Markdown content")?;
        client.sdk_apps().set_docs(name, version, docs).await?;
        Ok(ToolOutput::text("App documentation has been updated."))
    }
    .boxed()
}

// ─────────────────────────────────────────────────────────────────────────────
// Connections
// ─────────────────────────────────────────────────────────────────────────────

fn sdk_connections_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let app = args.required_str("appName", "name of the custom app")?;
        Ok(client.sdk_connections().list(app).await?.into())
    }
    .boxed()
}

fn sdk_connections_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let name = args.required_str("connectionName", "name of the app connection")?;
        Ok(client.sdk_connections().get(name).await?.into())
    }
    .boxed()
}

fn sdk_connections_create(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let app = args.required_str("appName", "name of the custom app")?;
        let request = CreateAppConnection {
            kind: args.required_str("type", "connection type")?.to_string(),
            label: args.required_str("label", "display name")?.to_string(),
        };
        Ok(client.sdk_connections().create(app, &request).await?.into())
    }
    .boxed()
}

fn sdk_connections_update(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let name = args.required_str("connectionName", "name of the app connection")?;
        let label = args.required_str("label", "new display name")?;
        Ok(client.sdk_connections().update(name, label).await?.into())
    }
    .boxed()
}

fn sdk_connections_delete(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let name = args.required_str("connectionName", "name of the app connection")?;
        client.sdk_connections().delete(name).await?;
        Ok(ToolOutput::text("App connection has been deleted."))
    }
    .boxed()
}

fn sdk_connections_get_section(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let name = args.required_str("connectionName", "name of the app connection")?;
        let section = args.required_str("section", "connection section")?;
        let value = client.sdk_connections().get_section(name, section).await?;
        Ok(value.into())
    }
    .boxed()
}

fn sdk_connections_set_section(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let name = args.required_str("connectionName", "name of the app connection")?;
        let section = args.required_str("section", "connection section")?;
        let body = args.required_value("body", "section content")?;
        client
            .sdk_connections()
            .set_section(name, section, body)
            .await?;
        Ok(ToolOutput::text("App connection section has been updated."))
    }
    .boxed()
}

// ─────────────────────────────────────────────────────────────────────────────
// Webhooks
// ─────────────────────────────────────────────────────────────────────────────

fn sdk_webhooks_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let app = args.required_str("appName", "name of the custom app")?;
        Ok(client.sdk_webhooks().list(app).await?.into())
    }
    .boxed()
}

fn sdk_webhooks_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let name = args.required_str("webhookName", "name of the app webhook")?;
        Ok(client.sdk_webhooks().get(name).await?.into())
    }
    .boxed()
}

fn sdk_webhooks_create(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let app = args.required_str("appName", "name of the custom app")?;
        let request = CreateAppWebhook {
            kind: args.required_str("type", "webhook type")?.to_string(),
            label: args.required_str("label", "display name")?.to_string(),
        };
        Ok(client.sdk_webhooks().create(app, &request).await?.into())
    }
    .boxed()
}

fn sdk_webhooks_update(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let name = args.required_str("webhookName", "name of the app webhook")?;
        let label = args.required_str("label", "new display name")?;
        Ok(client.sdk_webhooks().update(name, label).await?.into())
    }
    .boxed()
}

fn sdk_webhooks_delete(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let name = args.required_str("webhookName", "name of the app webhook")?;
        client.sdk_webhooks().delete(name).await?;
        Ok(ToolOutput::text("App webhook has been deleted."))
    }
    .boxed()
}

fn sdk_webhooks_get_section(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let name = args.required_str("webhookName", "name of the app webhook")?;
        let section = args.required_str("section", "webhook section")?;
        let value = client.sdk_webhooks().get_section(name, section).await?;
        Ok(value.into())
    }
    .boxed()
}

fn sdk_webhooks_set_section(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let name = args.required_str("webhookName", "name of the app webhook")?;
        let section = args.required_str("section", "webhook section")?;
        let body = args.required_value("body", "section content")?;
        client
            .sdk_webhooks()
            .set_section(name, section, body)
            .await?;
        Ok(ToolOutput::text("App webhook section has been updated."))
    }
    .boxed()
}

// ─────────────────────────────────────────────────────────────────────────────
// Modules
// ─────────────────────────────────────────────────────────────────────────────

fn sdk_modules_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        Ok(client.sdk_modules().list(app, version).await?.into())
    }
    .boxed()
}

fn sdk_modules_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let module = args.required_str("moduleName", "name of the module")?;
        Ok(client.sdk_modules().get(app, version, module).await?.into())
    }
    .boxed()
}

fn sdk_modules_create(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let type_id = args.required_u64("typeId", "module type")?;
        let request = CreateAppModule {
            name: args.required_str("name", "module name")?.to_string(),
            type_id: u32::try_from(type_id).map_err(|_| {
                ParameterValidationError::invalid_value(
                    "typeId",
                    type_id.to_string(),
                    "unknown module type",
                )
            })?,
            label: args.required_str("label", "display name")?.to_string(),
            description: args.required_str("description", "what the module does")?.to_string(),
            connection: args.optional_str("connection").map(str::to_string),
            webhook: args.optional_str("webhook").map(str::to_string),
        };
        let value = client.sdk_modules().create(app, version, &request).await?;
        Ok(value.into())
    }
    .boxed()
}

fn sdk_modules_update(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let module = args.required_str("moduleName", "name of the module")?;
        let request = UpdateAppModule {
            label: args.optional_str("label").map(str::to_string),
            description: args.optional_str("description").map(str::to_string),
            connection: args.optional_str("connection").map(str::to_string),
            webhook: args.optional_str("webhook").map(str::to_string),
        };
        Ok(client
            .sdk_modules()
            .update(app, version, module, &request)
            .await?
            .into())
    }
    .boxed()
}

fn sdk_modules_delete(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let module = args.required_str("moduleName", "name of the module")?;
        client.sdk_modules().delete(app, version, module).await?;
        Ok(ToolOutput::text("App module has been deleted."))
    }
    .boxed()
}

fn sdk_modules_get_section(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let module = args.required_str("moduleName", "name of the module")?;
        let section = args.required_str("section", "module section")?;
        Ok(client
            .sdk_modules()
            .get_section(app, version, module, section)
            .await?
            .into())
    }
    .boxed()
}

fn sdk_modules_set_section(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let module = args.required_str("moduleName", "name of the module")?;
        let section = args.required_str("section", "module section")?;
        let body = args.required_value("body", "section content")?;
        client
            .sdk_modules()
            .set_section(app, version, module, section, body)
            .await?;
        Ok(ToolOutput::text("App module section has been updated."))
    }
    .boxed()
}

// ─────────────────────────────────────────────────────────────────────────────
// RPCs
// ─────────────────────────────────────────────────────────────────────────────

fn sdk_rpcs_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        Ok(client.sdk_rpcs().list(app, version).await?.into())
    }
    .boxed()
}

fn sdk_rpcs_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let rpc = args.required_str("rpcName", "name of the RPC")?;
        Ok(client.sdk_rpcs().get(app, version, rpc).await?.into())
    }
    .boxed()
}

fn sdk_rpcs_create(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let request = CreateAppRpc {
            name: args.required_str("name", "RPC name")?.to_string(),
            label: args.required_str("label", "display name")?.to_string(),
            connection: args.optional_str("connection").map(str::to_string),
        };
        let value = client.sdk_rpcs().create(app, version, &request).await?;
        Ok(value.into())
    }
    .boxed()
}

fn sdk_rpcs_update(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let rpc = args.required_str("rpcName", "name of the RPC")?;
        let request = UpdateAppRpc {
            label: args.optional_str("label").map(str::to_string),
            connection: args.optional_str("connection").map(str::to_string),
        };
        let value = client.sdk_rpcs().update(app, version, rpc, &request).await?;
        Ok(value.into())
    }
    .boxed()
}

fn sdk_rpcs_delete(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let rpc = args.required_str("rpcName", "name of the RPC")?;
        client.sdk_rpcs().delete(app, version, rpc).await?;
        Ok(ToolOutput::text("App RPC has been deleted."))
    }
    .boxed()
}

fn sdk_rpcs_get_section(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let rpc = args.required_str("rpcName", "name of the RPC")?;
        let section = args.required_str("section", "RPC section")?;
        Ok(client
            .sdk_rpcs()
            .get_section(app, version, rpc, section)
            .await?
            .into())
    }
    .boxed()
}

fn sdk_rpcs_set_section(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let rpc = args.required_str("rpcName", "name of the RPC")?;
        let section = args.required_str("section", "RPC section")?;
        let body = args.required_value("body", "section content")?;
        client
            .sdk_rpcs()
            .set_section(app, version, rpc, section, body)
            .await?;
        Ok(ToolOutput::text("App RPC section has been updated."))
    }
    .boxed()
}

fn sdk_rpcs_test(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let rpc = args.required_str("rpcName", "name of the RPC")?;
        let request = TestRpc {
            data: args.required_value("data", "RPC parameters")?.clone(),
            schema: args.required_value("schema", "schema of the parameters")?.clone(),
        };
        let value = client.sdk_rpcs().test(app, version, rpc, &request).await?;
        Ok(value.into())
    }
    .boxed()
}

// ─────────────────────────────────────────────────────────────────────────────
// Functions
// ─────────────────────────────────────────────────────────────────────────────

fn sdk_functions_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        Ok(client.sdk_functions().list(app, version).await?.into())
    }
    .boxed()
}

fn sdk_functions_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let function = args.required_str("functionName", "name of the function")?;
        let value = client.sdk_functions().get(app, version, function).await?;
        Ok(value.into())
    }
    .boxed()
}

fn sdk_functions_create(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let name = args.required_str("name", "function name")?;
        let value = client.sdk_functions().create(app, version, name).await?;
        Ok(value.into())
    }
    .boxed()
}

fn sdk_functions_delete(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let function = args.required_str("functionName", "name of the function")?;
        client.sdk_functions().delete(app, version, function).await?;
        Ok(ToolOutput::text("App function has been deleted."))
    }
    .boxed()
}

fn sdk_functions_get_code(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let function = args.required_str("functionName", "name of the function")?;
        Ok(ToolOutput::Text(
            client.sdk_functions().get_code(app, version, function).await?,
        ))
    }
    .boxed()
}

fn sdk_functions_set_code(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let function = args.required_str("functionName", "name of the function")?;
        let code = args.required_str("code", "JavaScript source")?;
        client
            .sdk_functions()
            .set_code(app, version, function, code)
            .await?;
        Ok(ToolOutput::text("App function code has been updated."))
    }
    .boxed()
}

fn sdk_functions_test(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let (app, version) = app_args(&args)?;
        let function = args.required_str("functionName", "name of the function")?;
        let code = args.required_str("code", "JavaScript test code")?;
        Ok(client
            .sdk_functions()
            .test(app, version, function, code)
            .await?
            .into())
    }
    .boxed()
}
