/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin, one per line
/// 2. Dispatches tool calls to the habit tools
/// 3. Writes JSON-RPC responses to stdout
///
/// Requests are handled one at a time, so tool calls never interleave.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolError};
use crate::{HabitTrackerServer, ServerError};

/// MCP server that handles communication with the client
pub struct McpServer {
    habit_tracker: HabitTrackerServer,
    initialized: bool,
}

impl McpServer {
    pub fn new(habit_tracker: HabitTrackerServer) -> Self {
        Self {
            habit_tracker,
            initialized: false,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line) {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        match request.id.clone() {
            Some(id) => Some(self.handle_request(id, request)),
            None => {
                self.handle_notification(&request);
                None
            }
        }
    }

    fn handle_notification(&mut self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" | "initialized" => {
                self.initialized = true;
                info!("MCP client finished initialization");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    /// Handle a JSON-RPC request
    fn handle_request(&mut self, id: Value, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(id, json!(null))
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");
        self.initialized = true;

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Habit Streak MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_response(id, &result)
    }

    /// Handle tools/call request
    fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        if !self.initialized {
            return JsonRpcResponse::error(
                id,
                error_codes::SERVER_NOT_INITIALIZED,
                "Server not initialized: send 'initialize' first".to_string(),
                None,
            );
        }

        let tool_params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                    None,
                );
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let result = self.call_tool(&tool_params.name, tool_params.arguments);
        to_response(id, &result)
    }

    /// Run a tool by name against the habit tracker
    fn call_tool(&self, name: &str, args: Map<String, Value>) -> ToolCallResult {
        let storage = self.habit_tracker.storage();
        let today = self.habit_tracker.clock().today();

        let outcome: Result<String, CallError> = match name {
            "habit_create" => parse_args(args)
                .and_then(|p| tools::create_habit(storage, p).map_err(CallError::from))
                .map(|r| format!("{}\nHabit ID: {}", r.message, r.habit_id)),
            "habit_list" => parse_args(args)
                .and_then(|p| tools::list_habits(storage, p, today).map_err(CallError::from))
                .map(|r| r.to_message()),
            "habit_rename" => parse_args(args)
                .and_then(|p| tools::rename_habit(storage, p).map_err(CallError::from))
                .map(|r| r.message),
            "habit_toggle" => parse_args(args)
                .and_then(|p| tools::toggle_habit(storage, p, today).map_err(CallError::from))
                .map(|r| r.message),
            "habit_delete" => parse_args(args)
                .and_then(|p| tools::delete_habit(storage, p).map_err(CallError::from))
                .map(|r| r.message),
            "habit_status" => parse_args(args)
                .and_then(|p| tools::get_habit_status(storage, p, today).map_err(CallError::from))
                .map(|r| r.message),
            _ => Err(CallError::UnknownTool(name.to_string())),
        };

        match outcome {
            Ok(text) => ToolCallResult::success(text),
            Err(e) => {
                debug!("Tool '{}' failed: {}", name, e);
                ToolCallResult::error(e.to_string())
            }
        }
    }
}

/// Reasons a tool call can fail before or while running
#[derive(Debug, thiserror::Error)]
enum CallError {
    #[error("Invalid arguments: {0}")]
    Arguments(#[from] serde_json::Error),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

fn parse_args<P: DeserializeOwned>(args: Map<String, Value>) -> Result<P, CallError> {
    Ok(serde_json::from_value(Value::Object(args))?)
}

fn to_response<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize result: {}", e),
            None,
        ),
    }
}

fn tool<P: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let input_schema = serde_json::to_value(schema_for!(P))
        .unwrap_or_else(|_| json!({ "type": "object" }));

    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// Every tool this server exposes
fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool::<tools::CreateHabitParams>(
            "habit_create",
            "Create a new daily habit to track",
        ),
        tool::<tools::ListHabitsParams>(
            "habit_list",
            "List all habits with their current streak and whether they are done today",
        ),
        tool::<tools::RenameHabitParams>(
            "habit_rename",
            "Rename an existing habit without changing its history",
        ),
        tool::<tools::ToggleHabitParams>(
            "habit_toggle",
            "Mark a habit done for today, or unmark it if it is already done",
        ),
        tool::<tools::DeleteHabitParams>(
            "habit_delete",
            "Permanently delete a habit and its completion history",
        ),
        tool::<tools::StatusParams>(
            "habit_status",
            "Show current and best streaks for one habit or all habits",
        ),
    ]
}
