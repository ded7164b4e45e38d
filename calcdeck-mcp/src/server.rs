//! Request dispatch and tool implementations

use calcdeck::{Calcdeck, Value};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info, warn};
use crate::config::ServerConfig;
use crate::protocol::{
    json_to_value, value_to_json, McpError, McpRequest, McpResponse,
    INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
};

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "calcdeck";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const CATEGORIES: [&str; 4] = ["units", "grades", "percent", "password"];

pub struct Server {
    deck: Calcdeck,
    trace: bool,
}

impl Server {
    pub fn new(deck: Calcdeck, config: &ServerConfig) -> Self {
        Self { deck, trace: config.trace }
    }

    /// Handle one input line. Returns the serialized response, or `None`
    /// for notifications and blank lines.
    pub fn process_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        debug!(bytes = line.len(), "request received");

        let response = match serde_json::from_str::<JsonValue>(line) {
            Err(e) => {
                warn!(error = %e, "unparseable request");
                McpResponse::failure(None, McpError::new(PARSE_ERROR, format!("Parse error: {}", e)))
            }
            Ok(json) => {
                let id = json.get("id").cloned();
                match serde_json::from_value::<McpRequest>(json) {
                    Ok(request) => {
                        let response = self.handle_request(&request);
                        if request.id.is_none() {
                            debug!(method = %request.method, "notification processed");
                            return None;
                        }
                        response
                    }
                    Err(e) => {
                        warn!(error = %e, "malformed request");
                        McpResponse::failure(id, McpError::new(INVALID_REQUEST, format!("Invalid request: {}", e)))
                    }
                }
            }
        };

        match serde_json::to_string(&response) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "response serialization failed");
                None
            }
        }
    }

    pub fn handle_request(&self, request: &McpRequest) -> McpResponse {
        let result = if request.jsonrpc != "2.0" {
            Err(McpError::new(INVALID_REQUEST, format!("Unsupported jsonrpc version: {}", request.jsonrpc)))
        } else {
            match request.method.as_str() {
                "initialize" => handle_initialize(&request.params),
                "initialized" | "notifications/initialized" => Ok(json!({})),
                "ping" => Ok(json!({})),
                "tools/list" => Ok(tools_list()),
                "tools/call" => self.handle_tool_call(&request.params),
                _ => Err(McpError::new(METHOD_NOT_FOUND, format!("Method not found: {}", request.method))),
            }
        };

        match result {
            Ok(r) => McpResponse::success(request.id.clone(), r),
            Err(e) => {
                debug!(method = %request.method, code = e.code, "request failed");
                McpResponse::failure(request.id.clone(), e)
            }
        }
    }

    fn handle_tool_call(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

        let name = params.get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

        let args = params.get("arguments").cloned().unwrap_or(json!({}));

        match name {
            "call" => self.tool_call(&args),
            "help" => self.tool_help(&args),
            "list_functions" => self.tool_list_functions(&args),
            _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))
                .with_data(json!({"available": ["call", "help", "list_functions"]}))),
        }
    }

    fn tool_call(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let function = args.get("function")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing function argument"))?;

        let call_args: Vec<Value> = match args.get("args") {
            None | Some(JsonValue::Null) => Vec::new(),
            Some(JsonValue::Array(items)) => items.iter().map(json_to_value).collect(),
            Some(_) => return Err(McpError::invalid_params("args must be an array")),
        };

        let (value, trace) = if self.trace {
            let result = self.deck.call_traced(function, &call_args);
            let steps: Vec<JsonValue> = result.trace.iter()
                .map(|s| json!({
                    "function": s.function,
                    "args": s.args.iter().map(value_to_json).collect::<Vec<_>>(),
                    "result": value_to_json(&s.result),
                }))
                .collect();
            (result.value, Some(steps))
        } else {
            (self.deck.call(function, &call_args), None)
        };

        let text = match &value {
            Value::Error(e) => format!("Error: {}", e),
            other => other.to_string(),
        };

        let mut out = json!({
            "content": [{ "type": "text", "text": text }],
            "data": value_to_json(&value),
            "isError": value.is_error(),
        });
        if let (Some(steps), Some(obj)) = (trace, out.as_object_mut()) {
            obj.insert("trace".to_string(), JsonValue::Array(steps));
        }
        Ok(out)
    }

    fn tool_help(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let name = args.get("name").and_then(|v| v.as_str());
        let help = self.deck.help(name);

        Ok(json!({
            "content": [{ "type": "text", "text": format_help(&help) }],
            "data": value_to_json(&help),
            "isError": help.is_error(),
        }))
    }

    fn tool_list_functions(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = args.get("category").and_then(|v| v.as_str());
        let functions = self.deck.list_functions(category);
        let count = functions.as_list().map_or(0, |l| l.len());

        Ok(json!({
            "content": [{ "type": "text", "text": format!("{} functions listed", count) }],
            "data": value_to_json(&functions),
        }))
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit, grade, percentage and password calculators"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Use list_functions to discover calculators and help for usage, then run one with call {function, args}."
    }))
}

fn tools_list() -> JsonValue {
    json!({
        "tools": [
            {
                "name": "call",
                "description": "Call a calculator function by name with positional arguments.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "function": {
                            "type": "string",
                            "description": "Function name, e.g. convert, tip, gpa_to_percentage"
                        },
                        "args": {
                            "type": "array",
                            "description": "Positional arguments",
                            "items": {}
                        }
                    },
                    "required": ["function"]
                }
            },
            {
                "name": "help",
                "description": "Get documentation for a function, or an overview by category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Function name. Omit for general help."
                        }
                    }
                }
            },
            {
                "name": "list_functions",
                "description": "List all available functions, optionally by category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Filter by category",
                            "enum": CATEGORIES
                        }
                    }
                }
            }
        ]
    })
}

fn format_help(help: &Value) -> String {
    match help {
        Value::Object(map) if map.contains_key("name") => {
            let mut out = String::new();
            if let Some(Value::Text(n)) = map.get("name") { out.push_str(&format!("# {}\n\n", n)); }
            if let Some(Value::Text(d)) = map.get("description") { out.push_str(&format!("{}\n\n", d)); }
            if let Some(Value::Text(u)) = map.get("usage") { out.push_str(&format!("**Usage:** `{}`\n\n", u)); }
            if let Some(Value::List(examples)) = map.get("examples") {
                for example in examples {
                    out.push_str(&format!("- `{}`\n", example));
                }
            }
            out
        }
        Value::Object(map) => {
            let mut out = String::new();
            if let Some(Value::Object(by_cat)) = map.get("functions") {
                let mut cats: Vec<&String> = by_cat.keys().collect();
                cats.sort();
                for cat in cats {
                    out.push_str(&format!("**{}:** {}\n", cat, by_cat[cat]));
                }
            }
            if let Some(Value::Text(u)) = map.get("usage") { out.push_str(&format!("\n{}\n", u)); }
            out
        }
        Value::Error(e) => format!("Error: {}", e.message),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> Server {
        Server::new(Calcdeck::with_standard_library(), &ServerConfig::default())
    }

    fn respond(server: &Server, request: JsonValue) -> JsonValue {
        let line = server.process_line(&request.to_string()).unwrap();
        serde_json::from_str(&line).unwrap()
    }

    fn call_tool(server: &Server, name: &str, arguments: JsonValue) -> JsonValue {
        respond(server, json!({
            "jsonrpc": "2.0", "id": 7, "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }))
    }

    #[test]
    fn test_initialize() {
        let response = respond(&server(), json!({
            "jsonrpc": "2.0", "id": 1, "method": "initialize",
            "params": { "protocolVersion": "2024-11-05", "clientInfo": { "name": "test" } }
        }));
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(response["result"]["serverInfo"]["name"], "calcdeck");
    }

    #[test]
    fn test_notification_gets_no_response() {
        let server = server();
        assert!(server.process_line(r#"{"jsonrpc":"2.0","method":"initialized"}"#).is_none());
        assert!(server.process_line("   ").is_none());
    }

    #[test]
    fn test_parse_error() {
        let line = server().process_line("{not json").unwrap();
        let response: JsonValue = serde_json::from_str(&line).unwrap();
        assert_eq!(response["error"]["code"], -32700);
    }

    #[test]
    fn test_valid_json_without_method_is_invalid_request() {
        let response = respond(&server(), json!({"jsonrpc": "2.0", "id": 4}));
        assert_eq!(response["error"]["code"], -32600);
        assert_eq!(response["id"], 4);

        let line = server().process_line("[1, 2]").unwrap();
        let response: JsonValue = serde_json::from_str(&line).unwrap();
        assert_eq!(response["error"]["code"], -32600);
    }

    #[test]
    fn test_unknown_method() {
        let response = respond(&server(), json!({"jsonrpc": "2.0", "id": 2, "method": "resources/list"}));
        assert_eq!(response["error"]["code"], -32601);
        assert_eq!(response["id"], 2);
    }

    #[test]
    fn test_tools_list() {
        let response = respond(&server(), json!({"jsonrpc": "2.0", "id": 3, "method": "tools/list"}));
        let tools = response["result"]["tools"].as_array().unwrap();
        let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert_eq!(names, vec!["call", "help", "list_functions"]);
    }

    #[test]
    fn test_call_tool() {
        let response = call_tool(&server(), "call", json!({"function": "tip", "args": [50, 15]}));
        let result = &response["result"];
        assert_eq!(result["isError"], false);
        assert_eq!(result["data"]["result"], 57.5);
        assert!(result.get("trace").is_none());
    }

    #[test]
    fn test_call_tool_numeric_text() {
        let response = call_tool(&server(), "call", json!({"function": "convert", "args": ["1", "km", "m"]}));
        assert_eq!(response["result"]["data"]["value"], 1000.0);
    }

    #[test]
    fn test_call_tool_error_value() {
        let response = call_tool(&server(), "call", json!({"function": "percentage_change", "args": [0, 10]}));
        let result = &response["result"];
        assert_eq!(result["isError"], true);
        assert_eq!(result["data"]["_error"]["code"], "DIV_ZERO");
    }

    #[test]
    fn test_call_tool_bad_params() {
        let server = server();
        let response = call_tool(&server, "call", json!({"args": [1]}));
        assert_eq!(response["error"]["code"], -32602);

        let response = call_tool(&server, "call", json!({"function": "tip", "args": 5}));
        assert_eq!(response["error"]["code"], -32602);

        let response = call_tool(&server, "eval", json!({}));
        assert_eq!(response["error"]["code"], -32602);
    }

    #[test]
    fn test_tracing_enabled() {
        let config = ServerConfig { trace: true, ..ServerConfig::default() };
        let server = Server::new(Calcdeck::with_standard_library(), &config);
        let response = call_tool(&server, "call", json!({"function": "discount", "args": [80, 25]}));
        let trace = response["result"]["trace"].as_array().unwrap();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace[0]["function"], "discount");
    }

    #[test]
    fn test_help_tool() {
        let server = server();
        let response = call_tool(&server, "help", json!({"name": "tip"}));
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("# tip"));

        let response = call_tool(&server, "help", json!({}));
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("**units:**"));

        let response = call_tool(&server, "help", json!({"name": "nope"}));
        assert_eq!(response["result"]["isError"], true);
    }

    #[test]
    fn test_list_functions_tool() {
        let response = call_tool(&server(), "list_functions", json!({"category": "grades"}));
        assert_eq!(response["result"]["data"].as_array().map(|a| a.len()), Some(4));
    }

    #[test]
    fn test_wrong_jsonrpc_version() {
        let response = respond(&server(), json!({"jsonrpc": "1.0", "id": 9, "method": "ping"}));
        assert_eq!(response["error"]["code"], -32600);
    }
}
