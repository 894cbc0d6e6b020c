use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use constants::hex_string;
use constants::theme::{THEMES, ThemeInfo, find_theme};
use serde::{Deserialize, Serialize};

use crate::engine::controller::BackgroundController;
use crate::engine::systems::theme::{
    ThemeChangedEvent, ThemeRequest, ThemeRequestEvent, ThemeRequestSource,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// Standard JSON-RPC 2.0 error codes used by the bridge.
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
/// Also returned for queries made before the backdrop has finished loading.
pub const INTERNAL_ERROR: i32 = -32603;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    /// Absent for fire-and-forget calls, which get no response.
    pub id: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

impl RpcResponse {
    fn answer(id: serde_json::Value, outcome: Result<serde_json::Value, RpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        };
        Self {
            jsonrpc: "2.0".to_string(),
            result,
            error,
            id: Some(id),
        }
    }
}

/// Server-initiated message, currently only `theme_changed`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    fn method_not_found(method: &str) -> Self {
        Self {
            data: Some(serde_json::json!({ "method": method })),
            ..Self::new(METHOD_NOT_FOUND, "Method not found")
        }
    }
}

/// Serialized messages waiting to be posted to the page, in send order.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing: Vec<String>,
}

impl WebRpcInterface {
    fn queue<T: Serialize>(&mut self, message: &T) {
        match serde_json::to_string(message) {
            Ok(json) => self.outgoing.push(json),
            Err(e) => error!("Failed to serialize RPC message: {}", e),
        }
    }

    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.queue(&RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }
}

/// Plugin establishing the WebRPC communication layer for the page host.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_event::<ThemeRequestEvent>()
            .add_event::<ThemeChangedEvent>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    notify_theme_changes,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

/// Page messages received by the `message` listener, drained once per frame.
#[derive(Resource, Clone, Default)]
struct MessageQueue(Arc<Mutex<Vec<String>>>);

impl MessageQueue {
    fn push(&self, message: String) {
        if let Ok(mut pending) = self.0.lock() {
            pending.push(message);
        }
    }

    fn take(&self) -> Vec<String> {
        self.0
            .lock()
            .map(|mut pending| std::mem::take(&mut *pending))
            .unwrap_or_default()
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    let queue = MessageQueue::default();
    let inbox = queue.clone();

    // Only string payloads that look like JSON-RPC are kept; the page also
    // posts unrelated messages on the same channel.
    let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
        let Ok(data) = event.data().dyn_into::<js_sys::JsString>() else {
            return;
        };
        let text = String::from(data);
        if text.contains("jsonrpc") {
            inbox.push(text);
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC listener not installed");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // The listener lives as long as the page.
    on_message.forget();
    commands.insert_resource(queue);
}

/// One raw JSON-RPC message from the page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    queue: Option<Res<MessageQueue>>,
    mut incoming: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue) = queue else {
        return;
    };
    for content in queue.take() {
        incoming.write(IncomingRpcMessage { content });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    controller: Option<Res<BackgroundController>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut theme_events: EventWriter<ThemeRequestEvent>,
) {
    let current = controller.as_ref().map(|c| c.theme_index());

    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Dropping malformed RPC message: {}", parse_error);
                continue;
            }
        };
        debug!("Processing RPC method: {}", request.method);

        let mut requests = Vec::new();
        if let Some(response) = handle_rpc_request(&request, current, &mut requests) {
            rpc_interface.queue(&response);
        }
        for request in requests {
            theme_events.write(ThemeRequestEvent {
                request,
                source: ThemeRequestSource::Rpc,
            });
        }
    }
}

/// Handle individual RPC request and generate response based on method.
///
/// Theme changes are pushed onto `requests` for the theme systems; `current`
/// is the active theme index, `None` while still loading.
fn handle_rpc_request(
    request: &RpcRequest,
    current: Option<usize>,
    requests: &mut Vec<ThemeRequest>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "set_theme" => handle_set_theme(&request.params, requests),
        "next_theme" => {
            requests.push(ThemeRequest::Next);
            Ok(serde_json::json!({ "success": true }))
        }
        "theme_click" => {
            requests.push(ThemeRequest::Click);
            Ok(serde_json::json!({ "success": true }))
        }
        "set_auto_change" => handle_set_auto_change(&request.params, requests),
        "get_theme" => handle_get_theme(current),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError::method_not_found(&request.method))
        }
    };

    let id = request.id.clone()?;
    Some(RpcResponse::answer(id, result))
}

fn handle_set_theme(
    params: &serde_json::Value,
    requests: &mut Vec<ThemeRequest>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize)]
    struct SetThemeParams {
        theme: String,
    }

    let parsed = serde_json::from_value::<SetThemeParams>(params.clone())
        .map_err(|_| RpcError::new(INVALID_PARAMS, "Expected 'theme' parameter"))?;
    let index = find_theme(&parsed.theme).ok_or_else(|| {
        RpcError::new(INVALID_PARAMS, format!("Unknown theme: {}", parsed.theme))
    })?;

    requests.push(ThemeRequest::Set(index));
    info!("Theme request dispatched: {}", parsed.theme);

    Ok(serde_json::json!({
        "success": true,
        "theme": parsed.theme
    }))
}

fn handle_set_auto_change(
    params: &serde_json::Value,
    requests: &mut Vec<ThemeRequest>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize)]
    struct AutoChangeParams {
        enabled: bool,
    }

    let parsed = serde_json::from_value::<AutoChangeParams>(params.clone())
        .map_err(|_| RpcError::new(INVALID_PARAMS, "Expected boolean 'enabled' parameter"))?;
    requests.push(ThemeRequest::SetAuto(parsed.enabled));

    Ok(serde_json::json!({
        "success": true,
        "enabled": parsed.enabled
    }))
}

fn handle_get_theme(current: Option<usize>) -> Result<serde_json::Value, RpcError> {
    let index =
        current.ok_or_else(|| RpcError::new(INTERNAL_ERROR, "Backdrop is still loading"))?;
    Ok(theme_payload(&THEMES[index], 0))
}

/// Page-facing description of a theme, shared by `get_theme` and the
/// `theme_changed` notification.
pub fn theme_payload(theme: &ThemeInfo, burst: u32) -> serde_json::Value {
    serde_json::json!({
        "theme": theme.id,
        "name": theme.name,
        "hero_title": theme.hero_title,
        "description": theme.description,
        "colors": {
            "primary": hex_string(theme.primary),
            "secondary": hex_string(theme.secondary),
            "accent": hex_string(theme.accent),
        },
        "burst": burst,
    })
}

fn notify_theme_changes(
    mut changes: EventReader<ThemeChangedEvent>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for change in changes.read() {
        let Some(theme) = THEMES.get(change.index) else {
            continue;
        };
        rpc_interface.send_notification("theme_changed", theme_payload(theme, change.burst));
    }
}

fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for message in rpc_interface.outgoing.drain(..) {
        post_to_page(&message);
    }
}

/// Post a serialized message to the page hosting the canvas: the parent frame
/// when embedded in an iframe, the window itself otherwise.
fn post_to_page(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = window() else {
            error!("Window object not available");
            return;
        };
        let target = window.parent().ok().flatten().unwrap_or(window);
        if let Err(e) = target.post_message(&JsValue::from_str(message), "*") {
            error!("Failed to post RPC message: {:?}", e);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        debug!("RPC message (no page host): {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, params: serde_json::Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".into(),
            method: method.into(),
            params,
            id: Some(serde_json::json!(1)),
        }
    }

    #[test]
    fn set_theme_queues_the_matching_index() {
        let mut queued = Vec::new();
        let response = handle_rpc_request(
            &request("set_theme", serde_json::json!({ "theme": "automation" })),
            Some(0),
            &mut queued,
        )
        .unwrap();

        assert!(response.error.is_none());
        assert_eq!(queued, vec![ThemeRequest::Set(2)]);
        assert_eq!(response.id, Some(serde_json::json!(1)));
    }

    #[test]
    fn unknown_method_and_bad_params_are_errors() {
        let mut queued = Vec::new();
        let missing = handle_rpc_request(
            &request("explode", serde_json::Value::Null),
            Some(0),
            &mut queued,
        )
        .unwrap();
        assert_eq!(missing.error.map(|e| e.code), Some(METHOD_NOT_FOUND));

        let bad = handle_rpc_request(
            &request("set_theme", serde_json::json!({ "theme": "vaporwave" })),
            Some(0),
            &mut queued,
        )
        .unwrap();
        assert_eq!(bad.error.map(|e| e.code), Some(INVALID_PARAMS));

        let wrong_type = handle_rpc_request(
            &request("set_auto_change", serde_json::json!({ "enabled": "yes" })),
            Some(0),
            &mut queued,
        )
        .unwrap();
        assert_eq!(wrong_type.error.map(|e| e.code), Some(INVALID_PARAMS));
        assert!(queued.is_empty());
    }

    #[test]
    fn notifications_without_id_get_no_response() {
        let mut queued = Vec::new();
        let mut click = request("theme_click", serde_json::Value::Null);
        click.id = None;

        assert!(handle_rpc_request(&click, Some(0), &mut queued).is_none());
        assert_eq!(queued, vec![ThemeRequest::Click]);
    }

    #[test]
    fn get_theme_reports_palette_and_loading_state() {
        let mut queued = Vec::new();
        let response = handle_rpc_request(
            &request("get_theme", serde_json::Value::Null),
            Some(3),
            &mut queued,
        )
        .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["theme"], "webdev");
        assert_eq!(result["burst"], 0);
        assert_eq!(
            result["colors"]["primary"],
            serde_json::json!(hex_string(THEMES[3].primary))
        );

        let loading = handle_rpc_request(
            &request("get_theme", serde_json::Value::Null),
            None,
            &mut queued,
        )
        .unwrap();
        assert_eq!(loading.error.map(|e| e.code), Some(INTERNAL_ERROR));
    }

    #[test]
    fn params_may_be_omitted() {
        let parsed: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"next_theme","id":7}"#).unwrap();
        let mut queued = Vec::new();
        let response = handle_rpc_request(&parsed, Some(1), &mut queued).unwrap();
        assert!(response.error.is_none());
        assert_eq!(queued, vec![ThemeRequest::Next]);
    }

    #[test]
    fn plugin_alone_forwards_page_requests_as_theme_events() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, WebRpcPlugin));
        app.world_mut().send_event(IncomingRpcMessage {
            content: r#"{"jsonrpc":"2.0","method":"set_theme","params":{"theme":"webdev"},"id":4}"#
                .to_string(),
        });
        app.update();

        let forwarded: Vec<ThemeRequest> = app
            .world_mut()
            .resource_mut::<Events<ThemeRequestEvent>>()
            .drain()
            .map(|event| event.request)
            .collect();
        assert_eq!(forwarded, vec![ThemeRequest::Set(3)]);
        assert!(app.world().contains_resource::<Events<ThemeChangedEvent>>());
    }

    #[test]
    fn answer_fills_exactly_one_of_result_or_error() {
        let ok = RpcResponse::answer(serde_json::json!(9), Ok(serde_json::json!({ "a": 1 })));
        assert!(ok.error.is_none());

        let failed = RpcResponse::answer(
            serde_json::json!(9),
            Err(RpcError::method_not_found("explode")),
        );
        let error = failed.error.unwrap();
        assert_eq!(error.code, METHOD_NOT_FOUND);
        assert_eq!(error.data, Some(serde_json::json!({ "method": "explode" })));
        assert!(failed.result.is_none());
    }

    #[test]
    fn message_queue_drains_in_arrival_order() {
        let queue = MessageQueue::default();
        let listener_side = queue.clone();
        listener_side.push("first".to_string());
        listener_side.push("second".to_string());

        assert_eq!(queue.take(), vec!["first".to_string(), "second".to_string()]);
        assert!(queue.take().is_empty());
    }
}
