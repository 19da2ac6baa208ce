use bevy::prelude::*;
use constants::survey::ITEM_COUNT;
use serde::{Deserialize, Serialize};

use crate::engine::assets::survey_manifest::SurveyManifest;
use crate::engine::scene::ledger::RenderResourceLedger;
use crate::engine::scene::lifecycle::SceneLifecycle;
use crate::engine::systems::overlay::ProfileResult;
use crate::engine::systems::scene_commands::{SceneCommand, SceneNotice};
use crate::personality::{Answers, ProfileError, score};
use crate::shape::ShapeSpec;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
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

/// Outgoing traffic to the host page, flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Queue a notification; the host does not reply.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// JSON-RPC bridge between the host page and the scene.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    forward_scene_notices,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .expect("Failed to register message listener");
    }

    // Ownership moves to JS; the listener lives as long as the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Read-only scene state the handlers answer from.
struct SceneView<'a> {
    manifest: &'a SurveyManifest,
    lifecycle: &'a SceneLifecycle,
    ledger: &'a RenderResourceLedger,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    manifest: Res<SurveyManifest>,
    lifecycle: Res<SceneLifecycle>,
    ledger: Res<RenderResourceLedger>,
    mut result: ResMut<ProfileResult>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut scene_commands: EventWriter<SceneCommand>,
) {
    let view = SceneView {
        manifest: &manifest,
        lifecycle: &lifecycle,
        ledger: &ledger,
    };

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                let mut queued = Vec::new();
                if let Some(response) =
                    handle_rpc_request(&request, &view, &mut result, &mut queued)
                {
                    rpc_interface.queue_response(response);
                }
                for command in queued {
                    scene_commands.write(command);
                }
            }
            Err(parse_error) => {
                warn!("Unparseable RPC message: {}", parse_error);
            }
        }
    }
}

/// Dispatch one request. Requests without an id are notifications and get
/// no response, but their side effects still apply.
fn handle_rpc_request(
    request: &RpcRequest,
    view: &SceneView,
    result: &mut ProfileResult,
    queued: &mut Vec<SceneCommand>,
) -> Option<RpcResponse> {
    let outcome = match request.method.as_str() {
        "get_survey" => handle_get_survey(view.manifest),
        "submit_answers" => handle_submit_answers(&request.params, view.manifest, result, queued),
        "render_spec" => handle_render_spec(&request.params, queued),
        "reset" => handle_reset(queued),
        "get_scene_state" => handle_get_scene_state(view.lifecycle, view.ledger),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            let id = request.id.clone()?;
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    let id = request.id.clone()?;
    match outcome {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn handle_get_survey(manifest: &SurveyManifest) -> Result<serde_json::Value, RpcError> {
    serde_json::to_value(manifest).map_err(|e| RpcError::internal_error(&e.to_string()))
}

/// Score the answers, publish the result and queue the shape.
fn handle_submit_answers(
    params: &serde_json::Value,
    manifest: &SurveyManifest,
    result: &mut ProfileResult,
    queued: &mut Vec<SceneCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SubmitParams {
        #[serde(default)]
        name: String,
        answers: Vec<Option<u8>>,
    }

    let submit = serde_json::from_value::<SubmitParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'answers' parameter"))?;
    let values: [Option<u8>; ITEM_COUNT] = submit.answers.try_into().map_err(|_| {
        RpcError::invalid_params(&format!("Expected {} answers", ITEM_COUNT))
    })?;

    let profile = score(&Answers::new(values)).map_err(|err| {
        let data = match &err {
            ProfileError::IncompleteInput { missing } => serde_json::json!({ "missing": missing }),
            ProfileError::AnswerOutOfRange { item, value } => {
                serde_json::json!({ "item": item, "value": value })
            }
        };
        RpcError {
            code: -32602,
            message: err.to_string(),
            data: Some(data),
        }
    })?;

    *result = ProfileResult {
        title: manifest.display_title(&submit.name),
        breakdown: profile.breakdown(manifest),
    };
    queued.push(SceneCommand::Generate(profile));
    info!("Answers submitted, generating shape for {:?}", profile);

    Ok(serde_json::json!({
        "title": result.title,
        "profile": profile,
        "breakdown": result.breakdown,
    }))
}

fn handle_render_spec(
    params: &serde_json::Value,
    queued: &mut Vec<SceneCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct RenderSpecParams {
        spec: ShapeSpec,
    }

    let render = serde_json::from_value::<RenderSpecParams>(params.clone())
        .map_err(|e| RpcError::invalid_params(&format!("Expected 'spec' parameter: {}", e)))?;
    render
        .spec
        .validate()
        .map_err(|err| RpcError::invalid_params(&err.to_string()))?;

    let kind = render.spec.geometry.kind();
    queued.push(SceneCommand::Rebuild(render.spec));

    Ok(serde_json::json!({
        "success": true,
        "geometry": kind
    }))
}

fn handle_reset(queued: &mut Vec<SceneCommand>) -> Result<serde_json::Value, RpcError> {
    queued.push(SceneCommand::Dispose);
    Ok(serde_json::json!({ "success": true }))
}

fn handle_get_scene_state(
    lifecycle: &SceneLifecycle,
    ledger: &RenderResourceLedger,
) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "scene": lifecycle.snapshot(),
        "resources": ledger,
    }))
}

/// Relay lifecycle notices to the host page.
fn forward_scene_notices(
    mut notices: EventReader<SceneNotice>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for notice in notices.read() {
        match notice {
            SceneNotice::StateChanged(state) => rpc_interface
                .send_notification("scene_state_changed", serde_json::json!({ "state": state })),
            SceneNotice::Error(message) => rpc_interface
                .send_notification("scene_error", serde_json::json!({ "message": message })),
        }
    }
}

fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Notifications first, then responses.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::lifecycle::LifecycleState;
    use crate::personality::PersonalityProfile;
    use crate::shape::map_profile;

    fn request(method: &str, params: serde_json::Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(serde_json::json!(1)),
        }
    }

    fn dispatch(
        request: &RpcRequest,
        result: &mut ProfileResult,
        queued: &mut Vec<SceneCommand>,
    ) -> Option<RpcResponse> {
        let manifest = SurveyManifest::default();
        let lifecycle = SceneLifecycle::with_seed(1);
        let ledger = RenderResourceLedger::default();
        let view = SceneView {
            manifest: &manifest,
            lifecycle: &lifecycle,
            ledger: &ledger,
        };
        handle_rpc_request(request, &view, result, queued)
    }

    #[test]
    fn submit_answers_scores_and_queues_generate() {
        let mut result = ProfileResult::default();
        let mut queued = Vec::new();
        let req = request(
            "submit_answers",
            serde_json::json!({"name": "Yui", "answers": [7, 1, 7, 1, 7, 1, 7, 1, 7, 1]}),
        );

        let response = dispatch(&req, &mut result, &mut queued).unwrap();

        assert!(response.error.is_none());
        let body = response.result.unwrap();
        assert_eq!(body["title"], "\"Yui's shape\"");
        assert_eq!(body["profile"]["extroversion"], 100);
        assert_eq!(body["profile"]["agreeableness"], 100);
        assert_eq!(body["profile"]["neuroticism"], 0);
        assert_eq!(body["breakdown"].as_array().unwrap().len(), 5);
        assert_eq!(result.title, "\"Yui's shape\"");
        assert!(matches!(queued.as_slice(), [SceneCommand::Generate(_)]));
    }

    #[test]
    fn incomplete_answers_report_missing_items() {
        let mut result = ProfileResult::default();
        let mut queued = Vec::new();
        let req = request(
            "submit_answers",
            serde_json::json!({"answers": [4, null, 4, 4, 4, 4, 4, 4, 4, null]}),
        );

        let response = dispatch(&req, &mut result, &mut queued).unwrap();
        let error = response.error.unwrap();

        assert_eq!(error.code, -32602);
        assert_eq!(error.data.unwrap()["missing"], serde_json::json!([2, 10]));
        assert!(queued.is_empty());
        assert_eq!(result, ProfileResult::default());
    }

    #[test]
    fn wrong_answer_count_is_invalid_params() {
        let mut queued = Vec::new();
        let req = request("submit_answers", serde_json::json!({"answers": [4, 4, 4]}));

        let response = dispatch(&req, &mut ProfileResult::default(), &mut queued).unwrap();

        assert_eq!(response.error.unwrap().code, -32602);
        assert!(queued.is_empty());
    }

    #[test]
    fn render_spec_validates_before_queueing() {
        let mut queued = Vec::new();
        let mut spec = map_profile(&PersonalityProfile::uniform(50));
        spec.material.opacity = 3.0;
        let req = request("render_spec", serde_json::json!({ "spec": spec }));

        let response = dispatch(&req, &mut ProfileResult::default(), &mut queued).unwrap();

        assert_eq!(response.error.unwrap().code, -32602);
        assert!(queued.is_empty());
    }

    #[test]
    fn render_spec_queues_a_valid_rebuild() {
        let mut queued = Vec::new();
        let spec = map_profile(&PersonalityProfile::uniform(90));
        let req = request("render_spec", serde_json::json!({ "spec": spec.clone() }));

        let response = dispatch(&req, &mut ProfileResult::default(), &mut queued).unwrap();

        assert!(response.error.is_none());
        assert_eq!(queued, vec![SceneCommand::Rebuild(spec)]);
    }

    #[test]
    fn reset_without_id_still_disposes() {
        let mut queued = Vec::new();
        let mut req = request("reset", serde_json::Value::Null);
        req.id = None;

        let response = dispatch(&req, &mut ProfileResult::default(), &mut queued);

        assert!(response.is_none());
        assert_eq!(queued, vec![SceneCommand::Dispose]);
    }

    #[test]
    fn scene_state_reports_lifecycle_and_ledger() {
        let req = request("get_scene_state", serde_json::Value::Null);
        let response = dispatch(&req, &mut ProfileResult::default(), &mut Vec::new()).unwrap();
        let body = response.result.unwrap();

        assert_eq!(
            body["scene"]["state"],
            serde_json::json!(LifecycleState::Uninitialized)
        );
        assert_eq!(body["resources"]["geometry"]["created"], 0);
    }

    #[test]
    fn get_survey_lists_ten_questions() {
        let req = request("get_survey", serde_json::Value::Null);
        let response = dispatch(&req, &mut ProfileResult::default(), &mut Vec::new()).unwrap();

        assert_eq!(response.result.unwrap()["questions"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn unknown_method_is_not_found() {
        let req = request("fly", serde_json::Value::Null);
        let response = dispatch(&req, &mut ProfileResult::default(), &mut Vec::new()).unwrap();

        assert_eq!(response.error.unwrap().code, -32601);
    }
}
