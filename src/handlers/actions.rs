//! Function-style action-group endpoints for the practice-content
//! generators. Request and response envelopes follow the agent platform's
//! action-group wire shape; these handlers hold no state and make no
//! external calls.

use crate::services::content;
use axum::Json;
use serde::{Deserialize, Serialize};

pub const PRONUNCIATION_FUNCTION: &str = "getPronunciationSentences";
pub const JAM_FUNCTION: &str = "getJamTopics";

const MESSAGE_VERSION: &str = "1.0";
const FUNCTION_NOT_FOUND: &str = "Function not found";

#[derive(Debug, Deserialize)]
pub struct ActionGroupRequest {
    #[serde(default)]
    pub function: String,

    #[serde(default, rename = "actionGroup")]
    pub action_group: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionGroupResponse {
    pub message_version: String,
    pub response: ActionResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub action_group: String,
    pub function: String,
    pub function_response: FunctionResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub response_body: ResponseBody,
}

#[derive(Debug, Serialize)]
pub struct ResponseBody {
    #[serde(rename = "TEXT")]
    pub text: TextBody,
}

#[derive(Debug, Serialize)]
pub struct TextBody {
    pub body: String,
}

fn envelope(request: ActionGroupRequest, body: String) -> ActionGroupResponse {
    ActionGroupResponse {
        message_version: MESSAGE_VERSION.to_string(),
        response: ActionResult {
            action_group: request.action_group,
            function: request.function,
            function_response: FunctionResponse {
                response_body: ResponseBody {
                    text: TextBody { body },
                },
            },
        },
    }
}

/// POST /actions/pronunciation
pub async fn pronunciation(
    Json(request): Json<ActionGroupRequest>,
) -> Json<ActionGroupResponse> {
    let body = if request.function == PRONUNCIATION_FUNCTION {
        content::pronunciation_body(&mut rand::thread_rng())
    } else {
        FUNCTION_NOT_FOUND.to_string()
    };
    Json(envelope(request, body))
}

/// POST /actions/jam-topics
pub async fn jam_topics(Json(request): Json<ActionGroupRequest>) -> Json<ActionGroupResponse> {
    let body = if request.function == JAM_FUNCTION {
        content::jam_body(&mut rand::thread_rng())
    } else {
        FUNCTION_NOT_FOUND.to_string()
    };
    Json(envelope(request, body))
}
