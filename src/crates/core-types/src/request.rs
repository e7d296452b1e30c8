use serde::{Deserialize, Serialize};

/// Body of a turn-opening `POST /agent_chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    pub session_id: String,
    pub internet_search: bool,
}

/// Body of an interrupt-resuming `POST /agent_chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRequest {
    pub resume: ResumePayload,
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumePayload {
    pub decisions: Vec<ResumeDecision>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDecision {
    #[serde(rename = "type")]
    pub decision: DecisionType,
}

/// Human decision on a pending interrupt.
///
/// Extensible: new variants serialize by their snake_case name, which is
/// exactly the wire value the backend expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    Approve,
    Reject,
}

/// Either of the two request shapes accepted by `/agent_chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentRequest {
    Query(ChatRequest),
    Resume(ResumeRequest),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_request_wire_shape() {
        let request = AgentRequest::Query(ChatRequest {
            query: "what is 10 + 10".to_string(),
            session_id: "s-1".to_string(),
            internet_search: false,
        });

        assert_eq!(
            serde_json::to_value(&request).expect("serializable"),
            json!({
                "query": "what is 10 + 10",
                "session_id": "s-1",
                "internet_search": false
            })
        );
    }

    #[test]
    fn resume_request_wire_shape() {
        let request = AgentRequest::Resume(ResumeRequest {
            resume: ResumePayload {
                decisions: vec![ResumeDecision {
                    decision: DecisionType::Approve,
                }],
            },
            session_id: "s-1".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&request).expect("serializable"),
            json!({
                "resume": { "decisions": [{ "type": "approve" }] },
                "session_id": "s-1"
            })
        );
    }

    #[test]
    fn decision_types_round_trip_by_name() {
        assert_eq!(
            serde_json::to_value(DecisionType::Reject).expect("serializable"),
            json!("reject")
        );
        let parsed: DecisionType = serde_json::from_value(json!("approve")).expect("parseable");
        assert_eq!(parsed, DecisionType::Approve);
    }
}
