use agentchat_core::{
    reduce, ReconciliationState, RenderIntent, SendOptions, SessionController, TurnPhase,
};
use agentchat_core_types::{AgentRequest, DecisionType, StreamEvent};
use serde_json::json;

fn event(kind: &str, data: serde_json::Value) -> StreamEvent {
    StreamEvent::new(kind, data)
}

/// Replays a full turn the way the backend streams it for the original
/// three-step task (calculate, multiply, tell a story), interleaving
/// token runs with two tool call/output cycles.
#[test]
fn full_turn_produces_a_coherent_transcript() {
    let mut controller = SessionController::new();
    let mut sink: Vec<RenderIntent> = Vec::new();

    controller
        .start_turn(
            "calculate 10 + 10, multiply by 5, make a story",
            "session-1",
            &SendOptions::default(),
            &mut sink,
        )
        .expect("turn opens");
    controller.on_stream_start();

    let stream = [
        // The model narrates, then decides to call the calculator: the
        // narration id is superseded by the tool call announcement.
        event("token", json!({ "id": "m1", "token": "Let me " })),
        event("token", json!({ "id": "m1", "token": "calculate." })),
        event(
            "tool_calls",
            json!({ "id": "m1", "tool_calls": [{ "id": "c1", "name": "add", "args": { "a": 10, "b": 10 } }] }),
        ),
        event(
            "tool_output",
            json!({ "tool_output": [{ "tool_call_id": "c1", "content": "20" }] }),
        ),
        event(
            "tool_calls",
            json!({ "id": "m2", "tool_calls": [{ "id": "c2", "name": "multiply", "args": { "a": 20, "b": 5 } }] }),
        ),
        event(
            "tool_output",
            json!({ "tool_output": [{ "tool_call_id": "c2", "content": "100" }] }),
        ),
        event("token", json!({ "id": "m3", "token": "Once upon " })),
        event("token", json!({ "id": "m3", "token": "a time, 100." })),
    ];
    for e in &stream {
        controller.on_event(e, &mut sink);
    }
    controller.on_stream_end(&mut sink);

    assert_eq!(controller.phase(), TurnPhase::Idle);

    // The narration for m1 was created, then removed when the tool call
    // superseded it.
    assert!(sink.iter().any(|i| matches!(i, RenderIntent::RemoveMessage { message_id } if message_id == "m1")));

    // Two tool cards and one surviving text message were created, plus
    // the user message and the end-of-turn signal.
    let created: Vec<_> = sink
        .iter()
        .filter_map(|i| match i {
            RenderIntent::CreateMessage { message } => Some(message),
            _ => None,
        })
        .collect();
    assert_eq!(created.len(), 5); // user, m1 narration, m1 card, m2 card, m3 story
    let cards: Vec<_> = created.iter().filter(|m| m.tool_card().is_some()).collect();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].message_id.as_deref(), Some("m1"));
    assert_eq!(cards[1].message_id.as_deref(), Some("m2"));
    assert_eq!(sink.last(), Some(&RenderIntent::ResumeReady));
}

#[test]
fn token_runs_concatenate_in_arrival_order() {
    let mut state = ReconciliationState::new();

    for token in ["Hel", "lo", ", ", "world"] {
        reduce(&event("token", json!({ "id": "m1", "token": token })), &mut state);
    }

    assert_eq!(state.live_message_count(), 1);
    assert_eq!(
        state.live_message("m1").and_then(|m| m.text()),
        Some("Hello, world")
    );
}

#[test]
fn correlation_consumes_the_pending_entry() {
    let mut state = ReconciliationState::new();

    reduce(
        &event(
            "tool_calls",
            json!({ "id": "m2", "tool_calls": [{ "id": "c1", "name": "calc", "args": { "a": 1 } }] }),
        ),
        &mut state,
    );
    assert_eq!(state.pending_tool_call_count(), 1);

    let intents = reduce(
        &event(
            "tool_output",
            json!({ "tool_output": [{ "tool_call_id": "c1", "content": "2" }] }),
        ),
        &mut state,
    );

    assert_eq!(intents.len(), 1);
    let RenderIntent::CreateMessage { message } = &intents[0] else {
        panic!("expected a create intent");
    };
    assert_eq!(message.message_id.as_deref(), Some("m2"));
    let card = message.tool_card().expect("tool card");
    assert_eq!(card.tool_call.as_ref().expect("invocation").id, "c1");
    assert_eq!(card.tool_output.len(), 1);
    assert_eq!(state.pending_tool_call_count(), 0);
}

#[test]
fn orphan_output_is_never_addressable_later() {
    let mut state = ReconciliationState::new();

    let intents = reduce(
        &event(
            "tool_output",
            json!({ "tool_output": [{ "tool_call_id": "nobody", "content": "?" }] }),
        ),
        &mut state,
    );
    let RenderIntent::CreateMessage { message } = &intents[0] else {
        panic!("expected a create intent");
    };
    assert!(message.message_id.is_none());

    // Nothing was registered, so no later event can mutate the orphan.
    assert_eq!(state.live_message_count(), 0);
    let follow_up = reduce(&event("token", json!({ "id": "nobody", "token": "x" })), &mut state);
    assert!(matches!(follow_up[0], RenderIntent::CreateMessage { .. }));
}

#[test]
fn interrupt_freezes_until_a_decision_resumes() {
    let mut controller = SessionController::new();
    let mut sink: Vec<RenderIntent> = Vec::new();

    controller
        .start_turn("transfer the funds", "session-1", &SendOptions::default(), &mut sink)
        .expect("turn opens");
    controller.on_stream_start();

    controller.on_event(
        &event(
            "__interrupt__",
            json!({ "__interrupt__": { "action": "transfer", "amount": 100 } }),
        ),
        &mut sink,
    );
    controller.on_stream_end(&mut sink);

    assert_eq!(controller.phase(), TurnPhase::Paused);
    assert!(sink
        .iter()
        .any(|i| matches!(i, RenderIntent::Pause { payload } if payload["action"] == "transfer")));

    // A decision turns into a resume-shaped request for the same session.
    let request = controller
        .submit_decision(DecisionType::Approve, "session-1")
        .expect("decision accepted");
    let AgentRequest::Resume(resume) = request else {
        panic!("expected a resume request");
    };
    assert_eq!(
        serde_json::to_value(&resume).expect("serializable"),
        json!({
            "resume": { "decisions": [{ "type": "approve" }] },
            "session_id": "session-1"
        })
    );
    assert_eq!(controller.phase(), TurnPhase::Sending);
}

#[test]
fn decisions_are_rejected_outside_paused() {
    let mut controller = SessionController::new();
    let mut sink: Vec<RenderIntent> = Vec::new();

    assert!(controller.submit_decision(DecisionType::Approve, "s").is_err());

    controller
        .start_turn("hi", "s", &SendOptions::default(), &mut sink)
        .expect("turn opens");
    controller.on_stream_start();
    controller.on_event(&event("token", json!({ "id": "m1", "token": "x" })), &mut sink);

    let before = sink.len();
    assert!(controller.submit_decision(DecisionType::Reject, "s").is_err());
    assert_eq!(controller.phase(), TurnPhase::Receiving);
    assert_eq!(sink.len(), before);
}

#[test]
fn state_is_discarded_between_turns() {
    let mut controller = SessionController::new();
    let mut sink: Vec<RenderIntent> = Vec::new();

    controller
        .start_turn("first", "s", &SendOptions::default(), &mut sink)
        .expect("turn opens");
    controller.on_stream_start();
    controller.on_event(
        &event(
            "tool_calls",
            json!({ "id": "m1", "tool_calls": [{ "id": "c1", "name": "calc", "args": {} }] }),
        ),
        &mut sink,
    );
    // Ends with an unresolved pending call: an anomaly, discarded with
    // the turn, never fatal.
    controller.on_stream_end(&mut sink);
    assert_eq!(controller.phase(), TurnPhase::Idle);
    assert_eq!(controller.state().pending_tool_call_count(), 0);

    controller
        .start_turn("second", "s", &SendOptions::default(), &mut sink)
        .expect("turn opens again");
    controller.on_stream_start();

    // The same tool_call_id arrives again; the previous turn's pending
    // entry must not leak into this resolution.
    let mut fresh_sink: Vec<RenderIntent> = Vec::new();
    controller.on_event(
        &event(
            "tool_output",
            json!({ "tool_output": [{ "tool_call_id": "c1", "content": "stale?" }] }),
        ),
        &mut fresh_sink,
    );
    let RenderIntent::CreateMessage { message } = &fresh_sink[0] else {
        panic!("expected a create intent");
    };
    assert!(message.message_id.is_none(), "must resolve as orphan output");
}

#[test]
fn malformed_events_change_nothing_mid_turn() {
    let mut controller = SessionController::new();
    let mut sink: Vec<RenderIntent> = Vec::new();

    controller
        .start_turn("hi", "s", &SendOptions::default(), &mut sink)
        .expect("turn opens");
    controller.on_stream_start();
    controller.on_event(&event("token", json!({ "id": "m1", "token": "ok" })), &mut sink);

    let before = sink.len();
    controller.on_event(&event("token", json!({ "id": "m1" })), &mut sink);
    controller.on_event(&event("tool_output", json!({})), &mut sink);
    controller.on_event(&event("", json!(null)), &mut sink);

    assert_eq!(sink.len(), before);
    assert_eq!(controller.phase(), TurnPhase::Receiving);
    assert_eq!(
        controller.state().live_message("m1").and_then(|m| m.text()),
        Some("ok")
    );
}
