//! Composed hook dispatch through the editor.

use quill::{
    Editor, HandleValue, HookArgs, HookValue, KeyEvent, Plugin, QuillError, names,
    testing::{CallLog, recording_plugin},
};

mod common;
use common::{bare_props, host_answering, init_tracing};

#[test]
fn test_host_is_dispatched_first() {
    init_tracing();
    let log = CallLog::new();
    let editor = Editor::new(
        bare_props()
            .with_host(host_answering("onTab", HookValue::Bool(true), &log))
            .with_plugin(recording_plugin("p1", "onTab", HookValue::Bool(true), &log)),
    )
    .unwrap();

    assert!(editor.dispatch_event("onTab", &HookArgs::None).unwrap());
    assert_eq!(log.calls(), vec!["host"]);
}

#[test]
fn test_event_short_circuit_through_editor() {
    let log = CallLog::new();
    let editor = Editor::new(bare_props().with_plugins([
        recording_plugin("p1", "onUpArrow", HookValue::Pass, &log),
        recording_plugin("p2", "onUpArrow", HookValue::Bool(true), &log),
        recording_plugin("p3", "onUpArrow", HookValue::Bool(true), &log),
    ]))
    .unwrap();

    assert!(editor.dispatch_event("onUpArrow", &HookArgs::None).unwrap());
    assert_eq!(log.calls(), vec!["p1", "p2"]);
}

#[test]
fn test_unhandled_command_is_not_handled() {
    let log = CallLog::new();
    let editor = Editor::new(bare_props().with_plugin(recording_plugin(
        "p1",
        names::HANDLE_KEY_COMMAND,
        HandleValue::NotHandled.into(),
        &log,
    )))
    .unwrap();

    let value = editor
        .dispatch_handle(names::HANDLE_KEY_COMMAND, &HookArgs::Command("bold".into()))
        .unwrap();
    assert_eq!(value, HandleValue::NotHandled);
    assert_eq!(log.len(), 1);
}

#[test]
fn test_default_key_binding_reaches_handle_key_command() {
    let log = CallLog::new();
    let recorder = log.clone();
    let bold = Plugin::builder("bold")
        .handle_key_command(move |command, _| {
            recorder.record(command);
            Ok(if command == "bold" {
                HandleValue::Handled
            } else {
                HandleValue::NotHandled
            })
        })
        .build();
    let editor = Editor::new(quill::EditorProps::new().with_plugin(bold)).unwrap();

    let outcome = editor.key_command(&KeyEvent::ctrl("b")).unwrap();
    assert_eq!(outcome, Some(("bold".to_owned(), HandleValue::Handled)));

    let outcome = editor.key_command(&KeyEvent::ctrl("i")).unwrap();
    assert_eq!(outcome, Some(("italic".to_owned(), HandleValue::NotHandled)));

    assert_eq!(editor.key_command(&KeyEvent::new("q")).unwrap(), None);
    assert_eq!(log.calls(), vec!["bold", "italic"]);
}

#[test]
fn test_explicit_key_binding_outranks_defaults() {
    let editor = Editor::new(
        quill::EditorProps::new().with_plugin(
            Plugin::builder("custom")
                .key_binding_fn(|key, _| {
                    (key.has_command_modifier() && key.is("b")).then(|| "shout".to_owned())
                })
                .build(),
        ),
    )
    .unwrap();

    let outcome = editor.key_command(&KeyEvent::meta("b")).unwrap();
    assert_eq!(outcome.map(|(command, _)| command).as_deref(), Some("shout"));
}

#[test]
fn test_handlers_can_commit_state() {
    let plugin = Plugin::builder("clear")
        .handle_key_command(|command, methods| {
            if command != "clear" {
                return Ok(HandleValue::NotHandled);
            }
            let state = methods.editor_state();
            let cleared = state.push(
                quill::ContentState::from_text(""),
                quill::ChangeType::RemoveRange,
            );
            methods.set_editor_state(cleared)?;
            Ok(HandleValue::Handled)
        })
        .build();
    let editor = Editor::new(
        bare_props()
            .editor_state(common::doc("some text"))
            .with_plugin(plugin),
    )
    .unwrap();

    let value = editor
        .dispatch_handle(names::HANDLE_KEY_COMMAND, &HookArgs::Command("clear".into()))
        .unwrap();
    assert_eq!(value, HandleValue::Handled);
    assert!(!editor.editor_state().current_content().has_text());
    assert_eq!(
        editor.editor_state().last_change_type(),
        Some(quill::ChangeType::RemoveRange)
    );
}

#[test]
fn test_handler_failure_reaches_caller() {
    let editor = Editor::new(
        bare_props().with_plugin(
            Plugin::builder("broken")
                .hook("onEscape", |_, _| Err("escape failed".into()))
                .build(),
        ),
    )
    .unwrap();

    let err = editor.dispatch_event("onEscape", &HookArgs::None).unwrap_err();
    assert!(matches!(err, QuillError::Hook(_)));
    assert!(err.to_string().contains("onEscape"));
}

#[test]
fn test_plugin_list_changes_take_effect_immediately() {
    let log = CallLog::new();
    let editor = Editor::new(bare_props()).unwrap();
    assert!(!editor.plugin_hooks().contains("onTab"));

    editor.set_props(bare_props().with_plugin(recording_plugin(
        "late",
        "onTab",
        HookValue::Bool(true),
        &log,
    )));
    assert!(editor.dispatch_event("onTab", &HookArgs::None).unwrap());
    assert_eq!(log.calls(), vec!["late"]);
}

#[test]
fn test_generic_function_hook() {
    let editor = Editor::new(bare_props().with_plugins([
        Plugin::builder("a").hook("placeholderFn", |_, _| Ok(HookValue::Pass)).build(),
        Plugin::builder("b").hook("placeholderFn", |_, _| Ok("Write...".into())).build(),
    ]))
    .unwrap();

    assert_eq!(
        editor.call_fn("placeholderFn", &HookArgs::None).unwrap(),
        Some(HookValue::from("Write..."))
    );
    assert_eq!(editor.call_fn("unknownFn", &HookArgs::None).unwrap(), None);
}
