//! The single `onChange` path, plugin methods and deferred measurement.

use quill::{
    ChangeType, ContentState, Editor, EditorProps, EditorState, Plugin, Rect, SelectionState,
    testing::{CallLog, MockGeometry, MockSurface},
};
use std::sync::{Arc, Mutex};

mod common;
use common::{bare_props, doc, init_tracing, lifecycle_plugin};

#[test]
fn test_initial_state_is_committed_with_caret_at_end() {
    init_tracing();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let editor = Editor::new(
        bare_props()
            .editor_state(doc("first\nsecond"))
            .on_change(move |state, _| sink.lock().unwrap().push(state.clone())),
    )
    .unwrap();

    let state = editor.editor_state();
    let last = state.current_content().last_block().unwrap();
    assert_eq!(state.selection(), &SelectionState::collapsed(last.key.clone(), 6).with_focus(true));
    assert_eq!(seen.lock().unwrap().len(), 1);
    assert!(seen.lock().unwrap()[0].ptr_eq(&state));
}

#[test]
fn test_on_change_transformers_run_in_order() {
    let upper = Plugin::builder("upper")
        .on_change(|state: EditorState, _| {
            let text = state.current_content().plain_text().to_uppercase();
            Ok(state.push(ContentState::from_text(&text), ChangeType::InsertCharacters))
        })
        .build();
    let bang = Plugin::builder("bang")
        .on_change(|state: EditorState, _| {
            let text = format!("{}!", state.current_content().plain_text());
            Ok(state.push(ContentState::from_text(&text), ChangeType::InsertCharacters))
        })
        .build();

    let notified = Arc::new(Mutex::new(String::new()));
    let sink = notified.clone();
    let editor = Editor::new(
        bare_props()
            .with_plugins([upper, bang])
            .on_change(move |state, _| {
                *sink.lock().unwrap() = state.current_content().plain_text();
            }),
    )
    .unwrap();

    editor
        .on_change(doc("hi").push(ContentState::from_text("hi"), ChangeType::InsertCharacters))
        .unwrap();
    assert_eq!(editor.editor_state().current_content().plain_text(), "HI!");
    assert_eq!(*notified.lock().unwrap(), "HI!");
}

#[test]
fn test_host_on_change_is_not_a_transformer() {
    let log = CallLog::new();
    let editor = Editor::new(
        bare_props()
            .with_host(lifecycle_plugin("host", &log))
            .with_plugin(lifecycle_plugin("p", &log)),
    )
    .unwrap();
    log.clear();

    editor.on_change(editor.editor_state()).unwrap();
    assert_eq!(log.calls(), vec!["p:onChange"]);
}

#[test]
fn test_transformer_failure_keeps_previous_state() {
    let geometry = Arc::new(MockGeometry::new().with_selection("b", 0, 3).with_coords(4.0, 2.0));
    let editor = Editor::new(
        bare_props().geometry(geometry).with_plugin(
            Plugin::builder("strict")
                .on_change(|state: EditorState, _| {
                    if state.current_content().plain_text().contains("forbidden")
                        || !state.selection().is_collapsed()
                    {
                        return Err("rejected".into());
                    }
                    Ok(state)
                })
                .build(),
        ),
    )
    .unwrap();
    let before = editor.editor_state();

    let err = editor.on_change(doc("forbidden")).unwrap_err();
    assert!(err.to_string().contains("strict"));
    assert!(editor.editor_state().ptr_eq(&before));

    let ranged = before.accept_selection(SelectionState::range("b", 0, 3));
    assert!(editor.on_change(ranged).is_err());
    assert!(editor.editor_state().selection().is_collapsed());
    assert!(!editor.render().inline_toolbar.show);
    assert_eq!(editor.measurements().pending(), 1);
}

#[test]
fn test_plugin_methods_reflect_controller() {
    let surface = Arc::new(MockSurface::new());
    let plugin = Arc::new(Plugin::builder("p").build());
    let editor = Editor::new(bare_props().with_plugin(plugin.clone())).unwrap();
    editor.attach_surface(surface.clone());
    let methods = editor.plugin_methods();

    assert!(methods.editor_state().ptr_eq(&editor.editor_state()));
    assert_eq!(methods.plugins().len(), 1);
    assert!(Arc::ptr_eq(&methods.plugins()[0], &plugin));
    assert!(!methods.props().default_key_bindings);

    assert!(!methods.read_only());
    methods.set_read_only(true);
    assert!(editor.read_only());
    assert!(editor.render().read_only);
    methods.set_read_only(false);
    assert!(!editor.read_only());

    methods.editor_ref().unwrap().focus();
    editor.focus();
    editor.blur();
    assert_eq!(surface.focus_count(), 2);
    assert_eq!(surface.blur_count(), 1);
}

#[test]
fn test_props_read_only_wins() {
    let editor = Editor::new(bare_props().read_only(true)).unwrap();
    editor.set_read_only(false);
    assert!(editor.read_only());
}

#[test]
fn test_set_editor_state_goes_through_on_change() {
    let log = CallLog::new();
    let editor = Editor::new(bare_props().with_plugin(lifecycle_plugin("p", &log))).unwrap();
    log.clear();

    editor
        .plugin_methods()
        .set_editor_state(doc("replaced"))
        .unwrap();
    assert_eq!(log.calls(), vec!["p:onChange"]);
    assert_eq!(editor.editor_state().current_content().plain_text(), "replaced");
}

#[test]
fn test_inline_toolbar_follows_selection() {
    let geometry = Arc::new(MockGeometry::new().with_selection("b", 0, 2).with_coords(20.0, 8.0));
    let editor = Editor::new(EditorProps::new().geometry(geometry)).unwrap();
    assert!(!editor.render().inline_toolbar.show);

    let selected = editor
        .editor_state()
        .accept_selection(SelectionState::range("b", 0, 2));
    editor.on_change(selected).unwrap();
    let toolbar = editor.render().inline_toolbar;
    assert!(toolbar.show);
    assert_eq!(toolbar.position.unwrap().offset_top, 20.0);

    let collapsed = editor
        .editor_state()
        .accept_selection(SelectionState::collapsed("b", 1));
    editor.on_change(collapsed).unwrap();
    assert!(!editor.render().inline_toolbar.show);
}

#[test]
fn test_deferred_measurement_places_side_toolbar() {
    let geometry = Arc::new(
        MockGeometry::new().with_selection("b", 0, 0).with_bounds(
            Rect {
                top: 50.0,
                ..Rect::default()
            },
            Rect {
                bottom: 131.0,
                ..Rect::default()
            },
        ),
    );
    let editor = Editor::new(bare_props().geometry(geometry.clone())).unwrap();
    assert!(editor.render().side_toolbar.is_none());

    editor.on_change(editor.editor_state()).unwrap();
    assert_eq!(editor.measurements().pending(), 2);
    assert_eq!(editor.run_deferred(), 2);
    assert_eq!(editor.run_deferred(), 0);
    assert_eq!(geometry.selection_reads(), 2);

    let side = editor.render().side_toolbar.unwrap();
    assert_eq!(side.offset_top, 50.0);
}

#[test]
fn test_deferred_measurement_tolerates_missing_selection() {
    let geometry = Arc::new(MockGeometry::new());
    let editor = Editor::new(bare_props().geometry(geometry)).unwrap();
    assert_eq!(editor.run_deferred(), 1);
    assert!(editor.measurements().selection_range().is_none());
    assert!(editor.render().side_toolbar.is_none());

    let editor = Editor::new(bare_props()).unwrap();
    assert_eq!(editor.run_deferred(), 1);
    assert!(editor.measurements().selected_block().is_none());
}
