//! `initialize` and `willUnmount`.

use quill::{Editor, LifecyclePhase, Plugin, PluginMethods, QuillError, testing::CallLog};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

mod common;
use common::{bare_props, lifecycle_plugin};

fn lifecycle_calls(log: &CallLog, phase: &str) -> Vec<String> {
    log.calls()
        .into_iter()
        .filter(|entry| entry.ends_with(phase))
        .collect()
}

#[test]
fn test_initialize_runs_host_first_in_order() {
    let log = CallLog::new();
    let _editor = Editor::new(
        bare_props()
            .with_host(lifecycle_plugin("host", &log))
            .with_plugins([lifecycle_plugin("a", &log), lifecycle_plugin("b", &log)]),
    )
    .unwrap();

    assert_eq!(
        lifecycle_calls(&log, ":initialize"),
        vec!["host:initialize", "a:initialize", "b:initialize"]
    );
}

#[test]
fn test_initialize_runs_before_first_commit() {
    let log = CallLog::new();
    let _editor = Editor::new(bare_props().with_plugin(lifecycle_plugin("a", &log))).unwrap();
    assert_eq!(log.calls(), vec!["a:initialize", "a:onChange"]);
}

#[test]
fn test_unmount_reverses_initialize_order() {
    let log = CallLog::new();
    let editor = Editor::new(
        bare_props()
            .with_host(lifecycle_plugin("host", &log))
            .with_plugins([lifecycle_plugin("a", &log), lifecycle_plugin("b", &log)]),
    )
    .unwrap();
    editor.unmount().unwrap();

    assert_eq!(
        lifecycle_calls(&log, ":willUnmount"),
        vec!["b:willUnmount", "a:willUnmount", "host:willUnmount"]
    );
}

#[test]
fn test_drop_unmounts_exactly_once() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let plugin = Plugin::builder("p")
        .will_unmount(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .build();

    drop(Editor::new(bare_props().with_plugin(plugin.clone())).unwrap());
    assert_eq!(count.load(Ordering::SeqCst), 1);

    Editor::new(bare_props().with_plugin(plugin))
        .unwrap()
        .unmount()
        .unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_unmount_runs_every_callback_and_reports_first_failure() {
    let log = CallLog::new();
    let failing = |name: &'static str| {
        Plugin::builder(name)
            .will_unmount(move |_| Err(format!("{name} failed").into()))
            .build()
    };
    let editor = Editor::new(bare_props().with_plugins([
        lifecycle_plugin("a", &log),
        failing("b"),
        failing("c"),
    ]))
    .unwrap();

    let err = editor.unmount().unwrap_err();
    match err {
        QuillError::Lifecycle { phase, plugin, .. } => {
            assert_eq!(phase, LifecyclePhase::WillUnmount);
            assert_eq!(plugin, "c");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(lifecycle_calls(&log, ":willUnmount"), vec!["a:willUnmount"]);
}

#[test]
fn test_initialize_failure_aborts_construction() {
    let plugin = Plugin::builder("bad")
        .initialize(|_| Err("no backend".into()))
        .build();
    let err = Editor::new(bare_props().with_plugin(plugin)).unwrap_err();
    assert!(matches!(
        err,
        QuillError::Lifecycle {
            phase: LifecyclePhase::Initialize,
            ..
        }
    ));
}

#[test]
fn test_initialize_failure_unmounts_initialized_plugins() {
    let log = CallLog::new();
    let bad = Plugin::builder("bad")
        .initialize(|_| Err("no backend".into()))
        .will_unmount({
            let log = log.clone();
            move |_| {
                log.record("bad:willUnmount");
                Ok(())
            }
        })
        .build();
    let props = bare_props()
        .with_plugin(lifecycle_plugin("a", &log))
        .with_plugin(lifecycle_plugin("b", &log))
        .with_plugin(bad)
        .with_plugin(lifecycle_plugin("c", &log));

    assert!(Editor::new(props).is_err());
    assert_eq!(
        log.calls(),
        vec![
            "a:initialize",
            "b:initialize",
            "b:willUnmount",
            "a:willUnmount"
        ]
    );
}

#[test]
fn test_initialize_failure_releases_plugins() {
    let slot: Arc<Mutex<Option<PluginMethods>>> = Arc::default();
    let keeper = Arc::new(
        Plugin::builder("keeper")
            .initialize({
                let slot = slot.clone();
                move |methods| {
                    *slot.lock().unwrap() = Some(methods.clone());
                    Ok(())
                }
            })
            .build(),
    );
    let bad = Plugin::builder("bad")
        .initialize(|_| Err("no backend".into()))
        .build();

    let props = bare_props().with_plugin(keeper.clone()).with_plugin(bad);
    assert!(Editor::new(props).is_err());
    assert!(slot.lock().unwrap().is_some());
    assert_eq!(Arc::strong_count(&keeper), 1);
}

#[test]
fn test_plugins_can_commit_during_initialize() {
    let plugin = Plugin::builder("seed")
        .initialize(|methods| {
            methods.set_read_only(true);
            Ok(())
        })
        .build();
    let editor = Editor::new(bare_props().with_plugin(plugin)).unwrap();
    assert!(editor.read_only());
}
