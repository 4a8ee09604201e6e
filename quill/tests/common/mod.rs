#![allow(dead_code)]

use quill::{
    ContentBlock, ContentState, EditorProps, EditorState, HOST_PLUGIN_NAME, HookValue, Plugin,
    testing::CallLog,
};
use std::sync::Once;

// ============================================================================
// Logging
// ============================================================================

static INIT: Once = Once::new();

/// Route engine logs to the test harness. Run with `--features tracing` and
/// `RUST_LOG=quill_std=trace` to see dispatch decisions.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Documents
// ============================================================================

/// A state with one `unstyled` block per line.
pub fn doc(text: &str) -> EditorState {
    EditorState::create_with_content(ContentState::from_text(text))
}

/// A state over explicit blocks.
pub fn doc_with(blocks: Vec<ContentBlock>) -> EditorState {
    EditorState::create_with_content(ContentState::from_blocks(blocks))
}

// ============================================================================
// Plugins
// ============================================================================

/// A plugin logging `"{name}:initialize"`, `"{name}:willUnmount"` and
/// `"{name}:onChange"`.
pub fn lifecycle_plugin(name: &str, log: &CallLog) -> Plugin {
    let (init_log, unmount_log, change_log) = (log.clone(), log.clone(), log.clone());
    let (init, unmount, change) = (
        format!("{name}:initialize"),
        format!("{name}:willUnmount"),
        format!("{name}:onChange"),
    );
    Plugin::builder(name)
        .initialize(move |_| {
            init_log.record(init.clone());
            Ok(())
        })
        .will_unmount(move |_| {
            unmount_log.record(unmount.clone());
            Ok(())
        })
        .on_change(move |state, _| {
            change_log.record(change.clone());
            Ok(state)
        })
        .build()
}

/// A host plugin implementing `hook` with a fixed answer.
pub fn host_answering(hook: &str, value: HookValue, log: &CallLog) -> Plugin {
    quill::testing::recording_plugin(HOST_PLUGIN_NAME, hook, value, log)
}

/// Props without the default key-binding plugin.
pub fn bare_props() -> EditorProps {
    EditorProps::new().default_key_bindings(false)
}
