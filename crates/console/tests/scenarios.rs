use std::rc::Rc;

use serde_json::json;
use webio_console::{EventBus, LocalBus, MemoryHost, SetupConfig, VisualList, WebIo};
use webio_protocol::{EVENT_CONSOLE, EVENT_PLUGIN_CONFIG, EVENT_PLUGIN_CONTROL, Filters};

struct Harness {
    transport: Rc<LocalBus>,
    console: Rc<LocalBus>,
    webio: WebIo<MemoryHost>,
}

impl Harness {
    fn new(config: SetupConfig) -> Self {
        let transport = Rc::new(LocalBus::new());
        let console = Rc::new(LocalBus::new());
        let t: Rc<dyn EventBus> = transport.clone();
        let c: Rc<dyn EventBus> = console.clone();
        let webio = WebIo::set_up(config, MemoryHost::new(), t, c).unwrap();
        Self {
            transport,
            console,
            webio,
        }
    }

    fn log(&self, kind: &str, message: &str) {
        self.console
            .emit(EVENT_CONSOLE, &json!({"type": kind, "message": message}));
    }

    fn control(&self, patch: serde_json::Value) {
        self.transport.emit(EVENT_PLUGIN_CONTROL, &patch);
    }

    fn visible(&self) -> Vec<(String, String)> {
        let ctrl = self.webio.controller().borrow();
        ctrl.view()
            .container()
            .unwrap()
            .children()
            .iter()
            .map(|el| (el.class_name.clone(), el.message.clone()))
            .collect()
    }

    fn visible_messages(&self) -> Vec<String> {
        self.visible().into_iter().map(|(_, m)| m).collect()
    }
}

#[test]
fn page_size_keeps_newest_entries() {
    let h = Harness::new(SetupConfig {
        page_size: Some(2),
        ..SetupConfig::default()
    });

    h.log("log", "entry1");
    h.log("error", "entry2");
    h.log("log", "entry3");

    assert_eq!(h.visible_messages(), vec!["entry3", "entry2"]);
    assert_eq!(h.webio.controller().borrow().added().len(), 3);
}

#[test]
fn filter_shows_only_allowed_types() {
    let h = Harness::new(SetupConfig {
        filters: Some(Filters::List(vec!["error".into()])),
        ..SetupConfig::default()
    });

    h.log("log", "quiet");
    h.log("error", "loud");

    assert_eq!(h.visible_messages(), vec!["loud"]);
}

#[test]
fn pause_then_resume_is_lossless() {
    let h = Harness::new(SetupConfig::default());

    h.control(json!({"paused": true}));
    h.log("log", "first");
    h.log("log", "second");
    assert!(h.visible().is_empty());
    assert_eq!(h.webio.controller().borrow().queue().len(), 2);

    h.control(json!({"paused": false}));

    let ctrl = h.webio.controller().borrow();
    let added: Vec<&str> = ctrl.added().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(added, vec!["first", "second"]);
    assert!(ctrl.queue().is_empty());
    drop(ctrl);

    assert_eq!(h.visible_messages(), vec!["second", "first"]);
}

#[test]
fn failed_assert_is_flagged() {
    let h = Harness::new(SetupConfig::default());
    h.log("assert", "[false,expected true]");

    let visible = h.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].0, "console type-assert-failed");
}

#[test]
fn visible_list_tracks_newest_qualifying_entries() {
    let h = Harness::new(SetupConfig {
        page_size: Some(3),
        filters: Some(Filters::Csv("warn,error".into())),
        ..SetupConfig::default()
    });

    let kinds = ["log", "warn", "error", "log", "warn", "info", "error", "warn"];
    for (i, kind) in kinds.iter().enumerate() {
        h.log(kind, &format!("m{i}"));
    }

    assert_eq!(h.visible_messages(), vec!["m7", "m6", "m4"]);
}

#[test]
fn search_then_clear_search() {
    let h = Harness::new(SetupConfig::default());
    h.log("log", "a foo bar");
    h.log("log", "afoobar");
    h.log("log", "nothing");

    h.control(json!({"search": "foo"}));
    assert_eq!(h.visible_messages(), vec!["a foo bar"]);

    h.control(json!({"search": "\\bar"}));
    assert_eq!(h.visible_messages(), vec!["afoobar", "a foo bar"]);

    h.control(json!({"search": ""}));
    assert_eq!(h.visible().len(), 3);
}

#[test]
fn invalid_search_over_transport_is_ignored() {
    let h = Harness::new(SetupConfig::default());
    h.log("log", "kept");

    h.control(json!({"search": "\\(", "pageSize": 1}));

    assert_eq!(h.webio.controller().borrow().control().page_size(), 50);
    assert_eq!(h.visible_messages(), vec!["kept"]);
}

#[test]
fn clear_only_wipes_the_view() {
    let h = Harness::new(SetupConfig::default());
    h.log("log", "a");
    h.control(json!({"clear": true}));

    assert!(h.visible().is_empty());
    assert_eq!(h.webio.controller().borrow().added().len(), 1);

    // Any later sync re-derives the view from history.
    h.control(json!({}));
    assert_eq!(h.visible_messages(), vec!["a"]);
}

#[test]
fn config_push_moves_container() {
    let h = Harness::new(SetupConfig::default());
    h.log("log", "a");

    h.transport
        .emit(EVENT_PLUGIN_CONFIG, &json!({"position": "top", "height": "120px"}));

    let ctrl = h.webio.controller().borrow();
    let container = ctrl.view().container().unwrap();
    assert!(container.spec().style.contains("height:120px"));
    assert!(container.spec().style.ends_with("top: 5px"));
    assert_eq!(container.child_count(), 1);
}
