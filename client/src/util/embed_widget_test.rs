use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;

#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<String>>,
    attached: Cell<bool>,
    refuse: Cell<bool>,
}

#[derive(Clone)]
struct FakeHost(Rc<Recorder>);

impl FakeHost {
    fn new() -> Self {
        let recorder = Recorder::default();
        recorder.attached.set(true);
        Self(Rc::new(recorder))
    }

    fn events(&self) -> Vec<String> {
        self.0.events.borrow().clone()
    }
}

impl EmbedHost for FakeHost {
    type Target = &'static str;

    fn is_attached(&self, _target: &Self::Target) -> bool {
        self.0.attached.get()
    }

    fn mount(&self, target: &Self::Target, config: &EmbedConfig) -> Result<(), String> {
        self.0.events.borrow_mut().push(format!("mount {target} {}", config.id));
        if self.0.refuse.get() {
            return Err("refused".to_owned());
        }
        Ok(())
    }

    fn reset(&self, target: &Self::Target) {
        self.0.events.borrow_mut().push(format!("reset {target}"));
    }
}

fn credential() -> EmbedCredential {
    EmbedCredential {
        embed_token: "tok".to_owned(),
        embed_url: "https://app.powerbi.com/reportEmbed?reportId=r1".to_owned(),
        report_id: "r1".to_owned(),
        workspace_id: "ws".to_owned(),
    }
}

#[test]
fn config_matches_widget_shape() {
    let value = serde_json::to_value(EmbedConfig::for_report(&credential())).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "type": "report",
            "id": "r1",
            "embedUrl": "https://app.powerbi.com/reportEmbed?reportId=r1",
            "accessToken": "tok",
            "tokenType": 1,
            "settings": {
                "panes": { "filters": { "expanded": false, "visible": true } },
                "background": 1
            }
        })
    );
}

#[test]
fn release_resets_exactly_once() {
    let host = FakeHost::new();
    let config = EmbedConfig::for_report(&credential());
    let mut widget = MountedWidget::acquire(host.clone(), "container", &config).expect("mount");
    assert!(widget.release());
    assert!(!widget.release());
    assert!(widget.is_released());
    drop(widget);
    assert_eq!(host.events(), vec!["mount container r1", "reset container"]);
}

#[test]
fn drop_releases_mounted_widget() {
    let host = FakeHost::new();
    let config = EmbedConfig::for_report(&credential());
    {
        let _widget = MountedWidget::acquire(host.clone(), "container", &config).expect("mount");
    }
    assert_eq!(host.events(), vec!["mount container r1", "reset container"]);
}

#[test]
fn detached_target_skips_reset() {
    let host = FakeHost::new();
    let config = EmbedConfig::for_report(&credential());
    let mut widget = MountedWidget::acquire(host.clone(), "container", &config).expect("mount");
    host.0.attached.set(false);
    assert!(!widget.release());
    drop(widget);
    assert_eq!(host.events(), vec!["mount container r1"]);
}

#[test]
fn failed_mount_resets_and_reports() {
    let host = FakeHost::new();
    host.0.refuse.set(true);
    let config = EmbedConfig::for_report(&credential());
    let result = MountedWidget::acquire(host.clone(), "container", &config);
    assert_eq!(result.err(), Some("refused".to_owned()));
    assert_eq!(host.events(), vec!["mount container r1", "reset container"]);
}

#[test]
fn switching_reports_releases_before_next_mount() {
    let host = FakeHost::new();
    let first = EmbedConfig::for_report(&credential());
    let mut second_credential = credential();
    second_credential.report_id = "r2".to_owned();
    let second = EmbedConfig::for_report(&second_credential);

    let mut slot = Some(MountedWidget::acquire(host.clone(), "container", &first).expect("mount"));
    if let Some(mut previous) = slot.take() {
        previous.release();
    }
    slot = Some(MountedWidget::acquire(host.clone(), "container", &second).expect("mount"));
    drop(slot);
    assert_eq!(
        host.events(),
        vec!["mount container r1", "reset container", "mount container r2", "reset container"]
    );
}
