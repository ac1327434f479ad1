#![allow(dead_code)]

use chrono::{FixedOffset, TimeZone};
use ferrum_r5::resource::audit_event::{AuditEventAgent, AuditEventBuilder, AuditEventSource};
use ferrum_r5::types::{
    CodeableConcept, Code, Coding, Instant, PublicationStatus, Reference, Uri,
};
use ferrum_r5::visitor::{PrimitiveValue, Visitable, Visitor};
use ferrum_r5::{AuditEvent, TestPlan};

pub fn reference(literal: &str) -> Reference {
    Reference::builder()
        .reference(literal)
        .build()
        .expect("reference fixture must build")
}

pub fn coding(system: &str, code: &str) -> Coding {
    Coding::builder()
        .system(Uri::new(system).expect("system must be a uri"))
        .code(Code::new(code).expect("code must be valid"))
        .build()
        .expect("coding fixture must build")
}

pub fn concept(text: &str) -> CodeableConcept {
    CodeableConcept::text_only(text)
}

pub fn recorded() -> Instant {
    let offset = FixedOffset::east_opt(0).expect("utc offset");
    Instant::from(
        offset
            .with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
            .single()
            .expect("unambiguous timestamp"),
    )
}

pub fn agent(who: &str) -> AuditEventAgent {
    AuditEventAgent::builder()
        .who(reference(who))
        .build()
        .expect("agent fixture must build")
}

pub fn source(observer: &str) -> AuditEventSource {
    AuditEventSource::builder()
        .observer(reference(observer))
        .build()
        .expect("source fixture must build")
}

/// Builder holding every required element of an AuditEvent.
pub fn minimal_audit_event() -> AuditEventBuilder {
    AuditEvent::builder()
        .code(concept("login"))
        .recorded(recorded())
        .agent(agent("Practitioner/p1"))
        .source(source("Device/d1"))
}

pub fn draft_test_plan() -> TestPlan {
    TestPlan::builder()
        .status(PublicationStatus::Draft)
        .build()
        .expect("draft plan must build")
}

/// One recorded traversal callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start(String, Option<usize>, &'static str),
    End(String),
    ListStart(String, usize),
    ListEnd(String),
    Value(String, String),
}

/// Records every callback; children of nodes whose type is in `prune` are skipped.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
    pub prune: Vec<&'static str>,
}

impl Recorder {
    pub fn pruning(prune: &[&'static str]) -> Self {
        Self {
            events: Vec::new(),
            prune: prune.to_vec(),
        }
    }

    /// Names of the started nodes, in visit order.
    pub fn started(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Start(name, _, _) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Visitor for Recorder {
    fn visit_start(&mut self, name: &str, index: Option<usize>, node: &dyn Visitable) {
        self.events
            .push(Event::Start(name.to_string(), index, node.type_name()));
    }

    fn visit(&mut self, _name: &str, _index: Option<usize>, node: &dyn Visitable) -> bool {
        !self.prune.contains(&node.type_name())
    }

    fn visit_end(&mut self, name: &str, _index: Option<usize>, _node: &dyn Visitable) {
        self.events.push(Event::End(name.to_string()));
    }

    fn visit_list_start(&mut self, name: &str, len: usize) {
        self.events.push(Event::ListStart(name.to_string(), len));
    }

    fn visit_list_end(&mut self, name: &str, _len: usize) {
        self.events.push(Event::ListEnd(name.to_string()));
    }

    fn visit_value(&mut self, name: &str, value: PrimitiveValue<'_>) {
        self.events
            .push(Event::Value(name.to_string(), value.to_json().to_string()));
    }
}
