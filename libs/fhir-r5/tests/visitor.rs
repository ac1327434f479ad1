//! Traversal order, pruning and metadata lookup

use ferrum_r5::model_support::{self, BindingStrength, ConstraintLevel, TypeKind};
use ferrum_r5::prelude::*;
use ferrum_r5::types::{Reference, Uri};

mod test_support;
use test_support::{minimal_audit_event, Event, Recorder};

#[test]
fn test_visit_order_follows_schema() {
    let event = minimal_audit_event().build().unwrap();
    let mut recorder = Recorder::default();
    event.accept("AuditEvent", None, &mut recorder);

    assert_eq!(
        recorder.started(),
        vec![
            "AuditEvent",
            "code",
            "text",
            "recorded",
            "agent",
            "who",
            "reference",
            "source",
            "observer",
            "reference",
        ]
    );
}

#[test]
fn test_lists_are_bracketed_and_indexed() {
    let event = minimal_audit_event()
        .agent(test_support::agent("Patient/p2"))
        .build()
        .unwrap();
    let mut recorder = Recorder::default();
    event.accept("AuditEvent", None, &mut recorder);

    let list_start = recorder
        .events
        .iter()
        .position(|e| *e == Event::ListStart("agent".to_string(), 2))
        .expect("agent list start");
    let list_end = recorder
        .events
        .iter()
        .position(|e| *e == Event::ListEnd("agent".to_string()))
        .expect("agent list end");
    assert!(list_start < list_end);

    let agents: Vec<_> = recorder.events[list_start..list_end]
        .iter()
        .filter_map(|e| match e {
            Event::Start(name, index, type_name) if name == "agent" => Some((*index, *type_name)),
            _ => None,
        })
        .collect();
    assert_eq!(
        agents,
        vec![
            (Some(0), "AuditEvent.Agent"),
            (Some(1), "AuditEvent.Agent"),
        ]
    );
}

#[test]
fn test_raw_values_are_delivered() {
    let event = minimal_audit_event().id("ae-1").build().unwrap();
    let mut recorder = Recorder::default();
    event.accept("AuditEvent", None, &mut recorder);

    assert_eq!(
        recorder.events[1],
        Event::Value("id".to_string(), "\"ae-1\"".to_string())
    );
    assert!(recorder
        .events
        .contains(&Event::Value("value".to_string(), "\"2024-03-01T12:30:00Z\"".to_string())));
    assert!(recorder
        .events
        .contains(&Event::Value("value".to_string(), "\"Device/d1\"".to_string())));
}

#[test]
fn test_visit_false_prunes_children_only() {
    let event = minimal_audit_event().build().unwrap();
    let mut recorder = Recorder::pruning(&["AuditEvent.Agent"]);
    event.accept("AuditEvent", None, &mut recorder);

    assert_eq!(
        recorder.started(),
        vec!["AuditEvent", "code", "text", "recorded", "agent", "source", "observer", "reference"]
    );
    // The pruned node is still closed
    assert!(recorder.events.contains(&Event::End("agent".to_string())));
}

/// Skips every Reference before it is started.
#[derive(Default)]
struct SkipReferences {
    started: Vec<String>,
    ended: usize,
    post_visited: usize,
}

impl Visitor for SkipReferences {
    fn pre_visit(&mut self, node: &dyn Visitable) -> bool {
        !node.is::<Reference>()
    }

    fn visit_start(&mut self, name: &str, _index: Option<usize>, _node: &dyn Visitable) {
        self.started.push(name.to_string());
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Visitable) {
        self.ended += 1;
    }

    fn post_visit(&mut self, _node: &dyn Visitable) {
        self.post_visited += 1;
    }
}

#[test]
fn test_pre_visit_false_skips_node() {
    let event = minimal_audit_event().build().unwrap();
    let mut visitor = SkipReferences::default();
    event.accept("AuditEvent", None, &mut visitor);

    assert_eq!(
        visitor.started,
        vec!["AuditEvent", "code", "text", "recorded", "agent", "source"]
    );
    assert_eq!(visitor.ended, visitor.started.len());
    assert_eq!(visitor.post_visited, visitor.started.len());
}

/// Collects the literal of every Reference in the tree.
#[derive(Default)]
struct ReferenceCollector {
    literals: Vec<String>,
}

impl Visitor for ReferenceCollector {
    fn visit_start(&mut self, _name: &str, _index: Option<usize>, node: &dyn Visitable) {
        if let Some(reference) = node.downcast_ref::<Reference>() {
            if let Some(literal) = reference.reference().and_then(|r| r.as_str()) {
                self.literals.push(literal.to_string());
            }
        }
    }
}

#[test]
fn test_downcast_during_walk() {
    let event = minimal_audit_event()
        .patient(test_support::reference("Patient/p9"))
        .build()
        .unwrap();
    let mut collector = ReferenceCollector::default();
    (&event as &dyn Visitable).walk(&mut collector);

    assert_eq!(
        collector.literals,
        vec!["Patient/p9", "Practitioner/p1", "Device/d1"]
    );
}

#[test]
fn test_contained_resources_are_visited() {
    let event = minimal_audit_event()
        .contained(test_support::draft_test_plan())
        .build()
        .unwrap();
    let mut recorder = Recorder::default();
    event.accept("AuditEvent", None, &mut recorder);

    assert!(recorder
        .events
        .contains(&Event::Start("contained".to_string(), Some(0), "TestPlan")));
    assert!(recorder
        .events
        .contains(&Event::Value("value".to_string(), "\"draft\"".to_string())));
}

#[test]
fn test_has_children() {
    let empty = Reference::builder().validating(false).build().unwrap();
    assert!(!empty.has_children());

    let typed = Reference::builder()
        .r#type(Uri::new("Patient").unwrap())
        .build()
        .unwrap();
    assert!(typed.has_children());
}

#[test]
fn test_childless_node_only_reports_itself() {
    let empty = Reference::builder().validating(false).build().unwrap();
    let mut recorder = Recorder::default();
    empty.accept("assigner", None, &mut recorder);

    assert_eq!(
        recorder.events,
        vec![
            Event::Start("assigner".to_string(), None, "Reference"),
            Event::End("assigner".to_string()),
        ]
    );

    let typed = Reference::builder()
        .r#type(Uri::new("Patient").unwrap())
        .build()
        .unwrap();
    let mut recorder = Recorder::default();
    typed.accept("assigner", None, &mut recorder);
    assert_eq!(recorder.started(), vec!["assigner", "type"]);
}

#[test]
fn test_registry_covers_every_resource_path() {
    for path in [
        "AuditEvent",
        "AuditEvent.Outcome",
        "AuditEvent.Agent",
        "AuditEvent.Source",
        "AuditEvent.Entity",
        "AuditEvent.Entity.Detail",
        "TestPlan",
        "TestPlan.Dependency",
        "TestPlan.TestCase",
        "TestPlan.TestCase.Dependency",
        "TestPlan.TestCase.TestRun",
        "TestPlan.TestCase.TestRun.Script",
        "TestPlan.TestCase.TestData",
        "TestPlan.TestCase.Assertion",
        "EvidenceVariable",
        "EvidenceVariable.Characteristic",
        "EvidenceVariable.Characteristic.DefinitionByTypeAndValue",
        "EvidenceVariable.Characteristic.DefinitionByCombination",
        "EvidenceVariable.Characteristic.TimeFromEvent",
        "EvidenceVariable.Category",
    ] {
        let info = model_support::type_info(path).unwrap_or_else(|| panic!("{path} missing"));
        assert_eq!(info.name, path);
    }
    assert!(model_support::type_info("Patient").is_none());
}

#[test]
fn test_node_metadata_matches_registry() {
    let event = minimal_audit_event().build().unwrap();
    let info = event.type_info();
    assert_eq!(info.kind, TypeKind::Resource);
    assert!(std::ptr::eq(info, model_support::type_info("AuditEvent").unwrap()));

    let occurred = info.field("occurred").unwrap();
    assert!(occurred.is_choice());
    assert_eq!(occurred.types, &["Period", "dateTime"]);

    let agent = info.field("agent").unwrap();
    assert_eq!(agent.cardinality(), "1..*");

    // Inherited from DomainResource and Resource
    assert!(info.field("contained").is_some());
    assert!(info.field("id").is_some());
}

#[test]
fn test_bindings_and_constraints() {
    let combination =
        model_support::type_info("EvidenceVariable.Characteristic.DefinitionByCombination")
            .unwrap();
    let code = combination.field("code").unwrap();
    let binding = code.binding.unwrap();
    assert_eq!(binding.strength, BindingStrength::Required);
    assert!(binding.value_set.contains("characteristic-combination"));

    let variable = model_support::type_info("EvidenceVariable").unwrap();
    let rule = variable
        .constraints
        .iter()
        .find(|c| c.id == "evv-1")
        .expect("evv-1 declared");
    assert_eq!(rule.level, ConstraintLevel::Rule);

    let plan = model_support::type_info("TestPlan").unwrap();
    assert!(plan
        .constraints
        .iter()
        .all(|c| c.level == ConstraintLevel::Warning));
}
