use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use graft::{
    Candidate, Diagnostic, Injector, MemberBinding, MemorySink, MethodBinding, Provider,
    ProvideOp, Registry, Slot, Target, TypeKey, validate,
};

struct Database;

struct Cache;

struct CountingModule {
    database: Arc<Database>,
    produced: AtomicUsize,
}

impl CountingModule {
    fn new(database: Arc<Database>) -> Self {
        Self {
            database,
            produced: AtomicUsize::new(0),
        }
    }
}

impl Provider for CountingModule {
    fn operations(&self) -> Vec<ProvideOp<'_>> {
        vec![ProvideOp::new("database", move || {
            self.produced.fetch_add(1, Ordering::Relaxed);
            Some(self.database.clone())
        })]
    }
}

impl Candidate for CountingModule {
    fn as_provider(&self) -> Option<&dyn Provider> {
        Some(self)
    }
}

struct Repository {
    database: Slot<Arc<Database>>,
}

impl Repository {
    fn new() -> Self {
        Self {
            database: Slot::empty(),
        }
    }
}

impl Target for Repository {
    fn members(&self) -> Vec<MemberBinding<'_>> {
        vec![self.database.binding("database")]
    }
}

impl Candidate for Repository {
    fn as_target(&self) -> Option<&dyn Target> {
        Some(self)
    }
}

struct MethodOnly;

impl Target for MethodOnly {
    fn members(&self) -> Vec<MemberBinding<'_>> {
        vec![
            MethodBinding::new(
                "wire",
                vec![TypeKey::of::<Arc<Cache>>()],
                |registry: &Registry| {
                    registry
                        .get::<Arc<Cache>>()
                        .map(|_| ())
                        .ok_or(TypeKey::of::<Arc<Cache>>())
                },
            )
            .into(),
        ]
    }
}

impl Candidate for MethodOnly {
    fn as_target(&self) -> Option<&dyn Target> {
        Some(self)
    }
}

#[test]
fn test_satisfied_requirements_produce_no_report() {
    let module = Arc::new(CountingModule::new(Arc::new(Database)));
    let candidates: Vec<Arc<dyn Candidate>> =
        vec![module.clone(), Arc::new(Repository::new())];

    assert!(validate(&candidates).is_empty());
}

#[test]
fn test_missing_provider_is_reported_once() {
    let repository = Arc::new(Repository::new());
    let candidates: Vec<Arc<dyn Candidate>> = vec![repository.clone()];

    let report = validate(&candidates);
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].target, std::any::type_name::<Repository>());
    assert_eq!(report[0].member, "database");
    assert_eq!(report[0].key, TypeKey::of::<Arc<Database>>());
}

#[test]
fn test_occupied_slot_is_not_reported() {
    let repository = Repository::new();
    repository.database.set(Arc::new(Database));
    let candidates: Vec<Arc<dyn Candidate>> = vec![Arc::new(repository)];

    assert!(validate(&candidates).is_empty());
}

#[test]
fn test_methods_are_not_considered() {
    // The method requires an unprovided Arc<Cache>; validation only covers
    // field slots.
    let candidates: Vec<Arc<dyn Candidate>> = vec![Arc::new(MethodOnly)];

    assert!(validate(&candidates).is_empty());
}

#[test]
fn test_validate_is_pure() {
    let module = Arc::new(CountingModule::new(Arc::new(Database)));
    let repository = Arc::new(Repository::new());
    let candidates: Vec<Arc<dyn Candidate>> = vec![module.clone(), repository.clone()];

    let injector = Injector::new();
    assert!(injector.validate(&candidates).is_empty());

    // No provide-operation was invoked, no slot was filled, and the registry
    // was not touched.
    assert_eq!(module.produced.load(Ordering::Relaxed), 0);
    assert!(repository.database.is_empty());
    assert!(injector.registry().is_empty());
}

#[test]
fn test_injector_validate_reports_to_sink() {
    let repository = Arc::new(Repository::new());
    let candidates: Vec<Arc<dyn Candidate>> = vec![repository.clone()];

    let sink = Arc::new(MemorySink::new());
    let injector = Injector::with_sink(sink.clone());
    let report = injector.validate(&candidates);

    assert_eq!(report.len(), 1);
    assert_eq!(
        sink.drain(),
        vec![Diagnostic::MissingProvision {
            target: std::any::type_name::<Repository>(),
            member: "database",
            key: TypeKey::of::<Arc<Database>>(),
        }]
    );
}
