//! Health preemption and resume through `ChassisService`.

use align_chassis::app::commands::{CommandEvent, TaskRequest};
use align_chassis::app::events::AppEvent;
use align_chassis::app::service::{ChassisService, CommandOutcome};
use align_chassis::fsm::{OperationMode, Outcome, State, TransitionCondition};
use align_chassis::ingress::DropReason;
use align_chassis::safety::HealthSignal;

use crate::mock::{ManualClock, RecordingSink, make_service};

fn to_dock_approach(svc: &mut ChassisService, clock: &ManualClock, sink: &mut RecordingSink) {
    svc.handle_health(HealthSignal::Pass, clock, sink);
    svc.handle_command(CommandEvent::request(TaskRequest::Pickup, 7), clock, sink)
        .unwrap();
    for source in [State::P2P, State::Identify] {
        svc.handle_command(
            CommandEvent::progress(source, TransitionCondition::Success),
            clock,
            sink,
        )
        .unwrap();
    }
    assert_eq!(svc.record().current_state(), State::DockApproach);
}

#[test]
fn failure_preempts_and_recovery_restores() {
    let (mut svc, clock, mut sink) = make_service();
    to_dock_approach(&mut svc, &clock, &mut sink);

    svc.handle_health(HealthSignal::Fail, &clock, &mut sink);
    assert_eq!(svc.record().current_state(), State::EmergencyHandling);
    assert_eq!(svc.record().previous_state(), State::DockApproach);
    assert_eq!(svc.record().suspended_state(), Some(State::DockApproach));
    assert_eq!(svc.record().operation_mode(), OperationMode::Pickup);
    assert!(!svc.record().health_ok());

    svc.handle_health(HealthSignal::Pass, &clock, &mut sink);
    assert_eq!(svc.record().current_state(), State::DockApproach);
    assert_eq!(svc.record().previous_state(), State::EmergencyHandling);
    assert_eq!(svc.record().suspended_state(), None);
    assert_eq!(svc.record().operation_mode(), OperationMode::Pickup);
    assert_eq!(svc.record().payload(), 7);
    assert!(svc.record().health_ok());

    // The task carries on from where it was interrupted.
    svc.handle_command(
        CommandEvent::progress(State::DockApproach, TransitionCondition::Success),
        &clock,
        &mut sink,
    )
    .unwrap();
    assert_eq!(svc.record().current_state(), State::Verify);

    let actions = sink.actions();
    assert!(actions.contains(&"System Failure Detected"));
    assert!(actions.contains(&"Diagnostics Complete"));
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::Resumed {
            restored: State::DockApproach
        }
    )));
}

#[test]
fn repeated_failures_keep_original_suspended_state() {
    let (mut svc, clock, mut sink) = make_service();
    to_dock_approach(&mut svc, &clock, &mut sink);

    svc.handle_health(HealthSignal::Fail, &clock, &mut sink);
    svc.handle_health(HealthSignal::Fail, &clock, &mut sink);
    svc.handle_health(HealthSignal::Fail, &clock, &mut sink);
    assert_eq!(svc.record().suspended_state(), Some(State::DockApproach));
    assert_eq!(svc.metrics().preemptions, 1);

    svc.handle_health(HealthSignal::Pass, &clock, &mut sink);
    assert_eq!(svc.record().current_state(), State::DockApproach);
}

#[test]
fn repeated_passes_outside_emergency_change_nothing() {
    let (mut svc, clock, mut sink) = make_service();
    to_dock_approach(&mut svc, &clock, &mut sink);
    let before = svc.snapshot();

    svc.handle_health(HealthSignal::Pass, &clock, &mut sink);
    svc.handle_health(HealthSignal::Pass, &clock, &mut sink);
    assert_eq!(svc.snapshot(), before);
}

#[test]
fn progress_reports_during_emergency_do_nothing() {
    let (mut svc, clock, mut sink) = make_service();
    to_dock_approach(&mut svc, &clock, &mut sink);
    svc.handle_health(HealthSignal::Fail, &clock, &mut sink);

    // The report the navigation stack was about to send is now stale.
    let out = svc
        .handle_command(
            CommandEvent::progress(State::DockApproach, TransitionCondition::Success),
            &clock,
            &mut sink,
        )
        .unwrap();
    assert!(matches!(out, CommandOutcome::Dropped(DropReason::StaleSource { .. })));

    // One addressed to the emergency state is admitted but holds.
    let out = svc
        .handle_command(
            CommandEvent::progress(State::EmergencyHandling, TransitionCondition::Success),
            &clock,
            &mut sink,
        )
        .unwrap();
    assert_eq!(out, CommandOutcome::Applied(Outcome::Ignored));
    assert_eq!(svc.record().current_state(), State::EmergencyHandling);
}

#[test]
fn status_is_published_during_emergency() {
    let (mut svc, clock, mut sink) = make_service();
    to_dock_approach(&mut svc, &clock, &mut sink);
    svc.handle_health(HealthSignal::Fail, &clock, &mut sink);

    let snap = svc.publish_status(&mut sink).unwrap();
    assert_eq!(snap.current_state, State::EmergencyHandling);
    assert_eq!(snap.previous_state, State::DockApproach);
    assert_eq!(snap.operation_mode, OperationMode::Pickup);
    assert!(!snap.health_ok);
}

#[test]
fn failure_as_first_signal_activates_and_preempts_idle() {
    let (mut svc, clock, mut sink) = make_service();
    svc.handle_health(HealthSignal::Fail, &clock, &mut sink);
    assert!(svc.interlock_active());
    assert_eq!(svc.record().current_state(), State::EmergencyHandling);
    assert_eq!(svc.record().suspended_state(), Some(State::Idle));
    assert_eq!(sink.actions(), vec!["Starting Up", "System Failure Detected"]);

    svc.handle_health(HealthSignal::Pass, &clock, &mut sink);
    assert_eq!(svc.record().current_state(), State::Idle);
    assert_eq!(svc.record().operation_mode(), OperationMode::Standby);

    // Requests work normally after recovery.
    svc.handle_command(CommandEvent::request(TaskRequest::Pickup, 1), &clock, &mut sink)
        .unwrap();
    assert_eq!(svc.record().current_state(), State::P2P);
}

#[test]
fn emergency_while_awaiting_lock_confirmation_loses_the_confirmation() {
    let (mut svc, clock, mut sink) = make_service();
    to_dock_approach(&mut svc, &clock, &mut sink);
    for source in [State::DockApproach, State::Verify, State::Lock] {
        svc.handle_command(
            CommandEvent::progress(source, TransitionCondition::Success),
            &clock,
            &mut sink,
        )
        .unwrap();
    }
    assert_eq!(svc.record().previous_state(), State::Lock);

    svc.handle_health(HealthSignal::Fail, &clock, &mut sink);
    svc.handle_health(HealthSignal::Pass, &clock, &mut sink);
    assert_eq!(svc.record().current_state(), State::Idle);
    assert_eq!(svc.record().previous_state(), State::EmergencyHandling);

    let out = svc
        .handle_command(
            CommandEvent::progress(State::Idle, TransitionCondition::Success),
            &clock,
            &mut sink,
        )
        .unwrap();
    assert_eq!(out, CommandOutcome::Applied(Outcome::Ignored));
    assert!(!svc.record().pod_attached());
}
