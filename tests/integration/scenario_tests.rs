//! End-to-end task scenarios through `ChassisService`.

use std::time::Duration;

use align_chassis::app::commands::{CommandEvent, TaskRequest};
use align_chassis::app::service::{ChassisService, CommandOutcome};
use align_chassis::error::TaskError;
use align_chassis::fsm::{OperationMode, Outcome, State, TransitionCondition};
use align_chassis::ingress::DropReason;
use align_chassis::safety::HealthSignal;

use crate::mock::{ManualClock, RecordingSink, make_service};

fn activate(svc: &mut ChassisService, clock: &ManualClock, sink: &mut RecordingSink) {
    svc.handle_health(HealthSignal::Pass, clock, sink);
}

fn report(
    svc: &mut ChassisService,
    clock: &ManualClock,
    sink: &mut RecordingSink,
    condition: TransitionCondition,
) -> CommandOutcome {
    let source = svc.record().current_state();
    svc.handle_command(CommandEvent::progress(source, condition), clock, sink)
        .expect("progress reports never violate a precondition")
}

fn request(
    svc: &mut ChassisService,
    clock: &ManualClock,
    sink: &mut RecordingSink,
    kind: TaskRequest,
    payload: u32,
) -> Result<CommandOutcome, TaskError> {
    svc.handle_command(CommandEvent::request(kind, payload), clock, sink)
}

/// Run a full pickup including the lock confirmation.
fn complete_pickup(svc: &mut ChassisService, clock: &ManualClock, sink: &mut RecordingSink) {
    request(svc, clock, sink, TaskRequest::Pickup, 7).unwrap();
    for _ in 0..5 {
        report(svc, clock, sink, TransitionCondition::Success);
    }
    report(svc, clock, sink, TransitionCondition::Success);
    assert!(svc.record().pod_attached());
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn first_health_pass_starts_publishing_idle_standby() {
    let (mut svc, clock, mut sink) = make_service();
    assert_eq!(svc.publish_status(&mut sink), None);
    assert!(!svc.record().health_ok());

    activate(&mut svc, &clock, &mut sink);

    let snap = svc.publish_status(&mut sink).unwrap();
    assert!(snap.health_ok);
    assert_eq!(snap.current_state, State::Idle);
    assert_eq!(snap.operation_mode, OperationMode::Standby);
    assert_eq!(sink.snapshots(), vec![snap]);
    assert_eq!(sink.actions(), vec!["Starting Up"]);
}

// ── Pickup ────────────────────────────────────────────────────

#[test]
fn full_pickup_walks_every_phase() {
    let (mut svc, clock, mut sink) = make_service();
    activate(&mut svc, &clock, &mut sink);
    assert!(!svc.record().pod_attached());

    request(&mut svc, &clock, &mut sink, TaskRequest::Pickup, 7).unwrap();
    assert_eq!(svc.record().operation_mode(), OperationMode::Pickup);
    assert_eq!(svc.record().current_state(), State::P2P);
    assert_eq!(svc.record().payload(), 7);

    let expected = [
        (State::Identify, State::P2P),
        (State::DockApproach, State::Identify),
        (State::Verify, State::DockApproach),
        (State::Lock, State::Verify),
        (State::Idle, State::Lock),
    ];
    for (current, previous) in expected {
        report(&mut svc, &clock, &mut sink, TransitionCondition::Success);
        assert_eq!(svc.record().current_state(), current);
        assert_eq!(svc.record().previous_state(), previous);
    }
    assert_eq!(svc.record().operation_mode(), OperationMode::Standby);

    // Lock confirmation attaches the pod.
    report(&mut svc, &clock, &mut sink, TransitionCondition::Success);
    assert!(svc.record().pod_attached());
    assert_eq!(svc.record().payload(), 0);
    assert_eq!(svc.record().current_state(), State::Idle);

    assert_eq!(
        sink.actions(),
        vec![
            "Starting Up",
            "Input received",
            "Destination Reached",
            "PHZ Correctly Identified",
            "Approach Complete",
            "Docking Pose Achieved",
            "Locking Complete",
            "Locking verified & successful",
        ]
    );
}

#[test]
fn verify_failure_retraces_and_retries_approach() {
    let (mut svc, clock, mut sink) = make_service();
    activate(&mut svc, &clock, &mut sink);
    request(&mut svc, &clock, &mut sink, TaskRequest::Pickup, 7).unwrap();
    for _ in 0..3 {
        report(&mut svc, &clock, &mut sink, TransitionCondition::Success);
    }
    assert_eq!(svc.record().current_state(), State::Verify);

    report(&mut svc, &clock, &mut sink, TransitionCondition::Failure);
    assert_eq!(svc.record().current_state(), State::Retrace);
    assert_eq!(svc.record().previous_state(), State::Verify);

    report(&mut svc, &clock, &mut sink, TransitionCondition::Success);
    assert_eq!(svc.record().current_state(), State::DockApproach);
    assert_eq!(svc.record().operation_mode(), OperationMode::Pickup);
    assert_eq!(
        &sink.actions()[sink.actions().len() - 2..],
        &["Error in Pose", "Retrace Complete"]
    );
}

#[test]
fn identify_failure_returns_to_p2p() {
    let (mut svc, clock, mut sink) = make_service();
    activate(&mut svc, &clock, &mut sink);
    request(&mut svc, &clock, &mut sink, TaskRequest::Pickup, 2).unwrap();
    report(&mut svc, &clock, &mut sink, TransitionCondition::Success);
    assert_eq!(svc.record().current_state(), State::Identify);

    report(&mut svc, &clock, &mut sink, TransitionCondition::Failure);
    assert_eq!(svc.record().current_state(), State::P2P);
    assert_eq!(sink.actions().last(), Some(&"Incorrect PHZ reached"));
}

#[test]
fn lock_confirmation_failure_undocks() {
    let (mut svc, clock, mut sink) = make_service();
    activate(&mut svc, &clock, &mut sink);
    request(&mut svc, &clock, &mut sink, TaskRequest::Pickup, 7).unwrap();
    for _ in 0..5 {
        report(&mut svc, &clock, &mut sink, TransitionCondition::Success);
    }
    assert_eq!(svc.record().previous_state(), State::Lock);

    report(&mut svc, &clock, &mut sink, TransitionCondition::Failure);
    assert_eq!(svc.record().operation_mode(), OperationMode::DropOff);
    assert_eq!(svc.record().current_state(), State::Unlock);
    assert!(!svc.record().pod_attached());
    assert_eq!(sink.actions().last(), Some(&"Locking unsuccessful"));

    report(&mut svc, &clock, &mut sink, TransitionCondition::Success);
    assert_eq!(svc.record().current_state(), State::Idle);
    assert_eq!(svc.record().operation_mode(), OperationMode::Standby);
    assert!(!svc.record().pod_attached());
}

// ── Drop-off ──────────────────────────────────────────────────

#[test]
fn full_drop_off_releases_pod() {
    let (mut svc, clock, mut sink) = make_service();
    activate(&mut svc, &clock, &mut sink);
    complete_pickup(&mut svc, &clock, &mut sink);

    request(&mut svc, &clock, &mut sink, TaskRequest::DropOff, 3).unwrap();
    assert_eq!(svc.record().operation_mode(), OperationMode::DropOff);
    assert_eq!(svc.record().payload(), 3);

    for expected in [State::UndockApproach, State::Unlock, State::Idle] {
        report(&mut svc, &clock, &mut sink, TransitionCondition::Success);
        assert_eq!(svc.record().current_state(), expected);
    }
    assert_eq!(svc.record().operation_mode(), OperationMode::Standby);
    assert!(!svc.record().pod_attached());
    assert_eq!(svc.record().payload(), 0);
    assert_eq!(sink.actions().last(), Some(&"Unlocking Complete"));
}

#[test]
fn drop_off_ignores_failure_reports() {
    let (mut svc, clock, mut sink) = make_service();
    activate(&mut svc, &clock, &mut sink);
    complete_pickup(&mut svc, &clock, &mut sink);
    request(&mut svc, &clock, &mut sink, TaskRequest::DropOff, 3).unwrap();

    let out = report(&mut svc, &clock, &mut sink, TransitionCondition::Failure);
    assert_eq!(out, CommandOutcome::Applied(Outcome::Ignored));
    assert_eq!(svc.record().current_state(), State::P2P);
}

// ── Preconditions ─────────────────────────────────────────────

#[test]
fn pickup_with_pod_attached_is_rejected() {
    let (mut svc, clock, mut sink) = make_service();
    activate(&mut svc, &clock, &mut sink);
    complete_pickup(&mut svc, &clock, &mut sink);
    let before = svc.snapshot();

    let err = request(&mut svc, &clock, &mut sink, TaskRequest::Pickup, 9).unwrap_err();
    assert_eq!(err, TaskError::PodAlreadyAttached);
    assert_eq!(svc.snapshot(), before);
    assert_eq!(sink.rejections(), vec![TaskError::PodAlreadyAttached]);
}

#[test]
fn drop_off_without_pod_is_rejected() {
    let (mut svc, clock, mut sink) = make_service();
    activate(&mut svc, &clock, &mut sink);
    let before = svc.snapshot();

    let err = request(&mut svc, &clock, &mut sink, TaskRequest::DropOff, 1).unwrap_err();
    assert_eq!(err, TaskError::PodNotAttached);
    assert_eq!(svc.snapshot(), before);
    assert_eq!(svc.metrics().requests_rejected, 1);
}

#[test]
fn direct_approach_skips_attachment_check() {
    let (mut svc, clock, mut sink) = make_service();
    activate(&mut svc, &clock, &mut sink);
    complete_pickup(&mut svc, &clock, &mut sink);

    request(&mut svc, &clock, &mut sink, TaskRequest::DirectApproachPickup, 5).unwrap();
    assert_eq!(svc.record().operation_mode(), OperationMode::Pickup);
    assert_eq!(svc.record().current_state(), State::DockApproach);
    assert_eq!(svc.record().payload(), 5);
    assert_eq!(sink.actions().last(), Some(&"Input received, Direct Approach"));
}

#[test]
fn standby_request_is_ignored() {
    let (mut svc, clock, mut sink) = make_service();
    activate(&mut svc, &clock, &mut sink);
    let out = request(&mut svc, &clock, &mut sink, TaskRequest::Standby, 0).unwrap();
    assert_eq!(out, CommandOutcome::Applied(Outcome::Ignored));
    assert_eq!(sink.actions(), vec!["Starting Up"]);
}

// ── Ingress ───────────────────────────────────────────────────

#[test]
fn stale_reports_are_dropped_then_fresh_ones_apply() {
    let (mut svc, clock, mut sink) = make_service();
    activate(&mut svc, &clock, &mut sink);
    request(&mut svc, &clock, &mut sink, TaskRequest::Pickup, 7).unwrap();

    // Report from a state the robot has not reached yet.
    let out = svc
        .handle_command(
            CommandEvent::progress(State::Identify, TransitionCondition::Success),
            &clock,
            &mut sink,
        )
        .unwrap();
    assert_eq!(
        out,
        CommandOutcome::Dropped(DropReason::StaleSource {
            current: State::P2P,
            source: State::Identify,
        })
    );
    assert_eq!(svc.record().current_state(), State::P2P);

    report(&mut svc, &clock, &mut sink, TransitionCondition::Success);
    assert_eq!(svc.record().current_state(), State::Identify);

    // A resend of the P2P report is now stale.
    let out = svc
        .handle_command(
            CommandEvent::progress(State::P2P, TransitionCondition::Success),
            &clock,
            &mut sink,
        )
        .unwrap();
    assert!(matches!(out, CommandOutcome::Dropped(DropReason::StaleSource { .. })));
    assert_eq!(svc.record().current_state(), State::Identify);
    assert_eq!(svc.metrics().dropped_stale, 2);
}

// ── Audit ─────────────────────────────────────────────────────

#[test]
fn audit_line_carries_elapsed_time() {
    let (mut svc, clock, mut sink) = make_service();
    clock.advance(Duration::from_secs(3_723));
    activate(&mut svc, &clock, &mut sink);
    request(&mut svc, &clock, &mut sink, TaskRequest::Pickup, 7).unwrap();

    let line = sink.audits().last().unwrap().to_string();
    assert_eq!(
        line,
        "[1:2:3] MODE: Pick Up, CURRENT STATE: P2P, LAST STATE: Idle, UPDATE: Input received"
    );
}
