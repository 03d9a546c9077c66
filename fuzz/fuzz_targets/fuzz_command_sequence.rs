//! Fuzz target: arbitrary health/command sequences through the service.
//!
//! Each input byte pair is decoded into one event.  After every event the
//! status record must satisfy the emergency/suspended pairing and the
//! Standby-only-rests-in-Idle rule.
//!
//! cargo fuzz run fuzz_command_sequence

#![no_main]

use std::time::Duration;

use align_chassis::app::commands::{CommandEvent, TaskRequest};
use align_chassis::app::events::AppEvent;
use align_chassis::app::ports::{EventSink, TimePort};
use align_chassis::app::service::ChassisService;
use align_chassis::config::ControllerConfig;
use align_chassis::events::Event;
use align_chassis::fsm::{OperationMode, State, TransitionCondition};
use align_chassis::ingress;
use align_chassis::safety::HealthSignal;
use libfuzzer_sys::fuzz_target;

struct NullSink;
impl EventSink for NullSink {
    fn emit(&mut self, _: &AppEvent) {}
}

struct ZeroClock;
impl TimePort for ZeroClock {
    fn elapsed(&self) -> Duration {
        Duration::ZERO
    }
}

fn decode(op: u8, arg: u8, current: State) -> Event {
    match op % 4 {
        0 => Event::Health(if arg & 1 == 0 { HealthSignal::Pass } else { HealthSignal::Fail }),
        1 => Event::PublishTick,
        _ => {
            // Half the commands track the live state so runs get past ingress.
            let source_state = if op & 0x80 == 0 {
                current
            } else {
                State::try_from(arg % State::COUNT as u8).unwrap_or(current)
            };
            let condition = match arg % 3 {
                0 => TransitionCondition::Success,
                1 => TransitionCondition::Failure,
                _ => TransitionCondition::None,
            };
            let request = TaskRequest::try_from((arg >> 2) % 5).ok();
            Event::Command(CommandEvent {
                source_state,
                request,
                condition,
                payload: u32::from(arg),
            })
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let mut svc = ChassisService::new(&ControllerConfig::default());

    for pair in data.chunks_exact(2) {
        let event = decode(pair[0], pair[1], svc.record().current_state());

        if let Event::Command(cmd) = event {
            let admitted = ingress::admit(svc.interlock_active(), svc.record().current_state(), cmd);
            assert_eq!(admitted.is_ok(), svc.interlock_active() && cmd.source_state == svc.record().current_state());
        }

        svc.dispatch(event, &ZeroClock, &mut NullSink);

        let r = svc.record();
        assert_eq!(r.current_state() == State::EmergencyHandling, r.suspended_state().is_some());
        if r.operation_mode() == OperationMode::Standby {
            assert!(matches!(r.current_state(), State::Idle | State::EmergencyHandling));
        }
    }
});
