//! The tick-driven state machine engine.

use super::config::MachineConfig;
use super::debug::{DebugCommand, DebugControls};
use super::error::MachineError;
use super::status::{status_line, MachineStatus, Phase, STATUS_KEY};
use crate::builder::{Sequence, SequenceBuilder};
use crate::control::DebouncedInput;
use crate::core::{
    Clock, ConfigError, ExecutionHistory, NextState, RangeInput, State, StateGraph, StateId,
    StepError, Telemetry,
};
use crate::states::DelayState;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, error, info, info_span, warn, Span};
use uuid::Uuid;

/// Name given to the delay inserted by [`StateMachine::add_start_delay`].
pub const START_DELAY_NAME: &str = "Delayed start";

/// Drives a graph of states one step per [`tick`](Self::tick).
///
/// The machine is assembled while `NotStarted`: states are registered and
/// linked, and the first state is chosen. The first tick starts it, and
/// from then on its structure is frozen.
///
/// With debugging enabled every transition pauses the machine on the new
/// state before it runs. While paused each tick calls the state's
/// `configure` hook and then reads the operator controls:
/// - *go* resumes from the current state,
/// - *go-back* rewinds to the previously executed state and resets it,
/// - *do-over* resets every state and returns to the first one.
///
/// # Example
///
/// ```rust
/// use statecraft::machine::StateMachine;
/// use statecraft::states::{RunnableStep, TerminalState};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let flag = Rc::new(Cell::new(false));
/// let mut machine = StateMachine::new("auto");
///
/// let set_flag = {
///     let flag = flag.clone();
///     machine.add_sequential(RunnableStep::new("set flag", move || flag.set(true))).unwrap()
/// };
/// machine.add_sequential(TerminalState::new("done", || {})).unwrap();
///
/// machine.tick().unwrap();
/// assert!(flag.get());
/// assert_eq!(machine.current_state_name(), Some("done"));
/// # let _ = set_flag;
/// ```
pub struct StateMachine {
    name: String,
    graph: StateGraph,
    first: Option<StateId>,
    current: Option<StateId>,
    last_sequential: Option<StateId>,
    phase: Phase,
    debugging: bool,
    history: ExecutionHistory,
    controls: DebugControls,
    configure_input: Option<Box<dyn RangeInput>>,
    telemetry: Option<Box<dyn Telemetry>>,
    ticks: u64,
    run_id: Option<Uuid>,
    span: Span,
}

impl StateMachine {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let span = info_span!("state_machine", machine = %name);
        Self {
            name,
            graph: StateGraph::new(),
            first: None,
            current: None,
            last_sequential: None,
            phase: Phase::NotStarted,
            debugging: false,
            history: ExecutionHistory::default(),
            controls: DebugControls::default(),
            configure_input: None,
            telemetry: None,
            ticks: 0,
            run_id: None,
            span,
        }
    }

    /// Build a machine from validated settings.
    pub fn from_config(config: &MachineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut machine = Self::new(config.name.clone());
        machine.history = ExecutionHistory::new(config.history_capacity, config.journal_capacity);
        machine.debugging = config.debug;
        Ok(machine)
    }

    /// Run every tick inside `span` instead of the machine's own span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn set_telemetry(&mut self, telemetry: impl Telemetry + 'static) {
        self.telemetry = Some(Box::new(telemetry));
    }

    // ---------------------------------------------------------------------
    // Assembly
    // ---------------------------------------------------------------------

    /// Register a state without linking it.
    pub fn add_state<S: State + 'static>(&mut self, state: S) -> Result<StateId, ConfigError> {
        self.ensure_not_running("add states")?;
        let id = self.graph.add(state)?;
        debug!(state = %self.graph.describe(id), "add state");
        Ok(id)
    }

    /// Set the state `from` moves to when it finishes.
    pub fn link(&mut self, from: StateId, to: StateId) -> Result<(), ConfigError> {
        self.ensure_not_running("link states")?;
        self.graph.link(from, to)?;
        debug!(
            from = %self.graph.describe(from),
            to = %self.graph.describe(to),
            "link next"
        );
        Ok(())
    }

    /// Set the state `from` falls back to, e.g. when a timeout elapses.
    pub fn link_fallback(&mut self, from: StateId, to: StateId) -> Result<(), ConfigError> {
        self.ensure_not_running("link states")?;
        self.graph.link_fallback(from, to)?;
        debug!(
            from = %self.graph.describe(from),
            to = %self.graph.describe(to),
            "link fallback"
        );
        Ok(())
    }

    /// Choose the state the first tick runs. Can only be done once.
    pub fn set_first_state(&mut self, id: StateId) -> Result<(), ConfigError> {
        self.ensure_not_running("set the first state")?;
        if self.first.is_some() {
            return Err(ConfigError::FirstStateAlreadySet);
        }
        if !self.graph.contains(id) {
            return Err(ConfigError::UnknownState(id));
        }

        debug!(state = %self.graph.describe(id), "set first state");
        self.first = Some(id);
        Ok(())
    }

    /// Register a state and link the previous sequential state to it.
    ///
    /// The first sequential state becomes the first state if none is set.
    pub fn add_sequential<S: State + 'static>(&mut self, state: S) -> Result<StateId, ConfigError> {
        self.ensure_not_running("add sequential states")?;
        let id = self.graph.add(state)?;
        debug!(state = %self.graph.describe(id), "add sequential");

        self.chain(id, id)?;
        Ok(id)
    }

    /// Start building a sequence inside this machine's graph.
    pub fn sequence(&mut self) -> Result<SequenceBuilder<'_>, ConfigError> {
        self.ensure_not_running("build sequences")?;
        Ok(SequenceBuilder::new(&mut self.graph))
    }

    /// Append a finished sequence after the previous sequential state.
    pub fn add_sequence(&mut self, sequence: Sequence) -> Result<(), ConfigError> {
        self.ensure_not_running("add sequences")?;
        for id in [sequence.first(), sequence.last()] {
            if !self.graph.contains(id) {
                return Err(ConfigError::UnknownState(id));
            }
        }

        debug!(
            first = %self.graph.describe(sequence.first()),
            last = %self.graph.describe(sequence.last()),
            states = sequence.len(),
            "add sequence"
        );
        self.chain(sequence.first(), sequence.last())
    }

    fn chain(&mut self, head: StateId, tail: StateId) -> Result<(), ConfigError> {
        if let Some(previous) = self.last_sequential {
            self.graph.link(previous, head)?;
        }
        if self.first.is_none() {
            self.first = Some(head);
        }
        self.last_sequential = Some(tail);
        Ok(())
    }

    /// Wait `delay` before running the first state.
    ///
    /// The delay becomes the new first state, so a do-over repeats it.
    pub fn add_start_delay(
        &mut self,
        delay: Duration,
        clock: impl Clock + 'static,
    ) -> Result<StateId, ConfigError> {
        self.ensure_not_running("add a start delay")?;
        let original = self.first.ok_or(ConfigError::NoFirstState)?;

        let id = self
            .graph
            .add(DelayState::new(START_DELAY_NAME, clock, delay))?;
        self.graph.link(id, original)?;
        self.first = Some(id);

        info!(delay_ms = delay.as_millis() as u64, "added start delay");
        Ok(id)
    }

    fn ensure_not_running(&self, operation: &'static str) -> Result<(), ConfigError> {
        if self.phase == Phase::NotStarted {
            Ok(())
        } else {
            Err(ConfigError::AlreadyRunning { operation })
        }
    }

    // ---------------------------------------------------------------------
    // Debugging
    // ---------------------------------------------------------------------

    pub fn start_debugging(&mut self) {
        self.debugging = true;
    }

    /// Stop pausing on transitions. A paused machine resumes on the next tick.
    pub fn stop_debugging(&mut self) {
        self.debugging = false;
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
    }

    pub fn set_go_button(&mut self, button: DebouncedInput) {
        self.controls.set_go(button);
    }

    pub fn set_go_back_button(&mut self, button: DebouncedInput) {
        self.controls.set_go_back(button);
    }

    pub fn set_do_over_button(&mut self, button: DebouncedInput) {
        self.controls.set_do_over(button);
    }

    /// Input handed to `configure` hooks while paused.
    pub fn set_configure_input(&mut self, input: impl RangeInput + 'static) {
        self.configure_input = Some(Box::new(input));
    }

    // ---------------------------------------------------------------------
    // Running
    // ---------------------------------------------------------------------

    /// Process exactly one step of the machine.
    ///
    /// Step failures are logged with the failing state and returned;
    /// configuration faults come back unchanged, anything else is wrapped
    /// in [`MachineError::Step`]. Nothing is retried.
    pub fn tick(&mut self) -> Result<(), MachineError> {
        let span = self.span.clone();
        let _entered = span.enter();

        if self.debugging {
            self.controls.validate()?;
        }
        self.ticks += 1;

        match self.phase {
            Phase::NotStarted => {
                self.start()?;
                self.run_current()?;
            }
            Phase::Running => self.run_current()?,
            Phase::Paused => self.run_paused()?,
        }

        self.report_status();
        Ok(())
    }

    fn start(&mut self) -> Result<(), ConfigError> {
        let first = self.first.ok_or(ConfigError::NoFirstState)?;
        let run_id = Uuid::new_v4();

        self.phase = Phase::Running;
        self.current = Some(first);
        self.history.restart(first);
        self.run_id = Some(run_id);

        info!(
            %run_id,
            first = %self.graph.describe(first),
            states = self.graph.len(),
            "state machine started"
        );
        Ok(())
    }

    fn run_current(&mut self) -> Result<(), MachineError> {
        let Some(current) = self.current else {
            warn!("nothing left to execute");
            return Ok(());
        };

        let next = self
            .graph
            .step(current, self.ticks, self.telemetry.as_deref())
            .map_err(|e| self.step_failed(current, e))?;

        match next {
            NextState::Same => {}
            NextState::Other(next) => {
                debug!(
                    from = %self.graph.describe(current),
                    to = %self.graph.describe(next),
                    tick = self.ticks,
                    "state transition"
                );
                self.history.record(current, next, self.ticks);
                self.current = Some(next);

                if self.debugging {
                    self.phase = Phase::Paused;
                    info!(state = %self.graph.describe(next), "paused before state");
                }
            }
            NextState::Halt => {
                info!(last = %self.graph.describe(current), "state machine halted");
                self.current = None;
            }
        }
        Ok(())
    }

    fn run_paused(&mut self) -> Result<(), MachineError> {
        let Some(current) = self.current else {
            warn!("nothing left to execute");
            return Ok(());
        };

        self.graph
            .configure(current, self.configure_input.as_deref())?;

        match self.controls.poll() {
            Some(DebugCommand::Go) => {
                info!(state = %self.graph.describe(current), "resumed");
                self.phase = Phase::Running;
            }
            Some(DebugCommand::GoBack) => {
                let target = self.history.step_back().unwrap_or(current);
                self.graph.reset(target)?;
                self.current = Some(target);
                info!(
                    from = %self.graph.describe(current),
                    to = %self.graph.describe(target),
                    "went back"
                );
            }
            Some(DebugCommand::DoOver) => {
                let first = self.first.ok_or(ConfigError::NoFirstState)?;
                self.graph.reset_all();
                self.history.restart(first);
                self.current = Some(first);
                info!(first = %self.graph.describe(first), "starting over");
            }
            None => {}
        }
        Ok(())
    }

    fn step_failed(&self, current: StateId, error: StepError) -> MachineError {
        let state = self.graph.name(current).unwrap_or_default().to_owned();
        let kind = self.graph.kind(current).unwrap_or("unknown");
        error!(%state, kind, tick = self.ticks, error = %error, "state step failed");

        match error {
            StepError::Config(config) => MachineError::Config(config),
            StepError::Failed(source) => MachineError::Step {
                state,
                kind,
                source,
            },
        }
    }

    fn report_status(&self) {
        if let Some(telemetry) = &self.telemetry {
            let line = status_line(self.debugging, self.phase, self.current_state_name());
            telemetry.report(STATUS_KEY, &line);
        }
    }

    // ---------------------------------------------------------------------
    // Inspection
    // ---------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the first tick has happened.
    pub fn is_running(&self) -> bool {
        self.phase != Phase::NotStarted
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_debugging(&self) -> bool {
        self.debugging
    }

    pub fn first_state(&self) -> Option<StateId> {
        self.first
    }

    /// `None` before the first tick and after the machine halts.
    pub fn current_state(&self) -> Option<StateId> {
        self.current
    }

    pub fn current_state_name(&self) -> Option<&str> {
        self.current.and_then(|id| self.graph.name(id))
    }

    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    pub fn history(&self) -> &ExecutionHistory {
        &self.history
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn run_id(&self) -> Option<Uuid> {
        self.run_id
    }

    pub fn status(&self) -> MachineStatus {
        let name_of = |id: StateId| self.graph.name(id).map(str::to_owned);
        MachineStatus {
            machine: self.name.clone(),
            run_id: self.run_id,
            phase: self.phase,
            debugging: self.debugging,
            ticks: self.ticks,
            first_state: self.first.and_then(name_of),
            current_state: self.current.and_then(name_of),
            history: self.history.stack().filter_map(name_of).collect(),
            journaled_transitions: self.history.records().count(),
            captured_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StepContext, Transition};
    use crate::states::{RunnableStep, TerminalState};
    use crate::testing::{FakeClock, RecordingTelemetry};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Passthrough(&'static str);

    impl State for Passthrough {
        fn name(&self) -> &str {
            self.0
        }

        fn step(&mut self, _ctx: &mut StepContext<'_>) -> Result<Transition, StepError> {
            Ok(Transition::Next)
        }

        fn reset(&mut self) {}
    }

    #[test]
    fn normal_operation() {
        let telemetry = RecordingTelemetry::new();
        let mut machine = StateMachine::new("test");
        machine.set_telemetry(telemetry.clone());

        let start = machine.add_state(Passthrough("start")).unwrap();
        let state2 = machine.add_state(Passthrough("state2")).unwrap();
        let state3 = machine.add_state(Passthrough("state3")).unwrap();
        machine.link(start, state2).unwrap();
        machine.link(state2, state3).unwrap();
        machine.set_first_state(start).unwrap();

        assert_eq!(machine.current_state_name(), None);

        machine.tick().unwrap();
        assert_eq!(telemetry.get(STATUS_KEY).as_deref(), Some("> state state2"));
        assert_eq!(machine.current_state_name(), Some("state2"));

        machine.tick().unwrap();
        assert_eq!(telemetry.get(STATUS_KEY).as_deref(), Some("> state state3"));
        assert_eq!(machine.current_state_name(), Some("state3"));

        machine.tick().unwrap();
        assert_eq!(machine.current_state(), None);
        assert_eq!(telemetry.get(STATUS_KEY).as_deref(), Some("> halted"));

        // halted machines tick as a no-op
        machine.tick().unwrap();
        assert_eq!(machine.ticks(), 4);
    }

    #[test]
    fn first_state_is_set_once() {
        let mut machine = StateMachine::new("test");
        let a = machine.add_state(Passthrough("a")).unwrap();

        machine.set_first_state(a).unwrap();
        assert_eq!(
            machine.set_first_state(a),
            Err(ConfigError::FirstStateAlreadySet)
        );

        machine.tick().unwrap();
        assert_eq!(
            machine.set_first_state(a),
            Err(ConfigError::AlreadyRunning {
                operation: "set the first state"
            })
        );
    }

    #[test]
    fn structure_is_frozen_once_running() {
        let clock = FakeClock::new();
        let mut machine = StateMachine::new("test");
        let a = machine.add_sequential(Passthrough("a")).unwrap();
        machine.tick().unwrap();

        assert!(matches!(
            machine.add_state(Passthrough("b")),
            Err(ConfigError::AlreadyRunning { .. })
        ));
        assert!(matches!(
            machine.add_sequential(Passthrough("b")),
            Err(ConfigError::AlreadyRunning { .. })
        ));
        assert!(matches!(
            machine.link(a, a),
            Err(ConfigError::AlreadyRunning { .. })
        ));
        assert!(matches!(
            machine.add_start_delay(Duration::from_secs(1), clock),
            Err(ConfigError::AlreadyRunning { .. })
        ));
        assert!(machine.sequence().is_err());
    }

    #[test]
    fn tick_without_first_state_is_a_config_fault() {
        let mut machine = StateMachine::new("empty");
        let err = machine.tick().unwrap_err();
        assert!(matches!(err, MachineError::Config(ConfigError::NoFirstState)));
        assert!(err.is_config());
    }

    #[test]
    fn runnable_first_state_runs_on_first_tick() {
        let flag = Rc::new(Cell::new(false));
        let mut machine = StateMachine::new("test");
        let state = machine
            .add_state(RunnableStep::new("set flag", {
                let flag = flag.clone();
                move || flag.set(true)
            }))
            .unwrap();
        machine.set_first_state(state).unwrap();

        assert!(!flag.get());
        machine.tick().unwrap();
        assert!(flag.get());
    }

    #[test]
    fn step_failures_are_wrapped_with_context() {
        let mut machine = StateMachine::new("test");
        machine
            .add_sequential(RunnableStep::fallible("grab", || Err("claw jammed".into())))
            .unwrap();

        let err = machine.tick().unwrap_err();
        match &err {
            MachineError::Step { state, kind, .. } => {
                assert_eq!(state, "grab");
                assert_eq!(*kind, "RunnableStep");
            }
            other => panic!("Expected a step failure, got {other:?}"),
        }
        assert_eq!(err.to_string(), "State RunnableStep - 'grab' failed: claw jammed");
        assert!(std::error::Error::source(&err).is_some());

        // the failing state is still current; nothing was skipped
        assert_eq!(machine.current_state_name(), Some("grab"));
    }

    #[test]
    fn config_faults_from_steps_pass_through() {
        struct Lost;

        impl State for Lost {
            fn name(&self) -> &str {
                "lost"
            }

            fn step(&mut self, _ctx: &mut StepContext<'_>) -> Result<Transition, StepError> {
                Ok(Transition::Goto(StateId::detached(42)))
            }

            fn reset(&mut self) {}
        }

        let mut machine = StateMachine::new("test");
        machine.add_sequential(Lost).unwrap();

        let err = machine.tick().unwrap_err();
        assert!(matches!(
            err,
            MachineError::Config(ConfigError::UnknownState(id)) if id == StateId::detached(42)
        ));
    }

    #[test]
    fn start_delay_holds_back_the_first_state() {
        let clock = FakeClock::new();
        let runs = Rc::new(Cell::new(0));
        let mut machine = StateMachine::new("test");
        machine
            .add_sequential(RunnableStep::new("go", {
                let runs = runs.clone();
                move || runs.set(runs.get() + 1)
            }))
            .unwrap();
        let delay = machine
            .add_start_delay(Duration::from_millis(500), clock.clone())
            .unwrap();

        assert_eq!(machine.first_state(), Some(delay));
        assert_eq!(machine.graph().name(delay), Some(START_DELAY_NAME));

        machine.tick().unwrap();
        clock.advance_millis(400);
        machine.tick().unwrap();
        assert_eq!(machine.current_state_name(), Some(START_DELAY_NAME));

        clock.advance_millis(200);
        machine.tick().unwrap();
        assert_eq!(machine.current_state_name(), Some("go"));
        assert_eq!(runs.get(), 0);

        machine.tick().unwrap();
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn start_delay_needs_a_first_state() {
        let mut machine = StateMachine::new("test");
        assert_eq!(
            machine.add_start_delay(Duration::from_secs(1), FakeClock::new()),
            Err(ConfigError::NoFirstState)
        );
    }

    #[test]
    fn sequences_chain_after_sequential_states() {
        let mut machine = StateMachine::new("test");
        let head = machine.add_sequential(Passthrough("head")).unwrap();

        let sequence = {
            let mut seq = machine.sequence().unwrap();
            seq.append(Passthrough("one")).unwrap();
            seq.append(Passthrough("two")).unwrap();
            seq.finish().unwrap()
        };
        machine.add_sequence(sequence).unwrap();
        let tail = machine.add_sequential(TerminalState::new("tail", || {})).unwrap();

        assert_eq!(machine.first_state(), Some(head));
        assert_eq!(machine.graph().next(head), Some(sequence.first()));
        assert_eq!(machine.graph().next(sequence.last()), Some(tail));

        for _ in 0..4 {
            machine.tick().unwrap();
        }
        assert_eq!(machine.current_state_name(), Some("tail"));
    }

    #[test]
    fn first_sequence_becomes_the_first_state() {
        let mut machine = StateMachine::new("test");
        let sequence = {
            let mut seq = machine.sequence().unwrap();
            seq.append(Passthrough("only")).unwrap();
            seq.finish().unwrap()
        };

        machine.add_sequence(sequence).unwrap();
        assert_eq!(machine.first_state(), Some(sequence.first()));
    }

    #[test]
    fn history_tracks_transitions() {
        let mut machine = StateMachine::new("test");
        machine.add_sequential(Passthrough("a")).unwrap();
        machine.add_sequential(Passthrough("b")).unwrap();
        machine.add_sequential(TerminalState::new("c", || {})).unwrap();

        machine.tick().unwrap();
        machine.tick().unwrap();
        machine.tick().unwrap();

        let names: Vec<_> = machine
            .history()
            .stack()
            .filter_map(|id| machine.graph().name(id))
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(machine.history().records().count(), 2);
    }

    #[test]
    fn status_snapshot_reflects_the_machine() {
        let mut machine = StateMachine::new("auto");
        machine.add_sequential(Passthrough("a")).unwrap();
        machine.add_sequential(TerminalState::new("b", || {})).unwrap();

        let before = machine.status();
        assert_eq!(before.phase, Phase::NotStarted);
        assert_eq!(before.run_id, None);
        assert_eq!(before.first_state.as_deref(), Some("a"));

        machine.tick().unwrap();
        let after = machine.status();
        assert_eq!(after.machine, "auto");
        assert_eq!(after.phase, Phase::Running);
        assert!(after.run_id.is_some());
        assert_eq!(after.current_state.as_deref(), Some("b"));
        assert_eq!(after.history, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(after.journaled_transitions, 1);
        assert_eq!(after.line(), "> state b");
        assert!(after.to_json().unwrap().contains("\"machine\":\"auto\""));
    }

    #[test]
    fn from_config_applies_settings() {
        let config = MachineConfig {
            name: "teleop".to_string(),
            debug: true,
            history_capacity: 8,
            journal_capacity: 0,
        };

        let machine = StateMachine::from_config(&config).unwrap();
        assert_eq!(machine.name(), "teleop");
        assert!(machine.is_debugging());

        let invalid = MachineConfig {
            history_capacity: 0,
            ..MachineConfig::default()
        };
        assert!(matches!(
            StateMachine::from_config(&invalid),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn sequences_from_another_machine_are_rejected() {
        let mut donor = StateMachine::new("donor");
        let sequence = {
            let mut seq = donor.sequence().unwrap();
            seq.append(Passthrough("a1")).unwrap();
            seq.append(Passthrough("a2")).unwrap();
            seq.finish().unwrap()
        };

        let mut machine = StateMachine::new("target");
        machine.add_state(Passthrough("b0")).unwrap();
        machine.add_state(Passthrough("b1")).unwrap();

        assert_eq!(
            machine.add_sequence(sequence),
            Err(ConfigError::UnknownState(sequence.first()))
        );
        assert_eq!(machine.first_state(), None);
    }

    #[test]
    fn handles_from_another_machine_are_rejected() {
        let mut other = StateMachine::new("other");
        let foreign = other.add_state(Passthrough("x")).unwrap();

        let mut machine = StateMachine::new("target");
        let own = machine.add_state(Passthrough("a")).unwrap();
        assert_eq!(foreign.index(), own.index());

        assert_eq!(
            machine.set_first_state(foreign),
            Err(ConfigError::UnknownState(foreign))
        );
        assert_eq!(machine.link(own, foreign), Err(ConfigError::UnknownState(foreign)));
        assert_eq!(
            machine.link_fallback(foreign, own),
            Err(ConfigError::UnknownState(foreign))
        );
        assert_eq!(machine.first_state(), None);
        assert_eq!(machine.graph().next(own), None);
    }

    #[test]
    fn rejected_ticks_are_not_counted() {
        let mut machine = StateMachine::new("test");
        machine.add_sequential(Passthrough("a")).unwrap();
        machine.start_debugging();

        assert!(machine.tick().is_err());
        assert!(machine.tick().is_err());
        assert_eq!(machine.ticks(), 0);
        assert_eq!(machine.phase(), Phase::NotStarted);

        machine.stop_debugging();
        machine.tick().unwrap();
        assert_eq!(machine.ticks(), 1);
    }

    #[test]
    fn run_id_is_drawn_on_start() {
        let mut machine = StateMachine::new("test");
        machine.add_sequential(TerminalState::new("hold", || {})).unwrap();
        assert_eq!(machine.run_id(), None);

        machine.tick().unwrap();
        let run_id = machine.run_id();
        assert!(run_id.is_some());

        machine.tick().unwrap();
        assert_eq!(machine.run_id(), run_id);
        assert_eq!(machine.status().run_id, run_id);

        let mut other = StateMachine::new("other");
        other.add_sequential(TerminalState::new("hold", || {})).unwrap();
        other.tick().unwrap();
        assert_ne!(other.run_id(), run_id);
    }

    #[test]
    fn ticks_run_inside_a_caller_span() {
        let steps = Rc::new(Cell::new(0));
        let counter = steps.clone();
        let mut machine =
            StateMachine::new("test").with_span(info_span!("match", number = 7));
        machine
            .add_sequential(RunnableStep::new("count", move || counter.set(counter.get() + 1)))
            .unwrap();
        machine.add_sequential(TerminalState::new("hold", || {})).unwrap();

        machine.tick().unwrap();
        machine.tick().unwrap();
        assert_eq!(steps.get(), 1);
        assert_eq!(machine.current_state_name(), Some("hold"));
        assert_eq!(machine.ticks(), 2);
    }
}
