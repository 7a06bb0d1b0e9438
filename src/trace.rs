//! Signal tracing: an observational side channel for key presses.
//!
//! A [`SignalPath`](crate::SignalPath) owns its tracer, chosen when the
//! machine is built. Nothing in the pipeline depends on what the tracer does.

use std::fmt;

use crate::contact::Contact;

/// Pipeline stage a traced signal passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage<'a> {
    /// Plugboard on the way in.
    PlugboardIn,
    /// Rotor on the right-to-left leg.
    RotorForward(&'a str),
    /// Reflector.
    Reflector(&'a str),
    /// Rotor on the left-to-right leg.
    RotorReverse(&'a str),
    /// Plugboard on the way out.
    PlugboardOut,
}

impl fmt::Display for Stage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::PlugboardIn => write!(f, "plugboard in"),
            Stage::RotorForward(name) => write!(f, "rotor {} forward", name),
            Stage::Reflector(name) => write!(f, "reflector {}", name),
            Stage::RotorReverse(name) => write!(f, "rotor {} reverse", name),
            Stage::PlugboardOut => write!(f, "plugboard out"),
        }
    }
}

/// One trace line, shared by every tracer that prints.
fn format_signal(stage: Stage<'_>, input: Contact, output: Contact) -> String {
    format!("{}: {} -> {}", stage, input, output)
}

fn format_positions(label: &str, positions: &[Contact]) -> String {
    let window: String = positions.iter().map(|c| c.to_char()).collect();
    format!("{} {}", label, window)
}

/// Receiver for per-key-press diagnostics.
pub trait SignalTracer {
    /// Window letters (left to right) before or after stepping.
    fn rotor_positions(&mut self, label: &str, positions: &[Contact]);

    /// A signal entered `stage` as `input` and left as `output`.
    fn signal(&mut self, stage: Stage<'_>, input: Contact, output: Contact);
}

/// Forwards traces to the `log` facade at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTracer;

impl SignalTracer for LogTracer {
    fn rotor_positions(&mut self, label: &str, positions: &[Contact]) {
        if log::log_enabled!(target: "enigma_engine::signal", log::Level::Trace) {
            log::trace!(target: "enigma_engine::signal", "{}", format_positions(label, positions));
        }
    }

    fn signal(&mut self, stage: Stage<'_>, input: Contact, output: Contact) {
        if log::log_enabled!(target: "enigma_engine::signal", log::Level::Trace) {
            log::trace!(target: "enigma_engine::signal", "{}", format_signal(stage, input, output));
        }
    }
}

/// Discards every trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTracer;

impl SignalTracer for NullTracer {
    fn rotor_positions(&mut self, _label: &str, _positions: &[Contact]) {}

    fn signal(&mut self, _stage: Stage<'_>, _input: Contact, _output: Contact) {}
}

/// Records every trace as a line of text.
#[derive(Debug, Clone, Default)]
pub struct RecordingTracer {
    lines: Vec<String>,
}

impl RecordingTracer {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        RecordingTracer::default()
    }

    /// Recorded lines, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Drops all recorded lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl SignalTracer for RecordingTracer {
    fn rotor_positions(&mut self, label: &str, positions: &[Contact]) {
        self.lines.push(format_positions(label, positions));
    }

    fn signal(&mut self, stage: Stage<'_>, input: Contact, output: Contact) {
        self.lines.push(format_signal(stage, input, output));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_tracer_formats() {
        let mut tracer = RecordingTracer::new();
        tracer.rotor_positions("before", &[Contact::A, Contact::B, Contact::C]);
        tracer.signal(Stage::RotorForward("III"), Contact::A, Contact::C);
        tracer.signal(Stage::Reflector("B"), Contact::C, Contact::U);
        assert_eq!(
            tracer.lines(),
            &[
                "before ABC".to_string(),
                "rotor III forward: A -> C".to_string(),
                "reflector B: C -> U".to_string(),
            ]
        );
        tracer.clear();
        assert!(tracer.lines().is_empty());
    }

    #[test]
    fn test_stage_display_matches_recorded_lines() {
        assert_eq!(Stage::RotorForward("III").to_string(), "rotor III forward");
        assert_eq!(Stage::RotorReverse("I").to_string(), "rotor I reverse");
        assert_eq!(Stage::Reflector("B-thin").to_string(), "reflector B-thin");
        assert_eq!(Stage::PlugboardIn.to_string(), "plugboard in");
        assert_eq!(
            format_signal(Stage::PlugboardOut, Contact::B, Contact::Q),
            "plugboard out: B -> Q"
        );

        let mut tracer = RecordingTracer::new();
        tracer.signal(Stage::RotorReverse("II"), Contact::D, Contact::K);
        assert_eq!(
            tracer.lines()[0],
            format_signal(Stage::RotorReverse("II"), Contact::D, Contact::K)
        );
    }

    #[test]
    fn test_log_and_null_tracers_accept_input() {
        let mut log_tracer = LogTracer;
        log_tracer.rotor_positions("after", &[Contact::Z]);
        log_tracer.signal(Stage::PlugboardOut, Contact::A, Contact::B);
        let mut null = NullTracer;
        null.signal(Stage::PlugboardIn, Contact::A, Contact::B);
    }
}
